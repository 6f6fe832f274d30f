//! Keystroke input handling using crossterm
//!
//! Features:
//! - Raw-mode line editing with echo and backspace
//! - Single-key menu selection
//! - Esc / Ctrl+C abort, surfaced as SessionError::Interrupted

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    cursor, execute,
    style::Print,
};
use std::io::{stdout, Result as IoResult, Write};
use std::time::Duration;

use crate::session::{AnswerSource, Direction, SessionError};

/// Handles user input from terminal
pub struct InputHandler {
    /// Timeout for poll operations
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with default timeout (50ms for responsive input)
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Block until the next key press
    fn read_key(&self) -> Result<KeyEvent, SessionError> {
        loop {
            if event::poll(self.poll_timeout)? {
                if let event::Event::Key(key_event) = event::read()? {
                    return Ok(key_event);
                }
            }
        }
    }

    /// Check if key event is an exit signal (Ctrl+C or Escape)
    fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }

    /// Convert key event to plain character (no Ctrl/Alt modifiers)
    fn key_to_char(key: &KeyEvent) -> Option<char> {
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    /// Read a full line with echo. Enter submits, Backspace edits,
    /// Esc/Ctrl+C aborts.
    pub fn read_line(&self, prompt: &str) -> Result<String, SessionError> {
        let mut stdout = stdout();
        execute!(stdout, Print(prompt))?;
        stdout.flush()?;

        let mut buffer = String::new();
        loop {
            let key = self.read_key()?;
            if Self::is_exit(&key) {
                return Err(SessionError::Interrupted);
            }
            match key.code {
                KeyCode::Enter => {
                    execute!(stdout, Print("\r\n"))?;
                    return Ok(buffer);
                }
                KeyCode::Backspace => {
                    if buffer.pop().is_some() {
                        execute!(stdout, cursor::MoveLeft(1), Print(' '), cursor::MoveLeft(1))?;
                        stdout.flush()?;
                    }
                }
                _ => {
                    if let Some(c) = Self::key_to_char(&key) {
                        buffer.push(c);
                        execute!(stdout, Print(c))?;
                        stdout.flush()?;
                    }
                }
            }
        }
    }

    /// Wait for one of the allowed keys (case-insensitive)
    pub fn read_choice(&self, allowed: &[char]) -> Result<char, SessionError> {
        loop {
            let key = self.read_key()?;
            if Self::is_exit(&key) {
                return Err(SessionError::Interrupted);
            }
            if let Some(c) = Self::key_to_char(&key) {
                let c = c.to_ascii_lowercase();
                if allowed.contains(&c) {
                    return Ok(c);
                }
            }
        }
    }

    /// Wait for any key press
    pub fn wait_for_key(&self) -> Result<(), SessionError> {
        self.read_key().map(|_| ())
    }
}

impl AnswerSource for InputHandler {
    fn collect_answer(&mut self, direction: Direction) -> Result<String, SessionError> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            Print(format!("Input the numbers {}:\r\n", direction.as_str())),
        )?;
        stdout.flush()?;
        self.read_line("> ")
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
