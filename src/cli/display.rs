//! Terminal display and UI rendering
//!
//! Features:
//! - Timed digit-by-digit sequence presentation
//! - Intro, menu, and direction-switch notices
//! - Completion screen with span scores

use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::thread;
use std::time::Duration;

use crate::sequence::Sequence;
use crate::session::{Presenter, SessionError, SessionSummary};

/// How long the backward notice stays on screen
const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Terminal display manager
pub struct Display {
    /// How long each digit stays on screen
    digit_interval: Duration,
}

impl Display {
    /// Create display with the given per-digit interval
    pub fn new(digit_interval: Duration) -> Self {
        Display { digit_interval }
    }

    /// Clear screen
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Title and instruction screen
    pub fn show_intro(&self) -> Result<(), SessionError> {
        self.clear()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::Cyan),
            Print("Digit Span Test for Working Memory Evaluation\r\n"),
            ResetColor,
            cursor::MoveTo(0, 3),
            Print("Try to remember the digits in the order they are presented\r\n"),
            Print("and repeat them once the sequence has stopped.\r\n"),
            Print("If successful, the length of the sequence will increase by 1.\r\n"),
            Print("We will start out with 2 digits.\r\n"),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Mode selection menu
    pub fn show_menu(&self) -> Result<(), SessionError> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 9),
            SetForegroundColor(Color::Magenta),
            Print("Choose: "),
            ResetColor,
            Print("[p] Practice  [1] Pre-test  [2] Post-test  [q] Quit\r\n"),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Single centered digit
    fn show_digit(&self, digit: u8) -> Result<(), SessionError> {
        self.clear()?;
        let (cols, rows) = terminal::size()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(cols / 2, rows / 2),
            SetForegroundColor(Color::Blue),
            Print(digit),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }
}

impl Presenter for Display {
    /// Show each digit for the configured interval, then clear for recall
    fn show_sequence(&mut self, sequence: &Sequence) -> Result<(), SessionError> {
        for &digit in sequence.digits() {
            self.show_digit(digit)?;
            thread::sleep(self.digit_interval);
        }
        self.clear()?;
        Ok(())
    }

    fn announce_backward(&mut self) -> Result<(), SessionError> {
        self.clear()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::Yellow),
            Print("Now, input the numbers backwards.\r\n"),
            ResetColor
        )?;
        stdout.flush()?;
        thread::sleep(NOTICE_DURATION);
        Ok(())
    }

    fn show_summary(&mut self, summary: &SessionSummary) -> Result<(), SessionError> {
        self.clear()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::Cyan),
            Print(format!("Test complete, {}!\r\n", summary.subject_id)),
            ResetColor,
            Print("\r\n"),
            Print(format!(
                "Max Forward Length: {}\r\n",
                summary.max_forward_length
            )),
            Print(format!(
                "Max Backward Length: {}\r\n",
                summary.max_backward_length
            )),
            Print(format!(
                "Combined Test Score: {}\r\n",
                summary.combined_score
            )),
        )?;
        if summary.practice {
            execute!(
                stdout,
                SetForegroundColor(Color::Green),
                Print("\r\nPractice Complete!\r\n"),
                ResetColor
            )?;
        }
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print("\r\nPress any key to continue...\r\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            digit_interval: Duration::from_secs(1),
        }
    }
}
