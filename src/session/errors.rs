//! Session error types
//!
//! The staircase itself has no fault path: malformed recall input is just an
//! incorrect trial. Errors cover the session boundary (empty identifier,
//! trials after termination), user aborts, and collaborator I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// A session must be identified by a non-empty subject id
    #[error("subject identifier must not be empty")]
    EmptyIdentifier,

    /// A terminated session accepts no further trials
    #[error("session is already finished")]
    SessionFinished,

    /// The subject aborted the session (Esc / Ctrl+C)
    #[error("session interrupted by subject")]
    Interrupted,

    /// Terminal or result-file I/O failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
