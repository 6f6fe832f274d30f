//! Session Management: Staircase state, scoring, and the trial loop
//!
//! # Components
//! - `state.rs`: TestSession struct and the staircase decision rules
//! - `scoring.rs`: Expected-answer computation and exact-match scoring
//! - `controller.rs`: Trial loop driving the collaborator traits
//! - `errors.rs`: SessionError

pub mod controller;
pub mod errors;
pub mod scoring;
pub mod state;

pub use controller::{AnswerSource, Controller, Presenter, ResultSink};
pub use errors::SessionError;
pub use state::{Direction, Mode, SessionSummary, TestSession};

// Consumed directly from state:: by the controller
#[allow(unused_imports)]
pub use state::TrialDecision;
