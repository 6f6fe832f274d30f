//! Staircase controller: drives one session to termination
//!
//! Per trial: generate a sequence (honoring the no-repeat constraint), hand
//! it to the presentation collaborator, collect the typed recall, score it,
//! and apply the staircase decision. The controller announces the direction
//! switch, shows the summary at termination, and persists the result record
//! for measured sessions, never for practice.

use crate::results::ResultRecord;
use crate::sequence::{generator, Sequence};
use crate::session::errors::SessionError;
use crate::session::scoring;
use crate::session::state::{Direction, SessionSummary, TestSession, TrialDecision};
use rand::Rng;

/// Shows sequences and session notices to the subject
pub trait Presenter {
    /// Show each digit for a fixed interval, in presentation order
    fn show_sequence(&mut self, sequence: &Sequence) -> Result<(), SessionError>;
    /// Notice shown once, when the backward half begins
    fn announce_backward(&mut self) -> Result<(), SessionError>;
    /// Completion screen (shown for practice and measured alike)
    fn show_summary(&mut self, summary: &SessionSummary) -> Result<(), SessionError>;
}

/// Delivers the subject's typed recall
pub trait AnswerSource {
    /// Block until the subject submits an answer
    fn collect_answer(&mut self, direction: Direction) -> Result<String, SessionError>;
}

/// Receives the final record of a measured session
pub trait ResultSink {
    fn persist(&mut self, record: &ResultRecord) -> Result<(), SessionError>;
}

/// Runs the staircase against the three collaborators
pub struct Controller<'a, R, P, I, S> {
    session: TestSession,
    rng: &'a mut R,
    presenter: &'a mut P,
    input: &'a mut I,
    sink: &'a mut S,
}

impl<'a, R, P, I, S> Controller<'a, R, P, I, S>
where
    R: Rng,
    P: Presenter,
    I: AnswerSource,
    S: ResultSink,
{
    pub fn new(
        session: TestSession,
        rng: &'a mut R,
        presenter: &'a mut P,
        input: &'a mut I,
        sink: &'a mut S,
    ) -> Self {
        Controller {
            session,
            rng,
            presenter,
            input,
            sink,
        }
    }

    /// Run trials until the session terminates, then emit summary and record.
    /// Returns the finished session.
    pub fn run(mut self) -> Result<TestSession, SessionError> {
        while !self.session.is_finished() {
            self.run_trial()?;
        }

        self.presenter.show_summary(&self.session.summary())?;
        if let Some(record) = self.session.result_record() {
            self.sink.persist(&record)?;
        }
        Ok(self.session)
    }

    /// One generate / present / collect / evaluate cycle
    fn run_trial(&mut self) -> Result<(), SessionError> {
        let direction = self.session.direction();
        let sequence = generator::generate(
            self.rng,
            self.session.sequence_length(),
            self.session.last_sequence(),
        );

        self.presenter.show_sequence(&sequence)?;
        let answer = self.input.collect_answer(direction)?;
        let correct = scoring::is_correct(&sequence, direction, &answer);

        let length = sequence.len();
        let decision = self.session.apply_trial(sequence, correct)?;
        tracing::debug!(?direction, length, correct, ?decision, "trial evaluated");

        if decision == TrialDecision::SwitchDirection {
            self.presenter.announce_backward()?;
        }
        Ok(())
    }
}
