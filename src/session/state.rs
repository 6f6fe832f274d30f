//! Staircase session state
//!
//! Maintains:
//! - Recall direction and current sequence length
//! - Attempt / correct counters for the two-attempts-per-length rule
//! - Max achieved span per direction
//! - The previous sequence (to forbid immediate repetition)
//!
//! The state is a single mutable struct owned exclusively by the controller;
//! every trial goes through [`TestSession::apply_trial`], which returns the
//! decision for the next step.

use crate::results::record::{Phase, ResultRecord};
use crate::sequence::Sequence;
use crate::session::errors::SessionError;

/// Sequences start at two digits in each direction.
pub const START_LENGTH: usize = 2;

/// Trials granted at each (direction, length) pair.
pub const ATTEMPTS_PER_LENGTH: u8 = 2;

/// Practice stops once this length has been passed in a direction.
pub const PRACTICE_CEILING: usize = 3;

/// Recall direction for the current half of the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Repeat digits in presentation order
    Forward,
    /// Repeat digits in reverse order
    Backward,
}

impl Direction {
    /// Word used in subject-facing prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forwards",
            Direction::Backward => "backwards",
        }
    }
}

/// Session mode: familiarization or a persisted measurement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Bounded, non-persisted familiarization run
    Practice,
    /// Pre- or post-phase run whose result is persisted
    Measured(Phase),
}

impl Mode {
    pub fn is_practice(&self) -> bool {
        matches!(self, Mode::Practice)
    }
}

/// Outcome of evaluating one trial
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrialDecision {
    /// Second trial at the same (direction, length) pair
    Retry,
    /// Length passed; continue at the next length, same direction
    Advance,
    /// Forward half is over; restart at length 2 going backwards
    SwitchDirection,
    /// Session terminated
    Finish,
}

/// Read-only view for the completion screen
#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub subject_id: String,
    pub practice: bool,
    pub max_forward_length: usize,
    pub max_backward_length: usize,
    pub combined_score: usize,
}

/// Complete state of one staircase run
#[derive(Clone, Debug)]
pub struct TestSession {
    subject_id: String,
    mode: Mode,
    direction: Direction,
    sequence_length: usize,
    attempts_at_length: u8,
    correct_at_length: u8,
    max_forward_length: usize,
    max_backward_length: usize,
    last_sequence: Option<Sequence>,
    finished: bool,
}

impl TestSession {
    /// Create a session. The subject id is trimmed and must be non-empty.
    pub fn new(subject_id: &str, mode: Mode) -> Result<Self, SessionError> {
        let subject_id = subject_id.trim();
        if subject_id.is_empty() {
            return Err(SessionError::EmptyIdentifier);
        }

        Ok(TestSession {
            subject_id: subject_id.to_string(),
            mode,
            direction: Direction::Forward,
            sequence_length: START_LENGTH,
            attempts_at_length: 0,
            correct_at_length: 0,
            max_forward_length: 0,
            max_backward_length: 0,
            last_sequence: None,
            finished: false,
        })
    }

    #[allow(dead_code)]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    pub fn max_forward_length(&self) -> usize {
        self.max_forward_length
    }

    pub fn max_backward_length(&self) -> usize {
        self.max_backward_length
    }

    /// Previous trial's sequence, forbidden for the next generation
    pub fn last_sequence(&self) -> Option<&Sequence> {
        self.last_sequence.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Record one presented sequence and whether the recall was correct,
    /// then decide the next step of the staircase.
    ///
    /// At most two trials run at each (direction, length) pair. One correct
    /// trial passes the length; failing both switches direction (from
    /// Forward) or terminates (from Backward). Practice additionally stops a
    /// direction once the length passed exceeds [`PRACTICE_CEILING`].
    pub fn apply_trial(
        &mut self,
        sequence: Sequence,
        correct: bool,
    ) -> Result<TrialDecision, SessionError> {
        if self.finished {
            return Err(SessionError::SessionFinished);
        }

        self.last_sequence = Some(sequence);
        self.attempts_at_length += 1;
        if correct {
            self.correct_at_length += 1;
        }

        if self.attempts_at_length < ATTEMPTS_PER_LENGTH {
            return Ok(TrialDecision::Retry);
        }

        // Attempt budget exhausted: decide.
        if self.correct_at_length >= 1 {
            match self.direction {
                Direction::Forward => {
                    self.max_forward_length = self.max_forward_length.max(self.sequence_length);
                }
                Direction::Backward => {
                    self.max_backward_length = self.max_backward_length.max(self.sequence_length);
                }
            }
            self.attempts_at_length = 0;
            self.correct_at_length = 0;
            self.sequence_length += 1;

            if self.mode.is_practice() && self.sequence_length > PRACTICE_CEILING {
                return Ok(self.switch_or_finish());
            }
            Ok(TrialDecision::Advance)
        } else {
            Ok(self.switch_or_finish())
        }
    }

    /// Leave the current direction: flip Forward to Backward once, terminate
    /// from Backward. The flip resets length and counters.
    fn switch_or_finish(&mut self) -> TrialDecision {
        match self.direction {
            Direction::Forward => {
                self.direction = Direction::Backward;
                self.sequence_length = START_LENGTH;
                self.attempts_at_length = 0;
                self.correct_at_length = 0;
                TrialDecision::SwitchDirection
            }
            Direction::Backward => {
                self.finished = true;
                TrialDecision::Finish
            }
        }
    }

    /// Summary for the completion screen (shown for practice too)
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            subject_id: self.subject_id.clone(),
            practice: self.mode.is_practice(),
            max_forward_length: self.max_forward_length,
            max_backward_length: self.max_backward_length,
            combined_score: self.max_forward_length + self.max_backward_length,
        }
    }

    /// Record to persist, for a terminated measured session only
    pub fn result_record(&self) -> Option<ResultRecord> {
        match (self.mode, self.finished) {
            (Mode::Measured(phase), true) => Some(ResultRecord {
                subject_id: self.subject_id.clone(),
                phase,
                max_forward_length: self.max_forward_length,
                max_backward_length: self.max_backward_length,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(digits: &[u8]) -> Sequence {
        Sequence::from_digits(digits.to_vec())
    }

    fn measured() -> TestSession {
        TestSession::new("s01", Mode::Measured(Phase::Pre)).unwrap()
    }

    /// Run both trials at the current length with the given outcomes.
    fn run_length(session: &mut TestSession, first: bool, second: bool) -> TrialDecision {
        let d = session.apply_trial(seq(&[1, 2]), first).unwrap();
        assert_eq!(d, TrialDecision::Retry);
        session.apply_trial(seq(&[3, 4]), second).unwrap()
    }

    #[test]
    fn test_empty_identifier_rejected() {
        assert!(matches!(
            TestSession::new("   ", Mode::Practice),
            Err(SessionError::EmptyIdentifier)
        ));
    }

    #[test]
    fn test_second_trial_required_even_after_correct_first() {
        // One correct attempt does not advance by itself.
        let mut session = measured();
        let d = session.apply_trial(seq(&[1, 2]), true).unwrap();
        assert_eq!(d, TrialDecision::Retry);
        assert_eq!(session.sequence_length(), START_LENGTH);
        assert_eq!(session.direction(), Direction::Forward);
    }

    #[test]
    fn test_one_correct_of_two_passes_the_length() {
        let mut session = measured();
        assert_eq!(run_length(&mut session, true, false), TrialDecision::Advance);
        assert_eq!(session.sequence_length(), 3);
        assert_eq!(session.max_forward_length(), 2);
    }

    #[test]
    fn test_failed_retry_does_not_move_the_staircase() {
        // One failure with budget remaining changes neither length nor direction.
        let mut session = measured();
        session.apply_trial(seq(&[1, 2]), false).unwrap();
        assert_eq!(session.sequence_length(), START_LENGTH);
        assert_eq!(session.direction(), Direction::Forward);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_double_failure_forward_switches_direction() {
        let mut session = measured();
        assert_eq!(
            run_length(&mut session, false, false),
            TrialDecision::SwitchDirection
        );
        assert_eq!(session.direction(), Direction::Backward);
        assert_eq!(session.sequence_length(), START_LENGTH);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_double_failure_backward_terminates() {
        // Backward 2 and 3 pass, 4 fails twice.
        let mut session = measured();
        run_length(&mut session, false, false); // forward out at 2
        run_length(&mut session, true, true); // backward 2 passed
        run_length(&mut session, true, false); // backward 3 passed
        let d = run_length(&mut session, false, false); // backward 4 failed
        assert_eq!(d, TrialDecision::Finish);
        assert!(session.is_finished());
        assert_eq!(session.max_backward_length(), 3);
    }

    #[test]
    fn test_max_lengths_never_decrease() {
        let mut session = measured();
        run_length(&mut session, true, true); // forward 2
        run_length(&mut session, true, false); // forward 3
        assert_eq!(session.max_forward_length(), 3);
        run_length(&mut session, false, false); // forward out at 4
        assert_eq!(session.max_forward_length(), 3);
        run_length(&mut session, false, false); // backward out at 2
        assert_eq!(session.max_forward_length(), 3);
        assert_eq!(session.max_backward_length(), 0);
    }

    #[test]
    fn test_practice_ceiling_switches_then_terminates() {
        // Clear lengths 2 and 3 in both directions.
        let mut session = TestSession::new("s01", Mode::Practice).unwrap();
        run_length(&mut session, true, true); // forward 2
        let d = run_length(&mut session, true, true); // forward 3: ceiling cleared
        assert_eq!(d, TrialDecision::SwitchDirection);
        assert_eq!(session.direction(), Direction::Backward);
        assert_eq!(session.sequence_length(), START_LENGTH);

        run_length(&mut session, true, true); // backward 2
        let d = run_length(&mut session, true, true); // backward 3: ceiling cleared
        assert_eq!(d, TrialDecision::Finish);
        assert!(session.is_finished());
        assert!(session.result_record().is_none());
    }

    #[test]
    fn test_practice_backward_double_failure_terminates() {
        let mut session = TestSession::new("s01", Mode::Practice).unwrap();
        run_length(&mut session, false, false); // forward out
        let d = run_length(&mut session, false, false); // backward out
        assert_eq!(d, TrialDecision::Finish);
        assert!(session.is_finished());
    }

    #[test]
    fn test_measured_has_no_ceiling() {
        let mut session = measured();
        for expected_max in START_LENGTH..=7 {
            assert_eq!(
                run_length(&mut session, true, true),
                TrialDecision::Advance
            );
            assert_eq!(session.max_forward_length(), expected_max);
        }
        assert_eq!(session.sequence_length(), 8);
    }

    #[test]
    fn test_result_record_only_after_termination() {
        let mut session = measured();
        assert!(session.result_record().is_none());
        run_length(&mut session, true, false); // forward 2 passed
        run_length(&mut session, false, false); // forward out at 3
        run_length(&mut session, true, true); // backward 2 passed
        run_length(&mut session, false, false); // backward out at 3

        let record = session.result_record().unwrap();
        assert_eq!(record.max_forward_length, 2);
        assert_eq!(record.max_backward_length, 2);
        assert_eq!(
            record.combined_score(),
            record.max_forward_length + record.max_backward_length
        );
    }

    #[test]
    fn test_finished_session_accepts_no_trials() {
        let mut session = measured();
        run_length(&mut session, false, false);
        run_length(&mut session, false, false);
        assert!(session.is_finished());
        assert!(matches!(
            session.apply_trial(seq(&[1, 2]), true),
            Err(SessionError::SessionFinished)
        ));
    }

    #[test]
    fn test_last_sequence_tracks_most_recent_trial() {
        let mut session = measured();
        assert!(session.last_sequence().is_none());
        session.apply_trial(seq(&[1, 2]), true).unwrap();
        assert_eq!(session.last_sequence(), Some(&seq(&[1, 2])));
        session.apply_trial(seq(&[5, 6]), true).unwrap();
        assert_eq!(session.last_sequence(), Some(&seq(&[5, 6])));
    }
}
