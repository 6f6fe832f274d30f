//! Final result record for a measured session

use serde::Serialize;
use std::fmt;

/// Which measured phase a session belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Pre,
    Post,
}

impl Phase {
    /// Short name used in result file names ("pre" / "post")
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Pre => "pre",
            Phase::Post => "post",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one terminated measured session
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub subject_id: String,
    pub phase: Phase,
    pub max_forward_length: usize,
    pub max_backward_length: usize,
}

impl ResultRecord {
    /// Combined span score: max forward length + max backward length
    pub fn combined_score(&self) -> usize {
        self.max_forward_length + self.max_backward_length
    }
}
