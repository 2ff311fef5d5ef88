use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score {score} exceeds 100")]
    ScoreOutOfRange { score: u8 },
}

/// Aggregate summary for a completed training session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    elapsed_seconds: u64,
    exercises_passed: u32,
    average_score: u8,
}

impl SessionSummary {
    /// Build a summary from the passing scores recorded per exercise index.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`, or `SessionSummaryError::ScoreOutOfRange` if a
    /// recorded score exceeds 100.
    pub fn from_scores(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        elapsed_seconds: u64,
        scores: &BTreeMap<usize, u8>,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        if let Some(&score) = scores.values().find(|&&score| score > 100) {
            return Err(SessionSummaryError::ScoreOutOfRange { score });
        }

        let exercises_passed = u32::try_from(scores.len()).unwrap_or(u32::MAX);

        Ok(Self {
            started_at,
            completed_at,
            elapsed_seconds,
            exercises_passed,
            average_score: Self::average_of(scores),
        })
    }

    /// Nearest-integer mean of the recorded passing scores; 0 when none
    /// were recorded.
    #[must_use]
    pub fn average_of(scores: &BTreeMap<usize, u8>) -> u8 {
        if scores.is_empty() {
            return 0;
        }
        let sum: u32 = scores.values().map(|&score| u32::from(score)).sum();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let average = (f64::from(sum) / scores.len() as f64).round() as u8;
        average
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn exercises_passed(&self) -> u32 {
        self.exercises_passed
    }

    #[must_use]
    pub fn average_score(&self) -> u8 {
        self.average_score
    }
}
