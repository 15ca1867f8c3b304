//! The quiz entity and per-play statistics.

pub mod codec;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::question::Question;

/// A titled, ordered sequence of questions. Owned by exactly one session
/// at a time; play and authoring alternate over the same instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            questions: Vec::new(),
        }
    }
}

/// Outcome of one question within a play-through.
#[derive(Debug, Clone)]
pub struct QuestionResult {
    /// The variant's overview line, doubling as the "expected" display.
    pub overview: String,
    pub submitted: String,
    pub correct: bool,
    pub elapsed: Duration,
}

/// Accumulated while playing one quiz; dropped after the summary page.
#[derive(Debug, Default)]
pub struct PlayStats {
    results: Vec<QuestionResult>,
}

impl PlayStats {
    pub fn record(&mut self, result: QuestionResult) {
        self.results.push(result);
    }

    pub fn answers_correct(&self) -> usize {
        self.results.iter().filter(|r| r.correct).count()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.results.iter().map(|r| r.elapsed).sum()
    }

    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }
}
