//! Per-case scores and aggregate results.

use crate::case::TestCase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores attached to a single test case.
///
/// Values are nominally in `[0.0, 1.0]`; the range is not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseMetrics {
    /// Does the answer address the question.
    pub relevance: f64,
    /// Is the answer well formed and consistent.
    pub coherence: f64,
    /// Is the answer supported by the retrieved context.
    pub groundedness: f64,
    /// How much of the needed context was retrieved.
    pub context_recall: f64,
}

impl CaseMetrics {
    /// Create metrics from the four scores.
    pub fn new(relevance: f64, coherence: f64, groundedness: f64, context_recall: f64) -> Self {
        Self {
            relevance,
            coherence,
            groundedness,
            context_recall,
        }
    }

    /// Set relevance.
    #[must_use]
    pub fn with_relevance(mut self, score: f64) -> Self {
        self.relevance = score;
        self
    }

    /// Set coherence.
    #[must_use]
    pub fn with_coherence(mut self, score: f64) -> Self {
        self.coherence = score;
        self
    }

    /// Set groundedness.
    #[must_use]
    pub fn with_groundedness(mut self, score: f64) -> Self {
        self.groundedness = score;
        self
    }

    /// Set context recall.
    #[must_use]
    pub fn with_context_recall(mut self, score: f64) -> Self {
        self.context_recall = score;
        self
    }

    /// Whether every score is still zero.
    pub fn is_unscored(&self) -> bool {
        *self == Self::default()
    }

    /// Whether every score is a finite number (no NaN or infinity).
    pub fn is_finite(&self) -> bool {
        [
            self.relevance,
            self.coherence,
            self.groundedness,
            self.context_recall,
        ]
        .iter()
        .all(|score| score.is_finite())
    }
}

impl fmt::Display for CaseMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Relevance {:.2}, Coherence {:.2}, Groundedness {:.2}, Context Recall {:.2}",
            self.relevance, self.coherence, self.groundedness, self.context_recall
        )
    }
}

/// Averages of each metric over a set of test cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResults {
    /// Mean relevance.
    pub avg_relevance: f64,
    /// Mean coherence.
    pub avg_coherence: f64,
    /// Mean groundedness.
    pub avg_groundedness: f64,
    /// Mean context recall.
    pub avg_context_recall: f64,
}

impl EvaluationResults {
    /// Compute the mean of each metric. Returns `None` for no cases.
    pub fn from_cases(cases: &[TestCase]) -> Option<Self> {
        if cases.is_empty() {
            return None;
        }

        let n = cases.len() as f64;
        let sum = cases.iter().fold(CaseMetrics::default(), |acc, c| CaseMetrics {
            relevance: acc.relevance + c.metrics.relevance,
            coherence: acc.coherence + c.metrics.coherence,
            groundedness: acc.groundedness + c.metrics.groundedness,
            context_recall: acc.context_recall + c.metrics.context_recall,
        });

        Some(Self {
            avg_relevance: sum.relevance / n,
            avg_coherence: sum.coherence / n,
            avg_groundedness: sum.groundedness / n,
            avg_context_recall: sum.context_recall / n,
        })
    }
}

impl fmt::Display for EvaluationResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Relevance: {:.2}", self.avg_relevance)?;
        writeln!(f, "Average Coherence: {:.2}", self.avg_coherence)?;
        writeln!(f, "Average Groundedness: {:.2}", self.avg_groundedness)?;
        write!(f, "Average Context Recall: {:.2}", self.avg_context_recall)
    }
}
