//! Contract for the external evaluation collaborator.
//!
//! A [`CaseScorer`] receives one test case and produces the chatbot's actual
//! answer together with its metric scores. No scoring logic ships here;
//! hosts plug in an LLM judge, a RAGAS bridge or a fixture.

use crate::case::TestCase;
use crate::error::EvalResult;
use crate::metrics::CaseMetrics;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Output of scoring a single case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseScore {
    /// Answer produced by the chatbot under test.
    pub actual_output: String,
    /// Scores for that answer.
    pub metrics: CaseMetrics,
}

impl CaseScore {
    /// Create a score.
    pub fn new(actual_output: impl Into<String>, metrics: CaseMetrics) -> Self {
        Self {
            actual_output: actual_output.into(),
            metrics,
        }
    }
}

/// Produces the actual output and metrics for a test case.
#[async_trait]
pub trait CaseScorer: Send + Sync {
    /// Scorer name.
    fn name(&self) -> &str;

    /// Score one case.
    async fn score(&self, case: &TestCase) -> EvalResult<CaseScore>;
}

/// Boxed scorer for dynamic dispatch.
pub type BoxedScorer = Box<dyn CaseScorer>;

#[async_trait]
impl CaseScorer for BoxedScorer {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn score(&self, case: &TestCase) -> EvalResult<CaseScore> {
        (**self).score(case).await
    }
}

/// Scorer backed by a synchronous closure.
pub struct FunctionScorer<F> {
    name: String,
    func: F,
}

impl<F> FunctionScorer<F>
where
    F: Fn(&TestCase) -> EvalResult<CaseScore> + Send + Sync,
{
    /// Create a new function-based scorer.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

#[async_trait]
impl<F> CaseScorer for FunctionScorer<F>
where
    F: Fn(&TestCase) -> EvalResult<CaseScore> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn score(&self, case: &TestCase) -> EvalResult<CaseScore> {
        (self.func)(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseId;
    use crate::error::EvalError;

    fn echo_scorer() -> FunctionScorer<impl Fn(&TestCase) -> EvalResult<CaseScore> + Send + Sync> {
        FunctionScorer::new("echo", |case: &TestCase| {
            if case.input.is_empty() {
                return Err(EvalError::scorer_failed("echo", "empty input"));
            }
            Ok(CaseScore::new(
                case.input.to_uppercase(),
                CaseMetrics::default().with_relevance(1.0),
            ))
        })
    }

    #[tokio::test]
    async fn test_function_scorer() {
        let scorer = echo_scorer();
        let case = TestCase::new(CaseId::new(1)).with_input("hi");

        let score = scorer.score(&case).await.unwrap();
        assert_eq!(scorer.name(), "echo");
        assert_eq!(score.actual_output, "HI");
        assert_eq!(score.metrics.relevance, 1.0);
    }

    #[tokio::test]
    async fn test_function_scorer_error() {
        let scorer = echo_scorer();
        let case = TestCase::new(CaseId::new(1));
        assert!(scorer.score(&case).await.is_err());
    }

    #[tokio::test]
    async fn test_boxed_scorer() {
        let scorer: BoxedScorer = Box::new(echo_scorer());
        let case = TestCase::new(CaseId::new(2)).with_input("ok");
        assert_eq!(scorer.name(), "echo");
        assert_eq!(scorer.score(&case).await.unwrap().actual_output, "OK");
    }

    #[test]
    fn test_case_score_serialize() {
        let score = CaseScore::new("answer", CaseMetrics::default());
        let json = serde_json::to_string(&score).unwrap();
        assert!(json.contains("actualOutput"));
    }
}
