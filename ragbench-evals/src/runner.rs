//! Evaluation runner.
//!
//! Scores every case of a [`TestCaseStore`] with a [`CaseScorer`], writes the
//! outputs and metrics back, and refreshes the aggregate results.

use crate::case::{CaseId, TestCase};
use crate::error::{EvalError, EvalResult};
use crate::metrics::EvaluationResults;
use crate::scorer::{BoxedScorer, CaseScore, CaseScorer};
use crate::store::TestCaseStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{info, warn};

/// Options for running evaluations.
#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// Maximum concurrent scorer calls.
    pub concurrency: usize,
    /// Timeout per case.
    pub timeout: Option<Duration>,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            timeout: None,
        }
    }
}

impl EvalOptions {
    /// Create new options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set concurrency.
    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Set timeout per case.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A case the scorer could not handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    /// Case id.
    pub id: CaseId,
    /// Why scoring failed.
    pub reason: String,
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Cases whose scores were written to the store.
    pub scored: usize,
    /// Cases that failed or timed out; their previous values are kept.
    pub failures: Vec<CaseFailure>,
    /// Aggregate results after the run.
    pub results: Option<EvaluationResults>,
    /// Wall time of the run.
    pub duration: Duration,
}

impl RunSummary {
    /// Whether every case was scored.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Evaluation runner.
pub struct EvalRunner {
    scorer: BoxedScorer,
    options: EvalOptions,
}

impl EvalRunner {
    /// Create a runner around a scorer.
    pub fn new<S: CaseScorer + 'static>(scorer: S) -> Self {
        Self {
            scorer: Box::new(scorer),
            options: EvalOptions::default(),
        }
    }

    /// Set options.
    pub fn options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    /// Score every case in `store` and refresh its aggregate results.
    ///
    /// Individual scorer failures do not abort the run; they are reported in
    /// [`RunSummary::failures`].
    pub async fn run(&self, store: &mut TestCaseStore) -> EvalResult<RunSummary> {
        let start = Instant::now();
        let snapshot: Vec<TestCase> = store.list().to_vec();
        let semaphore = Arc::new(Semaphore::new(self.options.concurrency.max(1)));

        let tasks: Vec<_> = snapshot
            .iter()
            .map(|case| {
                let sem = semaphore.clone();
                async move {
                    let _permit = sem
                        .acquire()
                        .await
                        .map_err(|e| EvalError::Other(e.into()))?;
                    self.score_case(case).await
                }
            })
            .collect();

        let outcomes = futures::future::join_all(tasks).await;

        let mut scored = 0;
        let mut failures = Vec::new();
        for (case, outcome) in snapshot.iter().zip(outcomes) {
            match outcome {
                Ok(score) => {
                    if store.record_scores(case.id, score.actual_output, score.metrics) {
                        scored += 1;
                    }
                }
                Err(e) => {
                    warn!(id = %case.id, scorer = self.scorer.name(), error = %e, "Scoring failed");
                    failures.push(CaseFailure {
                        id: case.id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let results = store.refresh_results().copied();
        let duration = start.elapsed();
        info!(
            scorer = self.scorer.name(),
            scored,
            failed = failures.len(),
            ?duration,
            "Evaluation run finished"
        );

        Ok(RunSummary {
            scored,
            failures,
            results,
            duration,
        })
    }

    async fn score_case(&self, case: &TestCase) -> EvalResult<CaseScore> {
        match self.options.timeout {
            Some(after) => timeout(after, self.scorer.score(case))
                .await
                .map_err(|_| EvalError::Timeout { id: case.id, after })?,
            None => self.scorer.score(case).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CaseMetrics;
    use crate::scorer::FunctionScorer;
    use async_trait::async_trait;

    fn length_scorer() -> FunctionScorer<impl Fn(&TestCase) -> EvalResult<CaseScore> + Send + Sync> {
        FunctionScorer::new("length", |case: &TestCase| {
            if case.input.is_empty() {
                return Err(EvalError::scorer_failed("length", "no query"));
            }
            let relevance = if case.input.len() > 5 { 1.0 } else { 0.5 };
            Ok(CaseScore::new(
                format!("answer to {}", case.input),
                CaseMetrics::new(relevance, 1.0, 0.0, 0.5),
            ))
        })
    }

    struct SlowScorer;

    #[async_trait]
    impl CaseScorer for SlowScorer {
        fn name(&self) -> &str {
            "slow"
        }

        async fn score(&self, _case: &TestCase) -> EvalResult<CaseScore> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(CaseScore::default())
        }
    }

    #[test]
    fn test_eval_options() {
        let options = EvalOptions::new()
            .concurrency(0)
            .timeout(Duration::from_secs(30));

        assert_eq!(options.concurrency, 1);
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn test_run_scores_every_case() {
        let mut store = TestCaseStore::empty();
        let a = store.create();
        let b = store.create();
        store.set_input(a, "What is retrieval?");
        store.set_input(b, "RAG?");

        let summary = EvalRunner::new(length_scorer())
            .options(EvalOptions::new().concurrency(2))
            .run(&mut store)
            .await
            .unwrap();

        assert!(summary.is_complete());
        assert_eq!(summary.scored, 2);
        assert_eq!(store.get(a).unwrap().actual_output, "answer to What is retrieval?");
        assert_eq!(store.get(b).unwrap().metrics.relevance, 0.5);

        let results = summary.results.unwrap();
        assert_eq!(results.avg_relevance, 0.75);
        assert_eq!(results.avg_coherence, 1.0);
        assert_eq!(store.results(), Some(&results));
    }

    #[tokio::test]
    async fn test_run_keeps_failed_cases_untouched() {
        let mut store = TestCaseStore::empty();
        let ok = store.create();
        let empty = store.create();
        store.set_input(ok, "a long question");

        let summary = EvalRunner::new(length_scorer())
            .run(&mut store)
            .await
            .unwrap();

        assert_eq!(summary.scored, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].id, empty);
        assert!(summary.failures[0].reason.contains("no query"));
        assert!(store.get(empty).unwrap().metrics.is_unscored());
    }

    #[tokio::test]
    async fn test_run_empty_store() {
        let mut store = TestCaseStore::empty();
        let summary = EvalRunner::new(length_scorer())
            .run(&mut store)
            .await
            .unwrap();

        assert_eq!(summary.scored, 0);
        assert!(summary.results.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_timeout() {
        let mut store = TestCaseStore::new();
        let summary = EvalRunner::new(SlowScorer)
            .options(EvalOptions::new().timeout(Duration::from_millis(50)))
            .run(&mut store)
            .await
            .unwrap();

        assert_eq!(summary.scored, 0);
        assert!(summary.failures[0].reason.contains("timeout"));
    }
}
