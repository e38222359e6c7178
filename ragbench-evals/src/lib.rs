//! # ragbench-evals
//!
//! Authoring, scoring and export of RAG chatbot evaluation test cases.
//!
//! ## Core Concepts
//!
//! - **[`TestCase`]**: an input query, its expected and actual answers, and
//!   four metric scores ([`CaseMetrics`])
//! - **[`TestCaseStore`]**: the ordered, owned collection of cases plus an
//!   optional [`EvaluationResults`] snapshot
//! - **[`Exporter`]**: writes the collection as `rag-evaluation-testcases.json`
//!   through an [`ExportSink`]
//! - **[`CaseScorer`]**: trait for the external evaluator that fills in actual
//!   outputs and metrics
//! - **[`EvalRunner`]**: applies a scorer to every case of a store
//!
//! ## Example
//!
//! ```
//! use ragbench_evals::{Exporter, MemorySink, TestCaseStore};
//!
//! let mut store = TestCaseStore::new();
//! let first = store.list()[0].id;
//! store.set_input(first, "What is retrieval-augmented generation?");
//!
//! let second = store.create();
//! store.set_input(second, "Which documents mention pricing?");
//!
//! let mut sink = MemorySink::new();
//! let receipt = Exporter::default().export(&store, &mut sink).unwrap();
//! assert_eq!(receipt.file_name, "rag-evaluation-testcases.json");
//! assert_eq!(receipt.cases, 2);
//! ```
//!
//! ## Scoring
//!
//! ```ignore
//! use ragbench_evals::{CaseMetrics, CaseScore, EvalRunner, FunctionScorer};
//!
//! let scorer = FunctionScorer::new("fixture", |case| {
//!     Ok(CaseScore::new(lookup_answer(&case.input), CaseMetrics::default()))
//! });
//! let summary = EvalRunner::new(scorer).run(&mut store).await?;
//! println!("{}", ragbench_evals::render_text(&store));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod case;
pub mod error;
pub mod export;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod scorer;
pub mod store;

// Re-exports
pub use case::{CaseField, CaseId, TestCase};
pub use error::{EvalError, EvalResult};
pub use export::{
    DirectorySink, ExportFormat, ExportReceipt, ExportSettings, ExportSink, Exporter,
    MemorySink, SavedFile, DEFAULT_FILE_NAME, MAX_INDENT,
};
pub use metrics::{CaseMetrics, EvaluationResults};
pub use report::render_text;
pub use runner::{CaseFailure, EvalOptions, EvalRunner, RunSummary};
pub use scorer::{BoxedScorer, CaseScore, CaseScorer, FunctionScorer};
pub use store::TestCaseStore;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        CaseField, CaseId, CaseMetrics, CaseScore, CaseScorer, DirectorySink, EvalOptions,
        EvalRunner, EvaluationResults, ExportSettings, Exporter, MemorySink, TestCase,
        TestCaseStore,
    };
}
