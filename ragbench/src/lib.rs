//! # ragbench - RAG Chatbot Evaluation Test Cases
//!
//! ragbench keeps an ordered set of evaluation test cases for a
//! retrieval-augmented chatbot: an input query, the expected answer, the answer
//! actually produced, and four metric scores (relevance, coherence,
//! groundedness, context recall). The set can be edited, scored by an
//! external evaluator and exported as `rag-evaluation-testcases.json`.
//!
//! ## Quick Start
//!
//! ```
//! use ragbench::prelude::*;
//!
//! let mut store = TestCaseStore::new();
//! let id = store.list()[0].id;
//! store.set_input(id, "What is X?");
//! store.set_expected_output(id, "X is Y");
//!
//! let mut sink = MemorySink::new();
//! let receipt = Exporter::default().export(&store, &mut sink).unwrap();
//! assert_eq!(receipt.cases, 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|--------|
//! | `logging` | [`init_logging`] via `tracing-subscriber` | ✅ |
//!
//! ## Architecture
//!
//! - [`ragbench_evals`] - test cases, store, scorer contract, runner and export
//! - [`logging`] - subscriber setup for hosts without their own

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// Crate Re-exports
// ============================================================================

/// Test cases, store, scoring and export.
pub use ragbench_evals as evals;

// ============================================================================
// Logging
// ============================================================================

/// Tracing subscriber setup.
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
pub use logging::{init_logging, init_logging_with, LogFormat, LoggingError};

// ============================================================================
// Flat Re-exports
// ============================================================================

// Test cases
pub use ragbench_evals::{CaseField, CaseId, CaseMetrics, EvaluationResults, TestCase};

// Store
pub use ragbench_evals::TestCaseStore;

// Export
pub use ragbench_evals::{
    DirectorySink, ExportFormat, ExportReceipt, ExportSettings, ExportSink, Exporter, MemorySink,
    SavedFile, DEFAULT_FILE_NAME, MAX_INDENT,
};

// Scoring
pub use ragbench_evals::{
    BoxedScorer, CaseFailure, CaseScore, CaseScorer, EvalOptions, EvalRunner, FunctionScorer,
    RunSummary,
};

// Rendering
pub use ragbench_evals::render_text;

// Errors
pub use ragbench_evals::{EvalError, EvalResult};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude for common imports.
///
/// ```rust
/// use ragbench::prelude::*;
/// ```
pub mod prelude {
    pub use ragbench_evals::prelude::*;

    pub use ragbench_evals::{render_text, EvalError, EvalResult, ExportFormat, FunctionScorer};

    #[cfg(feature = "logging")]
    pub use crate::logging::init_logging;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
