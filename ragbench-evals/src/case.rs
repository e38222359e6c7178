//! Test case definitions.

use crate::error::EvalError;
use crate::metrics::CaseMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a test case within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(u64);

impl CaseId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for CaseId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single RAG evaluation test case.
///
/// Serialized with the camelCase keys of the export format:
/// `id`, `input`, `expectedOutput`, `actualOutput`, `metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Case id.
    pub id: CaseId,
    /// Query sent to the chatbot.
    pub input: String,
    /// Reference answer.
    pub expected_output: String,
    /// Answer produced by the chatbot under test.
    pub actual_output: String,
    /// Per-case scores.
    pub metrics: CaseMetrics,
}

impl TestCase {
    /// Create an empty case with the given id.
    pub fn new(id: CaseId) -> Self {
        Self {
            id,
            input: String::new(),
            expected_output: String::new(),
            actual_output: String::new(),
            metrics: CaseMetrics::default(),
        }
    }

    /// Set the input.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the expected output.
    pub fn with_expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = expected.into();
        self
    }

    /// Set the actual output.
    pub fn with_actual_output(mut self, actual: impl Into<String>) -> Self {
        self.actual_output = actual.into();
        self
    }

    /// Set the metrics.
    pub fn with_metrics(mut self, metrics: CaseMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Read one of the editable text fields.
    pub fn field(&self, field: CaseField) -> &str {
        match field {
            CaseField::Input => &self.input,
            CaseField::ExpectedOutput => &self.expected_output,
            CaseField::ActualOutput => &self.actual_output,
        }
    }

    pub(crate) fn field_mut(&mut self, field: CaseField) -> &mut String {
        match field {
            CaseField::Input => &mut self.input,
            CaseField::ExpectedOutput => &mut self.expected_output,
            CaseField::ActualOutput => &mut self.actual_output,
        }
    }

    /// Whether an expected output has been written.
    pub fn has_expected(&self) -> bool {
        !self.expected_output.is_empty()
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test Case {}", self.id)?;
        writeln!(f, "  Input Query: {}", self.input)?;
        writeln!(f, "  Expected Output: {}", self.expected_output)?;
        writeln!(f, "  Evaluation Metrics: {}", self.metrics)?;
        write!(f, "  Actual Output: {}", self.actual_output)
    }
}

/// Text fields that can be updated through the store.
///
/// Metrics are not editable here. They change only through
/// [`TestCaseStore::record_scores`](crate::store::TestCaseStore::record_scores).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseField {
    /// The query.
    Input,
    /// The reference answer.
    ExpectedOutput,
    /// The produced answer.
    ActualOutput,
}

impl CaseField {
    /// All editable fields.
    pub const ALL: [CaseField; 3] = [Self::Input, Self::ExpectedOutput, Self::ActualOutput];

    /// Key used in the export format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::ExpectedOutput => "expectedOutput",
            Self::ActualOutput => "actualOutput",
        }
    }
}

impl fmt::Display for CaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseField {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Self::Input),
            "expectedOutput" => Ok(Self::ExpectedOutput),
            "actualOutput" => Ok(Self::ActualOutput),
            other => Err(EvalError::unknown_field(other)),
        }
    }
}
