//! Export of the test-case set to a file.
//!
//! The [`Exporter`] renders every case in store order and hands the bytes to
//! an [`ExportSink`], which stands in for whatever the host uses to save a
//! file (a directory on disk, a browser download bridge, a buffer in tests).

use crate::case::TestCase;
use crate::error::{EvalError, EvalResult};
use crate::store::TestCaseStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{error, info};

/// Default export file name.
pub const DEFAULT_FILE_NAME: &str = "rag-evaluation-testcases.json";

/// Widest JSON indent accepted; larger settings are clamped.
pub const MAX_INDENT: usize = 16;

/// Serialization format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// YAML sequence with the same keys.
    Yaml,
}

impl ExportFormat {
    /// File extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Name of the file handed to the sink.
    pub file_name: String,
    /// Output format.
    pub format: ExportFormat,
    /// Spaces per indentation level (JSON only).
    pub indent: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            format: ExportFormat::Json,
            indent: 2,
        }
    }
}

impl ExportSettings {
    /// Create default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file name.
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Set the format.
    #[must_use]
    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the JSON indent width, clamped to [`MAX_INDENT`].
    #[must_use]
    pub fn indent(mut self, spaces: usize) -> Self {
        self.indent = spaces.min(MAX_INDENT);
        self
    }

    /// YAML output with a matching `.yaml` file name.
    #[must_use]
    pub fn yaml() -> Self {
        Self::default()
            .format(ExportFormat::Yaml)
            .file_name("rag-evaluation-testcases.yaml")
    }
}

/// Host mechanism that persists an exported file.
pub trait ExportSink {
    /// Save `contents` under `file_name`.
    ///
    /// Returns where the file ended up, if the sink has such a notion.
    fn save(&mut self, file_name: &str, contents: &[u8]) -> EvalResult<Option<PathBuf>>;
}

/// Writes exports into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, file_name: &str, contents: &[u8]) -> EvalResult<Option<PathBuf>> {
        // Only a bare name may be joined onto the target directory.
        let name = Path::new(file_name);
        let mut components = name.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(EvalError::export(
                    file_name,
                    "file name must not contain a directory",
                ))
            }
        }

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, contents)?;
        Ok(Some(path))
    }
}

/// A file captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// File name.
    pub file_name: String,
    /// Raw bytes.
    pub contents: Vec<u8>,
}

impl SavedFile {
    /// Contents as UTF-8 text.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }
}

/// Keeps every export in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<SavedFile>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All saved files, oldest first.
    pub fn files(&self) -> &[SavedFile] {
        &self.files
    }

    /// Most recent export.
    pub fn last(&self) -> Option<&SavedFile> {
        self.files.last()
    }
}

impl ExportSink for MemorySink {
    fn save(&mut self, file_name: &str, contents: &[u8]) -> EvalResult<Option<PathBuf>> {
        self.files.push(SavedFile {
            file_name: file_name.to_string(),
            contents: contents.to_vec(),
        });
        Ok(None)
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReceipt {
    /// File name handed to the sink.
    pub file_name: String,
    /// Where the sink stored the file, if known.
    pub location: Option<PathBuf>,
    /// Number of test cases written.
    pub cases: usize,
    /// Size of the file in bytes.
    pub bytes: usize,
    /// When the export happened.
    pub exported_at: DateTime<Utc>,
}

/// Serializes a test-case set and saves it through a sink.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    settings: ExportSettings,
}

impl Exporter {
    /// Create an exporter.
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    /// Current settings.
    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Render `cases` in the configured format.
    ///
    /// Output is deterministic: the same cases always render to the same text.
    ///
    /// Fails if any case has a NaN or infinite metric.
    pub fn render(&self, cases: &[TestCase]) -> EvalResult<String> {
        if let Some(case) = cases.iter().find(|c| !c.metrics.is_finite()) {
            return Err(EvalError::Serialization(format!(
                "Test case {} has a non-finite metric: {}",
                case.id, case.metrics
            )));
        }

        match self.settings.format {
            ExportFormat::Json => {
                let indent = " ".repeat(self.settings.indent.min(MAX_INDENT));
                let mut buf = Vec::new();
                let formatter = PrettyFormatter::with_indent(indent.as_bytes());
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
                cases.serialize(&mut ser)?;
                String::from_utf8(buf).map_err(|e| EvalError::Serialization(e.to_string()))
            }
            ExportFormat::Yaml => {
                serde_yaml::to_string(cases).map_err(|e| EvalError::Yaml(e.to_string()))
            }
        }
    }

    /// Export every case in `store` through `sink`.
    ///
    /// Failures are logged and returned as [`EvalError::Export`] so the
    /// caller can notify the user.
    pub fn export(
        &self,
        store: &TestCaseStore,
        sink: &mut dyn ExportSink,
    ) -> EvalResult<ExportReceipt> {
        let file_name = &self.settings.file_name;

        let rendered = self.render(store.list()).map_err(|e| {
            error!(file = %file_name, error = %e, "Failed to serialize test cases");
            EvalError::export(file_name.clone(), e.to_string())
        })?;

        let location = sink.save(file_name, rendered.as_bytes()).map_err(|e| {
            error!(file = %file_name, error = %e, "Failed to save export");
            EvalError::export(file_name.clone(), e.to_string())
        })?;

        let receipt = ExportReceipt {
            file_name: file_name.clone(),
            location,
            cases: store.len(),
            bytes: rendered.len(),
            exported_at: Utc::now(),
        };
        info!(
            file = %receipt.file_name,
            cases = receipt.cases,
            bytes = receipt.bytes,
            format = %self.settings.format,
            "Exported test cases"
        );
        Ok(receipt)
    }
}
