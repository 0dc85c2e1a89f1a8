// LogAnalyzer - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogAnalyzer adapter operations.
///
/// The execution engine itself never fails; per-task faults are
/// `TaskError`s and only ever surface as `Outcome` fields.
#[derive(Debug)]
pub enum LogAnalyzerError {
    /// The task list could not be loaded.
    TaskList(TaskListError),

    /// Settings loading or validation failed.
    Config(ConfigError),

    /// Report export failed.
    Export(ExportError),

    /// I/O error outside any file (e.g. writing the console summary).
    Io {
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogAnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TaskList(e) => write!(f, "Task list error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io { operation, source } => write!(f, "I/O error during {operation}: {source}"),
        }
    }
}

impl std::error::Error for LogAnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TaskList(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Task errors (runner taxonomy)
// ---------------------------------------------------------------------------

/// Why a task's target resource could not be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableKind {
    /// The target does not exist.
    NotFound,
    /// The existence probe failed for another reason (permissions, I/O).
    AccessError,
    /// The existence probe succeeded but the target could not be opened.
    NotAccessible,
}

/// A fault raised while running a single task.
///
/// Never propagated past the task runner: it is converted into a failed
/// `Outcome` whose message and detail come from this value.
#[derive(Debug)]
pub enum TaskError {
    /// The target cannot be found or reached.
    ResourceUnavailable {
        kind: UnavailableKind,
        path: PathBuf,
        source: io::Error,
    },

    /// The analysis step itself failed.
    AnalysisFailure {
        task_id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TaskError {
    /// Short, stable summary used as the `Outcome` message.
    pub fn summary(&self) -> &'static str {
        use super::constants::{
            MSG_ACCESS_ERROR, MSG_ANALYSIS_FAILED, MSG_NOT_ACCESSIBLE, MSG_NOT_FOUND,
        };
        match self {
            Self::ResourceUnavailable { kind, .. } => match kind {
                UnavailableKind::NotFound => MSG_NOT_FOUND,
                UnavailableKind::AccessError => MSG_ACCESS_ERROR,
                UnavailableKind::NotAccessible => MSG_NOT_ACCESSIBLE,
            },
            Self::AnalysisFailure { .. } => MSG_ANALYSIS_FAILED,
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceUnavailable { kind, path, source } => match kind {
                UnavailableKind::NotFound => {
                    write!(f, "file not found: '{}': {source}", path.display())
                }
                UnavailableKind::AccessError => {
                    write!(f, "cannot access '{}': {source}", path.display())
                }
                UnavailableKind::NotAccessible => {
                    write!(f, "file not accessible: '{}': {source}", path.display())
                }
            },
            Self::AnalysisFailure { task_id, source } => {
                write!(f, "analysis failed for task '{task_id}': {source}")
            }
        }
    }
}

impl std::error::Error for TaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ResourceUnavailable { source, .. } => Some(source),
            Self::AnalysisFailure { source, .. } => Some(source.as_ref()),
        }
    }
}

// ---------------------------------------------------------------------------
// Task list errors
// ---------------------------------------------------------------------------

/// Errors related to loading the JSON task list.
#[derive(Debug)]
pub enum TaskListError {
    /// The task list file could not be read.
    Io { path: PathBuf, source: io::Error },

    /// The task list file is not a valid JSON array of task entries.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// An entry has an empty required field.
    EmptyField { index: usize, field: &'static str },
}

impl fmt::Display for TaskListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Failed to read task list '{}': {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "Failed to parse task list '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Task list '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::EmptyField { index, field } => {
                write!(f, "Task #{index}: required field '{field}' is empty")
            }
        }
    }
}

impl std::error::Error for TaskListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<TaskListError> for LogAnalyzerError {
    fn from(e: TaskListError) -> Self {
        Self::TaskList(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to report export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error creating the output directory or writing the file.
    Io { path: PathBuf, source: io::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LogAnalyzerError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to settings loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for LogAnalyzerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogAnalyzer results.
pub type Result<T> = std::result::Result<T, LogAnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found(path: &str) -> TaskError {
        TaskError::ResourceUnavailable {
            kind: UnavailableKind::NotFound,
            path: PathBuf::from(path),
            source: io::Error::from(io::ErrorKind::NotFound),
        }
    }

    #[test]
    fn test_not_found_detail_names_path_and_cause() {
        let err = not_found("/var/log/missing.log");
        let detail = err.to_string();
        assert!(detail.starts_with("file not found:"), "got: {detail}");
        assert!(detail.contains("/var/log/missing.log"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_summary_per_kind() {
        let mk = |kind| TaskError::ResourceUnavailable {
            kind,
            path: PathBuf::from("x"),
            source: io::Error::other("boom"),
        };
        assert_eq!(mk(UnavailableKind::NotFound).summary(), "File not found.");
        assert_eq!(mk(UnavailableKind::AccessError).summary(), "File access error.");
        assert_eq!(
            mk(UnavailableKind::NotAccessible).summary(),
            "File not accessible."
        );

        let failure = TaskError::AnalysisFailure {
            task_id: "web-1".to_string(),
            source: "parser exploded".into(),
        };
        assert_eq!(failure.summary(), "Analysis failed.");
        assert_eq!(
            failure.to_string(),
            "analysis failed for task 'web-1': parser exploded"
        );
    }

    #[test]
    fn test_top_level_wraps_source() {
        let err: LogAnalyzerError = TaskListError::EmptyField {
            index: 2,
            field: "id",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Task list error: Task #2: required field 'id' is empty"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
