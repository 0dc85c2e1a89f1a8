// LogAnalyzer - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogAnalyzer";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogAnalyzer";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Engine limits
// =============================================================================

/// Default capacity of the result channel between task runners and the
/// aggregator. Sized so producers rarely stall; 0 is valid (rendezvous).
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Hard upper bound on the configurable channel capacity.
pub const ABSOLUTE_MAX_CHANNEL_CAPACITY: usize = 100_000;

/// Default worker bound. 0 means one thread per submitted task.
pub const DEFAULT_MAX_WORKERS: usize = 0;

/// Hard upper bound on the configurable worker count.
pub const ABSOLUTE_MAX_WORKERS: usize = 4_096;

/// Prefix for the names of task runner threads.
pub const WORKER_THREAD_PREFIX: &str = "task-runner";

// =============================================================================
// Simulated analysis
// =============================================================================

/// Lower bound of the simulated analysis delay (ms, inclusive).
pub const DEFAULT_MIN_DELAY_MS: u64 = 50;

/// Upper bound of the simulated analysis delay (ms, inclusive).
pub const DEFAULT_MAX_DELAY_MS: u64 = 200;

/// Hard upper bound on either configurable delay bound (ms).
pub const ABSOLUTE_MAX_DELAY_MS: u64 = 60_000;

// =============================================================================
// Outcome messages
// =============================================================================

pub const MSG_SUCCESS: &str = "Analysis completed successfully.";
pub const MSG_NOT_FOUND: &str = "File not found.";
pub const MSG_ACCESS_ERROR: &str = "File access error.";
pub const MSG_NOT_ACCESSIBLE: &str = "File not accessible.";
pub const MSG_ANALYSIS_FAILED: &str = "Analysis failed.";

// =============================================================================
// Logging and files
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings file name, looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Maximum size of a task list file (bytes). Larger files are rejected
/// before parsing.
pub const MAX_TASK_LIST_SIZE: u64 = 16 * 1024 * 1024; // 16 MB
