// LogAnalyzer - platform/config.rs
//
// Platform config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogAnalyzer configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/loganalyzer/ or %APPDATA%\LogAnalyzer\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[engine]` section.
    pub engine: EngineSection,
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[engine]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Result channel capacity (0 = synchronous handoff).
    pub channel_capacity: Option<usize>,
    /// Worker thread bound (0 = one thread per task).
    pub max_workers: Option<usize>,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Lower bound of the simulated delay in ms.
    pub min_delay_ms: Option<u64>,
    /// Upper bound of the simulated delay in ms.
    pub max_delay_ms: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated settings derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub channel_capacity: usize,
    pub max_workers: usize,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channel_capacity: constants::DEFAULT_CHANNEL_CAPACITY,
            max_workers: constants::DEFAULT_MAX_WORKERS,
            min_delay_ms: constants::DEFAULT_MIN_DELAY_MS,
            max_delay_ms: constants::DEFAULT_MAX_DELAY_MS,
            log_level: None,
        }
    }
}

/// Read and validate the settings file at `path`.
///
/// Unreadable or unparseable files are errors; out-of-range values are not,
/// they fall back to defaults and are reported in the returned warnings.
pub fn read_settings(path: &Path) -> Result<(Settings, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut warnings = Vec::new();
    let settings = validate(raw, &mut warnings);
    Ok((settings, warnings))
}

/// Lenient variant of `read_settings` for the default settings location.
///
/// If the file does not exist, returns defaults with no warnings (first run).
/// If it is unreadable or unparseable, returns defaults with a warning.
///
/// Called before logging is initialised, so problems are only returned,
/// never logged here.
pub fn load_settings(path: &Path) -> (Settings, Vec<String>) {
    if !path.exists() {
        return (Settings::default(), Vec::new());
    }

    match read_settings(path) {
        Ok(loaded) => loaded,
        Err(e) => (Settings::default(), vec![format!("{e}. Using defaults.")]),
    }
}

/// Validate each field against named constants, accumulating all problems.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> Settings {
    let mut settings = Settings::default();

    // -- Engine: channel_capacity --
    if let Some(capacity) = raw.engine.channel_capacity {
        if capacity <= constants::ABSOLUTE_MAX_CHANNEL_CAPACITY {
            settings.channel_capacity = capacity;
        } else {
            warnings.push(format!(
                "[engine] channel_capacity = {capacity} is out of range (0-{}). Using default ({}).",
                constants::ABSOLUTE_MAX_CHANNEL_CAPACITY,
                constants::DEFAULT_CHANNEL_CAPACITY,
            ));
        }
    }

    // -- Engine: max_workers --
    if let Some(workers) = raw.engine.max_workers {
        if workers <= constants::ABSOLUTE_MAX_WORKERS {
            settings.max_workers = workers;
        } else {
            warnings.push(format!(
                "[engine] max_workers = {workers} is out of range (0-{}). Using default ({}).",
                constants::ABSOLUTE_MAX_WORKERS,
                constants::DEFAULT_MAX_WORKERS,
            ));
        }
    }

    // -- Analysis: delay bounds --
    let min = raw.analysis.min_delay_ms.unwrap_or(settings.min_delay_ms);
    let max = raw.analysis.max_delay_ms.unwrap_or(settings.max_delay_ms);
    if min > constants::ABSOLUTE_MAX_DELAY_MS || max > constants::ABSOLUTE_MAX_DELAY_MS {
        warnings.push(format!(
            "[analysis] delay bounds {min}-{max} ms exceed the maximum of {} ms. \
             Using defaults ({}-{}).",
            constants::ABSOLUTE_MAX_DELAY_MS,
            constants::DEFAULT_MIN_DELAY_MS,
            constants::DEFAULT_MAX_DELAY_MS,
        ));
    } else if min > max {
        warnings.push(format!(
            "[analysis] min_delay_ms = {min} is greater than max_delay_ms = {max}. \
             Using defaults ({}-{}).",
            constants::DEFAULT_MIN_DELAY_MS,
            constants::DEFAULT_MAX_DELAY_MS,
        ));
    } else {
        settings.min_delay_ms = min;
        settings.max_delay_ms = max;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            settings.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    settings
}
