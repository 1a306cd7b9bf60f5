//! Settings loading and constants.
//!
//! Settings are read from the process environment and an optional `.env`
//! file, falling back to built-in defaults. Environment variables win over
//! file values. `SettingsLoader` parses once and hands out the same shared
//! `Settings` snapshot on every later call.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

// =============================================================================
// Settings Defaults
// =============================================================================

/// Service name reported by the health endpoint and the API docs
pub const DEFAULT_APP_NAME: &str = "Domu Backend";

/// Environment name used when none is configured
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Application version shown in the API docs
pub const DEFAULT_VERSION: &str = "0.1.0";

/// Interactive API docs are exposed unless disabled
pub const DEFAULT_ENABLE_DOCS: bool = true;

/// Environment name that selects production behaviour (quieter logging)
pub const PRODUCTION_ENVIRONMENT: &str = "production";

// =============================================================================
// Environment Variable Names
// =============================================================================
// Keys are matched case-insensitively, so `app_name` and `APP_NAME` are the same.

pub const ENV_APP_NAME: &str = "APP_NAME";
pub const ENV_ENVIRONMENT: &str = "ENVIRONMENT";
pub const ENV_VERSION: &str = "VERSION";
pub const ENV_ENABLE_DOCS: &str = "ENABLE_DOCS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const KNOWN_KEYS: [&str; 5] = [
    ENV_APP_NAME,
    ENV_ENVIRONMENT,
    ENV_VERSION,
    ENV_ENABLE_DOCS,
    ENV_LOG_FORMAT,
];

// =============================================================================
// Default Paths and Listener
// =============================================================================

/// Default location of the optional environment file
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Default HTTP listen host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 8000;

// =============================================================================
// HTTP Paths and Headers
// =============================================================================

/// Prefix under which all API routers are mounted
pub const API_PREFIX: &str = "/api";

/// Canonical health-check path (with trailing slash)
pub const HEALTH_PATH: &str = "/api/health/";

/// Health responses must never be served from a cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

pub const OPENAPI_URL: &str = "/openapi.json";
pub const DOCS_URL: &str = "/docs";
pub const REDOC_URL: &str = "/redoc";

/// Header used to propagate request IDs
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Immutable configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Service name
    pub app_name: String,
    /// Active environment name ("development", "production", ...)
    pub environment: String,
    /// Application version
    pub version: String,
    /// Expose `/docs` and `/redoc`
    pub enable_docs: bool,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            enable_docs: DEFAULT_ENABLE_DOCS,
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Build settings from key/value pairs.
    ///
    /// Later pairs override earlier ones for the same key. Unknown keys are
    /// ignored; malformed values for known keys are rejected.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut settings = Self::default();
        let mut enable_docs = None;
        let mut log_format = None;

        for (key, value) in vars {
            let key = key.as_ref().to_ascii_uppercase();
            match key.as_str() {
                ENV_APP_NAME => settings.app_name = value.into(),
                ENV_ENVIRONMENT => settings.environment = value.into(),
                ENV_VERSION => settings.version = value.into(),
                ENV_ENABLE_DOCS => enable_docs = Some(value.into()),
                ENV_LOG_FORMAT => log_format = Some(value.into()),
                _ => {}
            }
        }

        if let Some(raw) = enable_docs {
            settings.enable_docs = parse_bool(ENV_ENABLE_DOCS, &raw)?;
        }
        if let Some(raw) = log_format {
            settings.log_format =
                LogFormat::from_name(&raw).ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_LOG_FORMAT,
                    value: raw,
                    expected: "\"text\" or \"json\"",
                })?;
        }

        Ok(settings)
    }

    /// Whether the production environment is active
    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION_ENVIRONMENT
    }
}

/// Parse a boolean the way environment-driven config usually spells it.
fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            expected: "a boolean",
        }),
    }
}

/// Where the loader reads environment variables from
#[derive(Debug)]
enum Environ {
    Process,
    Fixed(Vec<(String, String)>),
}

/// Loads settings at most once and shares the result.
///
/// The loader is owned by whoever starts the application; there is no global
/// instance. A failed load caches nothing, so a later call reads again.
#[derive(Debug)]
pub struct SettingsLoader {
    env_file: Option<PathBuf>,
    environ: Environ,
    cached: OnceLock<Arc<Settings>>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl SettingsLoader {
    /// Read the process environment plus the given env file (if it exists).
    pub fn new(env_file: impl Into<PathBuf>) -> Self {
        Self {
            env_file: Some(env_file.into()),
            environ: Environ::Process,
            cached: OnceLock::new(),
        }
    }

    /// Read a fixed set of variables instead of the process environment.
    /// No env file is consulted unless one is added with [`Self::with_env_file`].
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            env_file: None,
            environ: Environ::Fixed(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            cached: OnceLock::new(),
        }
    }

    pub fn with_env_file(mut self, env_file: impl Into<PathBuf>) -> Self {
        self.env_file = Some(env_file.into());
        self
    }

    /// Return the settings snapshot, loading it on first use.
    pub fn get_settings(&self) -> Result<Arc<Settings>, ConfigError> {
        if let Some(settings) = self.cached.get() {
            return Ok(Arc::clone(settings));
        }

        let loaded = Arc::new(self.load()?);
        Ok(Arc::clone(self.cached.get_or_init(|| loaded)))
    }

    fn load(&self) -> Result<Settings, ConfigError> {
        let mut vars = match &self.env_file {
            Some(path) => read_env_file(path)?,
            None => Vec::new(),
        };

        // Environment last so it overrides the file
        match &self.environ {
            Environ::Process => vars.extend(collect_environ(std::env::vars_os())?),
            Environ::Fixed(fixed) => vars.extend(fixed.iter().cloned()),
        }

        Settings::from_vars(vars)
    }
}

/// Convert OS environment pairs to strings.
///
/// Names that are not UTF-8 cannot be settings and are skipped. A known
/// setting whose value is not UTF-8 is rejected.
fn collect_environ<I>(vars: I) -> Result<Vec<(String, String)>, ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut collected = Vec::new();
    for (key, value) in vars {
        let Ok(key) = key.into_string() else {
            continue;
        };
        match value.into_string() {
            Ok(value) => collected.push((key, value)),
            Err(raw) => {
                let known = KNOWN_KEYS
                    .iter()
                    .copied()
                    .find(|k| k.eq_ignore_ascii_case(&key));
                if let Some(known) = known {
                    return Err(ConfigError::InvalidValue {
                        key: known,
                        value: raw.to_string_lossy().into_owned(),
                        expected: "valid UTF-8",
                    });
                }
            }
        }
    }
    Ok(collected)
}

/// Read `KEY=value` pairs from an env file without touching the process
/// environment. A missing file yields no pairs.
fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let env_file_error = |source: dotenv::Error| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    // dotenv marks `from_path_iter` deprecated, but it is the only entry point
    // that parses a file without writing into the process environment.
    #[allow(deprecated)]
    let iter = match dotenv::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => return Ok(Vec::new()),
        Err(err) => return Err(env_file_error(err)),
    };

    iter.map(|item| item.map_err(env_file_error)).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenv::Error,
    },
    #[error("Invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}
