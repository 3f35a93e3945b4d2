use std::{
    env::var,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use config::{Config, ConfigError, Environment, File};
use latinum_common::logging::{LoggingInitConfig, Rotation};
use latinum_config::{LatinumConfig, LogRotation};
use thiserror::Error;

/// Config file read when neither `--config` nor [`CONFIG_PATH_ENV`] is given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "latinum.toml";

/// Environment variable naming the config file.
pub(crate) const CONFIG_PATH_ENV: &str = "LATINUM_CONFIG";

/// Environment variable selecting the run environment.
pub(crate) const RUN_ENV: &str = "LATINUM_ENV";

/// Prefix of environment overrides, e.g. `LATINUM__ALGOD__TOKEN`.
const OVERRIDE_PREFIX: &str = "LATINUM";

const OVERRIDE_SEPARATOR: &str = "__";

/// The environment the tool runs in. Each one may layer its own
/// `<stem>.<env>.toml` over the base config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum RunEnv {
    #[default]
    Development,
    Production,
}

impl RunEnv {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            RunEnv::Development => "development",
            RunEnv::Production => "production",
        }
    }
}

impl fmt::Display for RunEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunEnv {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(RunEnv::Development),
            "production" => Ok(RunEnv::Production),
            other => Err(SettingsError::InvalidEnv(other.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("invalid LATINUM_ENV {0:?}, expected development or production")]
    InvalidEnv(String),

    #[error("config file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Settings resolved once at startup.
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) env: RunEnv,
    pub(crate) config_file: PathBuf,
    pub(crate) config: LatinumConfig,
}

impl Settings {
    /// Loads the config file named by `explicit`, then [`CONFIG_PATH_ENV`],
    /// then [`DEFAULT_CONFIG_FILE`]. Only the default may be absent.
    pub(crate) fn load(explicit: Option<PathBuf>) -> Result<Self, SettingsError> {
        let env = match var(RUN_ENV) {
            Ok(name) => name.parse()?,
            Err(_) => RunEnv::default(),
        };

        let named = explicit.or_else(|| var(CONFIG_PATH_ENV).ok().map(PathBuf::from));
        let required = named.is_some();
        let config_file = named.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config = build_config(&config_file, required, env, env_overrides())?;
        Ok(Settings {
            env,
            config_file,
            config,
        })
    }

    /// Logging setup described by the `[logging]` section.
    pub(crate) fn logging<'a>(
        &'a self,
        service_name: &'a str,
        default_log_prefix: &'a str,
    ) -> LoggingInitConfig<'a> {
        let logging = &self.config.logging;
        LoggingInitConfig {
            service_name,
            log_dir: logging.log_dir.as_ref(),
            log_file_prefix: logging.log_file_prefix.as_deref(),
            json_format: logging.json_format,
            rotation: logging.rotation.map(log_rotation),
            span_events: logging.span_events,
            default_log_prefix,
        }
    }
}

fn log_rotation(rotation: LogRotation) -> Rotation {
    match rotation {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}

fn env_overrides() -> Environment {
    Environment::with_prefix(OVERRIDE_PREFIX)
        .separator(OVERRIDE_SEPARATOR)
        .try_parsing(true)
}

/// `latinum.toml` -> `latinum.production.toml`.
fn env_overlay_path(config_file: &Path, env: RunEnv) -> PathBuf {
    let stem = config_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "latinum".to_owned());
    config_file.with_file_name(format!("{stem}.{env}.toml"))
}

fn build_config(
    config_file: &Path,
    required: bool,
    env: RunEnv,
    overrides: Environment,
) -> Result<LatinumConfig, SettingsError> {
    if required && !config_file.exists() {
        return Err(SettingsError::MissingFile(config_file.to_owned()));
    }
    let overlay = env_overlay_path(config_file, env);

    let config = Config::builder()
        .add_source(File::from(config_file).required(false))
        .add_source(File::from(overlay.as_path()).required(false))
        .add_source(overrides)
        .build()?
        .try_deserialize::<LatinumConfig>()?;
    Ok(config)
}
