//! Common logging service initialization for binaries.

use std::path::PathBuf;

use tracing::info;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{fmt::format::FmtSpan, util::TryInitError};

use super::{init, FileLoggingConfig, LoggerConfig};

/// Configuration parameters for logging initialization.
#[derive(Debug)]
pub struct LoggingInitConfig<'a> {
    /// Base service name
    pub service_name: &'a str,
    /// Directory for file-based logging
    pub log_dir: Option<&'a PathBuf>,
    /// Prefix for log file names
    pub log_file_prefix: Option<&'a str>,
    /// Use JSON format instead of compact, on stdout and in files
    pub json_format: Option<bool>,
    /// Log file rotation, daily if unset
    pub rotation: Option<Rotation>,
    /// Log span open and close events
    pub span_events: bool,
    /// Default log file prefix if not specified in config
    pub default_log_prefix: &'a str,
}

/// Builds the [`LoggerConfig`] described by `config`.
pub(crate) fn logger_config(config: &LoggingInitConfig<'_>) -> LoggerConfig {
    let mut lconfig = LoggerConfig::new(config.service_name.to_owned());

    if let Some(dir) = config.log_dir {
        let prefix = config
            .log_file_prefix
            .unwrap_or(config.default_log_prefix)
            .to_string();
        let file_config = FileLoggingConfig::new(dir.clone(), prefix)
            .with_rotation(config.rotation.clone().unwrap_or(Rotation::DAILY))
            .with_json_format(config.json_format.unwrap_or(false));
        lconfig = lconfig.with_file_logging(file_config);
    }

    if let Some(json_format) = config.json_format {
        lconfig = lconfig.with_json_logging(json_format);
    }

    if config.span_events {
        lconfig = lconfig.with_fmt_span(FmtSpan::NEW | FmtSpan::CLOSE);
    }

    lconfig
}

/// Initialize logging from configuration with all standard setup.
pub fn init_logging_from_config(config: LoggingInitConfig<'_>) -> Result<(), TryInitError> {
    let lconfig = logger_config(&config);
    let file_logging_config = lconfig.file_logging_config.clone();

    init(lconfig)?;

    if let Some(file_config) = &file_logging_config {
        info!(
            log_dir = %file_config.directory.display(),
            log_prefix = %file_config.file_name_prefix,
            "file logging enabled"
        );
    }
    Ok(())
}
