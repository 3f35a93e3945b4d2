//! Logging subsystem.

pub mod manager;
pub mod service;
pub mod types;


// Re-export main types and functions
pub use manager::{finalize, init};
pub use service::{init_logging_from_config, LoggingInitConfig};
pub use types::{FileLoggingConfig, LoggerConfig, StdoutConfig};

// Re-export tracing-appender types for convenience
pub use tracing_appender::rolling::Rotation;
