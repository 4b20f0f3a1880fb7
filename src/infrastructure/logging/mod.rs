//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty stdout output
//! - JSON file output with rotation

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, RotationPolicy, LOG_ENV_PREFIX};
pub use logger::{debug, error, info, instrument, trace, warn, LoggerImpl, LOG_FILE_NAME};
