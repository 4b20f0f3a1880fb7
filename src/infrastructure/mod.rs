//! Infrastructure layer module
//!
//! This module contains the adapters that read settings from the outside
//! world and report on it:
//! - Configuration loading (environment and env-files via figment)
//! - Logging infrastructure

pub mod config;
pub mod logging;
