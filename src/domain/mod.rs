//! Domain layer for the stego settings
//!
//! Settings records, the groups they belong to, and the errors raised while
//! building them.

pub mod error;
pub mod models;

pub use error::{ConfigError, ConfigResult};
