//! Configuration utility types.
//!
//! - `error` - `ConfigError` and collected validation `ConfigDiagnostics`
//! - `handle` - Global configuration handle (thread-safe, reloadable)

mod error;
pub mod handle;

pub use error::{ConfigDiagnostics, ConfigError};
pub use handle::{cfg, init_config, reload_config};
#[cfg(test)]
pub(crate) use handle::{TEST_LOCK, install_for_test};
