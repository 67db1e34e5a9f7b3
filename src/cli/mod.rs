//! Command-line interface module.

mod args;
pub mod build;
pub mod init;
pub mod serve;

pub use args::{Cli, Commands};
