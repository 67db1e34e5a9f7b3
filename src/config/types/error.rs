//! Configuration errors.
//!
//! Validation does not stop at the first problem. Every section pushes into
//! one `ConfigDiagnostics`, which is reported as a single error.

use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file is not valid TOML")]
    Toml(#[from] toml::de::Error),

    // No #[from]: the diagnostics already print everything, a source would repeat it
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One invalid setting.
#[derive(Debug, Clone)]
pub struct Problem {
    /// Dotted key, e.g. `build.output`
    pub field: &'static str,
    pub message: String,
    pub hint: Option<String>,
}

/// Every problem found in one validation pass.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    problems: Vec<Problem>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.problems.push(Problem {
            field,
            message: message.into(),
            hint: None,
        });
    }

    pub fn error_with_hint(
        &mut self,
        field: &'static str,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.problems.push(Problem {
            field,
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    #[cfg(test)]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// `Err(self)` if anything was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.problems.len();
        let noun = if count == 1 { "problem" } else { "problems" };
        write!(f, "{} ({count} {noun})", "invalid configuration".red().bold())?;

        for problem in &self.problems {
            write!(f, "\n  {} {}", problem.field.cyan(), problem.message)?;
            if let Some(hint) = &problem.hint {
                write!(f, "\n    {} {}", "hint:".yellow(), hint)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("livepen.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(io_err.to_string().contains("livepen.toml"));
    }

    #[test]
    fn test_diagnostics_collect_all() {
        let mut diag = ConfigDiagnostics::new();
        diag.error("serve.port", "port must be non-zero");
        diag.error_with_hint("build.output", "collides", "rename it");

        assert_eq!(diag.problems().len(), 2);
        assert_eq!(diag.problems()[1].hint.as_deref(), Some("rename it"));

        let display = diag.into_result().unwrap_err().to_string();
        assert!(display.contains("2 problems"));
        assert!(display.contains("serve.port"));
        assert!(display.contains("build.output"));
    }

    #[test]
    fn test_empty_diagnostics_ok() {
        assert!(ConfigDiagnostics::new().into_result().is_ok());
    }
}
