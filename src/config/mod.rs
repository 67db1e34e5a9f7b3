//! Project configuration management for `livepen.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── sources    # [sources]
//! │   ├── document   # [document]
//! │   ├── serve      # [serve]
//! │   └── build      # [build]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── handle     # Global config handle
//! └── mod.rs         # ProjectConfig (this file)
//! ```
//!
//! A project does not need a config file: without one, the current directory
//! is the root and every section uses its defaults.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildConfig, DocumentConfig, ServeConfig, SourcesConfig};
pub use types::{ConfigDiagnostics, ConfigError, cfg, init_config, reload_config};
#[cfg(test)]
pub(crate) use types::{TEST_LOCK, install_for_test};

use crate::{
    cli::{Cli, Commands},
    debug, log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Everything read from `livepen.toml`, plus where it was read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Command line this config was loaded for; `reload_config` reuses it.
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute config file path. Set even when the file does not exist, so
    /// the watcher can pick it up once created.
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory holding the config file; relative paths resolve against it.
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub document: DocumentConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

impl ProjectConfig {
    /// Resolve, read, override and validate the project config.
    ///
    /// The config file is searched upward from the working directory. A
    /// missing file is not an error: the working directory becomes the root
    /// and every section keeps its defaults.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (mut config, path) = match find_config_file(&cli.config) {
            Some(path) => (Self::read(&path)?, path),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current working directory")?;
                debug!("config"; "{} not found, using defaults", cli.config.display());
                (Self::default(), cwd.join(&cli.config))
            }
        };

        config.config_path = normalize_path(&path);
        config.cli = Some(cli);
        config.override_from(&cli.command);

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.normalize_paths(&root);

        config.validate()?;
        Ok(config)
    }

    /// Read a config file, warning about keys nothing consumes.
    fn read(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let (config, unknown) = Self::parse(&text)?;

        if let Some((first, rest)) = unknown.split_first() {
            let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
            log!("warning"; "{name}: ignoring unknown key `{first}`");
            for key in rest {
                log!("warning"; "{name}: ignoring unknown key `{key}`");
            }
        }

        Ok(config)
    }

    /// Deserialize TOML text, returning the dotted paths of unknown keys.
    fn parse(text: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut unknown = Vec::new();
        let config = serde_ignored::deserialize(toml::Deserializer::new(text), |key| {
            unknown.push(key.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, unknown))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// `path` relative to the project root, for log lines.
    pub fn relative_to_root<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Whether a config file exists on disk.
    pub fn has_config_file(&self) -> bool {
        self.config_path.is_file()
    }

    /// Command line flags win over file values.
    fn override_from(&mut self, command: &Commands) {
        fn take<T: Clone>(slot: &mut T, flag: Option<&T>) {
            if let Some(value) = flag {
                slot.clone_from(value);
            }
        }

        match command {
            Commands::Build { output, .. } => take(&mut self.build.output, output.as_ref()),
            Commands::Serve {
                interface,
                port,
                watch,
                ..
            } => {
                take(&mut self.serve.interface, interface.as_ref());
                take(&mut self.serve.port, port.as_ref());
                take(&mut self.serve.watch, watch.as_ref());
            }
            Commands::Init { .. } => {}
        }
    }

    /// Make every configured path absolute under `root`.
    pub(crate) fn normalize_paths(&mut self, root: &Path) {
        self.root = normalize_path(root);
        self.sources.normalize(&self.root);
        self.build.normalize(&self.root);
    }

    /// Check every section, reporting all problems together.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.sources.validate(&mut diag);
        self.document.validate(&mut diag);
        self.serve.validate(&mut diag);
        self.build.validate(&self.sources, &mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text, failing on unknown keys so typos in tests surface.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ProjectConfig {
    let (parsed, unknown) = ProjectConfig::parse(content).unwrap();
    assert!(unknown.is_empty(), "unknown keys in test config: {unknown:?}");
    parsed
}

// ============================================================================
// tests
// ============================================================================
