//! Process-wide config handle.
//!
//! Readers take an `Arc` snapshot through `cfg()` without locking. In serve
//! mode an edit to `livepen.toml` swaps in a freshly loaded config; readers
//! holding the old snapshot keep it until they drop it.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result};
use arc_swap::ArcSwap;

use crate::config::ProjectConfig;
use crate::utils::hash;

static CONFIG: LazyLock<ArcSwap<ProjectConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(ProjectConfig::default()));

/// Fingerprint of the config file the current snapshot was loaded from.
static LOADED_FROM: AtomicU64 = AtomicU64::new(NO_FILE);

/// Fingerprint of a missing or empty config file.
const NO_FILE: u64 = 0;

#[inline]
pub fn cfg() -> Arc<ProjectConfig> {
    CONFIG.load_full()
}

/// Install the config loaded at startup.
pub fn init_config(config: ProjectConfig) -> Arc<ProjectConfig> {
    LOADED_FROM.store(fingerprint(&config.config_path), Ordering::Relaxed);
    let config = Arc::new(config);
    CONFIG.store(Arc::clone(&config));
    config
}

/// Load the config again if the file's content differs from the last load.
///
/// Returns `Ok(false)` for a touch that left the content as it was. On error
/// the previous snapshot stays installed.
pub fn reload_config() -> Result<bool> {
    let current = cfg();
    let cli = current
        .cli
        .context("config was not loaded from the command line")?;

    let seen = fingerprint(&current.config_path);
    if seen == LOADED_FROM.load(Ordering::Relaxed) {
        return Ok(false);
    }

    CONFIG.store(Arc::new(ProjectConfig::load(cli)?));
    LOADED_FROM.store(seen, Ordering::Relaxed);
    Ok(true)
}

fn fingerprint(path: &Path) -> u64 {
    match std::fs::read(path) {
        Ok(bytes) if !bytes.is_empty() => hash::compute(&bytes),
        _ => NO_FILE,
    }
}

/// Held by tests that install a global config.
#[cfg(test)]
pub(crate) static TEST_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());

/// Load `config_path` the way `livepen serve -C <path>` would and install it.
#[cfg(test)]
pub(crate) fn install_for_test(config_path: &Path) -> Arc<ProjectConfig> {
    use clap::Parser;

    let path = config_path.to_string_lossy().into_owned();
    let cli = crate::cli::Cli::parse_from(["livepen", "-C", path.as_str(), "serve"]);
    let cli: &'static crate::cli::Cli = Box::leak(Box::new(cli));
    init_config(ProjectConfig::load(cli).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_skips_touch_applies_edit_keeps_old_on_error() {
        let _guard = TEST_LOCK.lock();
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("livepen.toml");
        std::fs::write(&path, "[document]\ntitle = \"One\"").unwrap();
        install_for_test(&path);

        assert!(!reload_config().unwrap());
        std::fs::write(&path, "[document]\ntitle = \"One\"").unwrap();
        assert!(!reload_config().unwrap());
        assert_eq!(cfg().document.title, "One");

        std::fs::write(&path, "[document]\ntitle = \"Two\"").unwrap();
        assert!(reload_config().unwrap());
        assert_eq!(cfg().document.title, "Two");

        std::fs::write(&path, "[document\ntitle = ").unwrap();
        assert!(reload_config().is_err());
        assert_eq!(cfg().document.title, "Two");
    }

    #[test]
    fn test_reload_without_cli_fails() {
        let _guard = TEST_LOCK.lock();
        init_config(ProjectConfig::default());
        assert!(reload_config().is_err());
    }

    #[test]
    fn test_fingerprint_missing_and_empty_match() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("livepen.toml");
        assert_eq!(fingerprint(&path), NO_FILE);

        std::fs::write(&path, "").unwrap();
        assert_eq!(fingerprint(&path), NO_FILE);

        std::fs::write(&path, "[serve]\nport = 1").unwrap();
        assert_ne!(fingerprint(&path), NO_FILE);
    }
}
