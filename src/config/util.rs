//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/pen/demo/      ← cwd
/// /home/user/pen/livepen.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("livepen.toml");
        std::fs::write(&config, "").unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config_from(&nested, Path::new("livepen.toml"));
        assert_eq!(found, Some(config));
    }

    #[test]
    fn test_find_config_ignores_directories() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("livepen.toml")).unwrap();

        let found = find_config_from(temp.path(), Path::new("livepen.toml"));
        // Either absent or found in some ancestor, never the directory itself
        assert_ne!(found, Some(temp.path().join("livepen.toml")));
    }

    #[test]
    fn test_find_absolute_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert_eq!(find_config_file(&missing), None);
    }
}
