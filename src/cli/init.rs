//! Project initialization.
//!
//! Writes `livepen.toml` and the three starter sources. Existing files are
//! never overwritten: if any target already exists nothing is written.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use crate::embed::init::{INDEX_HTML, SCRIPT_JS, STYLE_CSS, config_toml};
use crate::log;

/// Default config filename
const CONFIG_FILE: &str = "livepen.toml";

/// One file `init` will create.
#[derive(Debug)]
struct PlannedFile {
    path: PathBuf,
    content: String,
}

/// Create a starter project in `root`.
///
/// If `dry_run` is true, only prints what would be written.
pub fn new_project(root: &Path, dry_run: bool) -> Result<()> {
    let plan = plan(root);

    if dry_run {
        for file in &plan {
            println!("{} ({} bytes)", file.path.display(), file.content.len());
        }
        return Ok(());
    }

    let conflicts: Vec<_> = plan.iter().filter(|f| f.path.exists()).collect();
    if !conflicts.is_empty() {
        let list = conflicts
            .iter()
            .map(|f| format!("  {}", f.path.display()))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("refusing to overwrite existing files:\n{list}");
    }

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create directory '{}'", root.display()))?;

    for file in &plan {
        fs::write(&file.path, &file.content)
            .with_context(|| format!("Failed to write '{}'", file.path.display()))?;
        crate::debug!("init"; "wrote {}", file.path.display());
    }

    log!("init"; "project initialized in {}", root.display());
    Ok(())
}

fn plan(root: &Path) -> Vec<PlannedFile> {
    let title = project_title(root);
    let config = config_toml(&title);

    [
        (CONFIG_FILE, config),
        ("index.html", INDEX_HTML.to_owned()),
        ("style.css", STYLE_CSS.to_owned()),
        ("script.js", SCRIPT_JS.to_owned()),
    ]
    .into_iter()
    .map(|(name, content)| PlannedFile {
        path: root.join(name),
        content,
    })
    .collect()
}

/// Directory name, used as the document title.
fn project_title(root: &Path) -> String {
    crate::utils::path::normalize_path(root)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "livepen".to_owned())
}
