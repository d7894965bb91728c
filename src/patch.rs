//! Post-install patching of generated CMake package configs.
//!
//! `thread_system` exports a `find_dependency(fmt)` call even when it was
//! built with `USE_STD_FORMAT=ON`, which makes every downstream
//! `find_package(thread_system)` fail on hosts without fmt installed.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Basename of the package config generated by `thread_system`'s install.
pub const THREAD_CONFIG_FILE: &str = "thread_system-config.cmake";

static FMT_DEPENDENCY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"find_dependency\s*\(\s*fmt[^)]*\)").expect("Invalid find_dependency(fmt) regex")
});

/// Result of [`patch_thread_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The statement was commented out in this file.
    Patched(PathBuf),
    /// The file exists but declares no fmt dependency.
    Unchanged(PathBuf),
    /// No config file under the install tree.
    NotFound,
}

/// Depth-first search of `root` for the first file named `basename`.
///
/// Within each directory, files are visited before subdirectories and both
/// in name order, so a shallower match always wins.
pub fn find_config_file(root: &Path, basename: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|e| e.file_type().is_file() && e.file_name() == basename)
        .map(|e| e.into_path())
}

/// Comment out every `find_dependency(fmt ...)` statement.
///
/// The whole original statement is kept after the `# `, whatever its
/// spacing or extra arguments.
pub fn comment_out_fmt_dependency(content: &str) -> Cow<'_, str> {
    FMT_DEPENDENCY_REGEX.replace_all(content, "# ${0}")
}

/// Strip the fmt dependency from the installed `thread_system` config.
///
/// A missing config file is not an error: it is logged and the install
/// continues.
pub fn patch_thread_config(install_dir: &Path) -> Result<PatchOutcome> {
    info!("Patching {}...", THREAD_CONFIG_FILE);

    let Some(config_file) = find_config_file(install_dir, THREAD_CONFIG_FILE) else {
        warn!(
            "{} not found under {}",
            THREAD_CONFIG_FILE,
            install_dir.display()
        );
        return Ok(PatchOutcome::NotFound);
    };

    info!("Found config file: {}", config_file.display());

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("reading '{}'", config_file.display()))?;

    let patched = comment_out_fmt_dependency(&content);
    if let Cow::Borrowed(_) = patched {
        info!("No fmt dependency declared; leaving config untouched.");
        return Ok(PatchOutcome::Unchanged(config_file));
    }

    fs::write(&config_file, patched.as_bytes())
        .with_context(|| format!("writing patched '{}'", config_file.display()))?;

    info!("Patched config file successfully.");
    Ok(PatchOutcome::Patched(config_file))
}
