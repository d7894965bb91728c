//! Sequencing of the whole dependency chain.
//!
//! ```text
//! common_system ──► thread_system ──► (patch config) ──► logger_system
//! ```
//!
//! Each step finishes installing before the next one is configured, since
//! later configure arguments are computed from earlier install paths.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::InstallConfig;
use crate::dependency::{plan_chain, THREAD_SYSTEM};
use crate::patch::{patch_thread_config, PatchOutcome};
use crate::process::{ensure_exists, CommandRunner};
use crate::setup::setup_dependency;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// `(name, install_dir)` in installation order.
    pub installed: Vec<(String, PathBuf)>,
    pub thread_config: PatchOutcome,
}

/// Fail unless the workspace the dependencies are cloned into exists.
pub fn check_workspace(config: &InstallConfig) -> Result<()> {
    ensure_exists(&config.workspace_dir, "Workspace directory")
}

/// Build and install every dependency in the chain.
///
/// Stops at the first failing step. Already-completed installs are left in
/// place.
pub fn run(config: &InstallConfig, runner: &mut dyn CommandRunner) -> Result<InstallReport> {
    check_workspace(config)?;

    info!(
        "Installing dependencies ({} build, os {}) into {}",
        config.build_type,
        config.os,
        config.install_prefix.display()
    );

    let mut installed = Vec::new();
    let mut thread_config = PatchOutcome::NotFound;

    for dep in plan_chain(config) {
        setup_dependency(runner, &dep, &config.build_type, &config.workspace_dir)
            .with_context(|| format!("setting up {}", dep.name))?;

        if dep.name == THREAD_SYSTEM {
            thread_config = patch_thread_config(&dep.install_dir)?;
        }

        installed.push((dep.name, dep.install_dir));
    }

    info!("All dependencies installed.");
    Ok(InstallReport {
        installed,
        thread_config,
    })
}
