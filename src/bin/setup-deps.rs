use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use setup_deps::{installer, preflight, InstallConfig, PatchOutcome, SystemRunner, TargetOs};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Build and install the common/thread/logger dependency chain
#[derive(Parser)]
#[command(name = "setup-deps")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Build type (Debug/Release)
    #[arg(long, default_value = "Release")]
    build_type: String,

    /// Base install directory
    #[arg(long)]
    install_prefix: PathBuf,

    /// Compiler type (gcc/clang/msvc)
    #[arg(long, default_value_t)]
    compiler: String,

    /// OS type (Linux/Darwin/Windows), detected when omitted
    #[arg(long)]
    os: Option<String>,

    /// Directory dependencies are cloned into (default: current directory)
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .without_time()
        .with_target(false)
        .init();

    let cwd = std::env::current_dir().context("resolving current directory")?;

    let config = InstallConfig {
        build_type: cli.build_type,
        install_prefix: cli.install_prefix,
        compiler: cli.compiler,
        os: cli
            .os
            .as_deref()
            .map(TargetOs::parse)
            .unwrap_or_else(TargetOs::detect),
        workspace_dir: cli.workspace.unwrap_or_else(|| cwd.clone()),
    }
    .resolved_against(&cwd);

    installer::check_workspace(&config)?;
    preflight::check_host_tools()?;

    let report = installer::run(&config, &mut SystemRunner)?;

    if report.thread_config == PatchOutcome::NotFound {
        warn!("thread_system config was not patched; downstream find_package may require fmt");
    }
    for (name, dir) in &report.installed {
        info!("  {} -> {}", name, dir.display());
    }

    Ok(())
}
