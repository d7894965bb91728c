//! Build and install the native dependency chain for CI and local builds.
//!
//! Three CMake projects are cloned into a workspace, built out-of-tree and
//! installed into isolated prefixes. Each project is configured with the
//! install prefixes of the ones before it:
//!
//! ```text
//! <prefix>/common_system_install
//!     │
//!     ▼
//! <prefix>/thread_system_install   (config patched: fmt dependency removed)
//!     │
//!     ▼
//! <prefix>/logger_system_install
//! ```
//!
//! - [`config`] - Run configuration and base CMake arguments
//! - [`dependency`] - Dependency descriptors and argument propagation
//! - [`setup`] - Per-dependency clone/configure/build/install
//! - [`patch`] - Package-config patching
//! - [`installer`] - Sequencing of the whole chain
//! - [`preflight`] - Host tool validation before building
//! - [`process`] - External command execution
//!
//! # Example
//!
//! ```rust,no_run
//! use setup_deps::{installer, InstallConfig, SystemRunner, TargetOs};
//!
//! let config = InstallConfig {
//!     build_type: "Release".into(),
//!     install_prefix: "/opt/deps".into(),
//!     compiler: String::new(),
//!     os: TargetOs::detect(),
//!     workspace_dir: std::env::current_dir()?,
//! };
//! installer::run(&config, &mut SystemRunner)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod dependency;
pub mod installer;
pub mod patch;
pub mod preflight;
pub mod process;
pub mod setup;

pub use config::{InstallConfig, TargetOs};
pub use dependency::Dependency;
pub use installer::InstallReport;
pub use patch::PatchOutcome;
pub use process::{Cmd, CommandRunner, SystemRunner};
