//! Dependency descriptors and configure-argument propagation.
//!
//! The chain is linear: each dependency is configured with the install
//! directories of everything installed before it, so CMake's
//! `find_package` and the compiler can locate them.

use std::path::{Path, PathBuf};

use crate::config::{InstallConfig, TargetOs};

pub const COMMON_SYSTEM: &str = "common_system";
pub const THREAD_SYSTEM: &str = "thread_system";
pub const LOGGER_SYSTEM: &str = "logger_system";

/// Installation order. Later entries depend on earlier ones.
pub const CHAIN: &[&str] = &[COMMON_SYSTEM, THREAD_SYSTEM, LOGGER_SYSTEM];

const REPO_BASE_URL: &str = "https://github.com/kcenon";

/// One external package to clone, build and install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub repo_url: String,
    pub install_dir: PathBuf,
    pub cmake_args: Vec<String>,
}

impl Dependency {
    /// Build a descriptor that can see every directory in `upstream`.
    pub fn new(config: &InstallConfig, name: &str, upstream: &[PathBuf]) -> Self {
        let install_dir = install_dir_for(&config.install_prefix, name);

        let mut cmake_args = config.base_cmake_args();
        cmake_args.push(format!("-DCMAKE_INSTALL_PREFIX={}", install_dir.display()));
        if !upstream.is_empty() {
            cmake_args.push(prefix_path(upstream));
            cmake_args.push(include_flags(&config.os, upstream));
        }

        Self {
            name: name.to_string(),
            repo_url: repo_url_for(name),
            install_dir,
            cmake_args,
        }
    }
}

pub fn repo_url_for(name: &str) -> String {
    format!("{}/{}.git", REPO_BASE_URL, name)
}

pub fn install_dir_for(prefix: &Path, name: &str) -> PathBuf {
    prefix.join(format!("{}_install", name))
}

/// `-DCMAKE_PREFIX_PATH` listing `dirs` in order, `;`-separated.
pub fn prefix_path(dirs: &[PathBuf]) -> String {
    let joined = dirs
        .iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(";");
    format!("-DCMAKE_PREFIX_PATH={}", joined)
}

/// `-DCMAKE_CXX_FLAGS` adding `<dir>/include` for each dir.
///
/// MSVC takes `/I`; every other toolchain takes `-I`.
pub fn include_flags(os: &TargetOs, dirs: &[PathBuf]) -> String {
    let switch = if os.is_windows() { "/I" } else { "-I" };
    let flags = dirs
        .iter()
        .map(|d| format!("{}{}/include", switch, d.display()))
        .collect::<Vec<_>>()
        .join(" ");
    format!("-DCMAKE_CXX_FLAGS={}", flags)
}

/// Descriptors for the whole chain, in installation order.
pub fn plan_chain(config: &InstallConfig) -> Vec<Dependency> {
    let mut installed: Vec<PathBuf> = Vec::with_capacity(CHAIN.len());
    let mut chain = Vec::with_capacity(CHAIN.len());

    for name in CHAIN {
        let dep = Dependency::new(config, name, &installed);
        installed.push(dep.install_dir.clone());
        chain.push(dep);
    }

    chain
}
