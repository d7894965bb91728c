//! Run configuration shared by every dependency in the chain.

use std::fmt;
use std::path::{Path, PathBuf};

/// Target operating system, spelled the way CI matrices name it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOs {
    Linux,
    Darwin,
    Windows,
    Other(String),
}

impl TargetOs {
    /// Platform the installer is running on.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "linux" => Self::Linux,
            "macos" => Self::Darwin,
            "windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }

    /// Parse a CLI value. Matching is exact: `windows` is not `Windows`.
    pub fn parse(value: &str) -> Self {
        match value {
            "Linux" => Self::Linux,
            "Darwin" => Self::Darwin,
            "Windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Linux => "Linux",
            Self::Darwin => "Darwin",
            Self::Windows => "Windows",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable settings for one installer run.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// CMake build type (`Debug`, `Release`, ...).
    pub build_type: String,
    /// Base directory; each dependency installs to `<prefix>/<name>_install`.
    pub install_prefix: PathBuf,
    /// Compiler family hint (`gcc`, `clang`, `msvc`), empty for the default.
    pub compiler: String,
    pub os: TargetOs,
    /// Directory dependency sources are cloned into.
    pub workspace_dir: PathBuf,
}

impl InstallConfig {
    /// Anchor relative install prefix and workspace paths at `base`.
    ///
    /// CMake resolves a relative install prefix against the build directory,
    /// while the patch step searches from the process's working directory;
    /// absolute paths keep the two in agreement.
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if self.install_prefix.is_relative() {
            self.install_prefix = base.join(&self.install_prefix);
        }
        if self.workspace_dir.is_relative() {
            self.workspace_dir = base.join(&self.workspace_dir);
        }
        self
    }

    /// Configure arguments every dependency receives.
    pub fn base_cmake_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("-DCMAKE_BUILD_TYPE={}", self.build_type),
            "-DBUILD_TESTS=OFF".to_string(),
            "-DBUILD_SAMPLES=OFF".to_string(),
            "-DUSE_STD_FORMAT=ON".to_string(),
        ];

        // CI images ship gcc-13 alongside an older default gcc.
        if self.os == TargetOs::Linux && self.compiler == "gcc" {
            args.push("-DCMAKE_C_COMPILER=gcc-13".to_string());
            args.push("-DCMAKE_CXX_COMPILER=g++-13".to_string());
        }

        args
    }
}
