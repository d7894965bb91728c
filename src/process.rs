//! External command execution.
//!
//! Every clone/configure/build/install step goes through [`Cmd`] and a
//! [`CommandRunner`]. A failing command is fatal: the error propagates up to
//! `main`, which prints it and exits non-zero.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

/// Description of a single external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    error_msg: Option<String>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            error_msg: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Directory the command runs in.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Message prefixed to the error when the command fails.
    pub fn error_msg(mut self, msg: impl Into<String>) -> Self {
        self.error_msg = Some(msg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments as passed to the process. Empty strings are dropped.
    pub fn argv(&self) -> Vec<&str> {
        self.args
            .iter()
            .map(String::as_str)
            .filter(|a| !a.is_empty())
            .collect()
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Command line as a single string, for logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.argv())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run through [`SystemRunner`].
    pub fn run(&self) -> Result<()> {
        SystemRunner.run(self)
    }

    fn failure_prefix(&self) -> String {
        self.error_msg
            .clone()
            .unwrap_or_else(|| format!("{} failed", self.program))
    }
}

/// Executes [`Cmd`]s on behalf of the installer.
pub trait CommandRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<()>;
}

/// Spawns real processes with inherited stdio so build output streams to the
/// terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<()> {
        info!("Running: {}", cmd.display());

        let mut command = Command::new(&cmd.program);
        command
            .args(cmd.argv())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &cmd.cwd {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .with_context(|| format!("Failed to execute: {}", cmd.display()))?;

        if !status.success() {
            let dir = cmd
                .cwd
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| ".".to_string());
            bail!(
                "{}\n  Command: {}\n  Directory: {}\n  Exit code: {}",
                cmd.failure_prefix(),
                cmd.display(),
                dir,
                status.code().unwrap_or(-1)
            );
        }

        Ok(())
    }
}

/// Fail with a descriptive error if `path` does not exist.
pub fn ensure_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} not found at: {}", what, path.display());
    }
    Ok(())
}
