//! Clone, configure, build and install a single dependency.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::dependency::Dependency;
use crate::process::{Cmd, CommandRunner};

/// Source checkout for `name` inside the workspace.
pub fn repo_dir(workspace: &Path, name: &str) -> PathBuf {
    workspace.join(name)
}

/// Out-of-tree build directory, recreated on every run.
pub fn build_dir(workspace: &Path, name: &str) -> PathBuf {
    repo_dir(workspace, name).join("build")
}

/// Run the full clone → configure → build → install sequence for `dep`.
///
/// The clone is skipped when the checkout already exists. The build
/// directory is always wiped so configure starts from a clean cache.
pub fn setup_dependency(
    runner: &mut dyn CommandRunner,
    dep: &Dependency,
    build_type: &str,
    workspace: &Path,
) -> Result<()> {
    info!("=== Setting up {} ===", dep.name);

    let repo = repo_dir(workspace, &dep.name);
    if repo.exists() {
        info!("  [SKIP] {} already checked out at {}", dep.name, repo.display());
    } else {
        runner.run(
            &Cmd::new("git")
                .args(["clone", dep.repo_url.as_str(), dep.name.as_str()])
                .cwd(workspace)
                .error_msg(format!("git clone failed for {}", dep.name)),
        )?;
    }

    let build = build_dir(workspace, &dep.name);
    recreate_dir(&build)?;

    runner.run(
        &Cmd::new("cmake")
            .args(["-B", ".", "-S", ".."])
            .args(dep.cmake_args.iter().map(String::as_str))
            .cwd(&build)
            .error_msg(format!("cmake configure failed for {}", dep.name)),
    )?;

    runner.run(
        &Cmd::new("cmake")
            .args(["--build", ".", "--config", build_type, "--parallel"])
            .cwd(&build)
            .error_msg(format!("cmake build failed for {}", dep.name)),
    )?;

    runner.run(
        &Cmd::new("cmake")
            .args(["--install", ".", "--config", build_type])
            .cwd(&build)
            .error_msg(format!("cmake install failed for {}", dep.name)),
    )?;

    info!("=== {} setup complete ===", dep.name);
    Ok(())
}

fn recreate_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        debug!("removing stale build directory {}", dir.display());
        fs::remove_dir_all(dir)
            .with_context(|| format!("removing build directory '{}'", dir.display()))?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("creating build directory '{}'", dir.display()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every command instead of running it.
    #[derive(Default)]
    pub(crate) struct RecordingRunner {
        pub commands: Vec<Cmd>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&mut self, cmd: &Cmd) -> Result<()> {
            self.commands.push(cmd.clone());
            Ok(())
        }
    }

    impl RecordingRunner {
        pub(crate) fn lines(&self) -> Vec<String> {
            self.commands.iter().map(Cmd::display).collect()
        }
    }

    fn dep(name: &str) -> Dependency {
        Dependency {
            name: name.to_string(),
            repo_url: format!("https://example.invalid/{}.git", name),
            install_dir: PathBuf::from("/tmp/unused"),
            cmake_args: vec!["-DFOO=ON".to_string(), String::new()],
        }
    }

    #[test]
    fn fresh_workspace_clones_then_builds() {
        let ws = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::default();

        setup_dependency(&mut runner, &dep("alpha"), "Release", ws.path()).unwrap();

        assert_eq!(
            runner.lines(),
            vec![
                "git clone https://example.invalid/alpha.git alpha",
                "cmake -B . -S .. -DFOO=ON",
                "cmake --build . --config Release --parallel",
                "cmake --install . --config Release",
            ]
        );
        assert_eq!(runner.commands[0].working_dir(), Some(ws.path()));
        let build = build_dir(ws.path(), "alpha");
        assert!(build.is_dir());
        assert!(runner.commands[1..]
            .iter()
            .all(|c| c.working_dir() == Some(build.as_path())));
    }

    #[test]
    fn existing_checkout_is_not_recloned() {
        let ws = tempfile::tempdir().unwrap();
        fs::create_dir_all(repo_dir(ws.path(), "alpha")).unwrap();
        let mut runner = RecordingRunner::default();

        setup_dependency(&mut runner, &dep("alpha"), "Debug", ws.path()).unwrap();

        assert!(runner.commands.iter().all(|c| c.program() != "git"));
        assert_eq!(runner.commands.len(), 3);
    }

    #[test]
    fn stale_build_directory_is_wiped() {
        let ws = tempfile::tempdir().unwrap();
        let build = build_dir(ws.path(), "alpha");
        fs::create_dir_all(build.join("CMakeFiles")).unwrap();
        fs::write(build.join("CMakeCache.txt"), "stale").unwrap();
        let mut runner = RecordingRunner::default();

        setup_dependency(&mut runner, &dep("alpha"), "Release", ws.path()).unwrap();

        assert!(build.is_dir());
        assert_eq!(fs::read_dir(&build).unwrap().count(), 0);
    }

    #[test]
    fn failing_step_stops_the_sequence() {
        struct FailOnBuild(Vec<String>);
        impl CommandRunner for FailOnBuild {
            fn run(&mut self, cmd: &Cmd) -> Result<()> {
                self.0.push(cmd.display());
                if cmd.argv().first() == Some(&"--build") {
                    anyhow::bail!("build exploded");
                }
                Ok(())
            }
        }

        let ws = tempfile::tempdir().unwrap();
        let mut runner = FailOnBuild(Vec::new());
        let err = setup_dependency(&mut runner, &dep("alpha"), "Release", ws.path()).unwrap_err();

        assert!(err.to_string().contains("build exploded"));
        assert!(runner.0.last().unwrap().starts_with("cmake --build"));
        assert!(!runner.0.iter().any(|c| c.starts_with("cmake --install")));
    }
}
