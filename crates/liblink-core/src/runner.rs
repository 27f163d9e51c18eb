//! Package-manager detection and subprocess invocation.
//!
//! Every build/link step is an opaque external command run to completion in
//! a given directory; a non-zero exit stops the run. The watch process is
//! the one exception: it is spawned detached at the end of the run and the
//! parent keeps no handle to it — closing its window is the only way to
//! stop it.

use std::path::Path;
use std::process::Command;

use crate::error::{LinkError, Result};

/// Supported package managers, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Pnpm,
    Yarn,
    Npm,
}

impl PackageManager {
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pnpm" => Some(PackageManager::Pnpm),
            "yarn" => Some(PackageManager::Yarn),
            "npm" => Some(PackageManager::Npm),
            _ => None,
        }
    }
}

/// Detect the best available package manager: pnpm > yarn > npm.
pub fn detect_package_manager() -> Option<PackageManager> {
    if which::which("pnpm").is_ok() {
        return Some(PackageManager::Pnpm);
    }
    if which::which("yarn").is_ok() {
        return Some(PackageManager::Yarn);
    }
    if which::which("npm").is_ok() {
        return Some(PackageManager::Npm);
    }
    None
}

fn render(program: &str, args: &[&str]) -> String {
    let mut s = String::from(program);
    for a in args {
        s.push(' ');
        s.push_str(a);
    }
    s
}

/// Run `program args…` in `cwd`, inheriting stdio, blocking until exit.
/// Non-zero exit maps to `CommandFailed` with the rendered command line.
/// No timeout: a hung command hangs the run.
pub fn run_step(program: &str, args: &[&str], cwd: &Path) -> Result<()> {
    let status = Command::new(program).args(args).current_dir(cwd).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(LinkError::CommandFailed {
            command: render(program, args),
            code: status.code().unwrap_or(-1),
        })
    }
}

/// Fire-and-forget spawn of `program args…` in `cwd`. The child handle is
/// dropped immediately: the parent has no lifecycle authority over the
/// child and must not wait on it. On Windows the command is wrapped in
/// `cmd /c start` so the watcher gets its own console window.
pub fn spawn_detached(program: &str, args: &[&str], cwd: &Path) -> Result<String> {
    let rendered = render(program, args);

    #[cfg(windows)]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.arg("/c").arg("start").arg("liblink watch");
        c.arg(program).args(args);
        c
    };

    #[cfg(not(windows))]
    let mut cmd = {
        use std::process::Stdio;
        let mut c = Command::new(program);
        c.args(args);
        c.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        c
    };

    cmd.current_dir(cwd);
    // Deliberately not retained: dropping the Child detaches it.
    let _child = cmd.spawn()?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn detection_does_not_panic() {
        // Which managers exist depends on the test environment.
        let _ = detect_package_manager();
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(PackageManager::Pnpm.name(), "pnpm");
        assert_eq!(PackageManager::Yarn.name(), "yarn");
        assert_eq!(PackageManager::Npm.name(), "npm");
        assert_eq!(PackageManager::from_name("yarn"), Some(PackageManager::Yarn));
        assert_eq!(PackageManager::from_name("bun"), None);
    }

    #[cfg(unix)]
    #[test]
    fn run_step_success() {
        let dir = TempDir::new().unwrap();
        run_step("true", &[], dir.path()).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn run_step_reports_exit_code() {
        let dir = TempDir::new().unwrap();
        let err = run_step("sh", &["-c", "exit 7"], dir.path()).unwrap_err();
        match err {
            LinkError::CommandFailed { command, code } => {
                assert!(command.starts_with("sh -c"));
                assert_eq!(code, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn spawn_detached_returns_rendered_command() {
        let dir = TempDir::new().unwrap();
        let rendered = spawn_detached("true", &[], dir.path()).unwrap();
        assert_eq!(rendered, "true");
    }
}
