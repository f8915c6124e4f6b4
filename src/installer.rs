//! Post-generation dependency installation.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::Configuration;
use crate::error::{Error, Result};

/// Result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs shell commands on behalf of the installer.
pub trait CommandRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<CommandOutput>;
}

/// Runs commands through `sh -c`, capturing their output.
pub struct ShellCommandRunner;

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<CommandOutput> {
        log::debug!("Running '{command}' in '{}'", cwd.display());
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;
        Ok(CommandOutput {
            // Killed by a signal.
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// One install command and the project relative directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub command: String,
    pub dir: PathBuf,
}

impl InstallStep {
    fn new(command: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self { command: command.into(), dir: dir.into() }
    }
}

pub struct InstallRunner<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> InstallRunner<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Install commands for `config`, in execution order.
    ///
    /// `root` is only inspected for optional files such as `requirements-dev.txt`.
    pub fn steps(config: &Configuration, root: &Path) -> Vec<InstallStep> {
        let mut steps = Vec::new();
        if config.has_frontend() || config.has_node_backend() {
            steps.push(InstallStep::new("npm install", "."));
        }
        if config.has_python_backend() {
            steps.push(InstallStep::new("python3 -m venv .venv", "server"));
            steps.push(InstallStep::new(".venv/bin/pip install -r requirements.txt", "server"));
            if root.join("server/requirements-dev.txt").is_file() {
                steps.push(InstallStep::new(
                    ".venv/bin/pip install -r requirements-dev.txt",
                    "server",
                ));
            }
        }
        steps
    }

    /// Runs every step below `root`; the first failing command stops the install.
    pub fn install(&self, config: &Configuration, root: &Path) -> Result<()> {
        for step in Self::steps(config, root) {
            let cwd = root.join(&step.dir);
            println!("Running '{}' in {}", step.command, cwd.display());
            let output = self.runner.run(&step.command, &cwd)?;
            if !output.success() {
                return Err(Error::CommandFailed {
                    command: step.command,
                    exit_code: output.exit_code,
                    stderr: output.stderr,
                });
            }
            log::debug!("{}", output.stdout.trim_end());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Answers;
    use std::cell::RefCell;

    fn config(json: &str) -> Configuration {
        Answers::from_json(json).unwrap().with_defaults().resolve().unwrap()
    }

    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<(String, PathBuf)>>,
        fail_on: Option<&'static str>,
    }

    impl CommandRunner for &Recording {
        fn run(&self, command: &str, cwd: &Path) -> Result<CommandOutput> {
            self.calls.borrow_mut().push((command.to_string(), cwd.to_path_buf()));
            let failed = self.fail_on.is_some_and(|prefix| command.starts_with(prefix));
            Ok(CommandOutput {
                exit_code: if failed { 2 } else { 0 },
                stdout: String::new(),
                stderr: if failed { "boom".to_string() } else { String::new() },
            })
        }
    }

    #[test]
    fn node_projects_only_run_npm() {
        let steps = InstallRunner::<ShellCommandRunner>::steps(
            &config(r#"{"name":"demo"}"#),
            Path::new("/nowhere"),
        );
        assert_eq!(steps, vec![InstallStep::new("npm install", ".")]);
    }

    #[test]
    fn python_projects_create_a_venv_in_server() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("server")).unwrap();
        std::fs::write(root.path().join("server/requirements-dev.txt"), "pytest\n").unwrap();

        let recording = Recording::default();
        InstallRunner::new(&recording)
            .install(
                &config(r#"{"name":"svc","frontendFramework":"skip","backend":"python"}"#),
                root.path(),
            )
            .unwrap();
        let calls = recording.calls.borrow();
        let commands: Vec<_> = calls.iter().map(|(command, _)| command.as_str()).collect();
        assert_eq!(
            commands,
            vec![
                "python3 -m venv .venv",
                ".venv/bin/pip install -r requirements.txt",
                ".venv/bin/pip install -r requirements-dev.txt",
            ]
        );
        assert!(calls.iter().all(|(_, cwd)| cwd.ends_with("server")));
    }

    #[test]
    fn first_failure_stops_the_install() {
        let recording = Recording { fail_on: Some("npm"), ..Default::default() };
        let err = InstallRunner::new(&recording)
            .install(&config(r#"{"name":"full","backend":"python"}"#), Path::new("/tmp"))
            .unwrap_err();
        match err {
            Error::CommandFailed { command, exit_code, stderr } => {
                assert_eq!(command, "npm install");
                assert_eq!(exit_code, 2);
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(recording.calls.borrow().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn shell_runner_reports_exit_code_and_streams() {
        let dir = tempfile::tempdir().unwrap();
        let output = ShellCommandRunner.run("echo out; echo err >&2; exit 3", dir.path()).unwrap();
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }
}
