use crate::error::HelmError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_PROCESS_TIMEOUT_SECS: u64 = 300;

/// Captured result of one external process run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs an external program to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, HelmError>;
}

/// Runs programs as child processes with a bounded wall-clock timeout
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESS_TIMEOUT_SECS)
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, HelmError> {
        let command_line = display_command(program, args);
        log::debug!("Running: {}", command_line);

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        // Dropping the future on timeout kills the child.
        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(result) => result.map_err(|source| HelmError::Spawn {
                command: command_line.clone(),
                source,
            })?,
            Err(_) => {
                return Err(HelmError::Timeout {
                    command: command_line,
                    timeout_secs: self.timeout.as_secs(),
                });
            }
        };

        let status = output.status.code().unwrap_or(-1);
        log::debug!("'{}' exited with status {}", command_line, status);

        Ok(CommandOutput {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Human-readable command line for logs and error messages
pub fn display_command(program: &Path, args: &[String]) -> String {
    let name = program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string_lossy().into_owned());

    if args.is_empty() {
        name
    } else {
        format!("{} {}", name, args.join(" "))
    }
}

/// Find `name` on PATH. Names containing a path separator are checked as-is.
pub fn locate_binary(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX)))
        .find(|p| p.is_file())
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Replays canned output keyed by the first argument and records every call
    #[derive(Default)]
    pub struct RecordingRunner {
        responses: HashMap<String, CommandOutput>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, subcommand: &str, stdout: &str) -> Self {
            self.responses.insert(
                subcommand.to_string(),
                CommandOutput {
                    status: 0,
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                },
            );
            self
        }

        pub fn fail(mut self, subcommand: &str, status: i32, stderr: &str) -> Self {
            self.responses.insert(
                subcommand.to_string(),
                CommandOutput {
                    status,
                    stdout: String::new(),
                    stderr: stderr.to_string(),
                },
            );
            self
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().expect("calls lock").clone()
        }

        pub fn subcommands(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|args| args.first().cloned())
                .collect()
        }
    }

    #[async_trait]
    impl CommandRunner for RecordingRunner {
        async fn run(&self, _program: &Path, args: &[String]) -> Result<CommandOutput, HelmError> {
            self.calls.lock().expect("calls lock").push(args.to_vec());
            let key = args.first().cloned().unwrap_or_default();
            Ok(self.responses.get(&key).cloned().unwrap_or_default())
        }
    }
}
