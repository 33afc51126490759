//! External templating-tool invocation
//!
//! Synchronous spawn-wait-capture of the `xacro` executable. A non-zero
//! exit or unreadable output is surfaced as a typed error; there is no
//! timeout or retry, a hang in the tool hangs the launch.

use crate::error::{LaunchError, Result};
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// A xacro invocation: the template file plus `key:=value` mappings
#[derive(Debug, Clone)]
pub struct XacroCommand {
    program: PathBuf,
    file: PathBuf,
    mappings: Vec<(String, String)>,
}

impl XacroCommand {
    pub fn new(program: &Path, file: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            file: file.to_path_buf(),
            mappings: Vec::new(),
        }
    }

    pub fn mapping(mut self, key: &str, value: &str) -> Self {
        self.mappings.push((key.to_string(), value.to_string()));
        self
    }

    /// The argument vector passed to the templating tool
    pub fn command_line(&self) -> Vec<String> {
        let mut args = vec![self.file.display().to_string()];
        for (key, value) in &self.mappings {
            args.push(format!("{}:={}", key, value));
        }
        args
    }

    /// Run the tool and capture its stdout as UTF-8 text
    pub fn run(&self) -> Result<String> {
        log::info!(
            "Running {} {}",
            self.program.display(),
            self.command_line().join(" ")
        );

        let output = Command::new(&self.program)
            .args(self.command_line())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LaunchError::ExecutableNotFound(self.program.display().to_string())
                } else {
                    LaunchError::IoError(e)
                }
            })?;

        if !output.status.success() {
            return Err(LaunchError::XacroFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| LaunchError::NonUtf8Output)
    }
}
