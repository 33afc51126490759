//! Error types for the description launch tool

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Unknown launch argument: '{0}'. Use one of the declared arguments.")]
    UnknownArgument(String),

    #[error("Invalid value '{value}' for launch argument '{name}' (choices: {choices})")]
    InvalidChoice {
        name: String,
        value: String,
        choices: String,
    },

    #[error("Launch argument '{0}' has no default value and was not provided")]
    MissingArgument(String),

    #[error("Package '{0}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound(String),

    #[error("Executable '{0}' not found on PATH")]
    ExecutableNotFound(String),

    #[error("YAML error in {file}: {message}")]
    Yaml { file: String, message: String },

    #[error("xacro exited with {status}: {stderr}")]
    XacroFailed { status: ExitStatus, stderr: String },

    #[error("xacro produced non-UTF-8 output")]
    NonUtf8Output,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LaunchError>;
