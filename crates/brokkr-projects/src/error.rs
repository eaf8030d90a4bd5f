//! Error types for brokkr-projects

use thiserror::Error;

/// Result type alias using brokkr-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffold execution error types
#[derive(Error, Debug)]
pub enum Error {
    /// Target project directory already exists with content
    #[error("Target directory already exists and is not empty: {path}")]
    DirectoryExists { path: String },

    /// Resolved template or common directory unreadable
    #[error("Template directory not found or unreadable: {path}")]
    TemplateNotFound { path: String },

    /// A subprocess exited unsuccessfully
    #[error("{command} failed: {message}")]
    Subprocess { command: String, message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// No Python interpreter available for virtual-environment creation
    #[error("Python interpreter not found. Please ensure python3 is installed and in PATH")]
    PythonNotFound,

    /// Dependency installation failed
    #[error("Dependency installation failed: {message}")]
    Install { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] brokkr_core::Error),
}

impl Error {
    /// Create a directory exists error
    pub fn directory_exists(path: impl Into<String>) -> Self {
        Self::DirectoryExists { path: path.into() }
    }

    /// Create a template not found error
    pub fn template_not_found(path: impl Into<String>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// Create a subprocess error
    pub fn subprocess(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Subprocess {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create an install error
    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
        }
    }
}
