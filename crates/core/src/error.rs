//! Error types for the rubberband-core library.
//!
//! The selection algorithm itself never fails. These variants cover the edges
//! of the library: configuration, scene files, settings persistence and the
//! demo canvas.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur within the rubberband-core library.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (invalid values, malformed filters).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A scene file could not be found at the given path.
    #[error("Scene file not found: {}", .0.display())]
    SceneNotFound(PathBuf),

    /// A scene description is structurally invalid.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// UI-related errors (window creation, event loop).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid scene error with the given message.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::InvalidScene(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
