//! Error types for Dialog Forge
//!
//! This module provides unified error handling for the dialog layer:
//! validation failures surfaced by a form session, rejected submit
//! handlers, and configuration loading problems.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::FieldErrors;

/// The main error type for Dialog Forge
#[derive(Debug, Error)]
pub enum DialogError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// One or more fields failed validation
    #[error("Validation failed: {}", summarize(.errors))]
    Validation { errors: FieldErrors },

    // ========================================================================
    // Submit Errors
    // ========================================================================
    /// The caller-supplied submit handler rejected
    #[error("Submit failed: {0}")]
    SubmitFailed(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DialogError {
    /// Create a validation error from per-field messages
    pub fn validation(errors: FieldErrors) -> Self {
        DialogError::Validation { errors }
    }

    /// Create a submit error
    pub fn submit_failed(msg: impl Into<String>) -> Self {
        DialogError::SubmitFailed(msg.into())
    }

    /// Create a configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        DialogError::InvalidConfig(msg.into())
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, DialogError::Validation { .. })
    }

    /// Check if this error came from loading configuration
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            DialogError::InvalidConfig(_) | DialogError::FileRead { .. } | DialogError::Toml(_)
        )
    }

    /// Per-field messages, if this is a validation error
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            DialogError::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

/// Result type alias using DialogError
pub type DialogResult<T> = Result<T, DialogError>;

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Tests
// ============================================================================
