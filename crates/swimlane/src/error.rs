//! Error types for Swimlane operations.
//!
//! This module provides the main error type [`CompileError`]. Only input
//! that cannot be compiled at all is an error; per-element problems are
//! reported as [`Diagnostic`](crate::diagnostic::Diagnostic)s instead.

use std::io;

use thiserror::Error;

use swimlane_core::{edit::EditError, model::ModelError};

/// The main error type for Swimlane operations.
///
/// # Source Variants
///
/// The `Model` variant keeps the source text next to the error so callers
/// can point at the failing line and column.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Model { err: ModelError, src: String },

    #[error("model declares no pools")]
    EmptyModel,

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Export error: {0}")]
    Export(String),
}

impl CompileError {
    /// Create a new `Model` error with the associated source text.
    pub fn new_model_error(err: ModelError, src: impl Into<String>) -> Self {
        Self::Model {
            err,
            src: src.into(),
        }
    }
}
