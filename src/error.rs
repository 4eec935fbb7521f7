//! Global error handling for vfsh
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for vfsh operations
#[derive(Error, Debug)]
pub enum VfshError {
    /// A name did not resolve in the directory it was looked up in
    #[error("Item '{0}' not found")]
    NotFound(String),

    /// A create or insert would collide with an existing sibling
    #[error("An item named '{0}' already exists")]
    AlreadyExists(String),

    /// The operation is not valid in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The interactive collaborator could not supply an answer
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Coarse classification of a [`VfshError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidOperation,
    Io,
    Other,
}

impl VfshError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::InvalidOperation(_) => ErrorKind::InvalidOperation,
            Self::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Other,
        }
    }
}

/// Specialized Result type for vfsh operations
pub type Result<T> = std::result::Result<T, VfshError>;

/// Creates a VfshError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::VfshError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            VfshError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

// Lets `main` return io::Result like the rest of the binary plumbing
impl From<VfshError> for io::Error {
    fn from(err: VfshError) -> Self {
        match err {
            VfshError::Io(e) => e,
            VfshError::NotFound(_) => io::Error::new(io::ErrorKind::NotFound, err.to_string()),
            VfshError::AlreadyExists(_) => {
                io::Error::new(io::ErrorKind::AlreadyExists, err.to_string())
            }
            _ => io::Error::new(io::ErrorKind::Other, err.to_string()),
        }
    }
}
