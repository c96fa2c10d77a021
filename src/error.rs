//! Unified error types for reqsnap.
//!
//! A missing prior snapshot is not an error: the locator reports it as
//! `Ok(None)`. Everything here is a real failure the caller must see.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reqsnap operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReqsnapError {
    /// A snapshot or directory could not be opened, read or written
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A file name that must follow `{env}_{YYYY-MM-DDTHH-MM-SS}.{ext}` does not
    #[error("Invalid snapshot name '{name}': {reason}")]
    InvalidSnapshotName { name: String, reason: String },

    /// A header pattern failed to compile
    #[error("Invalid header pattern '{pattern}': {source}")]
    HeaderPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for reqsnap operations
pub type Result<T> = std::result::Result<T, ReqsnapError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ReqsnapError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create an invalid snapshot name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSnapshotName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The path involved in a file-access failure, if known.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReqsnapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, so a failure deep inside the locator reads
/// like `comparing snapshots: locating previous snapshot: <io error>`.
///
/// ```ignore
/// use reqsnap::error::ErrorContext;
///
/// let text = read_snapshot(path).context("reading new snapshot")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ReqsnapError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: ReqsnapError, new_ctx: &str) -> ReqsnapError {
    match err {
        ReqsnapError::Io {
            path,
            message,
            source,
        } => ReqsnapError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ReqsnapError::InvalidSnapshotName { name, reason } => {
            ReqsnapError::InvalidSnapshotName {
                name,
                reason: chain_context(new_ctx, &reason),
            }
        }
        // The regex error carries its own message; context goes on the pattern side.
        err @ ReqsnapError::HeaderPattern { .. } => err,
        ReqsnapError::Validation(msg) => ReqsnapError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// Returns "`new`: `existing`", or just `new` when nothing existed yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| ReqsnapError::Validation(context.into()))
    }
}
