//! Error types for guarded filesystem operations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::PathKind;

/// Result type for guarded filesystem operations.
pub type Result<T> = std::result::Result<T, FioError>;

/// Native call that failed, attached to [`FioError::Io`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Opening a file.
    Open,
    /// Syncing and releasing a file handle.
    Close,
    /// Reading file contents.
    Read,
    /// Writing to an open file.
    Write,
    /// Deleting a file.
    Remove,
    /// Creating a directory and its parents.
    CreateDir,
    /// Truncating a file to zero length.
    Truncate,
    /// Updating access and modification times.
    Timestamp,
    /// Looking up metadata outside of the gate.
    Metadata,
}

impl Operation {
    /// Short lowercase name used in error messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Open => "open",
            Operation::Close => "close",
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Remove => "remove",
            Operation::CreateDir => "create directory",
            Operation::Truncate => "truncate",
            Operation::Timestamp => "set timestamps",
            Operation::Metadata => "metadata",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection produced by the path gate before any native call runs.
///
/// # Examples
///
/// ```rust
/// use guarded_fs::GuardError;
/// use std::path::PathBuf;
///
/// let err = GuardError::Forbidden {
///     path: PathBuf::from("/proc/self"),
///     entry: "/proc".into(),
/// };
/// assert_eq!(err.to_string(), "forbidden: /proc/self (blocked by /proc)");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// The path argument was the empty string.
    #[error("empty path")]
    EmptyPath,

    /// The path equals a blocked file or lies under a blocked directory.
    #[error("forbidden: {} (blocked by {entry})", path.display())]
    Forbidden {
        /// The rejected path as given by the caller.
        path: PathBuf,
        /// The denylist entry that matched.
        entry: String,
    },

    /// The path exists but is not of the expected kind.
    #[error("not a {expected}: {}", path.display())]
    KindMismatch {
        /// The path that has the wrong kind.
        path: PathBuf,
        /// The kind the caller asked for.
        expected: PathKind,
    },

    /// A name that must be relative to a directory is rooted or absolute.
    #[error("not a relative name: {}", path.display())]
    NotRelative {
        /// The rejected name.
        path: PathBuf,
    },

    /// Metadata lookup failed for a reason other than non-existence.
    #[error("metadata lookup failed for {}: {source}", path.display())]
    Metadata {
        /// The path that could not be inspected.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Error returned by every guarded operation.
///
/// Validation failures are carried unchanged in [`FioError::Guard`]; native
/// failures are tagged with the [`Operation`] and the path involved.
///
/// # Examples
///
/// ```rust
/// use guarded_fs::{FioError, Operation};
/// use std::io;
/// use std::path::PathBuf;
///
/// let err = FioError::Io {
///     operation: Operation::Open,
///     path: PathBuf::from("missing/dir/file.txt"),
///     source: io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
/// };
/// assert_eq!(err.operation(), Some(Operation::Open));
/// assert!(err.to_string().starts_with("open failed for missing/dir/file.txt"));
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FioError {
    /// The path gate rejected a path.
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// A native filesystem call failed.
    #[error("{operation} failed for {}: {source}", path.display())]
    Io {
        /// The native call that failed.
        operation: Operation,
        /// The path involved in the call.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The operation requires an existing file but the path does not exist.
    #[error("does not exist: {}", path.display())]
    NotExistent {
        /// The missing path.
        path: PathBuf,
    },

    /// No append request was supplied.
    #[error("append request is absent")]
    NilRequest,

    /// The file handle has already been closed.
    #[error("file handle is closed")]
    NilHandle,

    /// A check over a collection of strings received none.
    #[error("no strings to check")]
    EmptyInput,

    /// Test data does not match the contents of its golden file.
    #[error("golden file mismatch for {name}: got {actual:?}, want {want:?}")]
    GoldenMismatch {
        /// Name of the testcase.
        name: String,
        /// Data under test.
        actual: String,
        /// Reference data read from the golden file.
        want: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl FioError {
    pub(crate) fn io(operation: Operation, path: &Path, source: std::io::Error) -> Self {
        FioError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }

    /// The native call tag, if this is an [`FioError::Io`].
    pub fn operation(&self) -> Option<Operation> {
        match self {
            FioError::Io { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// The path the error refers to, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FioError::Io { path, .. } | FioError::NotExistent { path } => Some(path),
            FioError::Guard(GuardError::Forbidden { path, .. })
            | FioError::Guard(GuardError::KindMismatch { path, .. })
            | FioError::Guard(GuardError::NotRelative { path })
            | FioError::Guard(GuardError::Metadata { path, .. }) => Some(path),
            _ => None,
        }
    }
}
