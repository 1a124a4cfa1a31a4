//! # Path Guard
//!
//! The validation gate run before every filesystem call.
//!
//! ## Checks, in order
//!
//! 1. The path is not empty ([`GuardError::EmptyPath`]).
//! 2. The cleaned path is not blocked by the [`DenyList`] ([`GuardError::Forbidden`]).
//! 3. If the path exists, it has the expected [`PathKind`] ([`GuardError::KindMismatch`]).
//!    A path that does not exist passes, so creation operations can target it.
//!    Any other metadata failure is reported as [`GuardError::Metadata`].
//!
//! The gate only reads metadata. Nothing is cached between calls; the state
//! observed here may change before the caller acts on it.

use std::io;
use std::path::Path;

use crate::{DenyList, GuardError, PathKind};

/// Validates paths against a denylist and the expected entity kind.
///
/// # Example
///
/// ```rust
/// use guarded_fs::{GuardError, PathGuard, PathKind};
///
/// let guard = PathGuard::new(guarded_fs::DenyList::UNIX);
/// assert!(matches!(guard.validate("", PathKind::File), Err(GuardError::EmptyPath)));
/// assert!(matches!(
///     guard.validate("/proc/self/status", PathKind::File),
///     Err(GuardError::Forbidden { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathGuard {
    deny_list: DenyList,
}

impl PathGuard {
    /// Creates a guard over the given denylist.
    pub const fn new(deny_list: DenyList) -> Self {
        Self { deny_list }
    }

    /// Guard using the host platform's denylist.
    pub const fn host() -> Self {
        Self::new(DenyList::host())
    }

    /// The denylist this guard enforces.
    pub const fn deny_list(&self) -> &DenyList {
        &self.deny_list
    }

    /// Decides whether operations expecting `expected` may proceed on `path`.
    ///
    /// # Errors
    ///
    /// - [`GuardError::EmptyPath`] - `path` is empty
    /// - [`GuardError::Forbidden`] - `path` is blocked, regardless of `expected`
    /// - [`GuardError::KindMismatch`] - `path` exists with another kind
    /// - [`GuardError::Metadata`] - metadata lookup failed other than with `NotFound`
    pub fn validate(&self, path: impl AsRef<Path>, expected: PathKind) -> Result<(), GuardError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            tracing::trace!("rejected empty path");
            return Err(GuardError::EmptyPath);
        }

        if let Some(entry) = self.deny_list.blocked_by(path) {
            tracing::debug!(path = %path.display(), entry, "path blocked by denylist");
            return Err(GuardError::Forbidden {
                path: path.to_path_buf(),
                entry: entry.to_string(),
            });
        }

        match std::fs::metadata(path) {
            Ok(metadata) if PathKind::of(&metadata) == Some(expected) => Ok(()),
            Ok(_) => {
                tracing::trace!(path = %path.display(), %expected, "kind mismatch");
                Err(GuardError::KindMismatch {
                    path: path.to_path_buf(),
                    expected,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(GuardError::Metadata {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Validates `path` as a regular file.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<(), GuardError> {
        self.validate(path, PathKind::File)
    }

    /// Validates `path` as a directory.
    pub fn check_dir(&self, path: impl AsRef<Path>) -> Result<(), GuardError> {
        self.validate(path, PathKind::Directory)
    }
}

/// Validates `path` as a regular file against the host denylist.
pub fn check_file(path: impl AsRef<Path>) -> Result<(), GuardError> {
    PathGuard::host().check_file(path)
}

/// Validates `path` as a directory against the host denylist.
pub fn check_dir(path: impl AsRef<Path>) -> Result<(), GuardError> {
    PathGuard::host().check_dir(path)
}
