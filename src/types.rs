//! Core types shared by the gate and the operations.

use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// The shape a caller expects a path to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl PathKind {
    /// Returns the kind of an existing entry, or `None` for anything that is
    /// neither a regular file nor a directory (sockets, fifos, devices).
    pub fn of(metadata: &std::fs::Metadata) -> Option<Self> {
        if metadata.is_dir() {
            Some(PathKind::Directory)
        } else if metadata.is_file() {
            Some(PathKind::File)
        } else {
            None
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::File => f.write_str("regular file"),
            PathKind::Directory => f.write_str("directory"),
        }
    }
}

/// Unix-style permissions stored as a mode bitmask.
///
/// Uses the standard Unix permission bits (rwxrwxrwx). Ignored on platforms
/// without mode bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permissions(u32);

impl Permissions {
    /// Create permissions from a Unix mode (e.g., 0o755).
    #[inline]
    pub const fn from_mode(mode: u32) -> Self {
        Self(mode & 0o7777)
    }

    /// Get the raw mode value.
    #[inline]
    pub const fn mode(&self) -> u32 {
        self.0
    }

    /// Default permissions for a new file (0o644 = rw-r--r--).
    #[inline]
    pub const fn default_file() -> Self {
        Self(0o644)
    }

    /// Default permissions for a new directory (0o755 = rwxr-xr-x).
    #[inline]
    pub const fn default_dir() -> Self {
        Self(0o755)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::default_file()
    }
}

/// Flags for opening a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenFlags {
    /// Open for reading.
    pub read: bool,
    /// Open for writing.
    pub write: bool,
    /// Create file if it doesn't exist.
    pub create: bool,
    /// Append to end of file.
    pub append: bool,
}

impl OpenFlags {
    /// Read-write access, created if missing, writes go to the end of file.
    pub const READ_WRITE_APPEND: Self = Self {
        read: true,
        write: true,
        create: true,
        append: true,
    };

    /// Builds native open options carrying these flags and, on Unix, the
    /// given creation mode.
    pub fn to_open_options(self, permissions: Permissions) -> OpenOptions {
        let mut options = OpenOptions::new();
        options
            .read(self.read)
            .write(self.write)
            .create(self.create)
            .append(self.append);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(permissions.mode());
        }
        #[cfg(not(unix))]
        let _ = permissions;

        options
    }
}

impl Default for OpenFlags {
    fn default() -> Self {
        Self::READ_WRITE_APPEND
    }
}

/// Request to extend `target` with the bytes of `source`.
///
/// `source` must already be a regular file; `target` is created if absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendRequest {
    target: PathBuf,
    source: PathBuf,
}

impl AppendRequest {
    /// Creates a request appending `source` to `target`.
    pub fn new(target: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
        }
    }

    /// The file being extended.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// The file whose contents are appended.
    pub fn source(&self) -> &Path {
        &self.source
    }
}
