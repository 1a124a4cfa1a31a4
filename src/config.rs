//! Open flags and permission bits applied by [`GuardedFs`](crate::GuardedFs).

use crate::{OpenFlags, Permissions};

/// Settings used when opening files and creating directories.
///
/// Defaults: files are opened read-write, created if missing and written at
/// the end; new files get `0o644`, new directories `0o755`. Files are not
/// synced to the device on close.
///
/// # Example
///
/// ```rust
/// use guarded_fs::{FioConfig, Permissions};
///
/// let config = FioConfig {
///     file_permissions: Permissions::from_mode(0o600),
///     ..FioConfig::default()
/// };
/// assert_eq!(config.dir_permissions.mode(), 0o755);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FioConfig {
    /// Flags for every file opened by an operation.
    pub open_flags: OpenFlags,
    /// Mode of newly created files (Unix only).
    pub file_permissions: Permissions,
    /// Mode of newly created directories (Unix only).
    pub dir_permissions: Permissions,
    /// Flush file data to the device (`fdatasync`) whenever a file is closed,
    /// surfacing write-back failures as close errors.
    pub sync_on_close: bool,
}

impl Default for FioConfig {
    fn default() -> Self {
        Self {
            open_flags: OpenFlags::READ_WRITE_APPEND,
            file_permissions: Permissions::default_file(),
            dir_permissions: Permissions::default_dir(),
            sync_on_close: false,
        }
    }
}

#[cfg(feature = "serde")]
impl FioConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// ```rust
    /// use guarded_fs::FioConfig;
    ///
    /// let config = FioConfig::from_json(r#"{ "file_permissions": 384 }"#).unwrap();
    /// assert_eq!(config.file_permissions.mode(), 0o600);
    /// assert_eq!(config.dir_permissions.mode(), 0o755);
    /// ```
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::FioError::Deserialization(e.to_string()))
    }
}
