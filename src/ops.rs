//! # Guarded Operations
//!
//! [`GuardedFs`] runs the [`PathGuard`] and then a single native call per step,
//! wrapping every native failure in [`FioError::Io`].
//!
//! | Method | Gate | Effect |
//! |--------|------|--------|
//! | [`open`](GuardedFs::open) | file | open read-write, create, append |
//! | [`close`](GuardedFs::close) | - | release a handle |
//! | [`write_string`](GuardedFs::write_string) | file | append text |
//! | [`write_single`](GuardedFs::write_single) | file | replace contents with text |
//! | [`touch`](GuardedFs::touch) | file | bump mtime or create empty |
//! | [`read_all`](GuardedFs::read_all) | file | whole contents |
//! | [`append`](GuardedFs::append) | file x2 | append one file to another |
//! | [`exists`](GuardedFs::exists) | file | existence as a regular file |
//! | [`exists_dir`](GuardedFs::exists_dir) | dir | existence as a directory |
//! | [`remove`](GuardedFs::remove) | file | delete an existing file |
//! | [`create_dir`](GuardedFs::create_dir) | dir | create with parents |
//! | [`reset`](GuardedFs::reset) | file | ensure exists and empty |
//! | [`size`](GuardedFs::size) | file | length in bytes |
//! | [`join`](GuardedFs::join) | dir + file | join a directory and a relative file name |
//!
//! No call retries. Multi-step operations are not atomic: another process can
//! change a path between the gate and the native call, and partial effects
//! (such as an empty target left behind by a failed `append`) are not rolled
//! back.
//!
//! Files are closed without an `fsync` unless
//! [`FioConfig::sync_on_close`] is set, in which case every operation that
//! writes pays for a data sync on close.

use std::fs::{self, File, FileTimes, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use crate::handle::release;
use crate::{
    AppendRequest, DenyList, FileHandle, FioConfig, FioError, GuardError, Operation, PathGuard,
    Result,
};

/// Filesystem operations guarded by a denylist and kind checks.
///
/// Holds only immutable configuration; share it freely between threads.
///
/// # Example
///
/// ```rust
/// use guarded_fs::GuardedFs;
///
/// # fn main() -> guarded_fs::Result<()> {
/// # let tmp = tempfile::tempdir().unwrap();
/// let fs = GuardedFs::new();
/// let log = tmp.path().join("run.log");
///
/// fs.write_string(&log, "ab")?;
/// fs.write_string(&log, "cd")?;
/// assert_eq!(fs.read_all(&log)?, b"abcd");
///
/// fs.reset(&log)?;
/// assert_eq!(fs.size(&log)?, 0);
///
/// fs.remove(&log)?;
/// assert!(!fs.exists(&log)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardedFs {
    guard: PathGuard,
    config: FioConfig,
}

impl GuardedFs {
    /// Host denylist and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: FioConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the denylist.
    pub fn with_deny_list(mut self, deny_list: DenyList) -> Self {
        self.guard = PathGuard::new(deny_list);
        self
    }

    /// The gate run before every operation.
    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    /// Active configuration.
    pub fn config(&self) -> &FioConfig {
        &self.config
    }

    fn check_file(&self, path: &Path) -> Result<()> {
        Ok(self.guard.check_file(path)?)
    }

    fn open_options(&self) -> OpenOptions {
        self.config
            .open_flags
            .to_open_options(self.config.file_permissions)
    }

    fn open_native(&self, path: &Path) -> Result<File> {
        tracing::trace!(path = %path.display(), "open");
        self.open_options()
            .open(path)
            .map_err(|e| FioError::io(Operation::Open, path, e))
    }

    /// Opens `path` with the configured flags, creating it if absent.
    ///
    /// # Errors
    ///
    /// - [`FioError::Guard`] if the gate rejects `path`
    /// - [`FioError::Io`] with [`Operation::Open`], e.g. when the parent
    ///   directory is missing
    pub fn open(&self, path: impl AsRef<Path>) -> Result<FileHandle> {
        let path = path.as_ref();
        self.check_file(path)?;
        let file = self.open_native(path)?;
        Ok(FileHandle::new(
            file,
            path.to_path_buf(),
            self.config.sync_on_close,
        ))
    }

    /// Releases a handle obtained from [`open`](Self::open).
    ///
    /// # Errors
    ///
    /// - [`FioError::NilHandle`] if the handle is already closed
    /// - [`FioError::Io`] with [`Operation::Close`]
    pub fn close(&self, handle: &mut FileHandle) -> Result<()> {
        handle.close()
    }

    /// Appends `text` to `path`, creating the file if absent.
    ///
    /// The file is closed before returning, also when the write fails.
    pub fn write_string(&self, path: impl AsRef<Path>, text: &str) -> Result<()> {
        let path = path.as_ref();
        self.check_file(path)?;
        let file = self.open_native(path)?;
        self.write_and_close(file, path, text.as_bytes())
    }

    /// Replaces the contents of `path` with exactly `text`.
    pub fn write_single(&self, path: impl AsRef<Path>, text: &str) -> Result<()> {
        let path = path.as_ref();
        self.check_file(path)?;
        self.reset(path)?;
        self.write_string(path, text)
    }

    /// Sets the access and modification times of an existing file to now, or
    /// creates `path` as an empty file.
    pub fn touch(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.check_file(path)?;

        if self.exists(path)? {
            let now = SystemTime::now();
            tracing::trace!(path = %path.display(), "set timestamps");
            let times = FileTimes::new().set_accessed(now).set_modified(now);
            open_for_timestamps(path)
                .and_then(|file| file.set_times(times))
                .map_err(|e| FioError::io(Operation::Timestamp, path, e))
        } else {
            let file = self.open_native(path)?;
            release(file, path, self.config.sync_on_close)
        }
    }

    /// Reads the whole contents of `path`.
    ///
    /// # Errors
    ///
    /// - [`FioError::NotExistent`] if `path` does not exist
    /// - [`FioError::Io`] with [`Operation::Read`] for other read failures
    pub fn read_all(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        self.check_file(path)?;
        fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FioError::NotExistent {
                path: path.to_path_buf(),
            },
            _ => FioError::io(Operation::Read, path, e),
        })
    }

    /// Appends the contents of `request.source()` to `request.target()`.
    ///
    /// The target is opened (and created if absent) before the source is
    /// read, so a failure afterwards can leave an empty target behind. The
    /// source is never modified.
    ///
    /// # Errors
    ///
    /// - [`FioError::NilRequest`] if `request` is `None`
    /// - [`FioError::Guard`] if either path is rejected
    /// - [`FioError::NotExistent`] if the source does not exist
    /// - [`FioError::Io`] for open, read, write or close failures
    ///
    /// # Example
    ///
    /// ```rust
    /// use guarded_fs::{FioError, GuardedFs};
    ///
    /// let fs = GuardedFs::new();
    /// assert!(matches!(fs.append(None), Err(FioError::NilRequest)));
    /// ```
    pub fn append<'a>(&self, request: impl Into<Option<&'a AppendRequest>>) -> Result<()> {
        let request = request.into().ok_or(FioError::NilRequest)?;
        let (target, source) = (request.target(), request.source());
        self.check_file(target)?;
        self.check_file(source)?;

        let file = self.open_native(target)?;
        let data = self.read_all(source)?;
        tracing::trace!(
            to = %target.display(),
            from = %source.display(),
            bytes = data.len(),
            "append"
        );
        self.write_and_close(file, target, &data)
    }

    /// Returns whether `path` exists. An existing directory fails the gate;
    /// use [`exists_dir`](Self::exists_dir) for directories.
    ///
    /// # Errors
    ///
    /// Metadata failures other than non-existence are returned, never mapped
    /// to `false`.
    pub fn exists(&self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        self.check_file(path)?;
        match fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FioError::io(Operation::Metadata, path, e)),
        }
    }

    /// Returns whether `path` exists as a directory.
    ///
    /// # Errors
    ///
    /// - [`FioError::Guard`] if `path` is empty, blocked or an existing
    ///   non-directory
    /// - [`FioError::Io`] with [`Operation::Metadata`] for metadata failures
    ///   other than non-existence
    pub fn exists_dir(&self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        self.guard.check_dir(path)?;
        match fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FioError::io(Operation::Metadata, path, e)),
        }
    }

    /// Deletes the file at `path`.
    ///
    /// # Errors
    ///
    /// - [`FioError::NotExistent`] if `path` does not exist
    /// - [`FioError::Io`] with [`Operation::Remove`]
    pub fn remove(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.check_file(path)?;
        if !self.exists(path)? {
            return Err(FioError::NotExistent {
                path: path.to_path_buf(),
            });
        }
        tracing::trace!(path = %path.display(), "remove");
        fs::remove_file(path).map_err(|e| FioError::io(Operation::Remove, path, e))
    }

    /// Creates `path` and any missing parents. An existing directory is not
    /// an error.
    ///
    /// # Errors
    ///
    /// - [`FioError::Guard`] if `path` exists as a file or is blocked
    /// - [`FioError::Io`] with [`Operation::CreateDir`]
    pub fn create_dir(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.guard.check_dir(path)?;

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.config.dir_permissions.mode());
        }
        tracing::trace!(path = %path.display(), "create directory");
        builder
            .create(path)
            .map_err(|e| FioError::io(Operation::CreateDir, path, e))
    }

    /// Ensures `path` exists and is empty.
    pub fn reset(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.check_file(path)?;
        if !self.exists(path)? {
            self.touch(path)?;
        }
        tracing::trace!(path = %path.display(), "truncate");
        OpenOptions::new()
            .write(true)
            .open(path)
            .and_then(|file| file.set_len(0))
            .map_err(|e| FioError::io(Operation::Truncate, path, e))
    }

    /// Length of the regular file at `path` in bytes.
    ///
    /// # Errors
    ///
    /// - [`FioError::Guard`] if `path` is a directory or blocked
    /// - [`FioError::NotExistent`] if `path` does not exist
    /// - [`FioError::Io`] with [`Operation::Metadata`]
    pub fn size(&self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        self.check_file(path)?;
        match fs::metadata(path) {
            Ok(metadata) => Ok(metadata.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FioError::NotExistent {
                path: path.to_path_buf(),
            }),
            Err(e) => Err(FioError::io(Operation::Metadata, path, e)),
        }
    }

    /// Joins a directory and a relative file name into a validated file path.
    ///
    /// The result always starts with `dir`; `file` may still contain `..`
    /// segments, which the file gate sees after cleaning.
    ///
    /// # Errors
    ///
    /// - [`FioError::Guard`] if `dir` fails the directory gate, `file` is
    ///   empty or rooted ([`GuardError::NotRelative`]), or the joined path
    ///   fails the file gate
    pub fn join(&self, dir: impl AsRef<Path>, file: impl AsRef<Path>) -> Result<PathBuf> {
        let (dir, file) = (dir.as_ref(), file.as_ref());
        self.guard.check_dir(dir)?;
        if file.as_os_str().is_empty() {
            return Err(GuardError::EmptyPath.into());
        }
        if file
            .components()
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        {
            return Err(GuardError::NotRelative {
                path: file.to_path_buf(),
            }
            .into());
        }
        let joined = dir.join(file);
        self.check_file(&joined)?;
        Ok(joined)
    }
}

impl GuardedFs {
    /// Writes `data` and closes `file`. A write error wins over a close error.
    fn write_and_close(&self, mut file: File, path: &Path, data: &[u8]) -> Result<()> {
        if let Err(e) = file.write_all(data) {
            drop(file);
            return Err(FioError::io(Operation::Write, path, e));
        }
        release(file, path, self.config.sync_on_close)
    }
}

/// Opens `path` for `set_times`. Any readable or writable handle will do, so a
/// file the caller may only read or only write still gets its times updated.
#[cfg(unix)]
fn open_for_timestamps(path: &Path) -> io::Result<File> {
    File::open(path).or_else(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => OpenOptions::new().write(true).open(path),
        _ => Err(e),
    })
}

#[cfg(not(unix))]
fn open_for_timestamps(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).open(path)
}
