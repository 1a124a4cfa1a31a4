//! Live file handles returned by [`GuardedFs::open`](crate::GuardedFs::open).

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::{FioError, Operation, Result};

/// An open file together with the path it was opened from.
///
/// The handle stays usable until [`close`](Self::close) is called. After that,
/// closing again fails with [`FioError::NilHandle`] and any read or write
/// returns an I/O error. Dropping an open handle releases the file without
/// reporting errors.
#[derive(Debug)]
pub struct FileHandle {
    file: Option<File>,
    path: PathBuf,
    sync_on_close: bool,
}

impl FileHandle {
    pub(crate) fn new(file: File, path: PathBuf, sync_on_close: bool) -> Self {
        Self {
            file: Some(file),
            path,
            sync_on_close,
        }
    }

    /// Path the handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` until the handle is closed.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// The underlying file, if the handle is still open.
    pub fn file(&self) -> Option<&File> {
        self.file.as_ref()
    }

    /// Releases the file.
    ///
    /// With [`FioConfig::sync_on_close`](crate::FioConfig::sync_on_close) set,
    /// file data is flushed to the device first.
    ///
    /// # Errors
    ///
    /// - [`FioError::NilHandle`] if the handle was already closed
    /// - [`FioError::Io`] with [`Operation::Close`] if the final sync fails;
    ///   the file is released either way
    pub fn close(&mut self) -> Result<()> {
        let file = self.file.take().ok_or(FioError::NilHandle)?;
        release(file, &self.path, self.sync_on_close)
    }

    fn open_file(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other(FioError::NilHandle))
    }
}

/// Closes `file`, syncing its data first when `sync` is set.
pub(crate) fn release(file: File, path: &Path, sync: bool) -> Result<()> {
    if sync {
        file.sync_data()
            .map_err(|e| FioError::io(Operation::Close, path, e))?;
    }
    drop(file);
    Ok(())
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.open_file()?.read(buf)
    }
}

impl Write for FileHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open_file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.open_file()?.flush()
    }
}

impl Seek for FileHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.open_file()?.seek(pos)
    }
}
