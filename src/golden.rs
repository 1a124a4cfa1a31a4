//! # Golden Files
//!
//! Reference data stored on disk for test comparisons.
//!
//! A [`Testcase`] named `parse_header` maps to `testdata/parse_header.golden`.
//! [`GoldenFiles::create`] records its data; [`GoldenFiles::eval`] compares
//! later output against the recording with line endings normalized, so files
//! checked out with CRLF endings still match.

use std::path::{Path, PathBuf};

use crate::{FioError, GuardedFs, Result, norm_newlines_str};

/// Default directory of golden files, relative to the working directory.
pub const GOLDEN_DIR: &str = "testdata";

/// File extension of golden files.
pub const GOLDEN_EXTENSION: &str = "golden";

/// Name and data of a testcase; the data is either reference or test data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testcase {
    /// Name of the testcase, also the golden file stem.
    pub name: String,
    /// Data of the testcase.
    pub data: String,
}

impl Testcase {
    /// Creates a testcase.
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Golden file store rooted at a directory.
///
/// # Example
///
/// ```rust
/// use guarded_fs::{GoldenFiles, GuardedFs, Testcase};
///
/// # fn main() -> guarded_fs::Result<()> {
/// # let tmp = tempfile::tempdir().unwrap();
/// let fs = GuardedFs::new();
/// let golden = GoldenFiles::in_dir(&fs, tmp.path().join("testdata"));
///
/// golden.create(&Testcase::new("greeting", "hello\nworld\n"))?;
/// golden.eval(&Testcase::new("greeting", "hello\r\nworld\r\n"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GoldenFiles<'a> {
    fs: &'a GuardedFs,
    dir: PathBuf,
}

impl<'a> GoldenFiles<'a> {
    /// Store in [`GOLDEN_DIR`].
    pub fn new(fs: &'a GuardedFs) -> Self {
        Self::in_dir(fs, GOLDEN_DIR)
    }

    /// Store in `dir`.
    pub fn in_dir(fs: &'a GuardedFs, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    /// Directory holding the golden files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the golden file for the testcase `name`.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        self.fs
            .join(&self.dir, format!("{name}.{GOLDEN_EXTENSION}"))
    }

    /// Writes the testcase data as the golden file, creating the directory
    /// if needed. An existing golden file is replaced.
    pub fn create(&self, testcase: &Testcase) -> Result<()> {
        self.fs.create_dir(&self.dir)?;
        let path = self.path(&testcase.name)?;
        self.fs.write_single(&path, &testcase.data)?;
        tracing::debug!(name = %testcase.name, path = %path.display(), "golden file written");
        Ok(())
    }

    /// Compares the testcase data with its golden file.
    ///
    /// # Errors
    ///
    /// - [`FioError::NotExistent`] if the golden file is missing
    /// - [`FioError::GoldenMismatch`] if the normalized contents differ
    pub fn eval(&self, testcase: &Testcase) -> Result<()> {
        let path = self.path(&testcase.name)?;
        let reference = String::from_utf8_lossy(&self.fs.read_all(&path)?).into_owned();

        if norm_newlines_str(&testcase.data) != norm_newlines_str(&reference) {
            return Err(FioError::GoldenMismatch {
                name: testcase.name.clone(),
                actual: testcase.data.clone(),
                want: reference,
            });
        }
        Ok(())
    }
}
