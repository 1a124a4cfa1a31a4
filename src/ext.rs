//! # JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, [`GuardedFsJson`] reads and writes JSON
//! documents through the guarded operations.
//!
//! | Method | Description |
//! |--------|-------------|
//! | `read_json` | Read and deserialize a JSON file |
//! | `write_json` | Serialize and replace a file with JSON |
//!
//! Enable with:
//! ```toml
//! [dependencies]
//! guarded-fs = { version = "0.1", features = ["serde"] }
//! ```

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{FioError, GuardedFs, Result};

/// JSON serialization extension methods.
///
/// # Example
///
/// ```rust
/// use guarded_fs::{GuardedFs, GuardedFsJson};
///
/// # fn main() -> guarded_fs::Result<()> {
/// # let tmp = tempfile::tempdir().unwrap();
/// let fs = GuardedFs::new();
/// let path = tmp.path().join("config.json");
///
/// fs.write_json(&path, &serde_json::json!({ "retries": 3 }))?;
/// let value: serde_json::Value = fs.read_json(&path)?;
/// assert_eq!(value["retries"], 3);
/// # Ok(())
/// # }
/// ```
pub trait GuardedFsJson {
    /// Read a file and deserialize it as JSON.
    ///
    /// # Errors
    ///
    /// - Errors of [`GuardedFs::read_all`]
    /// - [`FioError::Deserialization`] if JSON parsing failed
    fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T>;

    /// Serialize a value and make it the entire file content.
    ///
    /// Uses pretty-printing with 2-space indentation.
    ///
    /// # Errors
    ///
    /// - [`FioError::Serialization`] if JSON serialization failed
    /// - Errors of [`GuardedFs::write_single`]
    fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> Result<()>;
}

impl GuardedFsJson for GuardedFs {
    fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T> {
        let data = self.read_all(path)?;
        serde_json::from_slice(&data).map_err(|e| FioError::Deserialization(e.to_string()))
    }

    fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| FioError::Serialization(e.to_string()))?;
        self.write_single(path, &json)
    }
}
