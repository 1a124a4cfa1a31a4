//! # guarded-fs
//!
//! File and directory operations behind a uniform **path validation gate**.
//!
//! Every operation first checks the path, then performs one native filesystem
//! call, then translates a native failure into a typed error. There are no
//! sessions, caches or background work; each call opens, acts and closes on
//! the calling thread.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use guarded_fs::{AppendRequest, GuardedFs};
//!
//! # fn main() -> guarded_fs::Result<()> {
//! # let tmp = tempfile::tempdir().unwrap();
//! let fs = GuardedFs::new();
//! let dir = tmp.path().join("reports");
//! fs.create_dir(&dir)?;
//!
//! let summary = fs.join(&dir, "summary.txt")?;
//! let part = fs.join(&dir, "part.txt")?;
//! fs.write_single(&summary, "A")?;
//! fs.write_single(&part, "B")?;
//!
//! fs.append(&AppendRequest::new(&summary, &part))?;
//! assert_eq!(fs.read_all(&summary)?, b"AB");
//! assert_eq!(fs.read_all(&part)?, b"B");
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## The Gate
//!
//! [`PathGuard::validate`] rejects a path when:
//!
//! | Error | Condition |
//! |-------|-----------|
//! | [`GuardError::EmptyPath`] | the path is empty |
//! | [`GuardError::Forbidden`] | the cleaned path is a blocked file or lies under a blocked directory |
//! | [`GuardError::KindMismatch`] | the path exists but is not the expected [`PathKind`] |
//! | [`GuardError::Metadata`] | metadata lookup failed for a reason other than non-existence |
//!
//! A path that does not exist passes, so creating operations can target it.
//! The denylist is chosen at compile time ([`DenyList::UNIX`] or
//! [`DenyList::WINDOWS`]) and never changes.
//!
//! ---
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`](Result), an alias over [`FioError`].
//! Native failures carry the [`Operation`] and the path:
//!
//! ```rust
//! use guarded_fs::{FioError, GuardError, GuardedFs};
//!
//! let fs = GuardedFs::new();
//! let err = fs.read_all("").unwrap_err();
//! assert!(matches!(err, FioError::Guard(GuardError::EmptyPath)));
//! ```
//!
//! Nothing is retried. Gate and native call are not atomic, so a path can
//! change in between (time-of-check to time-of-use).
//!
//! ---
//!
//! ## Diagnostics
//!
//! Gate decisions and native calls emit `tracing` events at `trace` and
//! `debug` level. Without a subscriber they cost nothing and print nothing.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`FioConfig`] and friends, plus [`GuardedFsJson`] |

mod config;
mod deny_list;
mod error;
#[cfg(feature = "serde")]
mod ext;
mod golden;
mod guard;
mod handle;
mod ops;
mod text;
mod types;

// Public re-exports - error types
pub use error::{FioError, GuardError, Operation, Result};

// Public re-exports - core types
pub use types::{AppendRequest, OpenFlags, PathKind, Permissions};

// Public re-exports - gate
pub use deny_list::{DenyList, PathStyle, clean_path};
pub use guard::{PathGuard, check_dir, check_file};

// Public re-exports - operations
pub use config::FioConfig;
pub use handle::FileHandle;
pub use ops::GuardedFs;

// Public re-exports - test fixtures and text helpers
pub use golden::{GOLDEN_DIR, GOLDEN_EXTENSION, GoldenFiles, Testcase};
pub use text::{
    char_to_printable, is_printable, is_printable_char, norm_newlines_bytes, norm_newlines_str,
    printable,
};

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::GuardedFsJson;
