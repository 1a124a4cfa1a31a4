//! # Denylist
//!
//! Platform tables of system-critical locations and the lexical cleaning used
//! to compare paths against them.
//!
//! Two kinds of entries exist:
//!
//! | Table | Match rule |
//! |-------|-----------|
//! | blocked files | cleaned candidate equals the cleaned entry |
//! | blocked directories | cleaned candidate equals the entry or lies below it |
//!
//! Both tables are `const` data. [`DenyList::host`] picks the Unix or Windows
//! table at compile time; both remain available for callers that need to
//! reason about the other platform.

use std::path::Path;

/// Path syntax used when cleaning and comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    /// `/`-separated, case-sensitive.
    Unix,
    /// `\`-separated (also accepting `/`), drive prefixes, case-insensitive.
    Windows,
}

impl PathStyle {
    /// Style of the platform this crate was compiled for.
    pub const fn host() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Unix
        }
    }

    /// Primary separator character.
    pub const fn separator(&self) -> char {
        match self {
            PathStyle::Unix => '/',
            PathStyle::Windows => '\\',
        }
    }

    fn is_separator(&self, c: char) -> bool {
        match self {
            PathStyle::Unix => c == '/',
            PathStyle::Windows => c == '\\' || c == '/',
        }
    }
}

/// Reduces `path` to its shortest lexically equivalent form.
///
/// Repeated separators collapse, `.` segments vanish, `..` consumes the
/// preceding segment, and trailing separators are dropped. A rooted path never
/// climbs above its root; a relative path keeps leading `..` segments. The
/// empty result is `.`. No filesystem access takes place.
///
/// # Example
///
/// ```rust
/// use guarded_fs::{PathStyle, clean_path};
///
/// assert_eq!(clean_path("/usr//local/./bin/../", PathStyle::Unix), "/usr/local");
/// assert_eq!(clean_path("../a/../../b", PathStyle::Unix), "../../b");
/// assert_eq!(clean_path("C:/Windows/System32/", PathStyle::Windows), r"C:\Windows\System32");
/// ```
pub fn clean_path(path: &str, style: PathStyle) -> String {
    let sep = style.separator();
    let (volume, rest) = split_volume(path, style);
    let rooted = rest.starts_with(|c: char| style.is_separator(c));

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(|c: char| style.is_separator(c)) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // Rooted paths cannot go above the root
                _ if rooted => {}
                _ => segments.push(".."),
            },
            name => segments.push(name),
        }
    }

    let mut cleaned = String::with_capacity(path.len());
    cleaned.push_str(volume);
    if rooted {
        cleaned.push(sep);
    }
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            cleaned.push(sep);
        }
        cleaned.push_str(segment);
    }
    if segments.is_empty() && !rooted {
        cleaned.push('.');
    }
    cleaned
}

fn split_volume(path: &str, style: PathStyle) -> (&str, &str) {
    if style == PathStyle::Windows {
        let bytes = path.as_bytes();
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            return path.split_at(2);
        }
    }
    ("", path)
}

/// Immutable set of blocked files and blocked directory subtrees.
///
/// # Example
///
/// ```rust
/// use guarded_fs::DenyList;
///
/// let unix = DenyList::UNIX;
/// assert_eq!(unix.blocked_by("/proc/self/status"), Some("/proc"));
/// assert_eq!(unix.blocked_by("/etc/"), Some("/etc"));
/// assert_eq!(unix.blocked_by("/etc/hosts"), None);
/// assert_eq!(unix.blocked_by("/devices"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenyList {
    style: PathStyle,
    files: &'static [&'static str],
    dirs: &'static [&'static str],
}

impl DenyList {
    /// Linux and other Unix systems.
    pub const UNIX: Self = Self {
        style: PathStyle::Unix,
        files: &[
            "/", "/bin", "/etc", "/home", "/lib", "/media", "/mnt", "/opt", "/root", "/sbin",
            "/srv", "/tmp", "/usr", "/var",
        ],
        dirs: &["/boot", "/dev", "/lost+found", "/proc"],
    };

    /// Windows systems.
    pub const WINDOWS: Self = Self {
        style: PathStyle::Windows,
        files: &[
            r"C:\Program Files",
            r"C:\Program Files (x86)",
            r"C:\",
            r"C:\Windows",
            r"C:\pagefile.sys",
        ],
        dirs: &[
            r"C:\Windows\System32",
            r"C:\System Volume Information",
            r"C:\Windows\WinSxS",
            r"C:\Windows\SysWOW64",
        ],
    };

    /// Creates a denylist from static tables.
    pub const fn new(
        style: PathStyle,
        files: &'static [&'static str],
        dirs: &'static [&'static str],
    ) -> Self {
        Self { style, files, dirs }
    }

    /// The table for the platform this crate was compiled for.
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::WINDOWS
        } else {
            Self::UNIX
        }
    }

    /// Path syntax used for comparisons.
    pub const fn style(&self) -> PathStyle {
        self.style
    }

    /// Paths blocked by exact match.
    pub const fn files(&self) -> &'static [&'static str] {
        self.files
    }

    /// Directory subtrees blocked entirely.
    pub const fn dirs(&self) -> &'static [&'static str] {
        self.dirs
    }

    /// Returns the entry blocking `path`, if any.
    ///
    /// Blocked files are checked before blocked directories.
    pub fn blocked_by(&self, path: impl AsRef<Path>) -> Option<&'static str> {
        let candidate = self.key(&path.as_ref().to_string_lossy());

        if let Some(entry) = self.files.iter().find(|e| self.key(e) == candidate) {
            return Some(*entry);
        }
        self.dirs
            .iter()
            .find(|e| self.is_nested(&candidate, &self.key(e)))
            .copied()
    }

    /// Cleaned comparison key for `path`.
    fn key(&self, path: &str) -> String {
        let cleaned = clean_path(path, self.style);
        match self.style {
            PathStyle::Unix => cleaned,
            PathStyle::Windows => cleaned.to_lowercase(),
        }
    }

    fn is_nested(&self, candidate: &str, root: &str) -> bool {
        match candidate.strip_prefix(root) {
            Some("") => true,
            Some(rest) => {
                root.ends_with(self.style.separator()) || rest.starts_with(self.style.separator())
            }
            None => false,
        }
    }
}

impl Default for DenyList {
    fn default() -> Self {
        Self::host()
    }
}
