//! Newline normalization and printable-character filtering.

use unicode_general_category::{GeneralCategory, get_general_category};

use crate::{FioError, Result};

/// Replaces Windows (`\r\n`) and classic Mac (`\r`) line endings with `\n`.
///
/// ```rust
/// assert_eq!(guarded_fs::norm_newlines_str("a\r\nb\rc\n"), "a\nb\nc\n");
/// ```
pub fn norm_newlines_str(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Byte-slice variant of [`norm_newlines_str`]. Returns a normalized copy.
pub fn norm_newlines_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied().peekable();
    while let Some(b) = iter.next() {
        if b == b'\r' {
            iter.next_if_eq(&b'\n');
            out.push(b'\n');
        } else {
            out.push(b);
        }
    }
    out
}

/// Whether `c` is printable: a letter, mark, number, punctuation or symbol,
/// or the ASCII space.
///
/// Format characters, private-use and unassigned code points, and all
/// separators other than `' '` are not printable.
pub fn is_printable_char(c: char) -> bool {
    use GeneralCategory::*;

    c == ' '
        || matches!(
            get_general_category(c),
            UppercaseLetter
                | LowercaseLetter
                | TitlecaseLetter
                | ModifierLetter
                | OtherLetter
                | NonspacingMark
                | SpacingMark
                | EnclosingMark
                | DecimalNumber
                | LetterNumber
                | OtherNumber
                | ConnectorPunctuation
                | DashPunctuation
                | OpenPunctuation
                | ClosePunctuation
                | InitialPunctuation
                | FinalPunctuation
                | OtherPunctuation
                | MathSymbol
                | CurrencySymbol
                | ModifierSymbol
                | OtherSymbol
        )
}

/// Keeps only the characters accepted by [`is_printable_char`].
///
/// ```rust
/// assert_eq!(guarded_fs::printable("tab\there\u{7}\n ok"), "tabhere ok");
/// assert_eq!(guarded_fs::printable("zero\u{200B}width"), "zerowidth");
/// ```
pub fn printable(text: &str) -> String {
    text.chars().filter(|&c| is_printable_char(c)).collect()
}

/// Whether every string in `texts` consists of printable characters only.
///
/// # Errors
///
/// [`FioError::EmptyInput`] if `texts` is empty.
///
/// ```rust
/// use guarded_fs::{FioError, is_printable};
///
/// assert!(is_printable(&["a b", "c"]).unwrap());
/// assert!(!is_printable(&["a\nb"]).unwrap());
/// assert!(matches!(is_printable::<&str>(&[]), Err(FioError::EmptyInput)));
/// ```
pub fn is_printable<S: AsRef<str>>(texts: &[S]) -> Result<bool> {
    if texts.is_empty() {
        return Err(FioError::EmptyInput);
    }
    Ok(texts
        .iter()
        .all(|text| text.as_ref().chars().all(is_printable_char)))
}

/// `c` as a string if it is printable, otherwise the empty string.
pub fn char_to_printable(c: char) -> String {
    if is_printable_char(c) {
        c.to_string()
    } else {
        String::new()
    }
}
