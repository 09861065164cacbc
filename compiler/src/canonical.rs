//! Text canonicalization for schema hashing.
//!
//! The canonical form keeps only what affects the wire shape: comments, the
//! `package` directive and every whitespace character are removed. Two
//! schemas that differ only in formatting or namespace therefore share a
//! canonical form and a hash.
//!
//! Comment stripping is lexical. The grammar has no string literals, so a
//! `//` or `/*` can only ever start a comment.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLOCK_COMMENT:     Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    static ref LINE_COMMENT:      Regex = Regex::new(r"//[^\n\r]*").unwrap();
    static ref PACKAGE_DIRECTIVE: Regex = Regex::new(
        r"\bpackage\s+[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*\s*;"
    ).unwrap();
    static ref ASCII_WHITESPACE:  Regex = Regex::new(r"[ \t\r\n]+").unwrap();
}

/// Remove `/* ... */` block comments, then `//` line comments.
/// Whitespace, including the newlines that ended line comments, is kept.
pub fn strip_comments(text: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(text, "");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Remove every `package <dotted.name>;` directive. Runs before whitespace
/// removal since the directive is only recognisable with its spacing intact.
pub fn strip_package(text: &str) -> String {
    PACKAGE_DIRECTIVE.replace_all(text, "").into_owned()
}

/// Remove every run of space, tab, CR and LF.
pub fn remove_ascii_whitespace(text: &str) -> String {
    ASCII_WHITESPACE.replace_all(text, "").into_owned()
}

/// Produce the hash input for a raw schema.
pub fn canonicalize(text: &str) -> String {
    let stripped = strip_comments(text);
    let without_package = strip_package(&stripped);
    remove_ascii_whitespace(&without_package)
}
