use crate::{
    canonical::{canonicalize, strip_comments},
    error::GrammarError,
    hash::fnv1a_32,
    types::Message,
    utils::quote,
    verifier::{verify_field, verify_fields},
};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

lazy_static! {
    static ref STRUCT_HEADER:   Regex = Regex::new(r"\bstruct\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{").unwrap();
    static ref PREAMBLE:        Regex = Regex::new(
        r"^\s*(?:package\s+([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\s*;\s*)?$"
    ).unwrap();
    static ref FIELD_STATEMENT: Regex = Regex::new(
        r"^([A-Za-z_][A-Za-z0-9_]*)\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:\[\s*(-?[0-9]+)\s*\])?$"
    ).unwrap();
}

/// One `;`-terminated statement from a struct body, split into its tokens but
/// not yet checked against the allowed type set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl<'a> {
    pub type_name: &'a str,
    pub name:      &'a str,
    pub array_len: Option<&'a str>,
}

/// Parse a `.umsg` schema containing exactly one struct definition.
///
/// The hash is computed from the canonical text of the raw input; the
/// descriptor is parsed from the comment-stripped text with its whitespace
/// intact.
pub fn parse_message(text: &str) -> Result<Message, GrammarError> {
    let canonical_text = canonicalize(text);
    let msg_hash = fnv1a_32(canonical_text.as_bytes());
    trace!("canonical text: {}", canonical_text);

    let src = strip_comments(text);

    let header = STRUCT_HEADER
        .captures(&src)
        .ok_or(GrammarError::MissingStructHeader)?;
    let (header_start, header_end) = match header.get(0) {
        Some(m) => (m.start(), m.end()),
        None => return Err(GrammarError::MissingStructHeader),
    };
    let struct_name = header
        .get(1)
        .map(|m| m.as_str().to_string())
        .ok_or(GrammarError::MissingStructHeader)?;

    let package = parse_preamble(&src[..header_start])?;

    // The header pattern ends on the opening brace.
    let brace_start = header_end - 1;
    let brace_end = match_brace(&src, brace_start)
        .ok_or_else(|| GrammarError::UnterminatedBrace(quote(&struct_name)))?;

    let body = &src[brace_start + 1..brace_end];
    expect_terminator(&src[brace_end + 1..], &struct_name)?;

    let mut fields = Vec::new();
    for decl in split_statements(body)? {
        fields.push(verify_field(&decl)?);
    }
    verify_fields(&struct_name, &fields)?;

    debug!(
        "parsed struct {} ({} fields, package {:?}, hash 0x{:08X})",
        struct_name,
        fields.len(),
        package,
        msg_hash
    );

    Ok(Message {
        struct_name,
        package,
        fields,
        canonical_text,
        msg_hash,
    })
}

/// The text before the struct header may hold nothing but whitespace and at
/// most one `package` directive.
fn parse_preamble(preamble: &str) -> Result<Option<String>, GrammarError> {
    let captures = PREAMBLE
        .captures(preamble)
        .ok_or_else(|| GrammarError::UnexpectedPreamble(quote(preamble.trim())))?;
    Ok(captures.get(1).map(|m| m.as_str().to_string()))
}

/// Returns the byte offset of the `}` matching the `{` at `open`.
fn match_brace(src: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in src.as_bytes()[open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// After the closing brace: optional whitespace, `;`, then only whitespace.
fn expect_terminator(rest: &str, struct_name: &str) -> Result<(), GrammarError> {
    let after_semicolon = rest
        .trim_start()
        .strip_prefix(';')
        .ok_or_else(|| GrammarError::MissingSemicolon(quote(struct_name)))?;

    let trailing = after_semicolon.trim();
    if !trailing.is_empty() {
        return Err(GrammarError::TrailingContent(quote(trailing)));
    }
    Ok(())
}

/// Split a struct body on `;`, skipping blank statements.
pub fn split_statements(body: &str) -> Result<Vec<FieldDecl<'_>>, GrammarError> {
    body.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(parse_statement)
        .collect()
}

fn parse_statement(stmt: &str) -> Result<FieldDecl<'_>, GrammarError> {
    let captures = FIELD_STATEMENT
        .captures(stmt)
        .ok_or_else(|| GrammarError::InvalidField(quote(stmt)))?;

    match (captures.get(1), captures.get(2)) {
        (Some(type_name), Some(name)) => Ok(FieldDecl {
            type_name: type_name.as_str(),
            name:      name.as_str(),
            array_len: captures.get(3).map(|m| m.as_str()),
        }),
        _ => Err(GrammarError::InvalidField(quote(stmt))),
    }
}
