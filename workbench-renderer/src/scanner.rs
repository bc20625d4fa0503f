//! `{{.Name}}` token scanner and substitution.
//!
//! The token grammar is fixed: `{{.` + identifier + `}}`, where an
//! identifier is ASCII `[A-Za-z_][A-Za-z0-9_]*`. There are no expressions,
//! conditionals, or nesting, and no escape sequence — any `{{.` opener must
//! form a complete token or the file is malformed. Brace text that never
//! opens a token (`{`, `}}`, `{{` without a dot) passes through untouched.
//!
//! Substituted values are inserted verbatim and never rescanned, so a
//! variable value containing `{{.` reaches the output literally.

use std::path::Path;

use workbench_core::types::VariableSet;

use crate::error::RenderError;

const OPENER: &str = "{{.";
const CLOSER: &str = "}}";

/// One recognised token span: `content[start..end]` is `{{.name}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub name: &'a str,
    pub start: usize,
    pub end: usize,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Parse the token opening at byte `start` (which holds `{{.`).
///
/// Returns the token on success. Any failure — empty identifier, bad
/// identifier character, missing `}}` — is a malformed token reported at
/// the opener's offset.
fn parse_token_at<'a>(
    path: &Path,
    content: &'a str,
    start: usize,
) -> Result<Token<'a>, RenderError> {
    let bytes = content.as_bytes();
    let ident_start = start + OPENER.len();

    let mut pos = ident_start;
    if pos < bytes.len() && is_ident_start(bytes[pos]) {
        pos += 1;
        while pos < bytes.len() && is_ident_continue(bytes[pos]) {
            pos += 1;
        }
    }

    if pos == ident_start || !content[pos..].starts_with(CLOSER) {
        return Err(RenderError::MalformedToken { path: path.to_path_buf(), offset: start });
    }

    Ok(Token {
        name: &content[ident_start..pos],
        start,
        end: pos + CLOSER.len(),
    })
}

/// All tokens in `content`, in scan (byte) order.
pub fn scan<'a>(path: &Path, content: &'a str) -> Result<Vec<Token<'a>>, RenderError> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    while let Some(found) = content[cursor..].find(OPENER) {
        let start = cursor + found;
        let token = parse_token_at(path, content, start)?;
        cursor = token.end;
        tokens.push(token);
    }
    Ok(tokens)
}

/// Substitute every token in `content` from `vars`.
///
/// Non-token bytes are copied through unchanged. The first unresolved or
/// malformed token (byte order) fails the whole file.
pub fn substitute(path: &Path, content: &str, vars: &VariableSet) -> Result<String, RenderError> {
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    while let Some(found) = content[cursor..].find(OPENER) {
        let start = cursor + found;
        let token = parse_token_at(path, content, start)?;
        let value = vars.get(token.name).ok_or_else(|| RenderError::UnresolvedVariable {
            name: token.name.to_owned(),
            path: path.to_path_buf(),
        })?;
        out.push_str(&content[cursor..start]);
        out.push_str(value);
        cursor = token.end;
    }
    out.push_str(&content[cursor..]);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
