//! Line-level splitting helpers for `go doc` output.

/// First tokens that mark a declaration line rather than a field line.
const DECL_KEYWORDS: &[&str] = &["type", "package"];

/// Inline comment marker.
const COMMENT_SEP: &str = "//";

/// Split a line on the first `//` into its code part and trimmed comment.
pub fn split_comment(line: &str) -> (&str, &str) {
    match line.split_once(COMMENT_SEP) {
        Some((code, comment)) => (code, comment.trim()),
        None => (line, ""),
    }
}

/// Pop the first whitespace-delimited token, returning it and the remainder
/// with leading whitespace removed.
pub fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], s[end..].trim_start()))
}

/// Field names declared by a code part, or `None` when the line declares no
/// named field: declaration keywords, and single-token lines, which are
/// anonymous embeddings.
///
/// `X, Y int` declares both `X` and `Y`.
pub fn field_names(code: &str) -> Option<Vec<&str>> {
    let mut tokens = code.split_whitespace();
    let first = tokens.next()?;
    if DECL_KEYWORDS.contains(&first) {
        return None;
    }

    let mut names = Vec::new();
    let mut current = first;
    loop {
        match current.strip_suffix(',') {
            Some(name) => {
                if !name.is_empty() {
                    names.push(name);
                }
                current = tokens.next()?;
            }
            None => {
                names.push(current);
                break;
            }
        }
    }

    // Need a type after the names.
    tokens.next()?;
    Some(names)
}

/// Whether a code part opens a declaration line (`type X struct {`).
pub fn is_declaration(code: &str) -> bool {
    code.split_whitespace()
        .next()
        .is_some_and(|first| DECL_KEYWORDS.contains(&first))
}

/// Summary line after the declaration: second token is the comment, the
/// rest of the line the description.
pub fn summary(line: &str) -> Option<(&str, &str)> {
    let (_name, rest) = next_token(line)?;
    let (comment, rest) = next_token(rest)?;
    Some((comment, rest.trim_end()))
}
