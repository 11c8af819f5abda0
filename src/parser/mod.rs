//! Parser for the plain-text output of `go doc <pkg>.<Type>`.
//!
//! The text has two parts separated by the line `}` that closes the struct
//! declaration:
//!
//! ```text
//! package shop // import "example.com/shop"
//!
//! type User struct {
//!     *Model
//!     Age         int       // age in years
//!     AddressList []Address // shipping addresses
//! }
//!     User Customer A registered shop customer.
//! ```
//!
//! Inside the declaration every named field line maps its name to its inline
//! comment. After it, the first line with two or more tokens is the summary:
//! the second token is the comment and the rest of the line the description.
//! Lines that fit neither shape are skipped; formatting never fails a parse.

mod line;

use std::collections::HashMap;
use std::io::{self, BufRead};

/// Documentation extracted from one type's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    pub comment: String,
    pub description: String,
    /// Field name → inline comment. Declared but undocumented fields map to
    /// an empty string.
    pub fields: HashMap<String, String>,
}

impl ParsedDoc {
    /// Comment for a field name, empty when the field was not listed.
    pub fn field_comment(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Parse documentation text from a reader.
///
/// Fails only if the stream cannot be read to completion, which includes
/// text that is not valid UTF-8.
pub fn parse<R: BufRead>(reader: R) -> io::Result<ParsedDoc> {
    let mut doc = ParsedDoc::default();
    let mut in_decl = true;
    let mut depth = 0usize;
    let mut have_summary = false;

    for text in reader.lines() {
        let text = text?;

        if !in_decl {
            if have_summary {
                continue;
            }
            if let Some((comment, description)) = line::summary(&text) {
                doc.comment = comment.to_string();
                doc.description = description.to_string();
                have_summary = true;
            }
            continue;
        }

        let (code, comment) = line::split_comment(&text);
        let code = code.trim();

        // Closing brace of the declaration, or of an inline struct field.
        if text.trim() == "}" || (depth > 1 && code.starts_with('}')) {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                in_decl = false;
            }
            continue;
        }

        if line::is_declaration(code) {
            if code.ends_with("{}") {
                // `type Empty struct{}` has no body and no closing line.
                in_decl = false;
            } else if code.ends_with('{') {
                depth += 1;
            }
            continue;
        }

        if depth <= 1 {
            if let Some(names) = line::field_names(code) {
                for name in names {
                    doc.fields.insert(name.to_string(), comment.to_string());
                }
            }
        }
        if code.ends_with('{') {
            depth += 1;
        }
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(text: &str) -> ParsedDoc {
        parse(text.as_bytes()).unwrap()
    }

    const USER_DOC: &str = "\
package shop // import \"example.com/shop\"

type User struct {
\t*Model
\tBasic                 // basic information
\tAge         int       // age in years
\tAddressList []Address // shipping addresses
}
    User Customer A registered shop customer.

func NewUser(name string) *User
";

    #[test]
    fn parse_field_comments() {
        let doc = parse_str(USER_DOC);
        assert_eq!(doc.field_comment("Age"), "age in years");
        assert_eq!(doc.field_comment("AddressList"), "shipping addresses");
        assert_eq!(doc.fields.len(), 2);
    }

    #[test]
    fn parse_summary_line() {
        let doc = parse_str(USER_DOC);
        assert_eq!(doc.comment, "Customer");
        assert_eq!(doc.description, "A registered shop customer.");
    }

    #[test]
    fn embedded_fields_have_no_entry() {
        let doc = parse_str(USER_DOC);
        assert!(!doc.fields.contains_key("Model"));
        assert!(!doc.fields.contains_key("*Model"));
        assert!(!doc.fields.contains_key("Basic"));
        assert!(!doc.fields.contains_key("package"));
        assert!(!doc.fields.contains_key("type"));
    }

    #[test]
    fn summary_token_split() {
        let doc = parse_str("type User struct {\n\tAge int // Age in years\n}\nUser   summary text   extra description\n");
        assert_eq!(doc.fields.get("Age").map(String::as_str), Some("Age in years"));
        assert_eq!(doc.comment, "summary");
        assert_eq!(doc.description, "text   extra description");
    }

    #[test]
    fn undocumented_field_maps_to_empty() {
        let doc = parse_str("type User struct {\n\tAge int\n}\n");
        assert_eq!(doc.fields.get("Age").map(String::as_str), Some(""));
        assert_eq!(doc.comment, "");
        assert_eq!(doc.description, "");
    }

    #[test]
    fn first_summary_wins() {
        let doc = parse_str("type A struct {\n}\n\n    A first line\n    A second line\n");
        assert_eq!(doc.comment, "first");
        assert_eq!(doc.description, "line");
    }

    #[test]
    fn single_token_lines_after_sentinel_are_skipped() {
        let doc = parse_str("type A struct {\n}\nA\n\n    A label\n");
        assert_eq!(doc.comment, "label");
        assert_eq!(doc.description, "");
    }

    #[test]
    fn multi_name_field_line() {
        let doc = parse_str("type Point struct {\n\tX, Y float64 // coordinates\n}\n");
        assert_eq!(doc.field_comment("X"), "coordinates");
        assert_eq!(doc.field_comment("Y"), "coordinates");
    }

    #[test]
    fn inline_struct_does_not_end_declaration() {
        let text = "\
type Config struct {
\tServer struct {
\t\tHost string // host name
\t} // listener
\tDebug bool // verbose logging
}
    Config Settings loaded at startup.
";
        let doc = parse_str(text);
        assert_eq!(doc.field_comment("Server"), "");
        assert_eq!(doc.field_comment("Debug"), "verbose logging");
        assert!(!doc.fields.contains_key("Host"));
        assert_eq!(doc.comment, "Settings");
    }

    #[test]
    fn empty_struct_declaration() {
        let doc = parse_str("type Empty struct{}\n    Empty Marker type.\n");
        assert!(doc.fields.is_empty());
        assert_eq!(doc.comment, "Marker");
        assert_eq!(doc.description, "type.");
    }

    #[test]
    fn unexported_fields_note_is_ignored() {
        let doc = parse_str("type A struct {\n\tName string\n\t// Has unexported fields.\n}\n");
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.field_comment("Name"), "");
    }

    #[test]
    fn no_sentinel_leaves_summary_empty() {
        let doc = parse_str("type A struct {\n\tName string // name\n");
        assert_eq!(doc.field_comment("Name"), "name");
        assert_eq!(doc.comment, "");
    }

    #[test]
    fn garbage_is_not_an_error() {
        let doc = parse(&b"%%% ??? \n\n\t\t\n}}}\n"[..]).unwrap();
        assert!(doc.fields.contains_key("%%%"));
        assert_eq!(doc.comment, "");
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let err = parse(&b"type A struct {\n\tName \xff\xfe string\n}\n"[..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
