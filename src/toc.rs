//! GitHub-flavored markdown anchor links for type headings.

/// Link to the heading for a type name.
pub fn render_link(text: &str) -> String {
    format!("[{}](#{})", text, github_slug(text))
}

/// GitHub heading anchor slug generation.
///
/// - lowercase
/// - remove all chars that aren't alphanumeric, space, hyphen or underscore
/// - replace spaces with hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
        // All other chars (including '/' and '.') are stripped
    }
    slug.replace(' ', "-")
}
