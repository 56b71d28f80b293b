//! Slug generation for product names.

use deunicode::deunicode;

/// Converts text into a URL slug: transliterated to ASCII, lowercase, words joined by
/// single hyphens, anything that is not a letter or digit dropped.
///
/// Whitespace, hyphens and underscores separate words; `@` reads as "at". Leading and
/// trailing separators are trimmed, so `"  Red   Shirt! "` becomes `"red-shirt"`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for ch in ascii.chars() {
        if ch == '@' {
            if !slug.is_empty() {
                slug.push('-');
            }
            slug.push_str("at");
            pending_separator = true;
        } else if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        }
    }

    slug
}
