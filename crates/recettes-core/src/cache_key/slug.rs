//! Name slugs: ASCII, lowercase, underscores for spaces.

use deunicode::deunicode;

/// Turns a display name into a filename stem.
///
/// Transliterates to ASCII, lowercases, keeps alphanumerics, turns each run of
/// whitespace into a single `_` and drops everything else. Leading and
/// trailing underscores are trimmed.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode(name);
    let mut out = String::with_capacity(ascii.len());
    let mut pending_sep = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() {
            pending_sep = true;
        }
    }

    out
}
