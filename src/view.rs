//! Read-only listing of store entries
//!
//! Renders each entry as `key: value (tag)`. Works on borrowed entries only,
//! so it can never change the store it displays.

use crate::store::Entry;
use std::fmt::Write;

/// Render one entry as a listing line (no trailing newline)
pub fn render_line(entry: &Entry) -> String {
    format!("{}: {} ({})", entry.key(), entry.value(), entry.dtype())
}

/// Render entries, one line each
pub fn render<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut out = String::new();
    for entry in entries {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}", render_line(entry));
    }
    out
}
