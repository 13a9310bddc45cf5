//! Default normalization for plain-text spans.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TRAILING_BEFORE_NEWLINE: Regex = Regex::new(r"[ \t]+\n").unwrap();
}

/// Applied to plain-text spans only: a literal `\n` token becomes a real
/// line break, full-width spaces become ASCII spaces, and trailing
/// horizontal whitespace before a line break is stripped.
pub(crate) fn normalize_plain(text: &str) -> String {
    let text = text.replace("\\n", "\n").replace('\u{3000}', " ");
    TRAILING_BEFORE_NEWLINE.replace_all(&text, "\n").into_owned()
}
