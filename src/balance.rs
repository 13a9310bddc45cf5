//! Final delimiter balance guard.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TRAILING_WHITESPACE: Regex = Regex::new(r"[ \t]+$").unwrap();
}

/// If the processed output carries an odd number of `$` delimiters, an
/// unpaired one survived segmentation; the first `$` is demoted to a
/// full-width `＄` so the renderer never sees a dangling math opener.
/// Trailing spaces and tabs are stripped from the end either way.
pub(crate) fn defuse_unbalanced(output: &str) -> String {
    let text = if output.matches('$').count() % 2 != 0 {
        output.replacen('$', "\u{FF04}", 1)
    } else {
        output.to_string()
    };
    TRAILING_WHITESPACE.replace(&text, "").into_owned()
}
