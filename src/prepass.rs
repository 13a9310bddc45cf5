//! Whole-string repairs that run before segmentation.
//!
//! Some corruptions are lexical and delimiter-agnostic (a control byte
//! standing in for a backslash, scattered command letters), so they are
//! repaired over the entire input before math spans are even identified.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref LINE_ENDINGS: Regex = Regex::new(r"\r\n?").unwrap();
    static ref CORRUPT_BEGIN: Regex = Regex::new(r"\x08egin\{").unwrap();
    static ref SCATTERED_FRAC: Regex = Regex::new(r"(?i)\\\s*r\s*a\s*c").unwrap();
    static ref SCATTERED_TEXT: Regex = Regex::new(r"(?i)\\\s*e\s*x\s*t").unwrap();
    static ref PADDED_TEXT: Regex = Regex::new(r"\\\s*text\b").unwrap();
    static ref BRACE_GAP: Regex = Regex::new(r"\\([A-Za-z]{2,})\s+\{").unwrap();
    static ref INLINE_DELIMS: Regex = Regex::new(r"(?s)\\\((.*?)\\\)").unwrap();
    static ref DISPLAY_DELIMS: Regex = Regex::new(r"(?s)\\\[(.*?)\\\]").unwrap();
    static ref FRAC_DIGIT_PAIR: Regex =
        Regex::new(r"\\frac\s+([0-9])\s*([0-9])([^0-9]|$)").unwrap();
    static ref FRAC_BARE_PAIR: Regex =
        Regex::new(r"\\frac\s+([^\s{}$+\-*/=()]+)\s+([^\s{}$+\-*/=()]+)\b").unwrap();
    static ref FRAC_BRACED_BARE: Regex =
        Regex::new(r"\\frac\{\s*([^{}]*?)\s*\}\s+([^\s{}$+\-*/=()]+)").unwrap();
    static ref FRAC_BARE_BRACED: Regex =
        Regex::new(r"\\frac\s+([^\s{}$+\-*/=()]+)\s*\{\s*([^{}]*?)\s*\}").unwrap();
    static ref TEXT_BRACES: Regex = Regex::new(r"\\text\{\s*([^{}]*?)\s*\}").unwrap();
    static ref BARE_TEXT: Regex = Regex::new(r"\\text\s+([^\s{}$]+)").unwrap();
}

/// Restore corrupted command tokens across the whole input: broken line
/// endings, the mangled `begin` keyword, a form feed standing in for a
/// backslash, and the scattered letters of `\frac` and `\text`.
pub(crate) fn repair_commands(input: &str) -> String {
    let out = LINE_ENDINGS.replace_all(input, "\n");
    let out = CORRUPT_BEGIN.replace_all(&out, r"\begin{");
    let out = out.replace('\u{000C}', "\\");
    let out = SCATTERED_FRAC.replace_all(&out, r"\frac");
    let out = SCATTERED_TEXT.replace_all(&out, r"\text");
    let out = PADDED_TEXT.replace_all(&out, r"\text");
    rebind_brace_groups(&out)
}

/// Remove the whitespace between a multi-letter command and its brace
/// group, so argument-taking commands bind correctly.
pub(crate) fn rebind_brace_groups(input: &str) -> String {
    BRACE_GAP.replace_all(input, r"\${1}{").into_owned()
}

/// Rewrite `\(…\)` to `$…$` and `\[…\]` to `$$ … $$`, trimming the
/// interiors. Unmatched openers are left untouched and fall through to the
/// segmenter as plain text.
pub(crate) fn normalize_delimiters(input: &str) -> String {
    let out = INLINE_DELIMS.replace_all(input, |caps: &Captures| {
        format!("${}$", caps[1].trim())
    });
    DISPLAY_DELIMS
        .replace_all(&out, |caps: &Captures| {
            format!("$$ {} $$", caps[1].trim())
        })
        .into_owned()
}

/// Brace the arguments of `\frac` in all four bare/braced combinations.
/// The digit pair has to consume its guard character, so it is retried
/// until adjacent occurrences settle.
pub(crate) fn brace_fraction_args(input: &str) -> String {
    let out = rewrite_until_stable(&FRAC_DIGIT_PAIR, r"\frac{${1}}{${2}}${3}", input);
    let out = FRAC_BARE_PAIR.replace_all(&out, r"\frac{${1}}{${2}}");
    let out = FRAC_BRACED_BARE.replace_all(&out, r"\frac{${1}}{${2}}");
    FRAC_BARE_BRACED
        .replace_all(&out, r"\frac{${1}}{${2}}")
        .into_owned()
}

pub(crate) fn trim_text_braces(input: &str) -> String {
    TEXT_BRACES.replace_all(input, r"\text{${1}}").into_owned()
}

pub(crate) fn wrap_bare_text(input: &str) -> String {
    BARE_TEXT.replace_all(input, r"\text{${1}}").into_owned()
}

/// Argument repairs applied to the whole string, so corruption outside
/// math spans is recovered as well.
pub(crate) fn brace_global_arguments(input: &str) -> String {
    let out = brace_fraction_args(input);
    wrap_bare_text(&trim_text_braces(&out))
}

fn rewrite_until_stable(pattern: &Regex, replacement: &str, input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = pattern.replace_all(&current, replacement).into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn repairs_control_byte_artifacts() {
        assert_eq!(
            repair_commands("\u{0008}egin{align}"),
            "\\begin{align}"
        );
        assert_eq!(repair_commands("\u{000C}frac{1}{2}"), "\\frac{1}{2}");
    }

    #[test]
    fn rejoins_scattered_commands() {
        assert_eq!(repair_commands("\\ r a c"), "\\frac");
        assert_eq!(repair_commands("\\ ext{ok}"), "\\text{ok}");
        assert_eq!(repair_commands("\\ text{ok}"), "\\text{ok}");
    }

    #[test]
    fn rebinds_brace_groups() {
        assert_eq!(repair_commands("\\mathbb {N}"), "\\mathbb{N}");
        assert_eq!(repair_commands("\\mathrm {d}"), "\\mathrm{d}");
    }

    #[test]
    fn normalizes_inline_delimiters() {
        assert_eq!(normalize_delimiters("\\( x+1 \\)"), "$x+1$");
        assert_eq!(normalize_delimiters("\\[ x^2 \\]"), "$$ x^2 $$");
    }

    #[test]
    fn leaves_unmatched_openers_alone() {
        assert_eq!(normalize_delimiters("\\( x+1"), "\\( x+1");
        assert_eq!(normalize_delimiters("\\[ x+1"), "\\[ x+1");
    }

    #[test]
    fn braces_all_fraction_combinations() {
        assert_eq!(brace_fraction_args("\\frac 1 2"), "\\frac{1}{2}");
        assert_eq!(brace_fraction_args("\\frac a b"), "\\frac{a}{b}");
        assert_eq!(brace_fraction_args("\\frac{a} b"), "\\frac{a}{b}");
        assert_eq!(brace_fraction_args("\\frac a {b}"), "\\frac{a}{b}");
        assert_eq!(brace_fraction_args("\\frac{a}{b}"), "\\frac{a}{b}");
    }

    #[test]
    fn braces_adjacent_digit_fractions() {
        assert_eq!(
            brace_fraction_args("\\frac 12\\frac 34"),
            "\\frac{1}{2}\\frac{3}{4}"
        );
    }

    #[test]
    fn wraps_and_trims_text_arguments() {
        assert_eq!(brace_global_arguments("\\text{  ok  }"), "\\text{ok}");
        assert_eq!(brace_global_arguments("\\text hello"), "\\text{hello}");
    }
}
