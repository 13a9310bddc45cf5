//! End-to-end sanitizer behavior over whole documents.

use pretty_assertions::assert_eq;
use texscrub::sanitize;

#[test]
fn converts_inline_delimiters() {
    assert_eq!(sanitize("\\( x+1 \\)"), "$x+1$");
}

#[test]
fn converts_display_delimiters() {
    assert_eq!(sanitize("\\[ x^2 \\]"), "$$ x^2 $$");
}

#[test]
fn braces_bare_fraction_arguments() {
    assert_eq!(sanitize("$\\frac 1 2$"), "$\\frac{1}{2}$");
    assert_eq!(sanitize("half is \\frac 1 2 of it"), "half is \\frac{1}{2} of it");
}

#[test]
fn spaces_glued_set_operators() {
    assert_eq!(sanitize("$A\\cupB$"), "$A\\cup B$");
}

#[test]
fn defuses_stray_dollar_signs() {
    let out = sanitize("$a$ and $");
    assert_eq!(out, "＄a$ and $");
    assert_eq!(out.matches('$').count() % 2, 0);
}

#[test]
fn mends_thin_space_before_letters() {
    assert_eq!(sanitize("$\\,\\ y$"), "$\\, y$");
}

#[test]
fn spaces_glued_function_names() {
    assert_eq!(sanitize("$ \\sinx + \\cosx $"), "$ \\sin x + \\cos x $");
}

#[test]
fn canonicalizes_escaped_punctuation_spacing() {
    assert_eq!(sanitize("$ f(x\\ ,\\ y\\ ;\\ z) $"), "$ f(x\\, y\\; z) $");
}

#[test]
fn binds_differentials() {
    assert_eq!(
        sanitize("$ \\int f(x) \\mathrm dx $"),
        "$ \\int f(x) \\mathrm d x $"
    );
}

#[test]
fn splits_glued_integral() {
    assert_eq!(sanitize("$\\intf(x)$"), "$\\int f(x)$");
}

#[test]
fn attaches_sizing_delimiters() {
    assert_eq!(
        sanitize("$ \\left ( a + b \\right) $"),
        "$ \\left( a + b \\right ) $"
    );
}

#[test]
fn repairs_corrupted_align_environment() {
    assert_eq!(
        sanitize("\u{0008}egin{align}x=1\u{000C}end{align}"),
        "\\begin{align} x=1 \\end{align}"
    );
}

#[test]
fn spaces_align_row_breaks() {
    assert_eq!(
        sanitize("\\begin{align}a\\\\b\\end{align}"),
        "\\begin{align} a\\\\ b \\end{align}"
    );
}

#[test]
fn strips_trailing_whitespace() {
    assert_eq!(sanitize("$x$ done \t "), "$x$ done");
    assert_eq!(sanitize("money $100 "), "money ＄100");
}

#[test]
fn keeps_protected_commands_intact() {
    assert_eq!(
        sanitize("$x \\leq 5, \\forall x \\in \\mathbb{N}$"),
        "$x \\leq 5, \\forall x \\in \\mathbb{N}$"
    );
    assert_eq!(sanitize("$x \\to \\infty$"), "$x \\to \\infty$");
}

#[test]
fn leaves_unmatched_delimiters_as_text() {
    assert_eq!(sanitize("open \\( only"), "open \\( only");
}

#[test]
fn expands_literal_newlines_outside_math() {
    assert_eq!(sanitize("line one\\nline two"), "line one\nline two");
}
