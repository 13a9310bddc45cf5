//! Cross-cutting guarantees: idempotence, balance, segmentation coverage.

use pretty_assertions::assert_eq;
use texscrub::{deep_sanitize, sanitize, scan, segment, transform_outside_math, Span};

const CORPUS: &[&str] = &[
    "",
    "plain text.",
    "\\( x+1 \\)",
    "\\[ x^2 \\]",
    "$\\frac 1 2$",
    "$A\\cupB$",
    "$ \\sinx + \\cosx $",
    "$\\,\\ y$",
    "$ \\int f(x) \\mathrm dx $",
    "$x \\leq 5, \\forall x \\in \\mathbb{N}$",
    "$\\intf(x)$",
    "$ \\left ( a + b \\right) $",
    "$a$ and $",
    "money $100 ",
    "\u{0008}egin{align}x=1\\end{align}",
    "\\begin{align}a\\\\b\\end{align}",
    "$$$$",
    "日本語 $x+1$ テキスト",
];

#[test]
fn sanitize_is_idempotent() {
    for input in CORPUS {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once, "input {:?}", input);
    }
}

#[test]
fn sanitize_output_has_even_dollar_count() {
    for input in CORPUS {
        let out = sanitize(input);
        assert_eq!(out.matches('$').count() % 2, 0, "input {:?}", input);
    }
}

#[test]
fn sanitize_output_passes_the_audit_scan() {
    for input in CORPUS {
        let out = sanitize(input);
        assert!(scan(&out).is_empty(), "input {:?} left {:?}", input, scan(&out));
    }
}

#[test]
fn segmentation_covers_every_input() {
    for input in CORPUS {
        let rejoined: String = segment(input).iter().map(Span::as_str).collect();
        assert_eq!(&rejoined, input);
    }
}

#[test]
fn transform_outside_math_never_touches_math_spans() {
    for input in CORPUS {
        let out = transform_outside_math(input, |text| text.to_uppercase());
        let math_in: Vec<String> = segment(input)
            .iter()
            .filter(|span| matches!(span, Span::Math { .. }))
            .map(|span| span.as_str().to_string())
            .collect();
        let math_out: Vec<String> = segment(&out)
            .iter()
            .filter(|span| matches!(span, Span::Math { .. }))
            .map(|span| span.as_str().to_string())
            .collect();
        assert_eq!(math_in, math_out, "input {:?}", input);
    }
}

#[test]
fn deep_sanitize_preserves_document_shape() {
    let value = serde_json::json!({
        "title": "\\( a+b \\)",
        "items": [
            {"body": "$\\frac 1 2$", "score": 10},
            {"body": "$A\\cupB$", "score": null},
        ],
        "count": 2,
        "published": true,
    });
    let expected = serde_json::json!({
        "title": "$a+b$",
        "items": [
            {"body": "$\\frac{1}{2}$", "score": 10},
            {"body": "$A\\cup B$", "score": null},
        ],
        "count": 2,
        "published": true,
    });
    assert_eq!(deep_sanitize(&value), expected);
}
