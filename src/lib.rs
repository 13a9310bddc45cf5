//! texscrub normalizes LaTeX-flavored math markup embedded in prose.
//!
//! Input text is segmented into plain-text and `$`/`$$` math spans. Math
//! spans run through an ordered pipeline of named rewrite rules that repair
//! common corruption (glued operator names, unbraced `\frac` arguments,
//! scattered command letters) and canonicalize spacing. Plain-text spans get
//! a lighter touch. The whole transform is idempotent: sanitizing already
//! sanitized text is a no-op.
//!
//! Entry points:
//! - [`sanitize`] for a single string
//! - [`deep_sanitize`] for every string leaf of a JSON value
//! - [`audit`] to sanitize and then scan the output for residual defects
//! - [`transform_outside_math`] to run an arbitrary rewrite on the
//!   plain-text spans only

pub mod audit;
mod balance;
mod deep;
mod plain;
mod prepass;
mod rules;
mod segment;
mod tables;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use audit::{audit, scan, AuditIssue, AuditReport, IssueKind};
pub use deep::deep_sanitize;
pub use rules::{Rule, MATH_RULES};
pub use segment::{segment, Span};

/// Sanitize one string of mixed prose and math markup.
pub fn sanitize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let repaired = prepass::repair_commands(input);
    let repaired = prepass::normalize_delimiters(&repaired);
    let repaired = prepass::brace_global_arguments(&repaired);
    let joined: String = segment::segment(&repaired)
        .iter()
        .map(|span| match span {
            Span::Math { content, .. } => rules::normalize_math_span(content),
            Span::Text(text) => plain::normalize_plain(text),
        })
        .collect();
    let finished = rules::finalize_document(&joined);
    balance::defuse_unbalanced(&finished)
}

/// Apply `transform` to the plain-text spans of `input`, leaving every math
/// span byte-for-byte untouched.
pub fn transform_outside_math(input: &str, transform: impl Fn(&str) -> String) -> String {
    segment::segment(input)
        .iter()
        .map(|span| match span {
            Span::Math { content, .. } => content.clone(),
            Span::Text(text) => transform(text),
        })
        .collect()
}
