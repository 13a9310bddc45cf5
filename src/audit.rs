//! Offline content audit.
//!
//! The audit re-applies the sanitizer and scans the output for residual
//! glued-operator signatures. It walks the same allow-lists the rewrite
//! rules use, so a finding here means a rule failed to fire, not that the
//! two halves drifted apart.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::sanitize;
use crate::tables::{
    split_point, Split, AUDIT_PROTECTED, FUNCTION_COMMANDS, RELATION_COMMANDS,
    SET_LOGIC_COMMANDS,
};

/// Defect classes the scanner recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    GluedOperator,
    GluedAngle,
    DegreeGlyph,
    UnbalancedDollars,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IssueKind::GluedOperator => "glued-operator",
            IssueKind::GluedAngle => "glued-angle",
            IssueKind::DegreeGlyph => "degree-glyph",
            IssueKind::UnbalancedDollars => "unbalanced-dollars",
        };
        f.write_str(label)
    }
}

/// One finding, with enough surrounding text for triage.
#[derive(Debug, Clone, Serialize)]
pub struct AuditIssue {
    pub kind: IssueKind,
    pub message: String,
    pub excerpt: String,
    pub offset: usize,
}

/// The audit result for one input string.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub original: String,
    pub sanitized: String,
    pub issues: Vec<AuditIssue>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

lazy_static! {
    static ref GLUED_ANGLE_SIGNATURE: Regex = Regex::new(r"\\(angle|triangle)[A-Z]").unwrap();
}

/// Sanitize `input` and scan the output.
pub fn audit(input: &str) -> AuditReport {
    let sanitized = sanitize(input);
    let issues = scan(&sanitized);
    AuditReport {
        original: input.to_string(),
        sanitized,
        issues,
    }
}

/// Scan already-sanitized text for residual defect signatures.
pub fn scan(text: &str) -> Vec<AuditIssue> {
    let mut issues = Vec::new();
    scan_glued_commands(text, &mut issues);

    for found in GLUED_ANGLE_SIGNATURE.find_iter(text) {
        issues.push(AuditIssue {
            kind: IssueKind::GluedAngle,
            message: format!("`{}` is glued to a capital letter", found.as_str()),
            excerpt: excerpt_around(text, found.start()),
            offset: found.start(),
        });
    }

    for (offset, _) in text.match_indices('∘') {
        issues.push(AuditIssue {
            kind: IssueKind::DegreeGlyph,
            message: "raw degree glyph; expected ^\\circ".to_string(),
            excerpt: excerpt_around(text, offset),
            offset,
        });
    }

    if text.matches('$').count() % 2 != 0 {
        issues.push(AuditIssue {
            kind: IssueKind::UnbalancedDollars,
            message: "odd number of $ delimiters".to_string(),
            excerpt: excerpt_around(text, 0),
            offset: 0,
        });
    }
    if text.matches("$$").count() % 2 != 0 {
        issues.push(AuditIssue {
            kind: IssueKind::UnbalancedDollars,
            message: "odd number of $$ delimiters".to_string(),
            excerpt: excerpt_around(text, 0),
            offset: 0,
        });
    }

    issues
}

fn scan_glued_commands(text: &str, issues: &mut Vec<AuditIssue>) {
    let ops = [
        &FUNCTION_COMMANDS,
        &RELATION_COMMANDS,
        &SET_LOGIC_COMMANDS,
    ];
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
            end += 1;
        }
        if end == start {
            i += 1;
            continue;
        }
        let run = &text[start..end];
        let glued = match split_point(run, &ops, &[&AUDIT_PROTECTED]) {
            Split::Inside(_) => true,
            Split::End => bytes
                .get(end)
                .map_or(false, |b| b.is_ascii_digit() || *b == b'\\'),
            Split::None | Split::Protected => false,
        };
        if glued {
            issues.push(AuditIssue {
                kind: IssueKind::GluedOperator,
                message: format!("`\\{run}` is glued to the token after it"),
                excerpt: excerpt_around(text, i),
                offset: i,
            });
        }
        i = end;
    }
}

/// Up to forty characters of context on either side of `offset`, with line
/// breaks flattened.
fn excerpt_around(text: &str, offset: usize) -> String {
    let start = text[..offset]
        .char_indices()
        .rev()
        .take(40)
        .last()
        .map(|(index, _)| index)
        .unwrap_or(0);
    let end = text[offset..]
        .char_indices()
        .nth(40)
        .map(|(index, _)| offset + index)
        .unwrap_or(text.len());
    text[start..end].replace('\n', " ")
}
