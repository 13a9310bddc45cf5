//! The ordered math-span rule pipeline and the document finalizer.
//!
//! Rule order is load-bearing: several rules consume the postcondition of
//! an earlier rule (command gaps must be collapsed before anything matches
//! command names, bracing repair must precede operator spacing). The list
//! below is the contract of record; reordering is not behavior-preserving.
//! Each rule is individually idempotent and the pipeline is idempotent as
//! a whole.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::prepass;
use crate::tables::{
    space_glued_commands, FUNCTION_COMMANDS, PROTECTED_COMMANDS, RELATION_COMMANDS,
    SET_LOGIC_COMMANDS,
};

/// A named rewrite step over one math span.
pub struct Rule {
    pub name: &'static str,
    run: fn(&str) -> String,
}

impl Rule {
    pub fn apply(&self, input: &str) -> String {
        (self.run)(input)
    }
}

/// The pipeline of record, applied in order to each math span.
pub static MATH_RULES: &[Rule] = &[
    Rule { name: "collapse-command-gaps", run: collapse_command_gaps },
    Rule { name: "respace-angle-triangle", run: respace_angle_triangle },
    Rule { name: "replace-degree-glyph", run: replace_degree_glyph },
    Rule { name: "brace-fraction-args", run: brace_fraction_args },
    Rule { name: "tighten-scripts", run: tighten_scripts },
    Rule { name: "collapse-spacing-commands", run: collapse_spacing_commands },
    Rule { name: "attach-sizing-delimiters", run: attach_sizing_delimiters },
    Rule { name: "collapse-escaped-brace-close", run: collapse_escaped_brace_close },
    Rule { name: "rebind-braced-arguments", run: rebind_braced_arguments },
    Rule { name: "space-function-commands", run: space_function_commands },
    Rule { name: "tidy-comma-spacing", run: tidy_comma_spacing },
    Rule { name: "demote-escaped-letters", run: demote_escaped_letters },
    Rule { name: "space-relation-operators", run: space_relation_operators },
    Rule { name: "space-set-logic-operators", run: space_set_logic_operators },
    Rule { name: "separate-punctuated-commands", run: separate_punctuated_commands },
    Rule { name: "collapse-duplicate-backslashes", run: collapse_duplicate_backslashes },
    Rule { name: "mend-thin-space-sequences", run: mend_thin_space_sequences },
    Rule { name: "space-differential", run: space_differential },
    Rule { name: "split-binomial-args", run: split_binomial_args },
    Rule { name: "drop-stray-closer-before-right", run: drop_stray_closer_before_right },
    Rule { name: "brace-text-arguments", run: brace_text_arguments },
    Rule { name: "guard-escaped-brace", run: guard_escaped_brace },
];

/// Run every rule, in order, over one math span (delimiters included).
pub(crate) fn normalize_math_span(span: &str) -> String {
    MATH_RULES
        .iter()
        .fold(span.to_string(), |text, rule| rule.apply(&text))
}

lazy_static! {
    static ref COMMAND_GAP: Regex = Regex::new(r"\\(?:\s*[A-Za-z]){2,}").unwrap();
    static ref BARE_RAC: Regex = Regex::new(r"\\rac\b").unwrap();
    static ref SPLIT_INT: Regex = Regex::new(r"(?i)\\\s*i\s*n\s*t\b").unwrap();
    static ref SPLIT_INFTY: Regex = Regex::new(r"(?i)\\\s*i\s*n\s*f\s*t\s*y").unwrap();
    static ref GLUED_ANGLE: Regex = Regex::new(r"\\(angle|triangle)([A-Za-z])").unwrap();
    static ref SCRIPT_SUB: Regex = Regex::new(r"\s*_\s*").unwrap();
    static ref SCRIPT_SUP: Regex = Regex::new(r"\s*\^\s*").unwrap();
    static ref SPLIT_THIN: Regex = Regex::new(r"\\\s*,").unwrap();
    static ref SPLIT_MEDIUM: Regex = Regex::new(r"\\\s*;").unwrap();
    static ref LEFT_GAP: Regex = Regex::new(r"\\left\s+([.|(){}\[\]])").unwrap();
    static ref RIGHT_BAR: Regex = Regex::new(r"\\right\s*\|").unwrap();
    static ref RIGHT_DOT: Regex = Regex::new(r"\\right\s*\.").unwrap();
    static ref RIGHT_CLOSER: Regex = Regex::new(r"\\right\s*([)\]}])").unwrap();
    static ref ESCAPED_BRACE_RIGHT: Regex = Regex::new(r"\\\}\s*\\right\}").unwrap();
    static ref BARE_BRACE_RIGHT: Regex = Regex::new(r"\}\s*\\right\}").unwrap();
    static ref SPLIT_COMMAND_TAIL: Regex =
        Regex::new(r"\\([A-Za-z]{2,})\s+([A-Za-z])(\s*\{)").unwrap();
    static ref SPACE_BEFORE_COMMA: Regex = Regex::new(r"(^|[^\\])\s+,").unwrap();
    static ref CLOSER_COMMA: Regex = Regex::new(r"\\(rfloor|rceil|rangle),").unwrap();
    static ref COMMA_COMMAND: Regex = Regex::new(r",\\([^\s])").unwrap();
    static ref ESCAPED_LETTER: Regex = Regex::new(r"(^|[,\s])\\\s*([A-Za-z])\b").unwrap();
    static ref PUNCT_COMMAND: Regex = Regex::new(r"([,;])\\([A-Za-z])\b").unwrap();
    static ref DOUBLE_SIZING: Regex = Regex::new(r"\\\\(left|right)").unwrap();
    static ref DOUBLE_COMMAND: Regex = Regex::new(r"\\\\([A-Za-z])").unwrap();
    static ref THIN_ESCAPED_SPACE: Regex = Regex::new(r"\\,\\\s*([^\s\\])").unwrap();
    static ref MEDIUM_ESCAPED_SPACE: Regex = Regex::new(r"\\;\\\s*([^\s\\])").unwrap();
    static ref THIN_GLUED: Regex = Regex::new(r"\\,([A-Za-z0-9])").unwrap();
    static ref DIFFERENTIAL: Regex = Regex::new(r"\\mathrm\s*d\s*([A-Za-z])").unwrap();
    static ref BINOM_PAIR: Regex = Regex::new(r"\\binom\s+([A-Za-z])([A-Za-z])\b").unwrap();
    static ref PAREN_BEFORE_RIGHT: Regex = Regex::new(r"\)\s*\\right").unwrap();
    static ref BRACKET_BEFORE_RIGHT: Regex = Regex::new(r"\]\s*\\right").unwrap();
    static ref TRIPLE_ESCAPED_BRACE: Regex =
        Regex::new(r"(?:\\\s*)?\}\s*\\right\s*\\\s*\}").unwrap();
    static ref ALIGN_OPEN_GLUED: Regex = Regex::new(r"\\begin\{align\}(\S)").unwrap();
    static ref ALIGN_CLOSE_GLUED: Regex = Regex::new(r"(\S)\\end\{align\}").unwrap();
    static ref ALIGN_BLOCK: Regex =
        Regex::new(r"(?s)\\begin\{align\}.*?\\end\{align\}").unwrap();
    static ref GLUED_ROW_BREAK: Regex = Regex::new(r"\\\\([^\s\\])").unwrap();
}

/// Rejoin whitespace-scattered command letters (`\ t e x t` and friends)
/// and restore the common `\rac`, `\int` and `\infty` corruptions. Every
/// later rule assumes command names are contiguous.
fn collapse_command_gaps(input: &str) -> String {
    let out = COMMAND_GAP.replace_all(input, |caps: &Captures| {
        let letters: String = caps[0]
            .chars()
            .filter(char::is_ascii_alphabetic)
            .collect();
        format!("\\{letters}")
    });
    let out = BARE_RAC.replace_all(&out, r"\frac");
    let out = SPLIT_INT.replace_all(&out, r"\int");
    SPLIT_INFTY.replace_all(&out, r"\infty").into_owned()
}

/// `\angle` and `\triangle` render incorrectly when glued to a letter.
fn respace_angle_triangle(input: &str) -> String {
    GLUED_ANGLE.replace_all(input, r"\${1} ${2}").into_owned()
}

fn replace_degree_glyph(input: &str) -> String {
    input.replace('∘', r"^\circ")
}

/// Restore braced `\frac` arguments; assumes command gaps are collapsed.
fn brace_fraction_args(input: &str) -> String {
    prepass::brace_fraction_args(input)
}

/// Whitespace around `_` and `^` is authoring noise and breaks strict
/// consumers.
fn tighten_scripts(input: &str) -> String {
    let out = SCRIPT_SUB.replace_all(input, "_");
    SCRIPT_SUP.replace_all(&out, "^").into_owned()
}

/// Runs before the generic spacing rules so `\ ,` and `\ ;` are canonical
/// by the time anything else looks at commas.
fn collapse_spacing_commands(input: &str) -> String {
    let out = SPLIT_THIN.replace_all(input, r"\,");
    SPLIT_MEDIUM.replace_all(&out, r"\;").into_owned()
}

/// Reattach `\left`/`\right` to their delimiter character. A closing
/// bracket after `\right` keeps exactly one separating space.
fn attach_sizing_delimiters(input: &str) -> String {
    let out = LEFT_GAP.replace_all(input, r"\left${1}");
    let out = RIGHT_BAR.replace_all(&out, r"\right|");
    let out = RIGHT_DOT.replace_all(&out, r"\right.");
    RIGHT_CLOSER.replace_all(&out, r"\right ${1}").into_owned()
}

/// Collapse the `\}\right}` / `}\right}` escaping artifact to `\right\}`.
fn collapse_escaped_brace_close(input: &str) -> String {
    let out = ESCAPED_BRACE_RIGHT.replace_all(input, r"\right\}");
    BARE_BRACE_RIGHT.replace_all(&out, r"\right\}").into_owned()
}

/// Re-binding repeated inside the span for command names revealed only
/// after the gap collapse (`\fra c{` → `\frac{`, `\mathbb {N}` →
/// `\mathbb{N}`).
fn rebind_braced_arguments(input: &str) -> String {
    let out = SPLIT_COMMAND_TAIL.replace_all(input, r"\${1}${2}${3}");
    prepass::rebind_brace_groups(&out)
}

/// Insert the space that keeps a function or grouping command from gluing
/// to the token after it. This is the rule the content audit exists to
/// watch.
fn space_function_commands(input: &str) -> String {
    space_glued_commands(input, &[&FUNCTION_COMMANDS], &[])
}

/// Drop a bare space before a comma (never an escaped one), keep the
/// conventional space after closing delimiters, and separate a comma from
/// a command that follows it directly.
fn tidy_comma_spacing(input: &str) -> String {
    let out = SPACE_BEFORE_COMMA.replace_all(input, "${1},");
    let out = CLOSER_COMMA.replace_all(&out, r"\${1} ,");
    COMMA_COMMAND.replace_all(&out, r",\ \${1}").into_owned()
}

/// An escaped single letter after start-of-span, comma or whitespace is an
/// erroneously escaped variable name; demote it to the bare letter.
fn demote_escaped_letters(input: &str) -> String {
    ESCAPED_LETTER.replace_all(input, "${1}${2}").into_owned()
}

fn space_relation_operators(input: &str) -> String {
    space_glued_commands(input, &[&RELATION_COMMANDS], &[&PROTECTED_COMMANDS])
}

fn space_set_logic_operators(input: &str) -> String {
    space_glued_commands(input, &[&SET_LOGIC_COMMANDS], &[&PROTECTED_COMMANDS])
}

/// `;\a` keeps its backslash but gains an escaped space, unlike the
/// demotion rule above.
fn separate_punctuated_commands(input: &str) -> String {
    PUNCT_COMMAND.replace_all(input, r"${1}\ ${2}").into_owned()
}

/// `\\left` and `\\x` are artifacts of upstream escaping passes.
fn collapse_duplicate_backslashes(input: &str) -> String {
    let out = DOUBLE_SIZING.replace_all(input, r"\${1}");
    DOUBLE_COMMAND.replace_all(&out, r"\${1}").into_owned()
}

/// `\,\ y` → `\, y` and `\,y` → `\, y`.
fn mend_thin_space_sequences(input: &str) -> String {
    let out = THIN_ESCAPED_SPACE.replace_all(input, r"\, ${1}");
    let out = MEDIUM_ESCAPED_SPACE.replace_all(&out, r"\; ${1}");
    THIN_GLUED.replace_all(&out, r"\, ${1}").into_owned()
}

/// Bind the differential `\mathrm d` to its variable with single spaces.
fn space_differential(input: &str) -> String {
    DIFFERENTIAL.replace_all(input, r"\mathrm d ${1}").into_owned()
}

fn split_binomial_args(input: &str) -> String {
    BINOM_PAIR.replace_all(input, r"\binom ${1} ${2}").into_owned()
}

/// A stray closer directly before `\right` duplicates the delimiter that
/// `\right` already carries.
fn drop_stray_closer_before_right(input: &str) -> String {
    let out = PAREN_BEFORE_RIGHT.replace_all(input, r"\right");
    BRACKET_BEFORE_RIGHT.replace_all(&out, r"\right").into_owned()
}

fn brace_text_arguments(input: &str) -> String {
    prepass::trim_text_braces(&prepass::wrap_bare_text(input))
}

/// Final in-span pass over the triple-escaping artifact, tolerating
/// whitespace and an optional leading backslash.
fn guard_escaped_brace(input: &str) -> String {
    TRIPLE_ESCAPED_BRACE
        .replace_all(input, r"\right\}")
        .into_owned()
}

/// After spans are rejoined: pad `align` delimiters against adjacent text,
/// give row separators inside an `align` block a trailing space, and apply
/// the escaped-brace guard once more across the whole document.
pub(crate) fn finalize_document(text: &str) -> String {
    let out = ALIGN_OPEN_GLUED.replace_all(text, r"\begin{align} ${1}");
    let out = ALIGN_CLOSE_GLUED.replace_all(&out, r"${1} \end{align}");
    let out = ALIGN_BLOCK.replace_all(&out, |caps: &Captures| {
        GLUED_ROW_BREAK
            .replace_all(&caps[0], r"\\ ${1}")
            .into_owned()
    });
    guard_escaped_brace(&out)
}
