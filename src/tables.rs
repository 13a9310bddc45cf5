//! Static command allow-lists and the longest-match spacing scanner.
//!
//! The rewrite rules and the content audit share these tables, so the two
//! always agree about which commands must not be glued to the token that
//! follows them.

use phf::{phf_set, Set};

/// Function-style and grouping commands that take a trailing space when the
/// next token would otherwise merge with them.
pub static FUNCTION_COMMANDS: Set<&'static str> = phf_set! {
    "sin", "cos", "tan", "cot", "sec", "csc",
    "arcsin", "arccos", "arctan",
    "log", "ln", "exp", "lim", "int", "max", "min",
    "arg", "det", "dim", "gcd", "ker", "Pr",
    "cdot", "times", "sqrt", "binom",
    "hat", "bar", "vec",
    "mathcal", "mathbf", "mathrm", "mathbb", "mathfrak", "mathsf", "mathtt",
    "langle", "rangle", "lVert", "rVert",
    "lfloor", "rfloor", "lceil", "rceil",
};

/// Relational operators, membership tests and quantifiers.
pub static RELATION_COMMANDS: Set<&'static str> = phf_set! {
    "le", "ge", "neq", "in", "notin", "subseteq", "supseteq", "forall", "exists",
};

/// Set and logic operators.
pub static SET_LOGIC_COMMANDS: Set<&'static str> = phf_set! {
    "cup", "cap", "setminus", "Rightarrow", "Leftarrow", "Leftrightarrow",
    "mid", "to", "neg",
};

/// Commands that shadow an operator as their prefix. A letter run whose
/// longest known prefix lands here is left untouched, so `\in` never fires
/// inside `\infty` and `\to` never fires inside `\top`.
pub static PROTECTED_COMMANDS: Set<&'static str> = phf_set! {
    "left", "right", "leq", "geq", "int", "inf", "infty", "top",
};

/// Protected prefixes for the audit scanner, which checks every allow-list
/// in a single pass. `int` is a function command there, so it is absent.
pub static AUDIT_PROTECTED: Set<&'static str> = phf_set! {
    "left", "right", "leq", "geq", "inf", "infty", "top",
};

/// Where a backslash letter run splits, if it splits at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Split {
    /// No known command prefixes the run.
    None,
    /// The longest known prefix is a protected command.
    Protected,
    /// A known operator is a proper prefix of the run; a space goes here.
    Inside(usize),
    /// The whole run is a known operator; spacing depends on what follows.
    End,
}

/// Find the longest prefix of `run` present in `ops` or `protected`.
/// Protected entries win ties by never sharing a name with an operator.
pub(crate) fn split_point(
    run: &str,
    ops: &[&Set<&'static str>],
    protected: &[&Set<&'static str>],
) -> Split {
    let mut best: Option<(usize, bool)> = None;
    for len in 1..=run.len() {
        let prefix = &run[..len];
        if protected.iter().any(|set| set.contains(prefix)) {
            best = Some((len, true));
        } else if ops.iter().any(|set| set.contains(prefix)) {
            best = Some((len, false));
        }
    }
    match best {
        None => Split::None,
        Some((_, true)) => Split::Protected,
        Some((len, false)) if len < run.len() => Split::Inside(len),
        Some(_) => Split::End,
    }
}

/// Insert one space after every allow-listed command that is glued to the
/// token following it. A command buried inside a longer letter run is split
/// off; a command that ends its run gets a space only when a digit or
/// another backslash follows directly (a maximal run cannot be followed by
/// a letter).
pub(crate) fn space_glued_commands(
    input: &str,
    ops: &[&Set<&'static str>],
    protected: &[&Set<&'static str>],
) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut rest = input;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..=pos]);
        rest = &rest[pos + 1..];
        let run_len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
        if run_len == 0 {
            continue;
        }
        let run = &rest[..run_len];
        rest = &rest[run_len..];
        match split_point(run, ops, protected) {
            Split::None | Split::Protected => out.push_str(run),
            Split::Inside(at) => {
                out.push_str(&run[..at]);
                out.push(' ');
                out.push_str(&run[at..]);
            }
            Split::End => {
                out.push_str(run);
                let glued = rest
                    .bytes()
                    .next()
                    .map_or(false, |b| b.is_ascii_digit() || b == b'\\');
                if glued {
                    out.push(' ');
                }
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_prefix_wins() {
        assert_eq!(
            split_point("leq", &[&RELATION_COMMANDS], &[&PROTECTED_COMMANDS]),
            Split::Protected
        );
        assert_eq!(
            split_point("inx", &[&RELATION_COMMANDS], &[&PROTECTED_COMMANDS]),
            Split::Inside(2)
        );
        assert_eq!(
            split_point("infty", &[&RELATION_COMMANDS], &[&PROTECTED_COMMANDS]),
            Split::Protected
        );
        assert_eq!(
            split_point("forall", &[&RELATION_COMMANDS], &[&PROTECTED_COMMANDS]),
            Split::End
        );
        assert_eq!(
            split_point("qed", &[&RELATION_COMMANDS], &[&PROTECTED_COMMANDS]),
            Split::None
        );
    }

    #[test]
    fn splits_glued_function_names() {
        assert_eq!(
            space_glued_commands("\\sinx + \\cosx", &[&FUNCTION_COMMANDS], &[]),
            "\\sin x + \\cos x"
        );
    }

    #[test]
    fn spaces_command_chains_and_digits() {
        assert_eq!(
            space_glued_commands("\\sin\\cos x", &[&FUNCTION_COMMANDS], &[]),
            "\\sin \\cos x"
        );
        assert_eq!(
            space_glued_commands("\\sqrt2", &[&FUNCTION_COMMANDS], &[]),
            "\\sqrt 2"
        );
    }

    #[test]
    fn leaves_protected_commands_alone() {
        let protected = [&PROTECTED_COMMANDS];
        assert_eq!(
            space_glued_commands("\\infty", &[&RELATION_COMMANDS], &protected),
            "\\infty"
        );
        assert_eq!(
            space_glued_commands("\\top", &[&SET_LOGIC_COMMANDS], &protected),
            "\\top"
        );
        assert_eq!(
            space_glued_commands("A\\cupB", &[&SET_LOGIC_COMMANDS], &protected),
            "A\\cup B"
        );
    }

    #[test]
    fn already_spaced_output_is_stable() {
        let spaced = space_glued_commands("\\sin\\cos2x", &[&FUNCTION_COMMANDS], &[]);
        assert_eq!(
            space_glued_commands(&spaced, &[&FUNCTION_COMMANDS], &[]),
            spaced
        );
    }
}
