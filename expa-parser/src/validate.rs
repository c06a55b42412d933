//! Cheap pre-parse checks for user input.
//!
//! These heuristics catch the most common typos (unbalanced brackets, doubled or dangling
//! operators, stray characters) before the input reaches the parser, so that interactive
//! front-ends can give immediate feedback. They are deliberately weaker than the grammar:
//! anything they reject would also fail to parse, but not vice versa.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

/// Names that are treated as functions rather than variables.
const FUNCTIONS: &[&str] = &["sin", "cos", "tan", "log", "ln", "exp", "sqrt"];

/// Names that are treated as constants rather than variables.
const CONSTANTS: &[&str] = &["pi", "inf"];

static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z_]+").unwrap());

/// A leading operator other than `-`, e.g. `* x`.
static LEADING_OPERATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[+*/^]").unwrap());

/// Any trailing operator, e.g. `x +`.
static TRAILING_OPERATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-+*/^]\s*$").unwrap());

/// Two adjacent operators where the second cannot be a unary minus, e.g. `x + * y`. A `-` in the
/// second position is always allowed, including after another `-`: the parser reads `x - -2` as
/// subtracting a negation.
static CONSECUTIVE_OPERATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-+*/^]\s*[+*/^]").unwrap());

/// A problem found in the input by [`check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// The input is empty or contains only whitespace.
    Empty,

    /// The input contains characters outside the supported alphabet.
    InvalidChars(Vec<char>),

    /// Brackets are not balanced, e.g. `(x + 1]` or `(x + 1`.
    UnbalancedBrackets,

    /// The input starts with an operator other than `-`.
    LeadingOperator,

    /// The input ends with an operator.
    TrailingOperator,

    /// Two operators appear next to each other where the second cannot be a unary minus.
    ConsecutiveOperators,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Empty => write!(f, "the expression is empty"),
            Problem::InvalidChars(chars) => {
                let chars = chars.iter()
                    .map(|c| format!("`{}`", c))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "the expression contains unsupported characters: {}", chars)
            },
            Problem::UnbalancedBrackets => write!(f, "brackets are not balanced"),
            Problem::LeadingOperator => write!(f, "the expression starts with an operator"),
            Problem::TrailingOperator => write!(f, "the expression ends with an operator"),
            Problem::ConsecutiveOperators => write!(f, "two operators appear next to each other"),
        }
    }
}

/// Runs all heuristic checks over the input, returning every problem found.
///
/// An empty result means the input is plausible, not that it is guaranteed to parse.
pub fn check(expr: &str) -> Vec<Problem> {
    let mut problems = Vec::new();

    if expr.trim().is_empty() {
        problems.push(Problem::Empty);
        return problems;
    }

    let invalid: Vec<char> = {
        let mut seen = BTreeSet::new();
        expr.chars()
            .filter(|c| !is_supported_char(*c) && seen.insert(*c))
            .collect()
    };
    if !invalid.is_empty() {
        problems.push(Problem::InvalidChars(invalid));
    }

    if !brackets_balanced(expr) {
        problems.push(Problem::UnbalancedBrackets);
    }

    if LEADING_OPERATOR.is_match(expr) {
        problems.push(Problem::LeadingOperator);
    }

    if TRAILING_OPERATOR.is_match(expr) {
        problems.push(Problem::TrailingOperator);
    }

    if CONSECUTIVE_OPERATORS.is_match(expr) {
        problems.push(Problem::ConsecutiveOperators);
    }

    problems
}

/// Returns true if the character belongs to the supported input alphabet.
fn is_supported_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ')' | '[' | ']' | '{' | '}' | '=' | '.' | '_' | ',')
}

/// Returns true if every `(`, `[` and `{` in the input is closed by the matching bracket, in the
/// right order.
pub fn brackets_balanced(expr: &str) -> bool {
    let mut stack = Vec::new();

    for c in expr.chars() {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' => if stack.pop() != Some('(') {
                return false;
            },
            ']' => if stack.pop() != Some('[') {
                return false;
            },
            '}' => if stack.pop() != Some('{') {
                return false;
            },
            _ => {},
        }
    }

    stack.is_empty()
}

/// Returns true if the input plausibly denotes mathematics, i.e. if more than 70% of its
/// non-whitespace characters come from the supported alphabet.
pub fn looks_mathematical(expr: &str) -> bool {
    let total = expr.chars().filter(|c| !c.is_whitespace()).count();
    if total == 0 {
        return false;
    }

    let mathematical = expr.chars()
        .filter(|c| !c.is_whitespace() && is_supported_char(*c))
        .count();
    mathematical as f64 / total as f64 > 0.7
}

/// Returns the variable names appearing in the input, in sorted order. Known function names and
/// constants are excluded.
pub fn variables(expr: &str) -> BTreeSet<String> {
    NAME.find_iter(expr)
        .map(|name| name.as_str().to_string())
        .filter(|name| !FUNCTIONS.contains(&name.as_str()) && !CONSTANTS.contains(&name.as_str()))
        .collect()
}

/// A crude size measure for an expression, used to give interactive feedback about how much work
/// an expansion is likely to be.
#[derive(Debug, Clone, PartialEq)]
pub struct Complexity {
    /// The weighted complexity score.
    pub score: f64,

    /// The number of distinct variables.
    pub variables: usize,

    /// The number of operator characters.
    pub operators: usize,

    /// The number of opening brackets.
    pub brackets: usize,

    /// The length of the input in characters.
    pub length: usize,
}

/// Computes the [`Complexity`] of the input.
pub fn complexity(expr: &str) -> Complexity {
    let length = expr.chars().count();
    let variables = variables(expr).len();
    let operators = expr.chars()
        .filter(|c| matches!(c, '+' | '-' | '*' | '/' | '^'))
        .count();
    let brackets = expr.chars()
        .filter(|c| matches!(c, '(' | '[' | '{'))
        .count();

    Complexity {
        score: 0.1 * length as f64
            + 2.0 * variables as f64
            + 1.5 * operators as f64
            + 3.0 * brackets as f64,
        variables,
        operators,
        brackets,
        length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_input_has_no_problems() {
        assert_eq!(check("(x + 1)^2 (x - 2)"), vec![]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(check("   "), vec![Problem::Empty]);
    }

    #[test]
    fn invalid_chars_are_deduplicated() {
        assert_eq!(
            check("x + $1 + $2 + 3!"),
            vec![Problem::InvalidChars(vec!['$', '!'])],
        );
    }

    #[test]
    fn unbalanced_brackets() {
        assert_eq!(check("(x + 1"), vec![Problem::UnbalancedBrackets]);
        assert_eq!(check("(x + 1]"), vec![Problem::UnbalancedBrackets]);
        assert!(check("[x + 1]").is_empty());
    }

    #[test]
    fn leading_minus_is_allowed() {
        assert!(check("-x + 1").is_empty());
        assert_eq!(check("* x"), vec![Problem::LeadingOperator]);
    }

    #[test]
    fn trailing_operator() {
        assert_eq!(check("x +"), vec![Problem::TrailingOperator]);
    }

    #[test]
    fn unary_minus_after_operator_is_allowed() {
        assert!(check("x * -2").is_empty());
        // the parser accepts a double minus, so the checks must too
        assert!(check("x - - 2").is_empty());
        assert_eq!(check("x + * 2"), vec![Problem::ConsecutiveOperators]);
    }

    #[test]
    fn mathematical_ratio() {
        assert!(looks_mathematical("(x + 1)^2"));
        assert!(!looks_mathematical("what?! no: ~$%"));
        assert!(!looks_mathematical(""));
    }

    #[test]
    fn variables_exclude_functions_and_constants() {
        let vars = variables("sqrt(x) + pi y + sin(z)");
        assert_eq!(vars.into_iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    }

    #[test]
    fn complexity_counts() {
        let c = complexity("(x + 1)^2");
        assert_eq!(c.variables, 1);
        assert_eq!(c.operators, 2);
        assert_eq!(c.brackets, 1);
        assert_eq!(c.length, 9);
        assert!((c.score - (0.9 + 2.0 + 3.0 + 3.0)).abs() < 1e-9);
    }
}
