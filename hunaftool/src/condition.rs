//! Compiler for the trailing condition field of an affix rule.
//!
//! Conditions are a restricted regex dialect: `.`, `[abc]`, `[^abc]` and
//! plain characters, one class per word position. Classes are materialized
//! as explicit symbol sets over the finalized alphabet so the rule tries
//! can fan a rule out along every path its condition matches.

use crate::alphabet::{Alphabet, AlphabetError};
use crate::types::Symbol;

/// Errors from compiling a condition field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// A `[` class was never closed.
    #[error("unbalanced bracket in condition {0:?}")]
    UnbalancedBracket(String),

    /// A condition character was never observed by the alphabet.
    #[error("condition character")]
    Alphabet(#[source] AlphabetError),
}

/// The set of symbols admitted at one word position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass(
    /// Admitted symbols, sorted ascending.
    pub Vec<Symbol>,
);

impl CharClass {
    /// A class admitting exactly one symbol.
    pub fn singleton(symbol: Symbol) -> CharClass {
        CharClass(vec![symbol])
    }

    /// Whether `symbol` is admitted.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.binary_search(&symbol).is_ok()
    }
}

fn full_class(alphabet: &Alphabet) -> CharClass {
    CharClass((0..alphabet.len() as u16).map(|s| s as Symbol).collect())
}

fn complement(members: &[Symbol], alphabet: &Alphabet) -> CharClass {
    CharClass(
        (0..alphabet.len() as u16)
            .map(|s| s as Symbol)
            .filter(|s| !members.contains(s))
            .collect(),
    )
}

/// Compiles a condition field into per-position character classes.
///
/// `.` admits the whole alphabet; `[^…]` is materialized as the
/// complement over the finalized alphabet; a stray `]` is taken
/// literally, matching Hunspell.
pub fn parse(cond: &str, alphabet: &Alphabet) -> Result<Vec<CharClass>, ConditionError> {
    let mut classes = Vec::new();
    let mut chars = cond.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => classes.push(full_class(alphabet)),
            '[' => {
                let negated = chars.peek() == Some(&'^');
                if negated {
                    chars.next();
                }
                let mut members = Vec::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(member) => members.push(encode(member, alphabet)?),
                        None => {
                            return Err(ConditionError::UnbalancedBracket(cond.to_string()))
                        }
                    }
                }
                members.sort_unstable();
                members.dedup();
                if negated {
                    classes.push(complement(&members, alphabet));
                } else {
                    classes.push(CharClass(members));
                }
            }
            _ => classes.push(CharClass::singleton(encode(ch, alphabet)?)),
        }
    }

    Ok(classes)
}

fn encode(ch: char, alphabet: &Alphabet) -> Result<Symbol, ConditionError> {
    alphabet
        .encode(&ch.to_string())
        .map(|enc| enc[0])
        .map_err(ConditionError::Alphabet)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet(chars: &str) -> Alphabet {
        let mut a = Alphabet::new();
        a.observe(chars).unwrap();
        a.finalized_size();
        a
    }

    #[test]
    fn singleton_positions() {
        let a = alphabet("abc");
        let classes = parse("ab", &a).unwrap();
        assert_eq!(classes, vec![CharClass(vec![0]), CharClass(vec![1])]);
    }

    #[test]
    fn wildcard_is_full_alphabet() {
        let a = alphabet("abc");
        let classes = parse(".", &a).unwrap();
        assert_eq!(classes, vec![CharClass(vec![0, 1, 2])]);
    }

    #[test]
    fn positive_and_negated_classes() {
        let a = alphabet("abcd");
        let classes = parse("[ba][^cd]", &a).unwrap();
        assert_eq!(
            classes,
            vec![CharClass(vec![0, 1]), CharClass(vec![0, 1])]
        );
    }

    #[test]
    fn unbalanced_bracket_fails() {
        let a = alphabet("ab");
        assert!(matches!(
            parse("[ab", &a),
            Err(ConditionError::UnbalancedBracket(_))
        ));
    }

    #[test]
    fn stray_close_bracket_is_literal() {
        let mut a = Alphabet::new();
        a.observe("a]").unwrap();
        a.finalized_size();
        let classes = parse("]a", &a).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0], CharClass::singleton(a.encode("]").unwrap()[0]));
    }
}
