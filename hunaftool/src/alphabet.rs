//! Bijection between observed characters and a dense byte index space.
//!
//! Keeping the working alphabet below 256 symbols lets the rule tries use
//! fixed-width children arrays with constant-time transitions. Writing
//! systems with more than 256 distinct code points are rejected.

use hashbrown::HashMap;

use crate::types::{EncodedWord, Symbol, MAX_ALPHABET_LEN};

/// Errors from encoding against the working alphabet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    /// A character was looked up that the alphabet never observed.
    #[error("unknown character {0:?}")]
    UnknownCharacter(char),

    /// The input uses more than [`MAX_ALPHABET_LEN`] distinct characters.
    #[error("alphabet exceeds {MAX_ALPHABET_LEN} distinct characters")]
    TooManyCharacters,
}

/// Ordered set of observed characters with a reverse index.
///
/// The alphabet is populated while an affix file loads and finalized
/// before the first strict lookup; [`Alphabet::finalized_size`] latches
/// it. Once latched, unknown characters are an error rather than a new
/// registration.
#[derive(Debug, Clone, Default)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, Symbol>,
    finalized: bool,
}

impl Alphabet {
    /// Creates an empty, unfinalized alphabet.
    pub fn new() -> Alphabet {
        Alphabet::default()
    }

    /// Registers every character of `text`.
    ///
    /// Characters already known are ignored. After finalization only
    /// known characters are accepted.
    pub fn observe(&mut self, text: &str) -> Result<(), AlphabetError> {
        for ch in text.chars() {
            if self.index.contains_key(&ch) {
                continue;
            }
            if self.finalized {
                return Err(AlphabetError::UnknownCharacter(ch));
            }
            if self.symbols.len() >= MAX_ALPHABET_LEN {
                return Err(AlphabetError::TooManyCharacters);
            }
            self.index.insert(ch, self.symbols.len() as Symbol);
            self.symbols.push(ch);
        }
        Ok(())
    }

    /// Encodes `word` strictly; unknown characters fail.
    pub fn encode(&self, word: &str) -> Result<EncodedWord, AlphabetError> {
        word.chars()
            .map(|ch| {
                self.index
                    .get(&ch)
                    .copied()
                    .ok_or(AlphabetError::UnknownCharacter(ch))
            })
            .collect()
    }

    /// Decodes an encoded word back to a string. Total for any sequence
    /// produced by [`Alphabet::encode`].
    pub fn decode(&self, word: &[Symbol]) -> String {
        word.iter().map(|&s| self.symbols[s as usize]).collect()
    }

    /// Returns the current cardinality and latches the alphabet.
    pub fn finalized_size(&mut self) -> usize {
        self.finalized = true;
        self.symbols.len()
    }

    /// Number of distinct characters observed so far.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no character has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
