//! Loaded affix file handle.
//!
//! [`AffData`] is immutable after [`AffData::parse`] returns and is safe
//! to reuse across any number of expansion or compression calls.

pub mod error;
mod parser;

pub use self::error::AffError;

use crate::alphabet::Alphabet;
use crate::flags::{FlagRegistry, FlagSet};
use crate::ruleset::{AffixMatch, RuleTrie};
use crate::types::{FlagPos, Symbol};

/// Everything the engine needs from a parsed `.aff` file.
pub struct AffData {
    /// The working alphabet, finalized.
    pub alphabet: Alphabet,
    /// Flag name table and encoding.
    pub flags: FlagRegistry,
    /// Whether rules may strip an entire word (`FULLSTRIP`).
    pub fullstrip: bool,
    /// The virtual-stem flag (`NEEDAFFIX`), if declared.
    pub need_affix: Option<FlagPos>,
    pub(crate) prefixes: Vec<AffixMatch>,
    pub(crate) suffixes: Vec<AffixMatch>,
    pub(crate) pfx_from_stem: RuleTrie,
    pub(crate) pfx_to_stem: RuleTrie,
    pub(crate) sfx_from_stem: RuleTrie,
    pub(crate) sfx_to_stem: RuleTrie,
}

impl AffData {
    /// Parses an affix file.
    ///
    /// `seed` is extra text whose characters are added to the alphabet
    /// before finalization; the convert driver passes the input file here
    /// when retrying after an unknown-character failure.
    pub fn parse(text: &str, seed: &str) -> Result<AffData, AffError> {
        parser::parse_aff(text, seed)
    }

    /// Prefix rules applicable to `word`, walked from the front.
    pub fn prefixes_matching<'a>(
        &'a self,
        word: &'a [Symbol],
    ) -> impl Iterator<Item = &'a AffixMatch> + 'a {
        self.pfx_from_stem
            .matched_rules(word.iter().copied())
            .map(move |i| &self.prefixes[i as usize])
    }

    /// Suffix rules applicable to `word`, walked from the end.
    pub fn suffixes_matching<'a>(
        &'a self,
        word: &'a [Symbol],
    ) -> impl Iterator<Item = &'a AffixMatch> + 'a {
        self.sfx_from_stem
            .matched_rules(word.iter().rev().copied())
            .map(move |i| &self.suffixes[i as usize])
    }

    /// Suffix rules whose append side ends `word` — the rules that could
    /// have produced `word` from some stem.
    pub fn suffix_attributions<'a>(
        &'a self,
        word: &'a [Symbol],
    ) -> impl Iterator<Item = &'a AffixMatch> + 'a {
        self.sfx_to_stem
            .matched_rules(word.iter().rev().copied())
            .map(move |i| &self.suffixes[i as usize])
    }

    /// Whether a flag set marks a virtual stem.
    pub fn is_virtual(&self, flags: &FlagSet) -> bool {
        self.need_affix.is_some_and(|pos| flags.contains(pos))
    }
}
