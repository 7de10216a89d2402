//! Expansion of dictionary entries into surface words.
//!
//! A dictionary entry yields: the bare stem (unless virtual), prefix-only
//! and suffix-only applications, prefix∘suffix cross products, two-level
//! suffix chains, and prefixes over two-level results. Hunspell applies
//! the suffix first and then tries prefixes on the rewritten form, so
//! prefix conditions are matched against the suffixed word, not the stem.

use hashbrown::HashSet;
use smol_str::SmolStr;

use crate::aff::AffData;
use crate::alphabet::AlphabetError;
use crate::flags::FlagSet;
use crate::types::{EncodedWord, Symbol};

/// Expansion engine over a loaded affix handle.
pub struct Expander<'a> {
    aff: &'a AffData,
}

impl<'a> Expander<'a> {
    /// Creates an expander borrowing `aff`.
    pub fn new(aff: &'a AffData) -> Expander<'a> {
        Expander { aff }
    }

    /// Expands one dictionary line (`stem[/flags]`, morphology tokens
    /// discarded) into surface words, duplicate-free, in deterministic
    /// order.
    pub fn expand_line(&self, line: &str) -> Result<Vec<SmolStr>, AlphabetError> {
        let entry = line.split_whitespace().next().unwrap_or("");
        let (stem, flag_field) = entry.split_once('/').unwrap_or((entry, ""));
        let flags = self.aff.flags.parse_lenient(flag_field);
        self.expand_entry(stem, &flags)
    }

    /// Expands a stem under an already-parsed flag set.
    pub fn expand_entry(
        &self,
        stem: &str,
        flags: &FlagSet,
    ) -> Result<Vec<SmolStr>, AlphabetError> {
        let encoded = self.aff.alphabet.encode(stem)?;
        let mut seen = HashSet::new();
        let mut words = Vec::new();

        if !self.aff.is_virtual(flags) {
            seen.insert(encoded.clone());
            words.push(encoded.clone());
        }
        self.affixed_forms_into(&encoded, flags, &mut seen, &mut words);

        Ok(words
            .iter()
            .map(|w| SmolStr::new(self.aff.alphabet.decode(w)))
            .collect())
    }

    /// All affixed forms of an encoded stem (the stem itself excluded),
    /// duplicate-free. Shared with the compression engine, whose
    /// coverage must count exactly what expansion will later emit.
    pub(crate) fn affixed_forms(&self, stem: &[Symbol], flags: &FlagSet) -> Vec<EncodedWord> {
        let mut seen = HashSet::new();
        let mut words = Vec::new();
        self.affixed_forms_into(stem, flags, &mut seen, &mut words);
        words
    }

    fn affixed_forms_into(
        &self,
        stem: &[Symbol],
        flags: &FlagSet,
        seen: &mut HashSet<EncodedWord>,
        out: &mut Vec<EncodedWord>,
    ) {
        let aff = self.aff;
        let fullstrip = aff.fullstrip;

        for p in aff.prefixes_matching(stem) {
            if !flags.contains(p.flag) {
                continue;
            }
            if let Some(word) = p.apply(stem, fullstrip) {
                push_unique(seen, out, word);
            }
        }

        for s in aff.suffixes_matching(stem) {
            if !flags.contains(s.flag) {
                continue;
            }
            let Some(w1) = s.apply(stem, fullstrip) else {
                continue;
            };

            if !aff.is_virtual(&s.flag2) {
                push_unique(seen, out, w1.clone());
            }

            if s.cross {
                for p in aff.prefixes_matching(&w1) {
                    if p.cross && flags.contains(p.flag) {
                        if let Some(word) = p.apply(&w1, fullstrip) {
                            push_unique(seen, out, word);
                        }
                    }
                }
            }

            for s2 in aff.suffixes_matching(&w1) {
                if !s.flag2.contains(s2.flag) {
                    continue;
                }
                let Some(w2) = s2.apply(&w1, fullstrip) else {
                    continue;
                };
                push_unique(seen, out, w2.clone());

                if s.cross && s2.cross {
                    for p in aff.prefixes_matching(&w2) {
                        if p.cross
                            && (flags.contains(p.flag) || s.flag2.contains(p.flag))
                        {
                            if let Some(word) = p.apply(&w2, fullstrip) {
                                push_unique(seen, out, word);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn push_unique(seen: &mut HashSet<EncodedWord>, out: &mut Vec<EncodedWord>, word: EncodedWord) {
    if seen.insert(word.clone()) {
        out.push(word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(aff: &str, line: &str) -> Vec<SmolStr> {
        let data = AffData::parse(aff, line).unwrap();
        Expander::new(&data).expand_line(line).unwrap()
    }

    #[test]
    fn bare_stem_without_rules() {
        assert_eq!(expand("TRY abc\n", "cab"), ["cab"]);
    }

    #[test]
    fn suffix_only() {
        let aff = "SFX B Y 1\nSFX B 0 ed .\n";
        assert_eq!(expand(aff, "walk/B"), ["walk", "walked"]);
    }

    #[test]
    fn prefix_condition_checked_on_suffixed_form() {
        // The prefix never matches the stem; it matches only after the
        // suffix rewrite.
        let aff = "\
PFX A Y 1
PFX A aaj bju aaj
SFX B Y 1
SFX B aaa jav aaa
";
        assert_eq!(expand(aff, "aaaaa/AB"), ["aaaaa", "aajav", "bjuav"]);
    }

    #[test]
    fn unknown_stem_character_is_typed() {
        let aff = "SFX B Y 1\nSFX B 0 ed .\n";
        let data = AffData::parse(aff, "").unwrap();
        let err = Expander::new(&data).expand_line("walk/B").unwrap_err();
        assert_eq!(err, AlphabetError::UnknownCharacter('w'));
    }

    #[test]
    fn no_duplicates_from_overlapping_rules() {
        let aff = "\
SFX A Y 2
SFX A 0 s .
SFX A 0 s s
SFX B Y 1
SFX B 0 s .
";
        assert_eq!(expand(aff, "bus/AB"), ["bus", "buss"]);
    }
}
