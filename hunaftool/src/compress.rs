//! Compression of a word list into a minimal dictionary.
//!
//! Greedy set-cover: every word is attributed to candidate stems through
//! the reverse suffix trie, candidate flags that would generate words
//! outside the list are pruned, each surviving stem's coverage is
//! measured with the same product enumeration the expansion engine uses,
//! and stems are emitted in descending-coverage order until every word
//! is accounted for. Words nothing covers fall through as flag-less
//! entries.

use hashbrown::HashMap;
use smol_str::SmolStr;

use crate::aff::AffData;
use crate::alphabet::AlphabetError;
use crate::expand::Expander;
use crate::flags::FlagSet;
use crate::types::EncodedWord;

/// One output dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DicEntry {
    /// The stem text.
    pub stem: SmolStr,
    /// Flags to print after the stem (virtual-stem flag included for
    /// virtual stems).
    pub flags: FlagSet,
}

struct Candidate {
    enc: EncodedWord,
    /// Index into the real word list, `None` for virtual stems.
    real: Option<u32>,
    flags: FlagSet,
    covers: Vec<u32>,
}

/// Compression engine over a loaded affix handle.
pub struct Compressor<'a> {
    aff: &'a AffData,
}

impl<'a> Compressor<'a> {
    /// Creates a compressor borrowing `aff`.
    pub fn new(aff: &'a AffData) -> Compressor<'a> {
        Compressor { aff }
    }

    /// Chooses stem+flag entries whose expansion reproduces `words`
    /// exactly. Input order does not matter; duplicates are ignored.
    pub fn compress(&self, words: &[SmolStr]) -> Result<Vec<DicEntry>, AlphabetError> {
        let aff = self.aff;
        let expander = Expander::new(aff);

        let mut list: Vec<&SmolStr> = words.iter().collect();
        list.sort_unstable();
        list.dedup();

        let mut encoded = Vec::with_capacity(list.len());
        let mut index: HashMap<EncodedWord, u32> = HashMap::with_capacity(list.len());
        for (i, word) in list.iter().enumerate() {
            let enc = aff.alphabet.encode(word)?;
            index.insert(enc.clone(), i as u32);
            encoded.push(enc);
        }

        // Attribution: walk the reverse suffix trie from every word to
        // the stems that could have produced it.
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut by_stem: HashMap<EncodedWord, usize> = HashMap::new();
        for word in &encoded {
            for rule in aff.suffix_attributions(word) {
                let Some(stem) = rule.stem_of(word, aff.fullstrip) else {
                    continue;
                };
                let real = index.get(&stem).copied();
                if real.is_none() && aff.need_affix.is_none() {
                    continue;
                }
                let slot = *by_stem.entry(stem.clone()).or_insert_with(|| {
                    candidates.push(Candidate {
                        enc: stem,
                        real,
                        flags: aff.flags.empty_set(),
                        covers: Vec::new(),
                    });
                    candidates.len() - 1
                });
                candidates[slot].flags.insert(rule.flag);
            }
        }

        // Prune flags that generate anything outside the list, then
        // measure coverage with the surviving set. Cross-product
        // interplay between flags can still over-generate after per-flag
        // pruning; dropping the highest remaining bit converges.
        for cand in &mut candidates {
            for pos in cand.flags.positions() {
                let single = aff.flags.singleton(pos);
                let products = expander.affixed_forms(&cand.enc, &single);
                if products.iter().any(|p| !index.contains_key(p)) {
                    cand.flags.remove(pos);
                }
            }

            let products = loop {
                let products = expander.affixed_forms(&cand.enc, &cand.flags);
                if products.iter().all(|p| index.contains_key(p)) {
                    break products;
                }
                let highest = *cand.flags.positions().last().expect("non-empty over-generating set");
                cand.flags.remove(highest);
            };

            if let Some(own) = cand.real {
                cand.covers.push(own);
            }
            for product in &products {
                let i = index[product];
                if !cand.covers.contains(&i) {
                    cand.covers.push(i);
                }
            }
        }

        // Greedy selection: coverage desc, stem length asc, stem bytes
        // asc — a total order, so the output is deterministic.
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&candidates[a], &candidates[b]);
            b.covers
                .len()
                .cmp(&a.covers.len())
                .then(a.enc.len().cmp(&b.enc.len()))
                .then(a.enc.cmp(&b.enc))
        });

        let mut todo = vec![true; list.len()];
        let mut entries = Vec::new();
        for i in order {
            let cand = &candidates[i];
            let effective = cand.covers.iter().filter(|&&w| todo[w as usize]).count();
            // A virtual stem covering a single word is strictly worse
            // than emitting that word directly.
            let minimum = if cand.real.is_some() { 1 } else { 2 };
            if effective < minimum {
                continue;
            }
            for &w in &cand.covers {
                todo[w as usize] = false;
            }
            let mut flags = cand.flags.clone();
            if cand.real.is_none() {
                flags.insert(self.aff.need_affix.expect("virtual candidates need NEEDAFFIX"));
            }
            entries.push(DicEntry {
                stem: SmolStr::new(aff.alphabet.decode(&cand.enc)),
                flags,
            });
        }

        for (i, left) in todo.iter().enumerate() {
            if *left {
                entries.push(DicEntry {
                    stem: (*list[i]).clone(),
                    flags: aff.flags.empty_set(),
                });
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::Expander;

    fn compress(aff: &AffData, words: &[&str]) -> Vec<(String, String)> {
        let words: Vec<SmolStr> = words.iter().map(|w| SmolStr::new(w)).collect();
        let mut entries: Vec<(String, String)> = Compressor::new(aff)
            .compress(&words)
            .unwrap()
            .into_iter()
            .map(|e| (e.stem.to_string(), aff.flags.format(&e.flags)))
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn single_stem_covers_its_forms() {
        let aff = AffData::parse("SFX A Y 2\nSFX A 0 ed .\nSFX A 0 s .\n", "walk").unwrap();
        assert_eq!(
            compress(&aff, &["walk", "walked", "walks"]),
            vec![("walk".to_string(), "A".to_string())]
        );
    }

    #[test]
    fn flag_generating_nonwords_is_pruned() {
        // Flag A would also generate "walks", which is not in the list,
        // so "walk" cannot carry it; "walked" falls through flag-less.
        let aff = AffData::parse("SFX A Y 2\nSFX A 0 ed .\nSFX A 0 s .\n", "walk").unwrap();
        assert_eq!(
            compress(&aff, &["walk", "walked"]),
            vec![
                ("walk".to_string(), String::new()),
                ("walked".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn uncovered_words_fall_through() {
        let aff = AffData::parse("SFX A Y 1\nSFX A 0 s .\nTRY xyz\n", "").unwrap();
        assert_eq!(
            compress(&aff, &["xy", "xys", "z"]),
            vec![
                ("xy".to_string(), "A".to_string()),
                ("z".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn virtual_stem_requires_two_covered_words() {
        let aff_text = "\
SFX A Y 2
SFX A 0 ed .
SFX A 0 s .
NEEDAFFIX z
";
        let aff = AffData::parse(aff_text, "talk").unwrap();
        // "talked" and "talks" share the unlisted stem "talk": worth a
        // virtual entry.
        assert_eq!(
            compress(&aff, &["talked", "talks"]),
            vec![("talk".to_string(), "Az".to_string())]
        );
        // A single affixed form is cheaper as a plain entry.
        assert_eq!(
            compress(&aff, &["talked"]),
            vec![("talked".to_string(), String::new())]
        );
    }

    #[test]
    fn roundtrip_reproduces_the_list() {
        let aff_text = "\
NEEDAFFIX z
SFX A Y 2
SFX A 0 ed .
SFX A 0 ing .
SFX B Y 1
SFX B y ies y
";
        let seed = "walk talk carry carries jumped jumping";
        let aff = AffData::parse(aff_text, seed).unwrap();
        let words: Vec<SmolStr> = [
            "walk", "walked", "walking", "talk", "talked", "talking", "carry", "carries",
            "jumped", "jumping",
        ]
        .iter()
        .map(|w| SmolStr::new(w))
        .collect();

        let entries = Compressor::new(&aff).compress(&words).unwrap();
        let expander = Expander::new(&aff);
        let mut expanded: Vec<SmolStr> = entries
            .iter()
            .flat_map(|e| expander.expand_entry(&e.stem, &e.flags).unwrap())
            .collect();
        expanded.sort();
        expanded.dedup();

        let mut expected: Vec<SmolStr> = words.clone();
        expected.sort();
        assert_eq!(expanded, expected);
        // "jump" is not a listed word: it must have been emitted as a
        // virtual stem covering both of its forms.
        assert!(entries
            .iter()
            .any(|e| e.stem == "jump" && aff.flags.format(&e.flags).contains('z')));
    }
}
