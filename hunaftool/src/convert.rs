//! High-level conversion driver.
//!
//! Dispatches between the external formats and owns the one retry the
//! engine is allowed: when an input word uses a character the affix file
//! never mentioned, the affix data is re-parsed with the alphabet seeded
//! from the input text and the conversion runs again. A second failure
//! propagates.

use crate::aff::{AffData, AffError};
use crate::alphabet::AlphabetError;
use crate::compress::Compressor;
use crate::expand::Expander;
use crate::format::{csv, dic, txt, Format};

/// Fatal conversion failures; the binary's exit-1 surface.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The affix file could not be loaded.
    #[error("affix file")]
    Aff(#[from] AffError),

    /// Input used a character unknown to the alphabet even after the
    /// retry.
    #[error("input")]
    Alphabet(#[from] AlphabetError),

    /// No conversion path exists between the two formats.
    #[error("no conversion from {from} to {to}")]
    Unsupported {
        /// Input format.
        from: Format,
        /// Output format.
        to: Format,
    },
}

/// Converts `input` under the given affix file, returning the output
/// file text.
pub fn convert_str(
    aff_text: &str,
    input: &str,
    from: Format,
    to: Format,
) -> Result<String, ConvertError> {
    match run(aff_text, input, from, to, "") {
        Err(ConvertError::Alphabet(_)) => run(aff_text, input, from, to, input),
        done => done,
    }
}

fn run(
    aff_text: &str,
    input: &str,
    from: Format,
    to: Format,
    seed: &str,
) -> Result<String, ConvertError> {
    let aff = AffData::parse(aff_text, seed)?;

    match (from, to) {
        (Format::Dic, Format::Txt) => {
            let expander = Expander::new(&aff);
            let mut words = Vec::new();
            for line in dic::parse(input) {
                words.extend(expander.expand_line(line)?);
            }
            words.sort_unstable();
            words.dedup();
            Ok(txt::write(&words))
        }
        (Format::Dic, Format::Csv) => {
            let expander = Expander::new(&aff);
            let mut rows = Vec::new();
            for line in dic::parse(input) {
                rows.push(expander.expand_line(line)?);
            }
            Ok(csv::write(&rows))
        }
        (Format::Txt, Format::Dic) | (Format::Csv, Format::Dic) => {
            let words = match from {
                Format::Txt => txt::parse(input),
                _ => csv::parse(input),
            };
            let entries = Compressor::new(&aff).compress(&words)?;
            Ok(dic::write(&aff, &entries))
        }
        _ => Err(ConvertError::Unsupported { from, to }),
    }
}
