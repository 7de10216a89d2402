//! Line-oriented external formats: DIC, TXT and CSV.

pub mod csv;
pub mod dic;
pub mod txt;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The three external file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Hunspell dictionary: count line, then `stem[/flags]` entries.
    Dic,
    /// One word per line.
    Txt,
    /// Words separated by `,` or `|`.
    Csv,
}

impl Format {
    /// Infers a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(value: &str) -> Result<Format, String> {
        match value {
            "dic" => Ok(Format::Dic),
            "txt" => Ok(Format::Txt),
            "csv" => Ok(Format::Csv),
            _ => Err(format!("unknown format {:?} (expected dic, txt or csv)", value)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Dic => "dic",
            Format::Txt => "txt",
            Format::Csv => "csv",
        })
    }
}
