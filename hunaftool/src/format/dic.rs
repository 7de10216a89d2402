//! Hunspell `.dic` reading and writing.
//!
//! The first line carries the entry count; Hunspell treats a wrong or
//! missing count as a hint, not an error, and so does this reader.

use log::warn;

use crate::aff::AffData;
use crate::compress::DicEntry;

/// Extracts the entry lines of a `.dic` file.
///
/// Count problems and empty lines warn and are tolerated.
pub fn parse(text: &str) -> Vec<&str> {
    let mut lines = text.lines();
    let mut entries: Vec<&str> = Vec::new();

    let declared = match lines.next() {
        Some(first) => match first.trim().parse::<usize>() {
            Ok(count) => Some(count),
            Err(_) => {
                warn!("dictionary has no count line");
                if !first.trim().is_empty() {
                    entries.push(first);
                }
                None
            }
        },
        None => {
            warn!("dictionary is empty");
            None
        }
    };

    for line in lines {
        if line.trim().is_empty() {
            warn!("empty dictionary line");
            continue;
        }
        entries.push(line);
    }

    if let Some(count) = declared {
        if count != entries.len() {
            warn!(
                "dictionary declares {} entries but has {}",
                count,
                entries.len()
            );
        }
    }

    entries
}

/// Renders entries as a `.dic` file: count line, then sorted
/// `stem[/flags]` lines.
pub fn write(aff: &AffData, entries: &[DicEntry]) -> String {
    let mut lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            if entry.flags.is_empty() {
                entry.stem.to_string()
            } else {
                format!("{}/{}", entry.stem, aff.flags.format(&entry.flags))
            }
        })
        .collect();
    lines.sort_unstable();

    let mut out = String::new();
    out.push_str(&lines.len().to_string());
    out.push('\n');
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
