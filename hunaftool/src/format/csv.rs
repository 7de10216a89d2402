//! Comma-separated word lists.
//!
//! A line holds any number of words split on `,` or `|`; on output each
//! dictionary entry's expansion becomes one line, which keeps related
//! forms visually grouped.

use itertools::Itertools;
use smol_str::SmolStr;

/// Reads every word of a CSV file, in line order.
pub fn parse(text: &str) -> Vec<SmolStr> {
    text.lines()
        .flat_map(|line| line.split([',', '|']))
        .map(str::trim)
        .filter(|token| !token.is_empty() && !token.starts_with('#'))
        .map(SmolStr::new)
        .collect()
}

/// Renders one comma-joined row per line.
pub fn write(rows: &[Vec<SmolStr>]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.iter().join(","));
        out.push('\n');
    }
    out
}
