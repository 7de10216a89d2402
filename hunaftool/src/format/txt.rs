//! Plain word lists: one word per line, `#` lines are comments.

use smol_str::SmolStr;

/// Reads a word list, skipping blanks and comment lines.
pub fn parse(text: &str) -> Vec<SmolStr> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(SmolStr::new)
        .collect()
}

/// Renders one word per line.
pub fn write(words: &[SmolStr]) -> String {
    let mut out = String::new();
    for word in words {
        out.push_str(word);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blanks_are_skipped() {
        let words = parse("# header\nfoo\n\n  bar \n#trailer\n");
        assert_eq!(words, vec!["foo", "bar"]);
    }

    #[test]
    fn write_is_line_per_word() {
        let words = parse("a\nb\n");
        assert_eq!(write(&words), "a\nb\n");
    }
}
