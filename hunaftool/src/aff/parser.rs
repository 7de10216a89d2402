//! Two-pass affix file loader.
//!
//! The `FLAG` directive is data that changes how every other flag field
//! parses, and Hunspell tolerates it appearing after rule blocks. The
//! first pass therefore only fixes the flag mode, registers flags in
//! order of first appearance and seeds the alphabet; the second pass
//! compiles rules into the four tries.

use log::warn;
use smol_str::SmolStr;

use crate::alphabet::Alphabet;
use crate::condition::{self, CharClass};
use crate::flags::{FlagMode, FlagRegistry};
use crate::ruleset::{AffixKind, AffixMatch, RuleTrie};
use crate::types::{FlagPos, Symbol};

use super::{AffData, AffError};

/// One classified affix file line.
struct Line<'a> {
    no: usize,
    kind: LineKind<'a>,
}

enum LineKind<'a> {
    /// A top-level directive: name plus remaining tokens.
    Directive { name: &'a str, args: Vec<&'a str> },
    /// `[SP]FX <flag> <Y|N> <count>`.
    Header { flag: &'a str },
    /// `[SP]FX <flag> <strip> <append> [cond]` inside an open block.
    Data {
        affix: AffixKind,
        flag: &'a str,
        cross: bool,
        strip: &'a str,
        append: &'a str,
        cond: &'a str,
        raw: &'a str,
    },
    /// An indented top-level line; inactive.
    Indented,
    /// Structurally broken; skipped with a diagnostic.
    Malformed(&'static str),
}

/// Classifies lines, tracking rule blocks so that header lines and
/// condition-less data lines (both four tokens) can be told apart.
fn classify(text: &str) -> Vec<Line<'_>> {
    struct Block {
        affix: AffixKind,
        flag: String,
        cross: bool,
        remaining: usize,
    }

    let mut lines = Vec::new();
    let mut block: Option<Block> = None;

    for (idx, raw) in text.lines().enumerate() {
        let no = idx + 1;
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.len() != raw.len() {
            lines.push(Line {
                no,
                kind: LineKind::Indented,
            });
            continue;
        }

        let mut tokens: Vec<&str> = raw.split_whitespace().collect();
        if let Some(comment) = tokens.iter().position(|t| t.starts_with('#')) {
            tokens.truncate(comment);
        }

        let affix = match tokens[0] {
            "PFX" => Some(AffixKind::Prefix),
            "SFX" => Some(AffixKind::Suffix),
            _ => None,
        };

        let Some(affix) = affix else {
            lines.push(Line {
                no,
                kind: LineKind::Directive {
                    name: tokens[0],
                    args: tokens[1..].to_vec(),
                },
            });
            continue;
        };

        if tokens.len() < 4 {
            lines.push(Line {
                no,
                kind: LineKind::Malformed("truncated affix line"),
            });
            continue;
        }

        let in_block = block
            .as_ref()
            .is_some_and(|b| b.affix == affix && b.remaining > 0);
        let is_data = tokens.len() >= 5 || (in_block && block.as_ref().unwrap().flag == tokens[1]);

        if is_data {
            let matches_block = block
                .as_ref()
                .is_some_and(|b| b.affix == affix && b.flag == tokens[1]);
            let cross = block.as_ref().map(|b| b.cross).unwrap_or(false);
            if let Some(b) = block.as_mut() {
                if b.remaining > 0 {
                    b.remaining -= 1;
                } else {
                    warn!("line {}: more affix lines than the block declared", no);
                }
            }
            if !matches_block {
                warn!("line {}: affix line flag differs from its block header", no);
                lines.push(Line {
                    no,
                    kind: LineKind::Malformed("flag mismatch"),
                });
                continue;
            }
            lines.push(Line {
                no,
                kind: LineKind::Data {
                    affix,
                    flag: tokens[1],
                    cross,
                    strip: tokens[2],
                    append: tokens[3],
                    cond: tokens.get(4).copied().unwrap_or("."),
                    raw,
                },
            });
        } else {
            if let Some(b) = &block {
                if b.remaining > 0 {
                    warn!("affix block for flag {:?} ended short", b.flag);
                }
            }
            let cross = match tokens[2] {
                "Y" => true,
                "N" => false,
                other => {
                    warn!("line {}: unrecognized cross-product marker {:?}", no, other);
                    false
                }
            };
            let remaining = tokens[3].parse().unwrap_or_else(|_| {
                warn!("line {}: unparseable affix count {:?}", no, tokens[3]);
                0
            });
            block = Some(Block {
                affix,
                flag: tokens[1].to_string(),
                cross,
                remaining,
            });
            lines.push(Line {
                no,
                kind: LineKind::Header { flag: tokens[1] },
            });
        }
    }

    if let Some(b) = &block {
        if b.remaining > 0 {
            warn!("affix block for flag {:?} ended short", b.flag);
        }
    }

    lines
}

/// Strips the `/flags` clause off an append field and maps the `"0"`
/// placeholder to the empty string.
fn split_append(append: &str) -> (&str, Option<&str>) {
    let (append, flags2) = match append.split_once('/') {
        Some((a, f)) => (a, Some(f)),
        None => (append, None),
    };
    (if append == "0" { "" } else { append }, flags2)
}

fn unzero(field: &str) -> &str {
    if field == "0" {
        ""
    } else {
        field
    }
}

pub(super) fn parse_aff(text: &str, seed: &str) -> Result<AffData, AffError> {
    let lines = classify(text);

    // Pass 1: flag mode, flag registration order, alphabet seeding.
    let mut mode: Option<FlagMode> = None;
    let mut fields: Vec<(usize, &str)> = Vec::new();
    let mut alphabet = Alphabet::new();
    alphabet.observe(seed)?;

    for line in &lines {
        match &line.kind {
            LineKind::Directive { name, args } => match *name {
                "FLAG" if !args.is_empty() => match FlagMode::from_directive(args[0]) {
                    Some(new) => {
                        if mode.is_some_and(|old| old != new) {
                            warn!("line {}: FLAG redeclared, keeping the last value", line.no);
                        }
                        mode = Some(new);
                    }
                    None => warn!("line {}: unrecognized FLAG value {:?}", line.no, args[0]),
                },
                "TRY" | "WORDCHARS" | "BREAK" if !args.is_empty() => {
                    alphabet.observe(args[0])?;
                }
                "NEEDAFFIX" if !args.is_empty() => {
                    fields.push((line.no, args[0]));
                }
                _ => {}
            },
            LineKind::Header { flag, .. } => fields.push((line.no, *flag)),
            LineKind::Data {
                flag,
                strip,
                append,
                cond,
                ..
            } => {
                fields.push((line.no, *flag));
                alphabet.observe(unzero(strip))?;
                let (append, flags2) = split_append(append);
                alphabet.observe(append)?;
                if let Some(flags2) = flags2 {
                    fields.push((line.no, flags2));
                }
                let plain: String = cond
                    .chars()
                    .filter(|ch| !matches!(ch, '[' | ']' | '^' | '.'))
                    .collect();
                alphabet.observe(&plain)?;
            }
            _ => {}
        }
    }

    let mut flags = FlagRegistry::new(mode.unwrap_or_default());
    for (no, field) in fields {
        flags
            .register_field(field)
            .map_err(|source| AffError::Flag { line: no, source })?;
    }

    // Pass 2: directives and rule compilation.
    let width = alphabet.finalized_size();
    let mut data = AffData {
        alphabet,
        flags,
        fullstrip: false,
        need_affix: None,
        prefixes: Vec::new(),
        suffixes: Vec::new(),
        pfx_from_stem: RuleTrie::new(width),
        pfx_to_stem: RuleTrie::new(width),
        sfx_from_stem: RuleTrie::new(width),
        sfx_to_stem: RuleTrie::new(width),
    };

    for line in &lines {
        match &line.kind {
            LineKind::Indented => {
                warn!("line {}: indented directive is inactive", line.no);
            }
            LineKind::Malformed(reason) => {
                warn!("line {}: {}, skipped", line.no, reason);
            }
            LineKind::Directive { name, args } => match *name {
                "FULLSTRIP" => data.fullstrip = true,
                "NEEDAFFIX" if !args.is_empty() => {
                    let names = data
                        .flags
                        .split(args[0])
                        .map_err(|source| AffError::Flag { line: line.no, source })?;
                    if let Some(name) = names.first() {
                        if data.need_affix.is_some() {
                            warn!("line {}: NEEDAFFIX redeclared", line.no);
                        }
                        data.need_affix = data.flags.position(name);
                    }
                }
                "SET" if !args.is_empty() && args[0] != "UTF-8" => {
                    warn!("line {}: only UTF-8 is supported, got {:?}", line.no, args[0]);
                }
                // TRY/WORDCHARS/BREAK were consumed by pass 1; every
                // other directive is silently ignored.
                _ => {}
            },
            LineKind::Header { .. } => {}
            LineKind::Data {
                affix,
                flag,
                cross,
                strip,
                append,
                cond,
                raw,
            } => {
                compile_rule(
                    &mut data, line.no, *affix, flag, *cross, strip, append, cond, raw,
                )?;
            }
        }
    }

    Ok(data)
}

#[allow(clippy::too_many_arguments)]
fn compile_rule(
    data: &mut AffData,
    no: usize,
    affix: AffixKind,
    flag: &str,
    cross: bool,
    strip: &str,
    append: &str,
    cond: &str,
    raw: &str,
) -> Result<(), AffError> {
    let flag_pos = header_flag(&data.flags, flag, no)?;

    let strip = unzero(strip);
    let (append, flags2) = split_append(append);
    let cond = if cond == "." { strip } else { cond };

    let strip = data.alphabet.encode(strip)?;
    let append = data.alphabet.encode(append)?;
    let classes = condition::parse(cond, &data.alphabet)
        .map_err(|source| AffError::Condition { line: no, source })?;

    let Some(rest) = reconcile(affix, &classes, &strip) else {
        warn!("line {}: condition {:?} can never match its strip field", no, cond);
        return Ok(());
    };

    let flag2 = match flags2 {
        Some(field) => data
            .flags
            .parse(field)
            .map_err(|source| AffError::Flag { line: no, source })?,
        None => data.flags.empty_set(),
    };

    let rule = AffixMatch {
        kind: affix,
        flag: flag_pos,
        flag2,
        cross,
        strip,
        append,
        raw: SmolStr::new(raw),
    };

    match affix {
        AffixKind::Prefix => {
            let index = data.prefixes.len() as u32;
            data.pfx_from_stem
                .insert(&forward_path(&rule.strip, &rest), index);
            data.pfx_to_stem
                .insert(&forward_path(&rule.append, &rest), index);
            data.prefixes.push(rule);
        }
        AffixKind::Suffix => {
            let index = data.suffixes.len() as u32;
            data.sfx_from_stem
                .insert(&reversed_path(&rule.strip, &rest), index);
            data.sfx_to_stem
                .insert(&reversed_path(&rule.append, &rest), index);
            data.suffixes.push(rule);
        }
    }

    Ok(())
}

/// Resolves a block-header flag token to its bit position.
fn header_flag(flags: &FlagRegistry, token: &str, no: usize) -> Result<FlagPos, AffError> {
    let names = flags
        .split(token)
        .map_err(|source| AffError::Flag { line: no, source })?;
    // Registration in pass 1 guarantees the lookup succeeds.
    Ok(names
        .first()
        .and_then(|name| flags.position(name))
        .expect("header flag registered in pass 1"))
}

/// Checks the strip-side classes of a condition against the strip field
/// and returns the remaining (non-strip) classes, substituting class
/// positions with the strip literals. `None` means the condition is
/// unsatisfiable for this rule.
///
/// For suffixes the strip side is the condition tail; for prefixes the
/// head. A condition shorter than the strip is accepted when the strip's
/// own characters satisfy it; the strip then carries the whole
/// constraint.
fn reconcile(affix: AffixKind, classes: &[CharClass], strip: &[Symbol]) -> Option<Vec<CharClass>> {
    if classes.len() < strip.len() {
        let strip_side = match affix {
            AffixKind::Prefix => &strip[..classes.len()],
            AffixKind::Suffix => &strip[strip.len() - classes.len()..],
        };
        return covers(classes, strip_side).then(Vec::new);
    }

    let (strip_side, rest) = match affix {
        AffixKind::Prefix => {
            let (head, rest) = classes.split_at(strip.len());
            (head, rest)
        }
        AffixKind::Suffix => {
            let (rest, tail) = classes.split_at(classes.len() - strip.len());
            (tail, rest)
        }
    };
    covers(strip_side, strip).then(|| rest.to_vec())
}

fn covers(classes: &[CharClass], symbols: &[Symbol]) -> bool {
    classes
        .iter()
        .zip(symbols)
        .all(|(class, &symbol)| class.contains(symbol))
}

/// Walk-order path for prefix tries: the edge (strip or append) as
/// literals, then the rest of the condition.
fn forward_path(edge: &[Symbol], rest: &[CharClass]) -> Vec<CharClass> {
    edge.iter()
        .map(|&s| CharClass::singleton(s))
        .chain(rest.iter().cloned())
        .collect()
}

/// Walk-order path for suffix tries: walked from the word end, so both
/// the edge and the condition remainder are reversed.
fn reversed_path(edge: &[Symbol], rest: &[CharClass]) -> Vec<CharClass> {
    edge.iter()
        .rev()
        .map(|&s| CharClass::singleton(s))
        .chain(rest.iter().rev().cloned())
        .collect()
}
