//! Affix flag registry and flag-set representations.
//!
//! Hunspell names flags in one of three encodings (`FLAG` directive):
//! single UTF-8 characters, two-character `long` flags, or decimal `num`
//! flags. The registry assigns every flag a stable bit position in order
//! of first appearance; flag sets are packed into a single `u64` while
//! fewer than [`FLAG_SET_BITS_LIMIT`] flags are registered and spill into
//! a hashed set beyond that.

use hashbrown::{HashMap, HashSet};
use smol_str::SmolStr;

use crate::types::{FlagPos, FLAG_SET_BITS_LIMIT, MAX_NUM_FLAG};

/// Errors from parsing flag fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    /// A `num` flag field token was not a decimal number.
    #[error("invalid numeric flag {0:?}")]
    BadNumFlag(SmolStr),

    /// A `num` flag exceeded the Hunspell limit of [`MAX_NUM_FLAG`].
    #[error("numeric flag {0} out of range")]
    OversizeNumFlag(u32),

    /// A flag field referenced a flag never declared by the affix file.
    #[error("unknown flag {0:?}")]
    UnknownFlag(SmolStr),
}

/// Flag encoding declared by the `FLAG` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagMode {
    /// One flag per UTF-8 code point (the default).
    #[default]
    Utf8,
    /// Two code points per flag.
    Long,
    /// Comma-separated decimal flags.
    Num,
}

impl FlagMode {
    /// Parses a `FLAG` directive argument; `None` for unrecognized values.
    pub fn from_directive(value: &str) -> Option<FlagMode> {
        match value {
            "UTF-8" => Some(FlagMode::Utf8),
            "long" => Some(FlagMode::Long),
            "num" => Some(FlagMode::Num),
            _ => None,
        }
    }
}

/// Set of flag bit positions.
///
/// Both representations have identical semantics; the packed form exists
/// because nearly every real affix file registers well under 63 flags.
#[derive(Debug, Clone)]
pub enum FlagSet {
    /// Bit at position `p` set ⇔ flag registered at `p` is present.
    Bits(u64),
    /// Explicit set of bit positions.
    Hashed(HashSet<FlagPos>),
}

impl FlagSet {
    /// Whether no flag is present.
    pub fn is_empty(&self) -> bool {
        match self {
            FlagSet::Bits(bits) => *bits == 0,
            FlagSet::Hashed(set) => set.is_empty(),
        }
    }

    /// Number of flags present.
    pub fn len(&self) -> usize {
        match self {
            FlagSet::Bits(bits) => bits.count_ones() as usize,
            FlagSet::Hashed(set) => set.len(),
        }
    }

    /// Whether the flag at `pos` is present.
    pub fn contains(&self, pos: FlagPos) -> bool {
        match self {
            FlagSet::Bits(bits) => pos < 64 && bits & (1 << pos) != 0,
            FlagSet::Hashed(set) => set.contains(&pos),
        }
    }

    /// Adds the flag at `pos`. Idempotent.
    pub fn insert(&mut self, pos: FlagPos) {
        match self {
            FlagSet::Bits(bits) if pos < 64 => *bits |= 1 << pos,
            FlagSet::Bits(_) => {
                self.promote();
                self.insert(pos);
            }
            FlagSet::Hashed(set) => {
                set.insert(pos);
            }
        }
    }

    /// Removes the flag at `pos` if present.
    pub fn remove(&mut self, pos: FlagPos) {
        match self {
            FlagSet::Bits(bits) => {
                if pos < 64 {
                    *bits &= !(1 << pos);
                }
            }
            FlagSet::Hashed(set) => {
                set.remove(&pos);
            }
        }
    }

    /// Whether the two sets share any flag. Symmetric.
    pub fn intersects(&self, other: &FlagSet) -> bool {
        match (self, other) {
            (FlagSet::Bits(a), FlagSet::Bits(b)) => a & b != 0,
            (FlagSet::Hashed(set), bits @ FlagSet::Bits(_))
            | (bits @ FlagSet::Bits(_), FlagSet::Hashed(set)) => {
                set.iter().any(|&pos| bits.contains(pos))
            }
            (FlagSet::Hashed(a), FlagSet::Hashed(b)) => !a.is_disjoint(b),
        }
    }

    /// Adds every flag of `other`. Idempotent.
    pub fn merge(&mut self, other: &FlagSet) {
        match (&mut *self, other) {
            (FlagSet::Bits(a), FlagSet::Bits(b)) => *a |= b,
            _ => {
                for pos in other.positions() {
                    self.insert(pos);
                }
            }
        }
    }

    /// Removes every flag of `other`; `subtract(x, x)` empties the set.
    pub fn subtract(&mut self, other: &FlagSet) {
        match (&mut *self, other) {
            (FlagSet::Bits(a), FlagSet::Bits(b)) => *a &= !b,
            _ => {
                for pos in other.positions() {
                    self.remove(pos);
                }
            }
        }
    }

    /// Present flags in ascending bit-position order.
    pub fn positions(&self) -> Vec<FlagPos> {
        match self {
            FlagSet::Bits(bits) => (0u16..64).filter(|&p| bits & (1 << p) != 0).collect(),
            FlagSet::Hashed(set) => {
                let mut positions: Vec<FlagPos> = set.iter().copied().collect();
                positions.sort_unstable();
                positions
            }
        }
    }

    fn promote(&mut self) {
        if let FlagSet::Bits(bits) = self {
            let set = (0u16..64).filter(|&p| *bits & (1u64 << p) != 0).collect();
            *self = FlagSet::Hashed(set);
        }
    }
}

impl PartialEq for FlagSet {
    fn eq(&self, other: &FlagSet) -> bool {
        match (self, other) {
            (FlagSet::Bits(a), FlagSet::Bits(b)) => a == b,
            (FlagSet::Hashed(a), FlagSet::Hashed(b)) => a == b,
            _ => self.positions() == other.positions(),
        }
    }
}

impl Eq for FlagSet {}

/// Name table mapping flags to stable bit positions.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    mode: FlagMode,
    names: Vec<SmolStr>,
    index: HashMap<SmolStr, FlagPos>,
}

impl FlagRegistry {
    /// Creates an empty registry under the given encoding.
    pub fn new(mode: FlagMode) -> FlagRegistry {
        FlagRegistry {
            mode,
            names: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The flag encoding in effect.
    pub fn mode(&self) -> FlagMode {
        self.mode
    }

    /// Number of registered flags.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no flag has been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registers a flag, assigning the next bit position. Idempotent.
    pub fn register(&mut self, name: &str) -> FlagPos {
        if let Some(&pos) = self.index.get(name) {
            return pos;
        }
        let pos = self.names.len() as FlagPos;
        self.names.push(SmolStr::new(name));
        self.index.insert(SmolStr::new(name), pos);
        pos
    }

    /// Splits a flag field into flag names under the current mode.
    pub fn split(&self, field: &str) -> Result<Vec<SmolStr>, FlagError> {
        match self.mode {
            FlagMode::Utf8 => Ok(field
                .chars()
                .map(|ch| {
                    let mut buf = [0u8; 4];
                    SmolStr::new(ch.encode_utf8(&mut buf))
                })
                .collect()),
            FlagMode::Long => {
                let chars: Vec<char> = field.chars().collect();
                if chars.len() % 2 != 0 {
                    log::warn!("odd-length long flag field {:?}, trailing character dropped", field);
                }
                Ok(chars
                    .chunks_exact(2)
                    .map(|pair| pair.iter().copied().collect())
                    .collect())
            }
            FlagMode::Num => field
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| {
                    let value: u32 = token
                        .parse()
                        .map_err(|_| FlagError::BadNumFlag(SmolStr::new(token)))?;
                    if value > MAX_NUM_FLAG {
                        return Err(FlagError::OversizeNumFlag(value));
                    }
                    Ok(SmolStr::new(token))
                })
                .collect(),
        }
    }

    /// Splits a field and registers every flag in it.
    pub fn register_field(&mut self, field: &str) -> Result<(), FlagError> {
        for name in self.split(field)? {
            self.register(&name);
        }
        Ok(())
    }

    /// Parses a flag field strictly; unknown flags fail.
    pub fn parse(&self, field: &str) -> Result<FlagSet, FlagError> {
        let mut set = self.empty_set();
        for name in self.split(field)? {
            let pos = self
                .index
                .get(&name)
                .copied()
                .ok_or(FlagError::UnknownFlag(name))?;
            set.insert(pos);
        }
        Ok(set)
    }

    /// Parses a flag field leniently; anything unknown or malformed warns
    /// and is skipped. Used for dictionary entries, whose stray flags
    /// Hunspell tolerates.
    pub fn parse_lenient(&self, field: &str) -> FlagSet {
        let mut set = self.empty_set();
        let names = match self.split(field) {
            Ok(names) => names,
            Err(err) => {
                log::warn!("ignoring flag field {:?}: {}", field, err);
                return set;
            }
        };
        for name in names {
            match self.index.get(&name) {
                Some(&pos) => set.insert(pos),
                None => log::warn!("ignoring undeclared flag {:?}", name),
            }
        }
        set
    }

    /// An empty set in the representation matching the registry size.
    pub fn empty_set(&self) -> FlagSet {
        if self.names.len() < FLAG_SET_BITS_LIMIT {
            FlagSet::Bits(0)
        } else {
            FlagSet::Hashed(HashSet::new())
        }
    }

    /// A set holding exactly the flag at `pos`.
    pub fn singleton(&self, pos: FlagPos) -> FlagSet {
        let mut set = self.empty_set();
        set.insert(pos);
        set
    }

    /// Bit position of a registered flag name.
    pub fn position(&self, name: &str) -> Option<FlagPos> {
        self.index.get(name).copied()
    }

    /// Stringifies a set in ascending bit-position order, joined without
    /// separator (comma-separated under `num`).
    pub fn format(&self, set: &FlagSet) -> String {
        let names = set
            .positions()
            .into_iter()
            .map(|pos| self.names[pos as usize].as_str());
        match self.mode {
            FlagMode::Num => itertools::join(names, ","),
            _ => names.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(mode: FlagMode, fields: &[&str]) -> FlagRegistry {
        let mut reg = FlagRegistry::new(mode);
        for field in fields {
            reg.register_field(field).unwrap();
        }
        reg
    }

    #[test]
    fn utf8_mode_splits_per_char() {
        let reg = registry(FlagMode::Utf8, &["A", "B"]);
        let set = reg.parse("BA").unwrap();
        assert_eq!(set.positions(), vec![0, 1]);
        assert_eq!(reg.format(&set), "AB");
    }

    #[test]
    fn long_mode_splits_pairs() {
        let reg = registry(FlagMode::Long, &["Aa", "Bb"]);
        let set = reg.parse("BbAa").unwrap();
        assert_eq!(reg.format(&set), "AaBb");
    }

    #[test]
    fn num_mode_splits_commas() {
        let reg = registry(FlagMode::Num, &["1", "2", "201"]);
        let set = reg.parse("201,1").unwrap();
        assert_eq!(reg.format(&set), "1,201");
    }

    #[test]
    fn num_mode_rejects_oversize() {
        let reg = FlagRegistry::new(FlagMode::Num);
        assert_eq!(
            reg.split("65510"),
            Err(FlagError::OversizeNumFlag(65510))
        );
        assert!(reg.split("65509").is_ok());
    }

    #[test]
    fn registration_is_idempotent() {
        let mut reg = FlagRegistry::new(FlagMode::Utf8);
        assert_eq!(reg.register("A"), 0);
        assert_eq!(reg.register("B"), 1);
        assert_eq!(reg.register("A"), 0);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn lenient_parse_skips_unknown() {
        let reg = registry(FlagMode::Utf8, &["A"]);
        let set = reg.parse_lenient("AZ");
        assert_eq!(set.positions(), vec![0]);
        assert!(reg.parse("AZ").is_err());
    }

    #[test]
    fn set_algebra_invariants() {
        let reg = registry(FlagMode::Utf8, &["A", "B", "C"]);
        let ab = reg.parse("AB").unwrap();
        let bc = reg.parse("BC").unwrap();

        assert!(ab.intersects(&bc) && bc.intersects(&ab));

        let mut merged = ab.clone();
        merged.merge(&bc);
        let twice = {
            let mut m = merged.clone();
            m.merge(&bc);
            m
        };
        assert_eq!(merged, twice);

        let mut gone = ab.clone();
        gone.subtract(&ab);
        assert!(gone.is_empty());
    }

    #[test]
    fn representations_agree() {
        // Force the hashed representation by registering 63 flags.
        let mut big = FlagRegistry::new(FlagMode::Num);
        for n in 0..63 {
            big.register(&n.to_string());
        }
        assert!(matches!(big.empty_set(), FlagSet::Hashed(_)));

        let mut small = FlagRegistry::new(FlagMode::Num);
        small.register("3");
        small.register("5");
        assert!(matches!(small.empty_set(), FlagSet::Bits(_)));

        let hashed = big.parse("3,5").unwrap();
        let bits = {
            let mut set = small.empty_set();
            set.insert(big.position("3").unwrap());
            set.insert(big.position("5").unwrap());
            set
        };
        assert_eq!(hashed, bits);
        assert!(hashed.intersects(&bits) && bits.intersects(&hashed));
    }
}
