/*! Conversion between Hunspell affix+dictionary pairs and plain word lists.

Implements the two directions around a shared affix engine:

- *expansion*: a `.dic` entry plus the affix rules of its `.aff` file
  becomes every surface word Hunspell would generate from it, including
  prefix/suffix cross products and two-level suffixing;
- *compression*: a flat word list becomes a minimal set of stem+flag
  entries whose expansion under the given `.aff` file reproduces the list
  exactly.

The affix engine deliberately reproduces Hunspell's forgiving parsing
behavior (condition repair, defaulted cross-product markers, ignored
unknown flags) rather than correcting it, so that its output stays
byte-compatible with `hunspell -G` on the same inputs.

# Usage example

```
use hunaftool::aff::AffData;
use hunaftool::expand::Expander;

let aff = AffData::parse("TRY walked\nSFX B Y 1\nSFX B 0 ed .\n", "")?;
let expander = Expander::new(&aff);
let words = expander.expand_line("walk/B")?;
assert_eq!(words, ["walk", "walked"]);
# Ok::<(), hunaftool::convert::ConvertError>(())
```

Compounding, morphological aliases, suggestion generation and
`ICONV`/`OCONV` are out of scope.
*/

#![warn(missing_docs)]

pub mod aff;
pub mod alphabet;
pub mod compress;
pub mod condition;
pub mod convert;
pub mod expand;
pub mod flags;
pub mod format;
pub mod ruleset;

/// Core type aliases shared across the affix engine.
pub mod types;
