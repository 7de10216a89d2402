use crate::alphabet::AlphabetError;
use crate::condition::ConditionError;
use crate::flags::FlagError;

/// Fatal errors from loading an affix file.
///
/// Malformed-but-recoverable data (flag mismatches, unrecognized
/// cross-product markers, unsatisfiable conditions, indented directives)
/// warns and is skipped instead; see the loader.
#[derive(Debug, thiserror::Error)]
pub enum AffError {
    /// A rule condition could not be compiled.
    #[error("line {line}: bad condition")]
    Condition {
        /// 1-based source line.
        line: usize,
        /// The underlying compile failure.
        #[source]
        source: ConditionError,
    },

    /// A flag field could not be parsed.
    #[error("line {line}: bad flag field")]
    Flag {
        /// 1-based source line.
        line: usize,
        /// The underlying parse failure.
        #[source]
        source: FlagError,
    },

    /// The working alphabet overflowed or was queried past finalization.
    #[error("alphabet error")]
    Alphabet(#[from] AlphabetError),
}
