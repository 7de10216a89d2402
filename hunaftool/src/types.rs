/// Index of a character in the working [`Alphabet`](crate::alphabet::Alphabet).
pub type Symbol = u8;

/// A word encoded as a sequence of alphabet indices.
pub type EncodedWord = Vec<Symbol>;

/// Bit position of a registered affix flag.
pub type FlagPos = u16;

/// Upper bound on distinct characters the alphabet can hold.
pub const MAX_ALPHABET_LEN: usize = 256;

/// Largest decimal flag value accepted under `FLAG num`.
pub const MAX_NUM_FLAG: u32 = 65509;

/// Registered-flag count at which [`FlagSet`](crate::flags::FlagSet)
/// switches from the packed to the hashed representation.
pub const FLAG_SET_BITS_LIMIT: usize = 63;
