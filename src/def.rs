/// Size of the codepoint domain covered by every property column.
pub const MAX_CODEPOINT: u32 = 0x110000;

/// Terminator of every caseless set. Larger than any valid codepoint.
pub const NOTACHAR: u32 = 0xFFFF_FFFF;

/// Bit stored in the bidi class column for Bidi_Control characters.
pub const BIDI_CONTROL_BIT: i64 = 0x80;

pub const DEFAULT_BLOCK_SIZES: [usize; 5] = [32, 64, 128, 256, 512];

pub const SCRIPT_BITSET_WORD_BITS: usize = 32;

/// A dense per-codepoint property table.
pub type Column = Vec<i64>;

const_assert!(MAX_CODEPOINT as usize % DEFAULT_BLOCK_SIZES[4] == 0);
const_assert!(NOTACHAR > MAX_CODEPOINT);
