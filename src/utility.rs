mod bitset;

pub use self::bitset::*;
