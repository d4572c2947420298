use num::Unsigned;
use num_traits::PrimInt;
use std::ops::*;

/// A fixed number of words holding one bit per index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bitset<BitType: PrimInt + BitOrAssign + BitAndAssign + Unsigned> {
  words: Vec<BitType>,
}

fn word_bits<BitType: PrimInt>() -> usize {
  return BitType::zero().count_zeros() as usize;
}

impl<BitType: PrimInt + BitOrAssign + BitAndAssign + Unsigned> Bitset<BitType> {
  pub fn new(word_count: usize) -> Bitset<BitType> {
    return Bitset {
      words: vec![BitType::zero(); word_count],
    };
  }

  /// Number of words needed for `bit_count` bits.
  pub fn words_for(bit_count: usize) -> usize {
    let bits = word_bits::<BitType>();
    return (bit_count + bits - 1) / bits;
  }

  pub fn set(&mut self, index: usize) {
    let bits = word_bits::<BitType>();
    self.words[index / bits] |= BitType::one() << (index % bits);
  }

  pub fn unset(&mut self, index: usize) {
    let bits = word_bits::<BitType>();
    self.words[index / bits] &= !(BitType::one() << (index % bits));
  }

  pub fn get(&self, index: usize) -> bool {
    let bits = word_bits::<BitType>();
    return match self.words.get(index / bits) {
      Some(word) => *word & (BitType::one() << (index % bits)) != BitType::zero(),
      None => false,
    };
  }

  pub fn words(&self) -> &[BitType] {
    return &self.words;
  }

  /// Indices of all set bits, ascending.
  pub fn ones(&self) -> Vec<usize> {
    let bits = word_bits::<BitType>();
    return (0..self.words.len() * bits).filter(|i| self.get(*i)).collect();
  }

  pub fn is_empty(&self) -> bool {
    return self.words.iter().all(|w| *w == BitType::zero());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bitset_set_test() {
    let mut bs = Bitset::<u32>::new(1);
    for i in 0..31 {
      if i % 2 != 0 {
        bs.set(i);
      }
    }
    assert_eq!(bs.words(), &[715827882]);
  }

  #[test]
  fn bitset_unset_test() {
    let mut bs = Bitset::<u32>::new(1);
    for i in 0..31 {
      if i % 2 != 0 {
        bs.set(i);
      }
    }
    for i in 0..31 {
      if i % 2 != 0 {
        bs.unset(i);
      }
    }
    assert!(bs.is_empty());
  }

  #[test]
  fn bitset_multi_word_test() {
    assert_eq!(Bitset::<u32>::words_for(161), 6);
    assert_eq!(Bitset::<u32>::words_for(64), 2);
    let mut bs = Bitset::<u32>::new(3);
    bs.set(3);
    bs.set(33);
    bs.set(95);
    assert_eq!(bs.words(), &[0x8, 0x2, 0x8000_0000]);
    assert_eq!(bs.ones(), vec![3, 33, 95]);
    assert!(!bs.get(200));
  }
}
