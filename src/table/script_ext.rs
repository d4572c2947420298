use crate::def::{Column, SCRIPT_BITSET_WORD_BITS};
use crate::utility::Bitset;
use std::collections::HashMap;

/// Deduplicated script bitsets, `stride` words each. Bitset 0 is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptBitsets {
  stride: usize,
  words: Vec<u32>,
}

impl ScriptBitsets {
  pub fn stride(&self) -> usize {
    return self.stride;
  }

  pub fn words(&self) -> &[u32] {
    return &self.words;
  }

  pub fn len(&self) -> usize {
    return self.words.len() / self.stride;
  }

  pub fn is_empty(&self) -> bool {
    return self.words.is_empty();
  }

  /// Script indices of the bitset referenced by a negative column value.
  pub fn decode(&self, value: i64) -> Option<Vec<u32>> {
    if value >= 0 {
      return None;
    }
    let offset = (-value) as usize;
    let words = self.words.get(offset..offset + self.stride)?;
    let mut bitset = Bitset::<u32>::new(self.stride);
    for (word_index, word) in words.iter().enumerate() {
      for bit in 0..SCRIPT_BITSET_WORD_BITS {
        if (*word >> bit) & 1 != 0 {
          bitset.set(word_index * SCRIPT_BITSET_WORD_BITS + bit);
        }
      }
    }
    return Some(bitset.ones().into_iter().map(|i| i as u32).collect());
  }
}

/// Accumulates multi-script lists as zero terminated runs in one flat
/// buffer, then turns the runs into bitsets.
pub struct ScriptExtensionEncoder {
  script_count: usize,
  lists: Vec<u32>,
}

impl ScriptExtensionEncoder {
  pub fn new(script_count: usize) -> ScriptExtensionEncoder {
    return ScriptExtensionEncoder {
      script_count,
      lists: vec![0],
    };
  }

  /// Raw column value for one list of script indices: the index itself for a
  /// single script, otherwise the negated buffer position of the list's run.
  /// Identical lists, in any order, share one run. Returns `None` for an
  /// empty list, an index out of range, or index 0 inside a longer list.
  pub fn encode_list(&mut self, scripts: &[u32]) -> Option<i64> {
    let mut run = scripts.to_vec();
    run.sort_unstable();
    run.dedup();
    if run.is_empty() || run.iter().any(|s| *s as usize >= self.script_count) {
      return None;
    }
    if run.len() == 1 {
      return Some(run[0] as i64);
    }
    if run[0] == 0 {
      return None;
    }
    run.push(0);

    for position in 1..self.lists.len() {
      if self.lists[position - 1] == 0 && self.lists[position..].starts_with(&run) {
        debug_log!("script extension list {:?} shares run at {}", run, position);
        return Some(-(position as i64));
      }
    }
    let position = self.lists.len();
    self.lists.extend_from_slice(&run);
    return Some(-(position as i64));
  }

  /// Final column: `default` entries take `fallback`, negative entries are
  /// rewritten as the negated word offset of their bitset.
  pub fn finish(self, raw: &[i64], fallback: &[i64], default: i64) -> (Column, ScriptBitsets) {
    let stride = Bitset::<u32>::words_for(self.script_count).max(1);
    let mut words = Vec::new();
    let mut seen: HashMap<Vec<u32>, usize> = HashMap::new();
    let mut offsets: HashMap<usize, usize> = HashMap::new();

    let mut run_start = 0;
    let mut bitset = Bitset::<u32>::new(stride);
    for (position, script) in self.lists.iter().enumerate() {
      if *script != 0 {
        bitset.set(*script as usize);
        continue;
      }
      let key = bitset.words().to_vec();
      let index = match seen.get(&key) {
        Some(index) => *index,
        None => {
          let index = seen.len();
          words.extend_from_slice(&key);
          seen.insert(key, index);
          index
        }
      };
      offsets.insert(run_start, index * stride);
      run_start = position + 1;
      bitset = Bitset::<u32>::new(stride);
    }

    let column = raw
      .iter()
      .zip(fallback.iter())
      .map(|(value, fallback)| {
        if *value == default {
          *fallback
        } else if *value < 0 {
          -(offsets[&((-*value) as usize)] as i64)
        } else {
          *value
        }
      })
      .collect();
    return (column, ScriptBitsets { stride, words });
  }
}

/// Encodes one script list per codepoint. Codepoints with an empty list get
/// script 0.
pub fn encode(lists: &[Vec<u32>], script_count: usize) -> Option<(Column, ScriptBitsets)> {
  let mut encoder = ScriptExtensionEncoder::new(script_count);
  let mut raw = Vec::with_capacity(lists.len());
  for list in lists {
    raw.push(if list.is_empty() { 0 } else { encoder.encode_list(list)? });
  }
  let fallback = vec![0; lists.len()];
  return Some(encoder.finish(&raw, &fallback, 0));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encode_single_and_shared_lists_test() {
    let lists = vec![vec![3], vec![3, 15], vec![15, 3], vec![], vec![4, 7, 40]];
    let (column, bitsets) = encode(&lists, 41).unwrap();
    assert_eq!(bitsets.stride(), 2);
    assert_eq!(column[0], 3);
    assert_eq!(column[3], 0);
    assert!(column[1] < 0);
    assert_eq!(column[1], column[2]);
    assert_eq!(column[1], -2);
    assert_eq!(column[4], -4);
    assert_eq!(bitsets.len(), 3);
    assert_eq!(bitsets.words(), &[0, 0, (1 << 3) | (1 << 15), 0, (1 << 4) | (1 << 7), 1 << 8]);
  }

  #[test]
  fn encode_bitset_roundtrip_test() {
    let lists = vec![vec![1, 2], vec![31, 32, 33], vec![2, 1], vec![5, 64], vec![2, 5]];
    let (column, bitsets) = encode(&lists, 65).unwrap();
    for (list, value) in lists.iter().zip(column.iter()) {
      let mut expected = list.clone();
      expected.sort_unstable();
      assert_eq!(bitsets.decode(*value), Some(expected));
    }
  }

  #[test]
  fn encode_suffix_of_existing_run_is_not_shared_test() {
    let mut encoder = ScriptExtensionEncoder::new(10);
    assert_eq!(encoder.encode_list(&[1, 2, 3]), Some(-1));
    assert_eq!(encoder.encode_list(&[2, 3]), Some(-5));
    assert_eq!(encoder.encode_list(&[3, 2]), Some(-5));
  }

  #[test]
  fn encode_rejects_invalid_lists_test() {
    let mut encoder = ScriptExtensionEncoder::new(10);
    assert_eq!(encoder.encode_list(&[]), None);
    assert_eq!(encoder.encode_list(&[0, 4]), None);
    assert_eq!(encoder.encode_list(&[4, 10]), None);
    assert_eq!(encoder.encode_list(&[0]), Some(0));
  }

  #[test]
  fn finish_uses_fallback_for_default_test() {
    let mut encoder = ScriptExtensionEncoder::new(8);
    let multi = encoder.encode_list(&[2, 6]).unwrap();
    let raw = vec![0, 5, multi, 0];
    let fallback = vec![1, 1, 1, 7];
    let (column, bitsets) = encoder.finish(&raw, &fallback, 0);
    assert_eq!(column, vec![1, 5, -1, 7]);
    assert_eq!(bitsets.words(), &[0, (1 << 2) | (1 << 6)]);
  }
}
