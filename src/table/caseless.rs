use crate::def::{Column, NOTACHAR};
use crate::error::{Error, Result};

/// Groups of three or more case-equivalent codepoints and, per codepoint,
/// the offset of its group in the flattened table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaselessSets {
  offsets: Column,
  other_case: Column,
  sets: Vec<Vec<u32>>,
}

impl CaselessSets {
  /// Offset into `to_table()` of each codepoint's set, 0 if it has none.
  pub fn offsets(&self) -> &[i64] {
    return &self.offsets;
  }

  /// The fold deltas after every one-way pair was made reciprocal.
  pub fn other_case(&self) -> &[i64] {
    return &self.other_case;
  }

  pub fn sets(&self) -> &[Vec<u32>] {
    return &self.sets;
  }

  /// `NOTACHAR` followed by every set, each terminated by `NOTACHAR`.
  pub fn to_table(&self) -> Vec<u32> {
    let mut table = vec![NOTACHAR];
    for set in &self.sets {
      table.extend_from_slice(set);
      table.push(NOTACHAR);
    }
    return table;
  }

  /// Members of the set a codepoint belongs to.
  pub fn set_of(&self, codepoint: u32) -> Option<&[u32]> {
    let offset = *self.offsets.get(codepoint as usize)?;
    if offset == 0 {
      return None;
    }
    let mut start = 1;
    for set in &self.sets {
      if start == offset as usize {
        return Some(set);
      }
      start += set.len() + 1;
    }
    return None;
  }
}

fn partner(other_case: &[i64], codepoint: usize) -> Result<usize> {
  let partner = codepoint as i64 + other_case[codepoint];
  if partner < 0 || partner as usize >= other_case.len() {
    return Err(Error::PartnerOutOfDomain {
      codepoint: codepoint as u32,
      partner,
    });
  }
  return Ok(partner as usize);
}

/// Collects the case-equivalence groups that simple one-to-one folding
/// cannot express.
#[derive(Debug, Default)]
pub struct CaselessSetBuilder {
  groups: Vec<Vec<u32>>,
}

impl CaselessSetBuilder {
  pub fn new() -> CaselessSetBuilder {
    return CaselessSetBuilder::default();
  }

  /// Merges `members` into the first group sharing any of them, or starts a
  /// new group. Groups are never merged with each other.
  fn add_group(&mut self, members: [u32; 3]) {
    for group in self.groups.iter_mut() {
      if members.iter().any(|m| group.contains(m)) {
        for m in members.iter() {
          if !group.contains(m) {
            group.push(*m);
          }
        }
        return;
      }
    }
    self.groups.push(members.to_vec());
  }

  /// `other_case[c]` is the delta from `c` to its fold partner, 0 if none.
  /// A partner outside the column is an error.
  pub fn build(mut self, mut other_case: Column) -> Result<CaselessSets> {
    for c in 0..other_case.len() {
      if other_case[c] != 0 {
        let o = partner(&other_case, c)?;
        if other_case[o] == 0 {
          other_case[o] = -other_case[c];
        }
      }
    }

    for c in 0..other_case.len() {
      let o = partner(&other_case, c)?;
      if other_case[o] != -other_case[c] {
        let t = partner(&other_case, o)?;
        debug_log!("caseless group {:04X} {:04X} {:04X}", c, o, t);
        self.add_group([c as u32, o as u32, t as u32]);
      }
    }

    let mut offsets = vec![0; other_case.len()];
    let mut offset = 1;
    let mut sets = self.groups;
    for set in sets.iter_mut() {
      set.sort_unstable();
      for member in set.iter() {
        offsets[*member as usize] = offset as i64;
      }
      offset += set.len() + 1;
    }
    tracing::debug!(sets = sets.len(), "caseless sets");

    return Ok(CaselessSets {
      offsets,
      other_case,
      sets,
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fold(pairs: &[(usize, usize)]) -> Column {
    let mut other_case = vec![0; 0x2200];
    for (from, to) in pairs {
      other_case[*from] = *to as i64 - *from as i64;
    }
    return other_case;
  }

  #[test]
  fn caseless_reciprocal_pair_is_excluded_test() {
    let sets = CaselessSetBuilder::new().build(fold(&[(0x41, 0x61)])).unwrap();
    assert!(sets.sets().is_empty());
    assert_eq!(sets.to_table(), vec![NOTACHAR]);
    assert_eq!(sets.other_case()[0x41], 0x20);
    assert_eq!(sets.other_case()[0x61], -0x20);
    assert_eq!(sets.offsets()[0x41], 0);
  }

  #[test]
  fn caseless_kelvin_sign_test() {
    let sets = CaselessSetBuilder::new().build(fold(&[(0x41, 0x61), (0x4B, 0x6B), (0x212A, 0x6B)])).unwrap();
    assert_eq!(sets.sets(), &[vec![0x4B, 0x6B, 0x212A]]);
    assert_eq!(sets.to_table(), vec![NOTACHAR, 0x4B, 0x6B, 0x212A, NOTACHAR]);
    for cp in [0x4B, 0x6B, 0x212A].iter() {
      assert_eq!(sets.offsets()[*cp], 1);
    }
    assert_eq!(sets.set_of(0x212A), Some(&[0x4B, 0x6B, 0x212A][..]));
    assert_eq!(sets.set_of(0x41), None);
  }

  #[test]
  fn caseless_later_triple_extends_group_test() {
    let sets = CaselessSetBuilder::new().build(fold(&[
      (0x4B, 0x6B),
      (0x212A, 0x6B),
      (0x398, 0x3B8),
      (0x3D1, 0x3B8),
      (0x3F4, 0x3B8),
    ]))
    .unwrap();
    assert_eq!(sets.sets(), &[vec![0x398, 0x3B8, 0x3D1, 0x3F4], vec![0x4B, 0x6B, 0x212A]]);
    assert_eq!(sets.offsets()[0x3F4], 1);
    assert_eq!(sets.offsets()[0x212A], 6);
    assert_eq!(sets.to_table().len(), 1 + 4 + 5);
  }

  #[test]
  fn caseless_sets_are_closed_test() {
    let sets = CaselessSetBuilder::new().build(fold(&[
      (0x53, 0x73),
      (0x17F, 0x73),
      (0x3A3, 0x3C3),
      (0x3C2, 0x3C3),
      (0xB5, 0x3BC),
      (0x39C, 0x3BC),
    ]))
    .unwrap();
    assert_eq!(sets.sets().len(), 3);
    for set in sets.sets() {
      assert!(set.len() >= 3);
      let mut reached = vec![set[0]];
      let mut i = 0;
      while i < reached.len() {
        let c = reached[i] as usize;
        for m in set.iter() {
          let linked = partner(sets.other_case(), c).unwrap() == *m as usize
            || partner(sets.other_case(), *m as usize).unwrap() == c;
          if linked && !reached.contains(m) {
            reached.push(*m);
          }
        }
        i += 1;
      }
      assert_eq!(reached.len(), set.len(), "set {:X?} is not connected", set);
    }
  }

  #[test]
  fn caseless_partner_outside_column_test() {
    let mut other_case = vec![0; 0x2200];
    other_case[0x21FE] = 1;
    other_case[0x21FF] = 1;
    assert!(matches!(
      CaselessSetBuilder::new().build(other_case),
      Err(Error::PartnerOutOfDomain {
        codepoint: 0x21FF,
        partner: 0x2200,
      })
    ));

    let mut other_case = vec![0; 16];
    other_case[2] = -5;
    assert!(matches!(
      CaselessSetBuilder::new().build(other_case),
      Err(Error::PartnerOutOfDomain { codepoint: 2, .. })
    ));
  }

  #[test]
  fn caseless_groups_are_not_remerged_test() {
    let mut builder = CaselessSetBuilder::new();
    builder.add_group([1, 2, 3]);
    builder.add_group([7, 8, 9]);
    builder.add_group([3, 7, 20]);
    assert_eq!(builder.groups, vec![vec![1, 2, 3, 7, 20], vec![7, 8, 9]]);
  }
}
