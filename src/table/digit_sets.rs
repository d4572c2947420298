use crate::error::Warning;
use crate::unicode::UcdSource;

/// Sorted codepoints of the '9' of every run of ten decimal digits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DigitSets {
  boundaries: Vec<u32>,
  warnings: Vec<Warning>,
}

impl DigitSets {
  pub fn boundaries(&self) -> &[u32] {
    return &self.boundaries;
  }

  pub fn warnings(&self) -> &[Warning] {
    return &self.warnings;
  }

  /// Boundaries prefixed by their count.
  pub fn to_table(&self) -> Vec<u32> {
    let mut table = Vec::with_capacity(self.boundaries.len() + 1);
    table.push(self.boundaries.len() as u32);
    table.extend_from_slice(&self.boundaries);
    return table;
  }
}

pub struct DigitSetExtractor;

impl DigitSetExtractor {
  /// Each `(first, last)` range holds whole runs of ten digits. A range of
  /// another length is reported and still split from `first` on.
  pub fn extract(ranges: &[(u32, u32)]) -> DigitSets {
    let mut sets = DigitSets::default();
    for (first, last) in ranges.iter().copied() {
      if (last - first + 1) % 10 != 0 {
        let warning = Warning::RangeMultipleViolation { first, last };
        tracing::warn!("{}", warning);
        sets.warnings.push(warning);
      }
      let mut zero = first;
      while zero < last {
        sets.boundaries.push(zero + 9);
        zero += 10;
      }
    }
    sets.boundaries.sort_unstable();
    return sets;
  }

  /// Ranges of Scripts.txt whose comment marks them as `Nd`.
  pub fn decimal_ranges(scripts: &UcdSource) -> Vec<(u32, u32)> {
    return scripts
      .lines()
      .iter()
      .filter(|line| line.is_range() && line.comment().split_whitespace().next() == Some("Nd"))
      .map(|line| (line.first(), line.last()))
      .collect();
  }

  pub fn from_source(scripts: &UcdSource) -> DigitSets {
    return DigitSetExtractor::extract(&DigitSetExtractor::decimal_ranges(scripts));
  }
}
