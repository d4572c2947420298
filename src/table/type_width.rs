use crate::error::{Error, Result};
use num_traits::{Bounded, ToPrimitive};
use std::fmt;

/// Fixed width integer kinds, in the order they are tried.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntKind {
  U8,
  U16,
  U32,
  I8,
  I16,
  I32,
}

const CANDIDATES: [IntKind; 6] = [IntKind::U8, IntKind::U16, IntKind::U32, IntKind::I8, IntKind::I16, IntKind::I32];

fn limits<T: Bounded + ToPrimitive>() -> (i64, i64) {
  return (
    T::min_value().to_i64().unwrap_or(i64::MIN),
    T::max_value().to_i64().unwrap_or(i64::MAX),
  );
}

impl IntKind {
  pub fn limits(&self) -> (i64, i64) {
    return match self {
      IntKind::U8 => limits::<u8>(),
      IntKind::U16 => limits::<u16>(),
      IntKind::U32 => limits::<u32>(),
      IntKind::I8 => limits::<i8>(),
      IntKind::I16 => limits::<i16>(),
      IntKind::I32 => limits::<i32>(),
    };
  }

  /// Width in bytes.
  pub fn size(&self) -> usize {
    return match self {
      IntKind::U8 | IntKind::I8 => 1,
      IntKind::U16 | IntKind::I16 => 2,
      IntKind::U32 | IntKind::I32 => 4,
    };
  }

  pub fn is_signed(&self) -> bool {
    return matches!(self, IntKind::I8 | IntKind::I16 | IntKind::I32);
  }

  pub fn type_name(&self) -> &'static str {
    return match self {
      IntKind::U8 => "u8",
      IntKind::U16 => "u16",
      IntKind::U32 => "u32",
      IntKind::I8 => "i8",
      IntKind::I16 => "i16",
      IntKind::I32 => "i32",
    };
  }

  fn contains(&self, min: i64, max: i64) -> bool {
    let (lower, upper) = self.limits();
    return lower <= min && max <= upper;
  }
}

impl fmt::Display for IntKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    return f.write_str(self.type_name());
  }
}

/// Picks the narrowest kind holding every value. An empty column fits in
/// the narrowest kind.
pub fn infer(values: &[i64]) -> Result<IntKind> {
  let min = values.iter().copied().min().unwrap_or(0);
  let max = values.iter().copied().max().unwrap_or(0);
  return infer_range(min, max);
}

pub fn infer_range(min: i64, max: i64) -> Result<IntKind> {
  return CANDIDATES
    .iter()
    .copied()
    .find(|kind| kind.contains(min, max))
    .ok_or(Error::WidthOverflow { min, max });
}

/// Total encoded size in bytes of `tables`, each at its own inferred width.
pub fn tables_size(tables: &[&[i64]]) -> Result<usize> {
  let mut total = 0;
  for table in tables {
    total += infer(table)?.size() * table.len();
  }
  return Ok(total);
}
