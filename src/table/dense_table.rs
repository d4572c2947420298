use crate::def::Column;
use crate::error::{Error, Result, Warning};
use crate::unicode::{UcdLine, UcdSource};

/// Fills per-codepoint columns from UCD sources and tracks the Unicode
/// version they declare.
pub struct DenseTableBuilder {
  len: usize,
  version: Option<String>,
  warnings: Vec<Warning>,
}

fn check_domain(len: usize, source: &UcdSource, line: &UcdLine) -> Result<()> {
  if line.last() as usize >= len {
    return Err(Error::malformed(
      source.name(),
      line.line_number(),
      format!("codepoint {:04X} is outside the table of {:#X} entries", line.last(), len),
    ));
  }
  return Ok(());
}

impl DenseTableBuilder {
  pub fn new(len: usize) -> DenseTableBuilder {
    return DenseTableBuilder {
      len,
      version: None,
      warnings: Vec::new(),
    };
  }

  /// Builds a column of `len` entries. Every line's value is computed by
  /// `value_fn` and written to each codepoint of its range that still holds
  /// `default`, so an earlier declaration is never overwritten.
  pub fn build<F>(&mut self, source: &UcdSource, mut value_fn: F, default: i64) -> Result<Column>
  where
    F: FnMut(&UcdLine) -> Result<i64>,
  {
    self.observe_version(source)?;
    let mut table = vec![default; self.len];
    for line in source.lines().iter() {
      let value = value_fn(line)?;
      check_domain(self.len, source, line)?;
      for slot in &mut table[line.first() as usize..=line.last() as usize] {
        if *slot == default {
          *slot = value;
        }
      }
    }
    tracing::debug!(source = source.name(), lines = source.lines().len(), "built dense table");
    return Ok(table);
  }

  fn observe_version(&mut self, source: &UcdSource) -> Result<()> {
    let found = match source.version() {
      Some(version) => version.to_owned(),
      None => return Err(Error::malformed(source.name(), 1, "missing '# Name-x.y.z.txt' version header")),
    };
    match &self.version {
      None => self.version = Some(found),
      Some(kept) if *kept != found => {
        let warning = Warning::VersionMismatch {
          file: source.name().to_owned(),
          kept: kept.clone(),
          found,
        };
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
      }
      Some(_) => {}
    }
    return Ok(());
  }

  /// The first version seen.
  pub fn version(&self) -> Option<&str> {
    return self.version.as_deref();
  }

  pub fn warnings(&self) -> &[Warning] {
    return &self.warnings;
  }

  pub fn len(&self) -> usize {
    return self.len;
  }

  pub fn is_empty(&self) -> bool {
    return self.len == 0;
  }
}

/// Ors `bits` into every codepoint listed with `property`.
pub fn mark_property(column: &mut Column, source: &UcdSource, property: &str, bits: i64) -> Result<usize> {
  let mut marked = 0;
  for line in source.lines_with_property(property) {
    check_domain(column.len(), source, line)?;
    for slot in &mut column[line.first() as usize..=line.last() as usize] {
      *slot |= bits;
      marked += 1;
    }
  }
  return Ok(marked);
}

/// Replaces the value of every codepoint listed with `property`. Returns the
/// codepoints whose previous value was not `expected`, with that value.
pub fn override_property(
  column: &mut Column,
  source: &UcdSource,
  property: &str,
  value: i64,
  expected: i64,
) -> Result<Vec<(u32, i64)>> {
  let mut conflicts = Vec::new();
  for line in source.lines_with_property(property) {
    check_domain(column.len(), source, line)?;
    for cp in line.codepoints() {
      let slot = &mut column[cp as usize];
      if *slot != expected {
        conflicts.push((cp, *slot));
      }
      *slot = value;
    }
  }
  return Ok(conflicts);
}
