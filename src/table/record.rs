use super::type_width::{infer, IntKind};
use crate::def::Column;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// One value per column, in column order.
pub type Record = Vec<i64>;

/// Unique records in id order, with the reverse lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordTable {
  records: Vec<Record>,
  ids: HashMap<Record, u32>,
}

impl RecordTable {
  pub fn new() -> RecordTable {
    return RecordTable::default();
  }

  /// Returns the id of `record`, allocating the next id if it is new.
  pub fn intern(&mut self, record: &[i64]) -> u32 {
    if let Some(id) = self.ids.get(record) {
      return *id;
    }
    let id = self.records.len() as u32;
    self.records.push(record.to_vec());
    self.ids.insert(record.to_vec(), id);
    return id;
  }

  pub fn get(&self, record: &[i64]) -> Option<u32> {
    return self.ids.get(record).copied();
  }

  pub fn records(&self) -> &[Record] {
    return &self.records;
  }

  pub fn len(&self) -> usize {
    return self.records.len();
  }

  pub fn is_empty(&self) -> bool {
    return self.records.is_empty();
  }

  /// Values of one field across all records.
  pub fn field(&self, index: usize) -> Column {
    return self.records.iter().map(|r| r[index]).collect();
  }
}

/// Zips parallel columns into records and replaces each codepoint by the
/// id of its record.
pub fn combine(columns: &[&[i64]]) -> Result<(Column, RecordTable)> {
  let len = columns.first().map(|c| c.len()).unwrap_or(0);
  if let Some(column) = columns.iter().find(|c| c.len() != len) {
    return Err(Error::ColumnLength {
      expected: len,
      found: column.len(),
    });
  }

  let mut table = RecordTable::new();
  let mut ids = Vec::with_capacity(len);
  let mut key = vec![0_i64; columns.len()];
  for cp in 0..len {
    for (slot, column) in key.iter_mut().zip(columns.iter()) {
      *slot = column[cp];
    }
    ids.push(table.intern(&key) as i64);
  }
  return Ok((ids, table));
}

/// Field kinds and padded size of a record laid out as a C struct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLayout {
  fields: Vec<IntKind>,
  size: usize,
}

fn align_up(offset: usize, align: usize) -> usize {
  return (offset + align - 1) & !(align - 1);
}

impl RecordLayout {
  /// Every field is aligned to its own width; the total is rounded up so
  /// the first field of the next record is aligned again.
  pub fn compute(table: &RecordTable) -> Result<RecordLayout> {
    let field_count = table.records().first().map(|r| r.len()).unwrap_or(0);
    let mut fields = Vec::with_capacity(field_count);
    let mut size = 0;
    for i in 0..field_count {
      let kind = infer(&table.field(i))?;
      size = align_up(size, kind.size()) + kind.size();
      fields.push(kind);
    }
    if let Some(first) = fields.first() {
      size = align_up(size, first.size());
    }
    return Ok(RecordLayout { fields, size });
  }

  pub fn fields(&self) -> &[IntKind] {
    return &self.fields;
  }

  pub fn size(&self) -> usize {
    return self.size;
  }

  /// Bytes taken by `count` records.
  pub fn table_size(&self, count: usize) -> usize {
    return self.size * count;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn table_of(records: &[&[i64]]) -> RecordTable {
    let mut table = RecordTable::new();
    for r in records {
      table.intern(r);
    }
    return table;
  }

  #[test]
  fn combine_interns_tuples_test() {
    let script = vec![1, 1, 2, 1, 2];
    let category = vec![5, 5, 5, 6, 5];
    let (ids, records) = combine(&[&script, &category]).unwrap();
    assert_eq!(ids, vec![0, 0, 1, 2, 1]);
    assert_eq!(records.len(), 3);
    assert_eq!(records.records(), &[vec![1, 5], vec![2, 5], vec![1, 6]]);
    assert_eq!(records.get(&[2, 5]), Some(1));
    assert_eq!(records.get(&[2, 6]), None);
  }

  #[test]
  fn combine_reconstructs_columns_test() {
    let a = (0..100).map(|i| i % 7).collect::<Vec<i64>>();
    let b = (0..100).map(|i| -(i % 3)).collect::<Vec<i64>>();
    let (ids, records) = combine(&[&a, &b]).unwrap();
    for cp in 0..100 {
      let record = &records.records()[ids[cp] as usize];
      assert_eq!(record[0], a[cp]);
      assert_eq!(record[1], b[cp]);
    }
    assert_eq!(records.len(), 21);
  }

  #[test]
  fn combine_column_length_mismatch_test() {
    let script = vec![1, 1, 2];
    let category = vec![5, 5];
    match combine(&[&script, &category]) {
      Err(Error::ColumnLength { expected, found }) => assert_eq!((expected, found), (3, 2)),
      other => panic!("expected a length mismatch, got {:?}", other.map(|(ids, _)| ids)),
    }
  }

  #[test_case(&[&[3], &[6], &[6], &[1]], 1)]
  #[test_case(&[&[300], &[600], &[600], &[100]], 2)]
  #[test_case(&[&[25, 3], &[6, 6], &[34, 6], &[68, 1]], 2)]
  #[test_case(&[&[300, 3], &[6, 6], &[340, 6], &[690, 1]], 4)]
  #[test_case(&[&[3, 300], &[6, 6], &[6, 340], &[1, 690]], 4)]
  #[test_case(&[&[300, 300], &[6, 6], &[6, 340], &[1, 690]], 4)]
  #[test_case(&[&[3, 100000], &[6, 6], &[6, 123456], &[1, 690]], 8)]
  #[test_case(&[&[100000, 300], &[6, 6], &[123456, 6], &[1, 690]], 8)]
  fn record_layout_size_test(records: &[&[i64]], expected: usize) {
    let layout = RecordLayout::compute(&table_of(records)).unwrap();
    assert_eq!(layout.size(), expected);
    assert_eq!(layout.table_size(records.len()), expected * records.len());
  }

  #[test]
  fn record_layout_field_kinds_test() {
    let layout = RecordLayout::compute(&table_of(&[&[1, -5, 70000], &[2, 100, 0]])).unwrap();
    assert_eq!(layout.fields(), &[IntKind::U8, IntKind::I8, IntKind::U32]);
    assert_eq!(layout.size(), 8);
  }
}
