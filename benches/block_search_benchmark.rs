#[macro_use]
extern crate criterion;

use criterion::Criterion;
use ucd_compiler::def::*;
use ucd_compiler::table::{combine, compress, search_block_size};

/// Property ids shaped like real data: long runs of identical blocks with a
/// few busy regions.
fn sample_ids() -> Column {
  let len = MAX_CODEPOINT as usize;
  let script = (0..len)
    .map(|cp| match cp {
      0x0000..=0x02FF => (cp / 0x80) as i64,
      0x0370..=0x1FFF => 4 + (cp / 0x100) as i64,
      0x4E00..=0x9FFF => 40,
      0xAC00..=0xD7A3 => 41,
      _ => 0,
    })
    .collect::<Column>();
  let category = (0..len).map(|cp| (cp % 7) as i64 * (cp < 0x3000) as i64).collect::<Column>();
  let (ids, _) = combine(&[&script, &category]).unwrap();
  return ids;
}

fn bench(c: &mut Criterion) {
  let ids = sample_ids();
  c.bench_function("compress with block size 128", |b| b.iter(|| compress(&ids, 128)));
  c.bench_function("sequential block size search", |b| {
    b.iter(|| search_block_size(&ids, &DEFAULT_BLOCK_SIZES, 0, false).unwrap())
  });
  c.bench_function("parallel block size search", |b| {
    b.iter(|| search_block_size(&ids, &DEFAULT_BLOCK_SIZES, 0, true).unwrap())
  });
}

criterion_group!(benches, bench);
criterion_main!(benches);
