use super::type_width::tables_size;
use crate::def::Column;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::mpsc::channel;
use std::sync::Arc;
use threadpool::ThreadPool;

/// A two level lookup table. `stage1` holds, per block of `block_size`
/// codepoints, the index of that block's content in `stage2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwoStageTable {
  block_size: usize,
  stage1: Column,
  stage2: Column,
}

impl TwoStageTable {
  pub fn block_size(&self) -> usize {
    return self.block_size;
  }

  pub fn stage1(&self) -> &[i64] {
    return &self.stage1;
  }

  pub fn stage2(&self) -> &[i64] {
    return &self.stage2;
  }

  pub fn lookup(&self, codepoint: usize) -> i64 {
    let block = self.stage1[codepoint / self.block_size] as usize;
    return self.stage2[block * self.block_size + codepoint % self.block_size];
  }

  /// Bytes taken by both stages at their inferred widths.
  pub fn size(&self) -> Result<usize> {
    return tables_size(&[&self.stage1[..], &self.stage2[..]]);
  }
}

/// Splits `ids` into blocks of `block_size` and stores each distinct block
/// content once.
pub fn compress(ids: &[i64], block_size: usize) -> TwoStageTable {
  let mut blocks: HashMap<&[i64], i64> = HashMap::new();
  let mut stage1 = Vec::with_capacity((ids.len() + block_size - 1) / block_size);
  let mut stage2 = Vec::new();
  for block in ids.chunks(block_size) {
    let start = match blocks.get(block) {
      Some(start) => *start,
      None => {
        let start = (stage2.len() / block_size) as i64;
        stage2.extend_from_slice(block);
        blocks.insert(block, start);
        start
      }
    };
    stage1.push(start);
  }
  return TwoStageTable {
    block_size,
    stage1,
    stage2,
  };
}

/// Result of trying every candidate block size.
#[derive(Clone, Debug)]
pub struct BlockSizeSearch {
  best: TwoStageTable,
  total_size: usize,
  candidate_sizes: Vec<(usize, usize)>,
}

impl BlockSizeSearch {
  pub fn best(&self) -> &TwoStageTable {
    return &self.best;
  }

  pub fn into_best(self) -> TwoStageTable {
    return self.best;
  }

  /// Record table plus both stages of the chosen block size.
  pub fn total_size(&self) -> usize {
    return self.total_size;
  }

  /// `(block size, total size)` for every candidate, in candidate order.
  pub fn candidate_sizes(&self) -> &[(usize, usize)] {
    return &self.candidate_sizes;
  }
}

fn evaluate(ids: &[i64], block_size: usize, record_table_size: usize) -> Result<(TwoStageTable, usize)> {
  let table = compress(ids, block_size);
  let size = record_table_size + table.size()?;
  return Ok((table, size));
}

/// Compresses `ids` with every candidate block size and keeps the smallest
/// total; the earliest candidate wins a tie.
pub fn search_block_size(
  ids: &[i64],
  candidates: &[usize],
  record_table_size: usize,
  parallel: bool,
) -> Result<BlockSizeSearch> {
  if candidates.is_empty() {
    return Err(Error::NoBlockSizes);
  }

  let results = if parallel && candidates.len() > 1 {
    search_in_pool(ids, candidates, record_table_size)?
  } else {
    candidates
      .iter()
      .map(|block_size| evaluate(ids, *block_size, record_table_size))
      .collect::<Result<Vec<_>>>()?
  };

  let mut candidate_sizes = Vec::with_capacity(results.len());
  let mut best: Option<(TwoStageTable, usize)> = None;
  for (table, size) in results {
    tracing::debug!(block_size = table.block_size(), size, "block size candidate");
    candidate_sizes.push((table.block_size(), size));
    let better = match &best {
      Some((_, best_size)) => size < *best_size,
      None => true,
    };
    if better {
      best = Some((table, size));
    }
  }

  return match best {
    Some((best, total_size)) => Ok(BlockSizeSearch {
      best,
      total_size,
      candidate_sizes,
    }),
    None => Err(Error::SearchAborted(candidates[0])),
  };
}

fn search_in_pool(ids: &[i64], candidates: &[usize], record_table_size: usize) -> Result<Vec<(TwoStageTable, usize)>> {
  let snapshot: Arc<[i64]> = Arc::from(ids);
  let workers = std::thread::available_parallelism()
    .map(|n| n.get())
    .unwrap_or(1)
    .min(candidates.len());
  let pool = ThreadPool::new(workers);
  let (tx, rx) = channel();
  for (slot, block_size) in candidates.iter().copied().enumerate() {
    let tx = tx.clone();
    let ids = Arc::clone(&snapshot);
    pool.execute(move || {
      let _ = tx.send((slot, evaluate(&ids, block_size, record_table_size)));
    });
  }
  drop(tx);
  pool.join();

  let mut slots: Vec<Option<Result<(TwoStageTable, usize)>>> = candidates.iter().map(|_| None).collect();
  for (slot, result) in rx.iter() {
    slots[slot] = Some(result);
  }
  let mut results = Vec::with_capacity(candidates.len());
  for (slot, result) in slots.into_iter().enumerate() {
    match result {
      Some(result) => results.push(result?),
      None => return Err(Error::SearchAborted(candidates[slot])),
    }
  }
  return Ok(results);
}
