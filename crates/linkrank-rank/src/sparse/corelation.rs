//! Co-citation and co-reference matrices.
//!
//! # Definition
//!
//! For a row-compacted matrix `M`, the co-relation of rows `r` and `j` is
//!
//! ```text
//! C[r][j] = |{ e ∈ row j : e ∈ set(row r) }|
//! ```
//!
//! Entries of row `j` count with multiplicity; membership in row `r` is
//! set membership. Zero counts are not stored.
//!
//! - **Co-citation** ([`co_citation`]) uses the forward rows: `C = L·Lᵀ`,
//!   how many destinations two sources share. Drives the hub update.
//! - **Co-reference** ([`co_reference`]) uses the transpose rows:
//!   `C = Lᵀ·L`, how many sources two destinations share. Drives the
//!   authority update.
//!
//! # Algorithm
//!
//! Pairwise scanning every row against every other row is `O(R²·D)`.
//! Instead, for row `r` we walk each distinct column `c` of `r` into the
//! opposite matrix (which lists, for `c`, every row containing it, once per
//! occurrence) and bump a dense per-row counter. Touched counters are then
//! emitted in compacted row order and reset. The counts are identical to
//! the pairwise scan, which is kept as [`corelate_naive`] for tests.

use std::collections::HashSet;

use fixedbitset::FixedBitSet;
use linkrank_core::RankError;
use tracing::{debug, instrument};

use super::adjacency::Adjacency;
use super::{CompactRows, check_layout, reserve};

/// Sparse matrix of shared-neighbour counts in compacted row layout.
///
/// Row `r` belongs to node index `row_ids[r]`. Entry `i` holds the count
/// `counts[i]` at column node index `columns[i]`; columns within a row are
/// ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoRelation {
    columns: Vec<u32>,
    counts: Vec<u32>,
    row_offsets: Vec<usize>,
    row_ids: Vec<u32>,
}

impl CoRelation {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_ids.len()
    }

    /// Number of stored (non-zero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn row_ids(&self) -> &[u32] {
        &self.row_ids
    }

    #[must_use]
    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    #[must_use]
    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    /// `(column node index, count)` entries of compacted row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    pub fn row(&self, r: usize) -> impl Iterator<Item = (u32, u32)> + '_ {
        let span = self.row_offsets[r]..self.row_offsets[r + 1];
        self.columns[span.clone()]
            .iter()
            .copied()
            .zip(self.counts[span].iter().copied())
    }

    /// Column node index of flat entry `entry`.
    ///
    /// # Panics
    ///
    /// Panics if `entry >= self.nnz()`.
    #[must_use]
    pub fn node_at(&self, entry: usize) -> u32 {
        self.columns[entry]
    }

    /// Count stored for the node pair, 0 when absent.
    #[must_use]
    pub fn get(&self, row_node: u32, column_node: u32) -> u32 {
        let Ok(r) = self.row_ids.binary_search(&row_node) else {
            return 0;
        };
        let span = self.row_offsets[r]..self.row_offsets[r + 1];
        self.columns[span.clone()]
            .binary_search(&column_node)
            .map_or(0, |i| self.counts[span.start + i])
    }

    /// Sum of the counts in compacted row `r`.
    #[must_use]
    pub fn row_sum(&self, r: usize) -> u64 {
        self.row(r).map(|(_, c)| u64::from(c)).sum()
    }

    /// Sparse matrix–vector product over node indices:
    /// `output[row_ids[r]] += Σ count · input[column]`.
    ///
    /// `output` is accumulated into, not cleared; nodes without a row are
    /// left untouched.
    pub fn multiply_into(&self, input: &[f64], output: &mut [f64]) {
        for (r, &node) in self.row_ids.iter().enumerate() {
            let acc: f64 = self
                .row(r)
                .map(|(column, count)| f64::from(count) * input[column as usize])
                .sum();
            output[node as usize] += acc;
        }
    }

    /// Verify the compacted layout invariants, plus: every count is
    /// positive and columns are strictly ascending within each row.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), String> {
        check_layout(&self.row_offsets, &self.row_ids, self.counts.len())?;
        if self.columns.len() != self.counts.len() {
            return Err(format!(
                "{} columns for {} counts",
                self.columns.len(),
                self.counts.len()
            ));
        }
        if self.counts.contains(&0) {
            return Err("zero count stored".to_string());
        }
        for r in 0..self.rows() {
            let cols = &self.columns[self.row_offsets[r]..self.row_offsets[r + 1]];
            if cols.windows(2).any(|w| w[0] >= w[1]) {
                return Err(format!("columns of row {r} not strictly ascending"));
            }
        }
        Ok(())
    }
}

/// Co-citation matrix `L·Lᵀ` over the forward rows.
///
/// # Errors
///
/// Returns [`RankError::AllocationFailure`] if the scratch or output
/// buffers cannot be reserved.
#[instrument(skip(adj), fields(rows = adj.forward().rows()))]
pub fn co_citation(adj: &Adjacency) -> Result<CoRelation, RankError> {
    corelate(adj.forward(), adj.transpose(), adj.node_count(), "co-citation")
}

/// Co-reference matrix `Lᵀ·L` over the transpose rows.
///
/// # Errors
///
/// Returns [`RankError::AllocationFailure`] if the scratch or output
/// buffers cannot be reserved.
#[instrument(skip(adj), fields(rows = adj.transpose().rows()))]
pub fn co_reference(adj: &Adjacency) -> Result<CoRelation, RankError> {
    corelate(adj.transpose(), adj.forward(), adj.node_count(), "co-reference")
}

/// Co-relation of `rows`, using `inverted` (its transpose) as the index
/// from a column to the rows containing it.
fn corelate(
    rows: &CompactRows,
    inverted: &CompactRows,
    node_count: usize,
    what: &'static str,
) -> Result<CoRelation, RankError> {
    let row_count = rows.rows();

    let mut scratch: Vec<u32> = Vec::new();
    reserve(&mut scratch, row_count, "co-relation scratch")?;
    scratch.resize(row_count, 0);

    let mut touched: Vec<usize> = Vec::new();
    reserve(&mut touched, row_count, "co-relation scratch")?;

    let bound = entry_upper_bound(inverted, row_count)?;
    let mut columns = Vec::new();
    reserve(&mut columns, bound, what)?;
    let mut counts = Vec::new();
    reserve(&mut counts, bound, what)?;
    let mut row_offsets = Vec::new();
    reserve(&mut row_offsets, row_count + 1, what)?;
    row_offsets.push(0);

    let mut seen = seen_set(node_count)?;

    for r in 0..row_count {
        let row = rows.row(r);
        for &column in row {
            if seen.put(column as usize) {
                continue;
            }
            for &holder in inverted.row_of(column) {
                if let Some(j) = rows.position_of(holder) {
                    if scratch[j] == 0 {
                        touched.push(j);
                    }
                    scratch[j] += 1;
                }
            }
        }
        for &column in row {
            seen.set(column as usize, false);
        }

        touched.sort_unstable();
        for &j in &touched {
            columns.push(rows.row_ids[j]);
            counts.push(scratch[j]);
            scratch[j] = 0;
        }
        touched.clear();
        row_offsets.push(counts.len());
    }

    columns.shrink_to_fit();
    counts.shrink_to_fit();

    debug!(what, rows = row_count, nnz = counts.len(), reserved = bound, "co-relation built");

    Ok(CoRelation {
        columns,
        counts,
        row_offsets,
        row_ids: rows.row_ids.clone(),
    })
}

/// Upper bound on stored entries: every pair of rows sharing a column
/// `c` is counted once per `c`, and there are at most `rows²` pairs.
///
/// Holders of `c` are counted once each, however many parallel edges tie
/// them to `c`.
fn entry_upper_bound(inverted: &CompactRows, row_count: usize) -> Result<usize, RankError> {
    let widest = (0..inverted.rows())
        .map(|c| inverted.row(c).len())
        .max()
        .unwrap_or(0);
    let mut holders: Vec<u32> = Vec::new();
    reserve(&mut holders, widest, "co-relation scratch")?;

    let mut pairs = 0usize;
    for c in 0..inverted.rows() {
        holders.clear();
        holders.extend_from_slice(inverted.row(c));
        holders.sort_unstable();
        holders.dedup();
        let d = holders.len();
        pairs = pairs.saturating_add(d.saturating_mul(d));
    }
    Ok(pairs.min(row_count.saturating_mul(row_count)))
}

/// Empty bit set over `node_count` node indices, with its blocks reserved
/// fallibly.
fn seen_set(node_count: usize) -> Result<FixedBitSet, RankError> {
    let block_count = node_count.div_ceil(u32::BITS as usize);
    let mut blocks: Vec<u32> = Vec::new();
    reserve(&mut blocks, block_count, "co-relation scratch")?;
    blocks.resize(block_count, 0);
    Ok(FixedBitSet::with_capacity_and_blocks(node_count, blocks))
}

/// Reference pairwise scan: for every row `r` and every row `j`, count the
/// entries of `j` that are members of `set(r)`.
///
/// Quadratic in the number of rows; intended for cross-checking
/// [`co_citation`] and [`co_reference`] on small graphs.
#[must_use]
pub fn corelate_naive(rows: &CompactRows) -> CoRelation {
    let mut columns = Vec::new();
    let mut counts = Vec::new();
    let mut row_offsets = vec![0];

    for r in 0..rows.rows() {
        let members: HashSet<u32> = rows.row(r).iter().copied().collect();
        for j in 0..rows.rows() {
            let overlap = rows.row(j).iter().filter(|e| members.contains(e)).count();
            if overlap > 0 {
                columns.push(rows.row_ids[j]);
                counts.push(u32::try_from(overlap).unwrap_or(u32::MAX));
            }
        }
        row_offsets.push(counts.len());
    }

    CoRelation {
        columns,
        counts,
        row_offsets,
        row_ids: rows.row_ids.clone(),
    }
}
