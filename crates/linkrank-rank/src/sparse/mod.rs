//! Compacted sparse row matrices.
//!
//! # Layout
//!
//! A [`CompactRows`] matrix stores only rows that have at least one entry:
//!
//! - `values`: every row's column entries back to back,
//! - `row_offsets`: `rows + 1` boundaries; row `r` is
//!   `values[row_offsets[r]..row_offsets[r + 1]]`,
//! - `row_ids`: node index of each stored row.
//!
//! Invariants (checked by [`CompactRows::check_invariants`]):
//! `row_offsets[0] == 0`, `row_offsets` strictly increasing,
//! `row_offsets[last] == values.len()`, `row_ids.len() == rows`,
//! `row_ids` strictly increasing. Bounds are enforced through these
//! offsets, never by trusting external memory layout.
//!
//! # Submodules
//!
//! - [`adjacency`]: forward adjacency and its transpose from an edge list.
//! - [`corelation`]: co-citation (`L·Lᵀ`) and co-reference (`Lᵀ·L`) counts.

pub mod adjacency;
pub mod corelation;

pub(crate) use linkrank_core::error::reserve;

/// Row-compacted sparse matrix whose entries are node indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactRows {
    pub(crate) values: Vec<u32>,
    pub(crate) row_offsets: Vec<usize>,
    pub(crate) row_ids: Vec<u32>,
}

impl Default for CompactRows {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            row_offsets: vec![0],
            row_ids: Vec::new(),
        }
    }
}

impl CompactRows {
    /// Number of stored (non-empty) rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_ids.len()
    }

    /// Total number of entries across all rows.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    #[must_use]
    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    #[must_use]
    pub fn row_ids(&self) -> &[u32] {
        &self.row_ids
    }

    /// Entries of compacted row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    #[must_use]
    pub fn row(&self, r: usize) -> &[u32] {
        &self.values[self.row_offsets[r]..self.row_offsets[r + 1]]
    }

    /// Compacted row index holding node index `node`, if that node has a row.
    #[must_use]
    pub fn position_of(&self, node: u32) -> Option<usize> {
        self.row_ids.binary_search(&node).ok()
    }

    /// Entries of the row for node index `node`; empty if it has none.
    #[must_use]
    pub fn row_of(&self, node: u32) -> &[u32] {
        match self.position_of(node) {
            Some(r) => self.row(r),
            None => &[],
        }
    }

    /// `(node index, entries)` for every stored row in compacted order.
    pub fn iter_rows(&self) -> impl Iterator<Item = (u32, &[u32])> + '_ {
        self.row_ids
            .iter()
            .enumerate()
            .map(|(r, &id)| (id, self.row(r)))
    }

    /// Verify the layout invariants listed in the module docs.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), String> {
        check_layout(&self.row_offsets, &self.row_ids, self.values.len())
    }
}

pub(crate) fn check_layout(
    row_offsets: &[usize],
    row_ids: &[u32],
    value_count: usize,
) -> Result<(), String> {
    if row_offsets.first() != Some(&0) {
        return Err("row_offsets must start at 0".to_string());
    }
    if row_offsets.len() != row_ids.len() + 1 {
        return Err(format!(
            "{} row offsets for {} rows",
            row_offsets.len(),
            row_ids.len()
        ));
    }
    if row_offsets.last() != Some(&value_count) {
        return Err(format!(
            "last row offset {:?} != value count {value_count}",
            row_offsets.last()
        ));
    }
    if let Some(w) = row_offsets.windows(2).find(|w| w[0] >= w[1]) {
        return Err(format!("row_offsets not strictly increasing at {w:?}"));
    }
    if let Some(w) = row_ids.windows(2).find(|w| w[0] >= w[1]) {
        return Err(format!("row_ids not strictly increasing at {w:?}"));
    }
    Ok(())
}
