//! Slice the fused ranking into one page.

use crate::types::{FusedResult, SearchResult};

/// Take `fused[offset..offset + limit]` and attach the authoritative `total`.
///
/// The fused list only covers the backends' bounded windows, so the page may
/// hold fewer than `limit` items even when `total` is large. `total` is never
/// derived from `fused.len()`.
pub fn paginate(fused: Vec<FusedResult>, total: u64, limit: usize, offset: usize) -> SearchResult {
    let items = fused
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|r| r.content)
        .collect();

    SearchResult {
        items,
        total,
        limit,
        offset,
    }
}
