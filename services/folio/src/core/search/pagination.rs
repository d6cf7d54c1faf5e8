//! Result pagination.

use std::ops::Range;

/// A resolved page window over `total` matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page actually served
    pub number: usize,
    pub total_pages: usize,
    /// Slice of the ranked matches to return
    pub range: Range<usize>,
}

impl Page {
    /// Resolve `requested` against `total` matches.
    ///
    /// `total_pages = ceil(total / page_size)`. The requested page is
    /// clamped into `[1, total_pages]`, or to 1 when there are no
    /// matches, so an out-of-range page returns the last page instead
    /// of nothing.
    pub fn resolve(total: usize, requested: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size);
        let number = requested.clamp(1, total_pages.max(1));

        let start = ((number - 1) * page_size).min(total);
        let end = (start + page_size).min(total);

        Self {
            number,
            total_pages,
            range: start..end,
        }
    }
}
