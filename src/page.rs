use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Derived pagination state for one page of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub can_prev: bool,
    pub can_next: bool,
}

/// Compute the 1-based page position from a zero-based skip offset.
/// `total_pages` is floored to 1 for display even when `total` is zero;
/// `can_next` uses the real page count so the empty state cannot advance.
pub fn paginate(total: usize, limit: usize, skip: usize) -> Result<PageInfo, StatsError> {
    if limit == 0 {
        return Err(StatsError::InvalidLimit(0));
    }
    Ok(page_info(total, limit, skip))
}

// limit must already be validated positive
fn page_info(total: usize, limit: usize, skip: usize) -> PageInfo {
    let current_page = skip / limit + 1;
    let page_count = total.div_ceil(limit);
    PageInfo {
        current_page,
        total_pages: page_count.max(1),
        can_prev: current_page > 1,
        can_next: current_page < page_count,
    }
}

/// Clamped page window over a slice. An out-of-range skip yields an empty
/// window instead of panicking.
pub fn window<T>(items: &[T], limit: usize, skip: usize) -> &[T] {
    let start = skip.min(items.len());
    let end = skip.saturating_add(limit).min(items.len());
    &items[start..end]
}

/// Caller-owned pager state. Construction validates the limit once, so the
/// derived math never divides by zero, and changing the page size always
/// returns to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    skip: usize,
    limit: usize,
}

impl Pager {
    pub fn new(limit: usize) -> Result<Self, StatsError> {
        if limit == 0 {
            return Err(StatsError::InvalidLimit(0));
        }
        Ok(Self { skip: 0, limit })
    }

    /// Validate raw query parameters the way the list endpoints receive
    /// them. Negative values are caller errors, not clamped silently.
    pub fn from_wire(limit: i64, skip: i64) -> Result<Self, StatsError> {
        if limit <= 0 {
            return Err(StatsError::InvalidLimit(limit));
        }
        if skip < 0 {
            return Err(StatsError::InvalidSkip(skip));
        }
        Ok(Self {
            skip: skip as usize,
            limit: limit as usize,
        })
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn info(&self, total: usize) -> PageInfo {
        page_info(total, self.limit, self.skip)
    }

    /// Advance one page unless already on the last page for `total` rows.
    pub fn next(&mut self, total: usize) {
        if self.info(total).can_next {
            self.skip += self.limit;
        }
    }

    pub fn prev(&mut self) {
        self.skip = self.skip.saturating_sub(self.limit);
    }

    /// Change the page size. Always returns to the first page; an invalid
    /// limit leaves the previous state untouched.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), StatsError> {
        if limit == 0 {
            return Err(StatsError::InvalidLimit(0));
        }
        self.limit = limit;
        self.skip = 0;
        Ok(())
    }

    /// Back to the first page, keeping the page size. Filter changes use
    /// this.
    pub fn reset(&mut self) {
        self.skip = 0;
    }
}
