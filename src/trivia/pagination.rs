use super::error::{Error, Result};

pub const DEFAULT_QUESTIONS_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    per_page: u32,
}

/// The rows a page covers, as SQL `LIMIT`/`OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_QUESTIONS_PER_PAGE,
        }
    }
}

impl Pagination {
    /// `None` for a zero page size.
    pub fn new(per_page: u32) -> Option<Self> {
        (per_page > 0).then_some(Self { per_page })
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Resolves a 1-based `page` against a result set of `total` rows.
    ///
    /// Page 1 always exists, even for an empty set. Any later page must start inside the set.
    pub fn window(&self, page: i64, total: i64) -> Result<Window> {
        if page < 1 {
            return Err(Error::PageOutOfRange(page));
        }
        let limit = i64::from(self.per_page);
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or(Error::PageOutOfRange(page))?;
        if page > 1 && offset >= total {
            return Err(Error::PageOutOfRange(page));
        }
        Ok(Window { limit, offset })
    }
}
