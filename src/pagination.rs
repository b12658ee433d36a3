//! Page-based listing support for the collection endpoints.

use serde::Serialize;

/// Page size applied when the `size` query parameter is absent.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Pagination parameters supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Row offset for the current page. Saturates instead of overflowing so
    /// an absurd page number from the query string cannot panic.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Offset clamped into the range accepted by a SQL `OFFSET` clause.
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }
}

/// One page of items together with paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: usize, pagination: Pagination) -> Self {
        let per_page = pagination.per_page.max(1);
        Self {
            items,
            page: pagination.page.max(1),
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_offset_from_page() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
        // Page 0 is clamped to the first page.
        assert_eq!(Pagination::new(0, 10).offset(), 0);
    }

    #[test]
    fn huge_page_numbers_saturate_instead_of_overflowing() {
        let pagination = Pagination::new(usize::MAX, 10);
        assert_eq!(pagination.offset(), usize::MAX);
        assert_eq!(pagination.sql_offset(), i64::MAX);
    }

    #[test]
    fn computes_total_pages() {
        let page = Paginated::new(vec![1, 2, 3], 21, Pagination::new(1, 10));
        assert_eq!(page.total_pages, 3);
    }
}
