//! Pagination types for list endpoints.

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MIN_PAGE_VALUE};

/// Largest offset a SQL `OFFSET` (signed 64-bit) accepts
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Resolved page of a list query (1-based page number)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Resolve raw query values: missing values take the defaults, values
    /// below 1 are clamped to 1.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: clamp(page, DEFAULT_PAGE_NUMBER),
            page_size: clamp(page_size, DEFAULT_PAGE_SIZE),
        }
    }

    /// Cap the page size at `max`
    pub fn capped(self, max: u64) -> Self {
        Self {
            page_size: self.page_size.min(max.max(MIN_PAGE_VALUE)),
            ..self
        }
    }

    /// Calculate offset for database query, saturating at [`MAX_OFFSET`]
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(MAX_OFFSET)
    }

    /// Number of records on the page
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn clamp(value: Option<i64>, default: u64) -> u64 {
    match value {
        None => default,
        Some(v) if v < MIN_PAGE_VALUE as i64 => MIN_PAGE_VALUE,
        Some(v) => v as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::new(None, None);
        assert_eq!(page, PageRequest::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_non_positive_values_clamp_to_one() {
        let page = PageRequest::new(Some(0), Some(-5));
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let page = PageRequest::new(Some(3), Some(20));
        assert_eq!(page.offset(), 40);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn test_offset_saturates() {
        let page = PageRequest::new(Some(i64::MAX), Some(i64::MAX));
        assert_eq!(page.offset(), MAX_OFFSET);

        let page = PageRequest::new(Some(i64::MAX), None).capped(500);
        assert_eq!(page.offset(), MAX_OFFSET);
        assert!(page.offset() <= i64::MAX as u64);
    }

    #[test]
    fn test_offset_below_ceiling_is_exact() {
        let page = PageRequest::new(Some(1 << 40), Some(500));
        assert_eq!(page.offset(), ((1u64 << 40) - 1) * 500);
    }

    #[test]
    fn test_capped() {
        let page = PageRequest::new(Some(2), Some(10_000)).capped(500);
        assert_eq!(page.page_size, 500);
        assert_eq!(page.page, 2);

        let page = PageRequest::new(None, Some(10)).capped(500);
        assert_eq!(page.page_size, 10);
    }
}
