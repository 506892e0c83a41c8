//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use domain::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_NUMBER, MAX_PAGE_SIZE};

/// Pagination query parameters shared by every list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Page number, treating 0 as the first page
    pub fn page(&self) -> u64 {
        self.page.clamp(1, MAX_PAGE_NUMBER)
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total: u64) -> Self {
        let per_page = params.limit();
        Self {
            data,
            meta: PaginationMeta {
                page: params.page(),
                per_page,
                total,
                total_pages: total.div_ceil(per_page),
            },
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u64, per_page: u64) -> PaginationParams {
        PaginationParams { page, per_page }
    }

    #[test]
    fn test_offset_and_limit() {
        assert_eq!(params(1, 15).offset(), 0);
        assert_eq!(params(3, 10).offset(), 20);
        assert_eq!(params(0, 10).offset(), 0);
        assert_eq!(params(1, 5000).limit(), MAX_PAGE_SIZE);
        assert_eq!(params(1, 0).limit(), 1);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let p = params(u64::MAX, u64::MAX);
        assert_eq!(p.page(), MAX_PAGE_NUMBER);
        assert_eq!(p.offset(), (MAX_PAGE_NUMBER - 1) * MAX_PAGE_SIZE);
        assert!(p.offset() <= i64::MAX as u64);

        let page: Paginated<u8> = Paginated::new(vec![], &p, 3);
        assert_eq!(page.meta.page, MAX_PAGE_NUMBER);
        assert_eq!(page.meta.total_pages, 1);
    }

    #[test]
    fn test_meta() {
        let page: Paginated<u8> = Paginated::new(vec![1, 2], &params(2, 10), 21);
        assert_eq!(
            page.meta,
            PaginationMeta {
                page: 2,
                per_page: 10,
                total: 21,
                total_pages: 3
            }
        );
        assert_eq!(Paginated::<u8>::new(vec![], &params(1, 10), 0).meta.total_pages, 0);
    }

    #[test]
    fn test_query_defaults() {
        let p: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p.page, DEFAULT_PAGE_NUMBER);
        assert_eq!(p.per_page, DEFAULT_PAGE_SIZE);
    }
}
