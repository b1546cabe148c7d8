//! Pagination query parameters and the paged response envelope.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct PaginationParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: u32,

    /// Number of items per page (max 100)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 20)]
    pub page_size: u32,
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct PaginationMeta {
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub page_size: u32,
    #[schema(example = 100)]
    pub total_items: u64,
    #[schema(example = 5)]
    pub total_pages: u32,
    #[schema(example = true)]
    pub has_next: bool,
    #[schema(example = false)]
    pub has_prev: bool,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total_items: u64) -> Self {
        let page_size = u64::from(params.page_size.max(1));
        let total_pages = u32::try_from(total_items.div_ceil(page_size)).unwrap_or(u32::MAX);

        Self {
            data,
            pagination: PaginationMeta {
                page: params.page,
                page_size: params.page_size,
                total_items,
                total_pages,
                has_next: params.page < total_pages,
                has_prev: params.page > 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 20);
        assert_eq!(params.offset(), 0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let zero_page = PaginationParams {
            page: 0,
            page_size: 20,
        };
        assert!(zero_page.validate().is_err());

        let huge = PaginationParams {
            page: 1,
            page_size: MAX_PAGE_SIZE + 1,
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_empty_result_meta() {
        let paged = PagedResponse::<i32>::new(vec![], &PaginationParams::default(), 0);
        assert_eq!(paged.pagination.total_pages, 0);
        assert!(!paged.pagination.has_next);
        assert!(!paged.pagination.has_prev);
    }

    proptest! {
        #[test]
        fn prop_pages_cover_all_items(
            page in 1u32..50,
            page_size in 1u32..=MAX_PAGE_SIZE,
            total in 0u64..10_000,
        ) {
            let params = PaginationParams { page, page_size };
            let meta = PagedResponse::<()>::new(vec![], &params, total).pagination;

            prop_assert!(u64::from(meta.total_pages) * u64::from(page_size) >= total);
            prop_assert!(u64::from(meta.total_pages.saturating_sub(1)) * u64::from(page_size) < total.max(1));
            prop_assert_eq!(meta.has_next, page < meta.total_pages);
            prop_assert_eq!(params.offset(), i64::from(page - 1) * i64::from(page_size));
        }
    }
}
