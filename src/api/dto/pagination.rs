//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};
use crate::repositories::SortOrder;

/// Query parameters for pagination.
///
/// Out-of-range values are normalized rather than rejected: page is floored
/// to 1, limit is clamped into [1, 100].
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[param(minimum = 1, example = 1)]
    pub page: u32,

    /// Number of items per page (max 100)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub limit: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    /// Floors/clamps the parameters into their valid ranges.
    pub fn normalize(mut self) -> Self {
        if self.page == 0 {
            self.page = 1;
        }
        self.limit = self.limit.clamp(1, 100);
        self
    }

    /// Calculates the offset for database queries.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// Returns the limit for database queries.
    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// Pagination metadata attached to every paginated envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    /// Current page number (1-based)
    #[schema(example = 1)]
    pub page: u32,

    /// Number of items per page
    #[schema(example = 10)]
    pub limit: u32,

    /// Total number of items across all pages
    #[schema(example = 42)]
    pub total: i64,

    /// Total number of pages
    #[schema(example = 5)]
    pub total_pages: u32,
}

impl PageMeta {
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let total = total.max(0);
        let limit = i64::from(params.limit.max(1));
        let total_pages = (total as u64).div_ceil(limit as u64) as u32;
        Self {
            page: params.page,
            limit: params.limit,
            total,
            total_pages,
        }
    }
}

/// Parses an `order` query value into a sort direction.
pub fn parse_sort_order(value: Option<&str>) -> AppResult<SortOrder> {
    match value {
        None => Ok(SortOrder::default()),
        Some(s) => match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(AppError::Validation {
                field: "order".to_string(),
                reason: format!("Unknown sort order '{}', expected 'asc' or 'desc'", other),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_page_one_limit_ten() {
        let params = PaginationParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn normalize_floors_page_and_clamps_limit() {
        let params = PaginationParams { page: 0, limit: 0 }.normalize();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 1);

        let params = PaginationParams {
            page: 3,
            limit: 1000,
        }
        .normalize();
        assert_eq!(params.page, 3);
        assert_eq!(params.limit, 100);
    }

    #[test]
    fn page_two_of_twelve_rows_with_limit_five() {
        let params = PaginationParams { page: 2, limit: 5 }.normalize();
        assert_eq!(params.offset(), 5);
        let meta = PageMeta::new(&params, 12);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.total, 12);
    }

    #[test]
    fn empty_result_set_has_zero_pages() {
        let params = PaginationParams::default().normalize();
        let meta = PageMeta::new(&params, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn parse_sort_order_accepts_both_directions() {
        assert_eq!(parse_sort_order(None).unwrap(), SortOrder::Asc);
        assert_eq!(parse_sort_order(Some("asc")).unwrap(), SortOrder::Asc);
        assert_eq!(parse_sort_order(Some("DESC")).unwrap(), SortOrder::Desc);
        assert!(parse_sort_order(Some("sideways")).is_err());
    }

    proptest! {
        /// Normalized parameters always land in their valid ranges, and the
        /// computed offset addresses the first row of the requested page.
        #[test]
        fn prop_normalized_params_are_in_range(page in 0u32..10_000, limit in 0u32..10_000) {
            let params = PaginationParams { page, limit }.normalize();
            prop_assert!(params.page >= 1);
            prop_assert!((1..=100).contains(&params.limit));
            prop_assert_eq!(
                params.offset(),
                i64::from(params.page - 1) * i64::from(params.limit)
            );
        }

        /// total_pages * limit always covers total rows, and one page less
        /// never does.
        #[test]
        fn prop_total_pages_covers_total(total in 0i64..100_000, limit in 1u32..=100) {
            let params = PaginationParams { page: 1, limit }.normalize();
            let meta = PageMeta::new(&params, total);
            let capacity = i64::from(meta.total_pages) * i64::from(limit);
            prop_assert!(capacity >= total);
            if meta.total_pages > 0 {
                prop_assert!(capacity - i64::from(limit) < total);
            }
        }
    }
}
