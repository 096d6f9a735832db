//! List query parameters and pagination metadata.

use recipes_app::pagination::{ListParameters, Page};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::extensions::*;

pub(crate) const PAGINATION_HEADER: &str = "x-pagination";

/// Build list parameters from the `filters`, `sorts`, `page` and `page_size`
/// query parameters.
pub(crate) fn list_parameters(
    filters: QueryParam<String, false>,
    sorts: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
) -> ListParameters {
    ListParameters {
        filters: filters.into_inner(),
        sort_order: sorts.into_inner(),
        page_number: page.into_inner(),
        page_size: page_size.into_inner(),
    }
}

/// Pagination metadata returned with every list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaginationResponse {
    /// Matching records across all pages
    pub total_count: u64,

    /// Requested page size
    pub page_size: u32,

    /// Records on this page
    pub current_page_size: usize,

    /// 1-based page number
    pub current_page_number: u32,

    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> From<&Page<T>> for PaginationResponse {
    fn from(page: &Page<T>) -> Self {
        Self {
            total_count: page.total_count,
            page_size: page.page_size,
            current_page_size: page.items.len(),
            current_page_number: page.page_number,
            total_pages: page.total_pages(),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
        }
    }
}

/// Mirror pagination metadata into the `X-Pagination` header.
pub(crate) fn add_pagination_header(
    res: &mut Response,
    pagination: &PaginationResponse,
) -> Result<(), StatusError> {
    let encoded = serde_json::to_string(pagination).or_500("failed to encode pagination")?;

    res.add_header(PAGINATION_HEADER, encoded, true)
        .or_500("failed to set pagination header")?;

    Ok(())
}
