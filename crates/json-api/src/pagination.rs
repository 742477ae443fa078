//! Paginated list envelope and `Link` header.

use salvo::{http::header::LINK, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use northwind_app::pagination::{Page, PageLinks, PageRequest};

use crate::extensions::*;

/// Window metadata returned alongside every list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationResponse {
    /// 1-based page number actually served
    pub current_page: i64,

    /// Page size actually served
    pub page_size: i64,

    /// Items in the filtered collection
    pub total_count: i64,

    /// `ceil(totalCount / pageSize)`
    pub total_pages: i64,

    /// Relative URL of the next page, absent on the last page
    pub next_page_url: Option<String>,
}

/// Read `pageNumber` and `pageSize`; missing or malformed values fall back to the defaults.
pub(crate) fn page_request(req: &Request) -> PageRequest {
    PageRequest::new(req.query::<i64>("pageNumber"), req.query::<i64>("pageSize"))
}

/// Build the metadata for `page` and attach the matching `Link` header.
pub(crate) fn paginate<T>(
    res: &mut Response,
    base_path: &str,
    page: &Page<T>,
    filters: &[(&str, Option<i64>)],
) -> Result<PaginationResponse, StatusError> {
    let links = PageLinks::build(base_path, page, filters);

    if let Some(link_header) = links.to_link_header() {
        res.add_header(LINK, link_header, true)
            .or_500("failed to set link header")?;
    }

    Ok(PaginationResponse {
        current_page: page.current_page(),
        page_size: page.page_size(),
        total_count: page.total_count,
        total_pages: page.total_pages(),
        next_page_url: links.next,
    })
}
