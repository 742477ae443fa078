//! Page windows, counts and navigation links over filtered collections.
//!
//! Collections are always windowed by identity ascending. Out-of-range inputs
//! are clamped rather than rejected, so every request maps onto some page.

use std::fmt::Write as _;

/// Page size used when the caller asks for fewer than one item per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A clamped, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

impl PageRequest {
    /// Build a request, coercing page numbers below 1 to 1 and page sizes below 1 to
    /// [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn new(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page_number: page_number.filter(|number| *number >= 1).unwrap_or(1),
            page_size: page_size
                .filter(|size| *size >= 1)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    #[must_use]
    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of items that precede the window.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of items in the window.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One window of a collection together with the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_count: i64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_count: i64) -> Self {
        Self {
            items,
            request,
            total_count,
        }
    }

    #[must_use]
    pub fn current_page(&self) -> i64 {
        self.request.page_number()
    }

    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.request.page_size()
    }

    /// `ceil(total_count / page_size)`; zero for an empty collection.
    #[must_use]
    pub fn total_pages(&self) -> i64 {
        let size = self.page_size();
        let total = self.total_count.max(0);

        total / size + i64::from(total % size != 0)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page() > 1
    }

    /// Convert the items while keeping the window metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
            total_count: self.total_count,
        }
    }
}

/// Relative navigation URLs for a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl PageLinks {
    /// Build links for `page` under `base_path`, carrying every present filter as a
    /// query parameter after `pageNumber` and `pageSize`.
    #[must_use]
    pub fn build<T>(base_path: &str, page: &Page<T>, filters: &[(&str, Option<i64>)]) -> Self {
        let url = |number: i64| page_url(base_path, number, page.page_size(), filters);
        let total_pages = page.total_pages();

        Self {
            first: Some(url(1)),
            prev: page
                .has_previous()
                .then(|| url(page.current_page() - 1)),
            next: page.has_next().then(|| url(page.current_page() + 1)),
            last: (total_pages > 0).then(|| url(total_pages)),
        }
    }

    /// Render as an RFC 5988 `Link` header value, or `None` when there are no links.
    #[must_use]
    pub fn to_link_header(&self) -> Option<String> {
        let entries: Vec<String> = [
            ("first", &self.first),
            ("prev", &self.prev),
            ("next", &self.next),
            ("last", &self.last),
        ]
        .into_iter()
        .filter_map(|(rel, url)| url.as_ref().map(|url| format!("<{url}>; rel=\"{rel}\"")))
        .collect();

        (!entries.is_empty()).then(|| entries.join(", "))
    }
}

fn page_url(base_path: &str, number: i64, size: i64, filters: &[(&str, Option<i64>)]) -> String {
    let mut url = format!("{base_path}?pageNumber={number}&pageSize={size}");

    for (name, value) in filters {
        if let Some(value) = value {
            // Writing into a String cannot fail.
            _ = write!(url, "&{name}={value}");
        }
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total_count: i64, page_number: i64, page_size: i64) -> Page<i64> {
        let request = PageRequest::new(Some(page_number), Some(page_size));
        let items = (1..=total_count)
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.limit()).unwrap_or(usize::MAX))
            .collect();

        Page::new(items, request, total_count)
    }

    #[test]
    fn request_clamps_page_number_below_one() {
        assert_eq!(PageRequest::new(Some(0), Some(5)).page_number(), 1);
        assert_eq!(PageRequest::new(Some(-3), Some(5)).page_number(), 1);
        assert_eq!(PageRequest::new(None, Some(5)).page_number(), 1);
    }

    #[test]
    fn request_defaults_page_size_below_one() {
        assert_eq!(PageRequest::new(Some(2), Some(0)).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(Some(2), Some(-1)).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(Some(2), None).page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn request_window_skips_previous_pages() {
        let request = PageRequest::new(Some(3), Some(10));

        assert_eq!(request.offset(), 20);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn request_offset_saturates() {
        let request = PageRequest::new(Some(i64::MAX), Some(i64::MAX));

        assert_eq!(request.offset(), i64::MAX);
    }

    #[test]
    fn last_partial_page_of_twenty_five() {
        let page = page_of(25, 3, 10);

        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next(), "page 3 of 3 has no next page");
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(page_of(0, 1, 10).total_pages(), 0);
        assert_eq!(page_of(1, 1, 10).total_pages(), 1);
        assert_eq!(page_of(10, 1, 10).total_pages(), 1);
        assert_eq!(page_of(11, 1, 10).total_pages(), 2);
    }

    #[test]
    fn window_never_exceeds_page_size() {
        for total in 0..30 {
            for size in 1..8 {
                for number in 1..8 {
                    let page = page_of(total, number, size);
                    let len = i64::try_from(page.items.len()).unwrap_or(i64::MAX);

                    assert!(len <= size, "window larger than page size");
                    assert_eq!(page.has_next(), number < page.total_pages());
                }
            }
        }
    }

    #[test]
    fn map_keeps_metadata() {
        let page = page_of(12, 2, 5).map(|n| n * 10);

        assert_eq!(page.items, vec![60, 70, 80, 90, 100]);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.current_page(), 2);
    }

    #[test]
    fn links_for_middle_page() {
        let page = page_of(25, 2, 10);
        let links = PageLinks::build("/api/products", &page, &[("categoryId", Some(4))]);

        assert_eq!(
            links.first.as_deref(),
            Some("/api/products?pageNumber=1&pageSize=10&categoryId=4")
        );
        assert_eq!(
            links.prev.as_deref(),
            Some("/api/products?pageNumber=1&pageSize=10&categoryId=4")
        );
        assert_eq!(
            links.next.as_deref(),
            Some("/api/products?pageNumber=3&pageSize=10&categoryId=4")
        );
        assert_eq!(
            links.last.as_deref(),
            Some("/api/products?pageNumber=3&pageSize=10&categoryId=4")
        );
    }

    #[test]
    fn links_omit_boundaries() {
        let first = PageLinks::build("/api/products", &page_of(25, 1, 10), &[]);
        let last = PageLinks::build("/api/products", &page_of(25, 3, 10), &[]);

        assert!(first.prev.is_none(), "no prev link on page 1");
        assert!(first.next.is_some());
        assert!(last.next.is_none(), "no next link on the last page");
        assert!(last.prev.is_some());
    }

    #[test]
    fn links_skip_absent_filters() {
        let links = PageLinks::build("/api/products", &page_of(5, 1, 2), &[("categoryId", None)]);

        assert_eq!(
            links.next.as_deref(),
            Some("/api/products?pageNumber=2&pageSize=2")
        );
    }

    #[test]
    fn empty_collection_has_no_last_link() {
        let links = PageLinks::build("/api/categories", &page_of(0, 1, 10), &[]);

        assert!(links.last.is_none(), "empty collection has no last page");
        assert!(links.next.is_none());
    }

    #[test]
    fn link_header_lists_present_relations() {
        let links = PageLinks::build("/api/categories", &page_of(4, 1, 2), &[]);

        assert_eq!(
            links.to_link_header().as_deref(),
            Some(
                "</api/categories?pageNumber=1&pageSize=2>; rel=\"first\", \
                 </api/categories?pageNumber=2&pageSize=2>; rel=\"next\", \
                 </api/categories?pageNumber=2&pageSize=2>; rel=\"last\""
            )
        );
    }

    #[test]
    fn link_header_absent_without_links() {
        assert!(PageLinks::default().to_link_header().is_none());
    }
}
