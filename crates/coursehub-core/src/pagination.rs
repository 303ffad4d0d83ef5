//! Pagination for list endpoints.
//!
//! Every list endpoint is page-based: the client sends a 1-indexed
//! `pageNumber`, the server applies a fixed page size and answers with a
//! [`PaginatedList`] carrying the rows of that page plus its [`PageMeta`].
//!
//! # Semantics
//!
//! - offset = `(page_index - 1) * page_size`, limit = `page_size`
//! - `total_pages = ceil(total_count / page_size)`
//! - a page past `total_pages` is empty, never an error
//! - `has_previous = page_index > 1`, `has_next = page_index < total_pages`
//!
//! # Example
//!
//! ```ignore
//! let page = PageRequest::new(params.page_number);
//! let (rows, total) = repository.fetch(page.offset(), page.limit()).await?;
//! let list = PaginatedList::new(rows, total, page);
//! assert_eq!(list.meta.page_index, page.page_index());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Page size applied to every list endpoint.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Deserializes an optional query string value into an optional i64.
///
/// Empty or unparseable values (`?pageNumber=`, `?pageNumber=abc`) are
/// treated as absent, so the list falls back to its first page.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// A request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page_index: i64,
    page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Builds a request with the default page size.
    ///
    /// Missing page numbers and numbers below 1 become page 1.
    #[must_use]
    pub fn new(page_number: Option<i64>) -> Self {
        Self::with_size(page_number, DEFAULT_PAGE_SIZE)
    }

    /// Builds a request with an explicit page size (clamped to at least 1).
    #[must_use]
    pub fn with_size(page_number: Option<i64>, page_size: i64) -> Self {
        Self {
            page_index: page_number.unwrap_or(1).max(1),
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn page_index(&self) -> i64 {
        self.page_index
    }

    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page_index - 1).saturating_mul(self.page_size)
    }

    /// Rows to take.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Cuts this page out of an already filtered and ordered sequence.
    pub fn slice<T, I>(&self, rows: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        rows.into_iter().skip(offset).take(limit).collect()
    }
}

/// Page-count metadata attached to every list response.
///
/// # Example JSON
///
/// ```json
/// {
///   "page_index": 2,
///   "page_size": 5,
///   "total_count": 12,
///   "total_pages": 3,
///   "has_previous": true,
///   "has_next": true
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    /// Current page (1-indexed)
    pub page_index: i64,
    pub page_size: i64,
    /// Rows matching the filter across all pages
    pub total_count: i64,
    pub total_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageMeta {
    pub fn new(total_count: i64, page: PageRequest) -> Self {
        let total_count = total_count.max(0);
        let total_pages = total_pages(total_count, page.page_size());

        Self {
            page_index: page.page_index(),
            page_size: page.page_size(),
            total_count,
            total_pages,
            has_previous: page.page_index() > 1,
            has_next: page.page_index() < total_pages,
        }
    }
}

/// One page of results plus its [`PageMeta`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PaginatedList<T> {
    pub fn new(items: Vec<T>, total_count: i64, page: PageRequest) -> Self {
        Self {
            items,
            meta: PageMeta::new(total_count, page),
        }
    }

    /// Paginates an in-memory sequence that is already filtered and ordered.
    pub fn from_rows(rows: Vec<T>, page: PageRequest) -> Self {
        let total = i64::try_from(rows.len()).unwrap_or(i64::MAX);
        let items = page.slice(rows);
        Self::new(items, total, page)
    }

    pub fn has_previous(&self) -> bool {
        self.meta.has_previous
    }

    pub fn has_next(&self) -> bool {
        self.meta.has_next
    }

    pub fn map<U, F>(self, f: F) -> PaginatedList<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedList {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// `ceil(total_count / page_size)`.
#[must_use]
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    let page_size = page_size.max(1);
    (total_count.max(0) + page_size - 1) / page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let page = PageRequest::new(None);
        assert_eq!(page.page_index(), 1);
        assert_eq!(page.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 5);
    }

    #[test]
    fn test_page_request_below_one_becomes_first_page() {
        assert_eq!(PageRequest::new(Some(0)).page_index(), 1);
        assert_eq!(PageRequest::new(Some(-3)).page_index(), 1);
        assert_eq!(PageRequest::new(Some(-3)).offset(), 0);
    }

    #[test]
    fn test_page_request_offset() {
        let page = PageRequest::new(Some(3));
        assert_eq!(page.offset(), 10);
        assert_eq!(page.limit(), 5);

        let page = PageRequest::with_size(Some(4), 20);
        assert_eq!(page.offset(), 60);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(100, 1), 100);
    }

    #[test]
    fn test_page_counts_match_ceiling_for_all_sizes() {
        for page_size in 1..=7_i64 {
            for count in 0..=23_i64 {
                let rows: Vec<i64> = (0..count).collect();
                let pages = total_pages(count, page_size);
                assert_eq!(pages, (count as f64 / page_size as f64).ceil() as i64);

                for k in 1..=pages + 2 {
                    let page = PageRequest::with_size(Some(k), page_size);
                    let list = PaginatedList::from_rows(rows.clone(), page);
                    let expected = if k <= pages {
                        page_size.min(count - (k - 1) * page_size)
                    } else {
                        0
                    };
                    assert_eq!(list.items.len() as i64, expected, "size {page_size} count {count} page {k}");
                    assert_eq!(list.meta.total_pages, pages);
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let list = PaginatedList::from_rows(vec![1, 2, 3], PageRequest::new(Some(9)));
        assert!(list.items.is_empty());
        assert_eq!(list.meta.total_count, 3);
        assert_eq!(list.meta.total_pages, 1);
        assert!(list.has_previous());
        assert!(!list.has_next());
    }

    #[test]
    fn test_has_previous_and_next() {
        let rows: Vec<i32> = (0..12).collect();

        let first = PaginatedList::from_rows(rows.clone(), PageRequest::new(Some(1)));
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.items, vec![0, 1, 2, 3, 4]);

        let middle = PaginatedList::from_rows(rows.clone(), PageRequest::new(Some(2)));
        assert!(middle.has_previous());
        assert!(middle.has_next());

        let last = PaginatedList::from_rows(rows, PageRequest::new(Some(3)));
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.items, vec![10, 11]);
    }

    #[test]
    fn test_empty_source() {
        let list: PaginatedList<i32> = PaginatedList::from_rows(vec![], PageRequest::default());
        assert_eq!(list.meta.total_pages, 0);
        assert!(!list.has_previous());
        assert!(!list.has_next());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let list = PaginatedList::new(vec![1, 2], 7, PageRequest::new(Some(2)));
        let mapped = list.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.meta.total_count, 7);
        assert_eq!(mapped.meta.total_pages, 2);
        assert_eq!(mapped.meta.page_index, 2);
    }

    #[test]
    fn test_serialize() {
        let list = PaginatedList::new(vec!["a"], 6, PageRequest::new(Some(1)));
        let serialized = serde_json::to_string(&list).unwrap();
        assert!(serialized.contains(r#""total_pages":2"#));
        assert!(serialized.contains(r#""has_next":true"#));
        assert!(serialized.contains(r#""has_previous":false"#));
    }

    #[derive(Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        page: Option<i64>,
    }

    #[test]
    fn test_deserialize_optional_i64() {
        let q: Query = serde_json::from_str(r#"{"page":"4"}"#).unwrap();
        assert_eq!(q.page, Some(4));
        let q: Query = serde_json::from_str(r#"{"page":""}"#).unwrap();
        assert_eq!(q.page, None);
        let q: Query = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(q.page, None);
        let q: Query = serde_json::from_str(r#"{"page":"x"}"#).unwrap();
        assert_eq!(q.page, None);
        let q: Query = serde_json::from_str(r#"{"page":"2.5"}"#).unwrap();
        assert_eq!(q.page, None);
    }
}
