//! Query specifications handed to repositories.
//!
//! A list request is an explicit value: an optional free-text filter, one of
//! the entity's enumerated sort orders, and the page to return. Repositories
//! translate it into SQL (or an in-memory pipeline) in one step.

use crate::pagination::PageRequest;

/// An enumerated `{field, direction}` ordering selectable by a query parameter.
///
/// Unknown or empty parameters map to the default ordering.
pub trait SortKey: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    fn from_param(param: &str) -> Self;

    /// The query parameter value that selects this ordering.
    fn as_param(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<S: SortKey> {
    pub search: Option<String>,
    pub sort: S,
    pub page: PageRequest,
}

impl<S: SortKey> Default for ListQuery<S> {
    fn default() -> Self {
        Self {
            search: None,
            sort: S::default(),
            page: PageRequest::default(),
        }
    }
}

impl<S: SortKey> ListQuery<S> {
    pub fn new(search: Option<String>, sort_order: Option<&str>, page_number: Option<i64>) -> Self {
        Self {
            search: search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            sort: sort_order.map(S::from_param).unwrap_or_default(),
            page: PageRequest::new(page_number),
        }
    }

    /// `%search%` for SQL `ILIKE`, with LIKE metacharacters escaped.
    pub fn like_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{}%", escaped)
        })
    }

    /// Case-insensitive substring test used by in-memory sources.
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                fields.iter().any(|f| f.to_lowercase().contains(&needle))
            }
        }
    }
}
