//! Query-string parameters shared by every list endpoint.

use coursehub_core::pagination::deserialize_optional_i64;
use coursehub_core::serde::deserialize_optional_trimmed;
use coursehub_core::{ListQuery, SortKey};
use serde::Deserialize;
use utoipa::IntoParams;

/// `?search=&sortOrder=&pageNumber=` as sent by list pages.
///
/// Blank values are treated as absent, so `?pageNumber=` yields page 1.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Free-text substring filter
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub search: Option<String>,
    /// One of the entity's sort keys; unknown values use the default ordering
    #[serde(default, alias = "sortOrder")]
    #[param(rename = "sortOrder")]
    pub sort_order: Option<String>,
    /// 1-based page number
    #[serde(default, alias = "pageNumber", deserialize_with = "deserialize_optional_i64")]
    #[param(rename = "pageNumber")]
    pub page_number: Option<i64>,
}

impl ListParams {
    pub fn into_query<S: SortKey>(self) -> ListQuery<S> {
        ListQuery::new(self.search, self.sort_order.as_deref(), self.page_number)
    }
}
