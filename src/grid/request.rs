use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::filter::{FilterConfig, SortConfig};

/// Zero-based page index as held by the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_index: u32,
    pub page_size: u32,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }
}

/// Body of a `{entity}/paginate` call. Also serves as the request's identity
/// for duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedRequest {
    /// One-based
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterConfig>,
}

impl PaginatedRequest {
    pub fn new(pagination: PaginationState, sort: Vec<SortConfig>, filters: Vec<FilterConfig>) -> Self {
        Self {
            page: pagination.page_index + 1,
            page_size: pagination.page_size,
            sort,
            filters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T: DeserializeOwned> PaginatedResponse<T> {
    /// Decode a paginate response. Rows are read from `data` or from the
    /// entity's collection key (`users`, `roles`, ...); camelCase counters are
    /// accepted alongside snake_case ones.
    pub fn from_value(value: Value, collection_key: &str) -> Result<Self, ClientError> {
        let Value::Object(mut map) = value else {
            return Err(ClientError::invalid_response("paginate response is not an object"));
        };

        let rows = match map.remove("data").filter(Value::is_array) {
            Some(rows) => rows,
            None => map
                .remove(collection_key)
                .filter(Value::is_array)
                .ok_or_else(|| {
                    ClientError::invalid_response(format!(
                        "paginate response has neither data nor {}",
                        collection_key
                    ))
                })?,
        };
        let data: Vec<T> = serde_json::from_value(rows)?;

        let number = |keys: &[&str]| keys.iter().find_map(|key| map.get(*key).and_then(Value::as_u64));
        let total = number(&["total"]).unwrap_or(data.len() as u64);
        let page = number(&["page"]).unwrap_or(1) as u32;
        let page_size = number(&["page_size", "pageSize"]).unwrap_or(data.len() as u64).max(1) as u32;
        let total_pages = number(&["total_pages", "totalPages"])
            .map(|pages| pages as u32)
            .unwrap_or_else(|| total.div_ceil(page_size as u64) as u32);

        Ok(Self {
            data,
            total,
            page,
            page_size,
            total_pages,
        })
    }
}
