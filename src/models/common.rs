use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Generic API response wrapper used across all handlers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
            meta: None,
        }
    }

    /// Create a successful response carrying pagination metadata
    pub fn success_with_meta(message: impl Into<String>, data: T, meta: Meta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::success(message, data)
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: None,
            meta: None,
        }
    }

    /// Create an error response with a detail payload
    pub fn error_with_detail(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::error(message)
        }
    }
}

/// Pagination metadata attached to list responses
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Meta {
    pub current_page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total_items: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total_items + per_page - 1) / per_page
        } else {
            0
        };
        Self {
            current_page: page,
            per_page,
            total_items,
            total_pages,
        }
    }
}

/// Raw `?page=&limit=` query. Values are kept as strings so that garbage
/// input degrades to the defaults instead of rejecting the request.
#[derive(Debug, Deserialize, Default)]
pub struct PaginationQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PaginationQuery {
    pub fn resolve(&self) -> PageRequest {
        PageRequest::new(
            parse_or(&self.page, 1),
            parse_or(&self.limit, DEFAULT_PAGE_SIZE),
        )
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

impl LimitQuery {
    pub fn resolve(&self) -> i64 {
        clamp_page_size(parse_or(&self.limit, DEFAULT_PAGE_SIZE))
    }
}

fn parse_or(value: &Option<String>, default: i64) -> i64 {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or(0),
        None => default,
    }
}

fn clamp_page_size(limit: i64) -> i64 {
    if (1..=MAX_PAGE_SIZE).contains(&limit) {
        limit
    } else {
        DEFAULT_PAGE_SIZE
    }
}

/// A clamped, 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: clamp_page_size(per_page),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn meta(&self, total_items: i64) -> Meta {
        Meta::new(self.page, self.per_page, total_items)
    }
}
