//! Pagination result types

use serde::{Deserialize, Serialize};

/// Default page size assumed when the API does not advertise one
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// The pagination strategy an API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationType {
    /// Cursor token passed back on the next request (e.g. Stripe)
    Cursor,
    /// Numeric offset/limit, including page-number style
    Offset,
    /// RFC 5988 `Link` header with `rel="next"` (e.g. GitHub)
    LinkHeader,
    /// No pagination signal found (the safe default)
    #[default]
    None,
}

impl std::fmt::Display for PaginationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaginationType::Cursor => write!(f, "cursor"),
            PaginationType::Offset => write!(f, "offset"),
            PaginationType::LinkHeader => write!(f, "link_header"),
            PaginationType::None => write!(f, "none"),
        }
    }
}

/// Detected pagination configuration for a discovered API
///
/// Resolved once per discovery run, not per endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredPagination {
    /// Detected strategy
    #[serde(rename = "type")]
    pub pagination_type: PaginationType,

    /// Query parameter carrying the cursor on the next request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_param: Option<String>,

    /// Response body field holding the next cursor value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_field: Option<String>,

    /// Query parameter controlling the page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size_param: Option<String>,

    /// Page size to request
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Response key holding the result array, when the API wraps it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_field: Option<String>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for DiscoveredPagination {
    fn default() -> Self {
        Self {
            pagination_type: PaginationType::None,
            cursor_param: None,
            cursor_field: None,
            page_size_param: None,
            page_size: DEFAULT_PAGE_SIZE,
            data_field: None,
        }
    }
}

impl DiscoveredPagination {
    /// No pagination detected
    pub fn none() -> Self {
        Self::default()
    }

    /// Cursor pagination; the parameter and field may be filled in later
    pub fn cursor() -> Self {
        Self {
            pagination_type: PaginationType::Cursor,
            ..Self::none()
        }
    }

    /// Offset pagination
    pub fn offset() -> Self {
        Self {
            pagination_type: PaginationType::Offset,
            ..Self::none()
        }
    }

    /// Link header pagination
    pub fn link_header() -> Self {
        Self {
            pagination_type: PaginationType::LinkHeader,
            ..Self::none()
        }
    }

    /// Set the cursor query parameter
    #[must_use]
    pub fn with_cursor_param(mut self, param: impl Into<String>) -> Self {
        self.cursor_param = Some(param.into());
        self
    }

    /// Set the cursor response field
    #[must_use]
    pub fn with_cursor_field(mut self, field: impl Into<String>) -> Self {
        self.cursor_field = Some(field.into());
        self
    }

    /// Set the page size query parameter
    #[must_use]
    pub fn with_page_size_param(mut self, param: impl Into<String>) -> Self {
        self.page_size_param = Some(param.into());
        self
    }

    /// Set the data-wrapping field
    #[must_use]
    pub fn with_data_field(mut self, field: Option<String>) -> Self {
        self.data_field = field;
        self
    }

    /// Check if no pagination was detected
    pub fn is_none(&self) -> bool {
        self.pagination_type == PaginationType::None
    }
}
