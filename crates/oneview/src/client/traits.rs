//! REST client trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur talking to a OneView appliance.
#[derive(Error, Debug)]
pub enum OneViewError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Session could not be established or was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filter value cannot be expressed in the filter syntax.
    #[error("Invalid filter value for '{field}': {value:?} contains a single quote")]
    InvalidFilterValue { field: String, value: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Query string parameters for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Filter expression, e.g. `name matches 'web-01'`.
    pub filter: Option<String>,
    /// Sort expression, e.g. `name:asc`.
    pub sort: Option<String>,
}

impl Query {
    /// Query with no parameters.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a query from optional filter and sort expressions.
    /// Empty strings are treated as absent.
    #[must_use]
    pub fn new(filter: Option<&str>, sort: Option<&str>) -> Self {
        let keep = |s: Option<&str>| s.filter(|v| !v.is_empty()).map(str::to_string);
        Self {
            filter: keep(filter),
            sort: keep(sort),
        }
    }

    /// Parameters as key/value pairs, in a stable order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.as_str()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.as_str()));
        }
        pairs
    }

    /// True when no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filter.is_none() && self.sort.is_none()
    }
}

/// Authenticated access to the appliance REST API.
///
/// Implementations return the raw response body; decoding is the caller's
/// job so that decode failures surface where the shape is known.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestClient: Send + Sync {
    /// GET `path` with the given query parameters.
    async fn get(&self, path: &str, query: &Query) -> Result<String, OneViewError>;

    /// POST a JSON body to `path`.
    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<String, OneViewError>;
}
