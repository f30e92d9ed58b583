//! # Catalog Errors
//!
//! Every failure surfaced by the engine is one of three kinds.

use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has nothing at this key
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Non-success status other than 404, or a transport failure
    #[error("Upstream error for {url}: {reason}")]
    Upstream {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// Success status, but the body is not the expected shape
    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

/// Coarse error kind, for callers that branch on policy rather than detail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Upstream,
    MalformedResponse,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::Upstream { .. } => ErrorKind::Upstream,
            CatalogError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Classify a non-success HTTP status
    pub fn from_status(url: impl Into<String>, status: u16) -> Self {
        let url = url.into();
        if status == 404 {
            CatalogError::NotFound { url }
        } else {
            CatalogError::Upstream {
                url,
                status: Some(status),
                reason: format!("status {}", status),
            }
        }
    }

    /// Transport-level failure with no usable status
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        CatalogError::Upstream {
            url: url.into(),
            status: None,
            reason: reason.to_string(),
        }
    }

    pub fn malformed(url: impl Into<String>, reason: impl ToString) -> Self {
        CatalogError::MalformedResponse {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// URL of the request that failed
    pub fn url(&self) -> &str {
        match self {
            CatalogError::NotFound { url }
            | CatalogError::Upstream { url, .. }
            | CatalogError::MalformedResponse { url, .. } => url,
        }
    }
}
