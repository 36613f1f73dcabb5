//! Search request parameters.

use std::collections::HashMap;

use crate::{ClientError, ResponseFormat};

/// Result-count limit applied when the caller sets none.
pub const DEFAULT_LIMIT: usize = 5;

/// Parameters for a search call.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Search query (required).
    pub query: String,

    /// Site filters; each one becomes a repeated `site` query parameter.
    pub sites: Vec<String>,

    /// Requested response representation, sent as `X-Respond-With`.
    pub response_format: Option<ResponseFormat>,

    /// Caller-supplied headers, overlaid last.
    pub headers: HashMap<String, String>,

    /// Maximum number of results the caller wants.
    pub limit: Option<usize>,
}

impl SearchRequest {
    /// Validate the request parameters.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.query.is_empty() {
            return Err(ClientError::InvalidRequest("query cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Get the effective limit (default 5 when unset or zero).
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_LIMIT,
        }
    }
}
