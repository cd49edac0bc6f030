//! Response envelopes.

use crate::resources::ObjectKind;
use serde::{Deserialize, Serialize};

/// The `{data, has_more, object, total_count, url}` wrapper used by every
/// collection-listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    pub has_more: bool,
    pub object: ObjectKind,
    pub total_count: usize,
    pub url: String,
}

impl<T> ListEnvelope<T> {
    /// Wrap `data` as a complete, single-page listing of `url`.
    pub fn new(url: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            total_count: data.len(),
            data,
            has_more: false,
            object: ObjectKind::List,
            url: url.into(),
        }
    }

    /// An empty listing of `url`.
    pub fn empty(url: impl Into<String>) -> Self {
        Self::new(url, Vec::new())
    }
}

/// Error body returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub param: String,
}

/// The `{error: {...}}` wrapper around an [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    /// The envelope returned when `object_name` with id `id` does not exist.
    pub fn not_found(object_name: &str, id: &str) -> Self {
        Self {
            error: ErrorBody {
                kind: "invalid_request_error".to_string(),
                message: format!("No such {}: {}", object_name, id),
                param: "id".to_string(),
            },
        }
    }
}
