//! API utility types
//!
//! Response shapes shared by several handlers.

use serde::Serialize;

/// Result of a lookup that reports misses in the body instead of the status
///
/// Serializes as the record itself, or as `{"error": "..."}` with status 200.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Lookup<T> {
    /// The record was found
    Found(T),
    /// Nothing matched
    Missing {
        /// Human-readable reason
        error: String,
    },
}

impl<T> Lookup<T> {
    /// Wrap `found`, or report `error` when it is `None`
    pub fn from_option(found: Option<T>, error: impl Into<String>) -> Self {
        match found {
            Some(value) => Lookup::Found(value),
            None => Lookup::Missing {
                error: error.into(),
            },
        }
    }
}

/// Wrap a result list, reporting `error` when it is empty
pub fn non_empty<T>(items: Vec<T>, error: impl Into<String>) -> Lookup<Vec<T>> {
    if items.is_empty() {
        Lookup::Missing {
            error: error.into(),
        }
    } else {
        Lookup::Found(items)
    }
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

impl MessageResponse {
    /// Build a message response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
