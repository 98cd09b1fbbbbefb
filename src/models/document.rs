// file: src/models/document.rs
// description: opaque document and query payloads exchanged with the backend
// reference: https://docs.rs/serde_json

use reqwest::StatusCode;
use serde_json::{Map, Value};

/// A JSON object stored in or returned by the backend. No schema is enforced.
pub type Document = Map<String, Value>;

/// A search request, forwarded to the backend unchanged.
pub type Query = Map<String, Value>;

/// Result of a document lookup.
///
/// Any status below 500 is returned alongside the parsed body, so a missing
/// document shows up as `404` with whatever JSON object the backend sent.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub document: Document,
    pub status: StatusCode,
}

impl LoadedDocument {
    pub fn new(document: Document, status: StatusCode) -> Self {
        Self { document, status }
    }

    pub fn is_found(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    pub fn into_parts(self) -> (Document, StatusCode) {
        (self.document, self.status)
    }
}
