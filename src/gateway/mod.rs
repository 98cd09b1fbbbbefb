// file: src/gateway/mod.rs
// description: document gateway client module exports
// reference: internal module structure

pub mod client;
pub mod transport;

pub use client::{DOCUMENTS_LABEL, DocumentGateway, SEARCH_LABEL};
pub use transport::{Exchange, REQUEST_TIMEOUT, Transport};
