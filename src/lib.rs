// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod utils;

pub use config::{Config, GatewayConfig};
pub use error::{GatewayError, Result};
pub use gateway::{DOCUMENTS_LABEL, DocumentGateway, REQUEST_TIMEOUT, SEARCH_LABEL};
pub use models::{Document, LoadedDocument, Query};
pub use utils::{ERROR_STATUS_LABEL, GatewayMetrics, render};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _document = Document::new();
        assert_eq!(ERROR_STATUS_LABEL, "error");
    }
}
