//! Transport to the spreadsheet-backed ledger service
//!
//! Every operation is one HTTP round trip against a single web app URL,
//! selected by the `action` query parameter. Responses are normalized to
//! either a row list or a unit success, with failures classified as
//! network, timeout or service-reported errors. No call is ever retried.

use async_trait::async_trait;
use std::sync::Arc;

pub mod error;
pub mod http;
pub mod types;

pub use error::TransportError;
pub use http::HttpLedgerTransport;
pub use types::{Action, Envelope, Fields, Row};

// ==================== Transport Trait ====================

/// Transport reference type
pub type TransportRef = Arc<dyn LedgerTransport>;

/// Trait for ledger service transports
#[async_trait]
pub trait LedgerTransport: Send + Sync {
    /// Run a read action and return its rows
    async fn fetch_list(&self, action: Action, params: &[(String, String)]) -> Result<Vec<Row>, TransportError>;

    /// Run a write action with form fields
    async fn submit(&self, action: Action, fields: &[(String, String)]) -> Result<(), TransportError>;
}
