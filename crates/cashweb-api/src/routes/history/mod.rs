//! History routes - Merged receipts and expenses
//!
//! Features:
//! - Filter by kind and payment channel
//! - HTMX partial page updates

pub mod api;
pub mod page;

pub use api::{api_history, htmx_history_list};
pub use page::page_history;
