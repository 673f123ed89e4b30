//! Dashboard routes - Channel balance cards
//!
//! The cards are loaded as a partial so a failed fetch only replaces the
//! cards with an error banner. The partial reloads on `ledger-changed`.

pub mod api;
pub mod page;

pub use api::{api_balances, htmx_balances};
pub use page::page_dashboard;
