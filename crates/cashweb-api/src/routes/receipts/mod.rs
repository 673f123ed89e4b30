//! Receipt routes - Receipt form, member picker, submission

pub mod api;
pub mod page;

pub use api::{api_members, api_receipt_store, htmx_member_options, htmx_receipt_store};
pub use page::page_receipts;
