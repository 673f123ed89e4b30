//! Expense routes - Expense form and submission

pub mod api;
pub mod page;

pub use api::{api_expense_store, htmx_expense_store};
pub use page::page_expenses;
