//! Column keys of the ledger spreadsheet and loose value access
//!
//! Keys are the column headers with whitespace and punctuation stripped by
//! the service; parenthesized suffixes survive as-is.

use cashweb_remote::Row;

pub const DATE: &str = "Date";
pub const AMOUNT: &str = "Montant";
pub const CHANNEL: &str = "CanaldePaiement";

pub const RECEIPT_MEMBER: &str = "Membreconcerné";
pub const RECEIPT_TYPE: &str = "TypedeRecette";
pub const RECEIPT_DESCRIPTION: &str = "DescriptionCommentaires";

pub const EXPENSE_CATEGORY: &str = "CategoriedeDepense";
pub const EXPENSE_DESCRIPTION: &str = "DescriptionLibelle";
pub const EXPENSE_JUSTIFICATION: &str = "Justificatif(Lien)";

pub const MEMBER_LAST_NAME: &str = "Nom";
pub const MEMBER_FIRST_NAME: &str = "Prénom";

/// Read a cell as text. Numbers and booleans are stringified; null,
/// missing and nested values read as empty.
pub fn text(row: &Row, key: &str) -> String {
    match row.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
