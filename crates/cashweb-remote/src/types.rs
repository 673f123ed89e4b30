//! Wire types shared by every transport

use serde::Deserialize;

use crate::error::TransportError;

/// One spreadsheet row as returned by the service, keyed by column
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Ordered string fields sent with a request
pub type Fields = Vec<(String, String)>;

/// Remote operations understood by the ledger service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetReceipts,
    GetExpenses,
    GetAllMembers,
    AddReceipt,
    AddExpense,
}

impl Action {
    /// Name sent in the `action` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetReceipts => "getReceipts",
            Action::GetExpenses => "getExpenses",
            Action::GetAllMembers => "getAllMembers",
            Action::AddReceipt => "addReceipt",
            Action::AddExpense => "addExpense",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "getReceipts" => Ok(Action::GetReceipts),
            "getExpenses" => Ok(Action::GetExpenses),
            "getAllMembers" => Ok(Action::GetAllMembers),
            "addReceipt" => Ok(Action::AddReceipt),
            "addExpense" => Ok(Action::AddExpense),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// The `{success, data, message}` envelope every response is wrapped in
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Parse a response body
    pub fn parse(body: &str) -> Result<Self, TransportError> {
        serde_json::from_str(body).map_err(|e| TransportError::InvalidResponse {
            message: e.to_string(),
        })
    }

    /// Fail with the service's message when it reported `success: false`
    pub fn into_checked(self) -> Result<Self, TransportError> {
        if self.success {
            Ok(self)
        } else {
            Err(TransportError::Remote {
                message: self
                    .message
                    .unwrap_or_else(|| "the service reported a failure without a message".to_string()),
            })
        }
    }

    /// Extract the row list of a successful read.
    ///
    /// A missing or null `data` is an empty list; entries that are not
    /// objects are dropped.
    pub fn into_rows(self) -> Result<Vec<Row>, TransportError> {
        let envelope = self.into_checked()?;
        match envelope.data {
            None | Some(serde_json::Value::Null) => Ok(Vec::new()),
            Some(serde_json::Value::Array(items)) => {
                let total = items.len();
                let rows: Vec<Row> = items
                    .into_iter()
                    .filter_map(|item| match item {
                        serde_json::Value::Object(row) => Some(row),
                        _ => None,
                    })
                    .collect();
                if rows.len() != total {
                    log::warn!("Dropped {} non-object entries from response data", total - rows.len());
                }
                Ok(rows)
            }
            Some(other) => Err(TransportError::InvalidResponse {
                message: format!("expected a list in `data`, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_round_trip() {
        for action in [
            Action::GetReceipts,
            Action::GetExpenses,
            Action::GetAllMembers,
            Action::AddReceipt,
            Action::AddExpense,
        ] {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert!("deleteReceipt".parse::<Action>().is_err());
    }

    #[test]
    fn test_envelope_rows() {
        let envelope = Envelope::parse(r#"{"success":true,"data":[{"Montant":1000},{"Montant":"12"}]}"#).unwrap();
        let rows = envelope.into_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Montant"], serde_json::json!(1000));
    }

    #[test]
    fn test_envelope_failure_carries_message() {
        let envelope = Envelope::parse(r#"{"success":false,"message":"Feuille introuvable"}"#).unwrap();
        assert_eq!(
            envelope.into_rows().unwrap_err(),
            TransportError::Remote { message: "Feuille introuvable".to_string() }
        );
    }

    #[test]
    fn test_envelope_missing_data_is_empty() {
        let envelope = Envelope::parse(r#"{"success":true}"#).unwrap();
        assert!(envelope.into_rows().unwrap().is_empty());
    }

    #[test]
    fn test_envelope_non_list_data_is_invalid() {
        let envelope = Envelope::parse(r#"{"success":true,"data":"oops"}"#).unwrap();
        assert!(matches!(envelope.into_rows(), Err(TransportError::InvalidResponse { .. })));
    }

    #[test]
    fn test_envelope_drops_non_object_entries() {
        let envelope = Envelope::parse(r#"{"success":true,"data":[{"Nom":"A"},3,null]}"#).unwrap();
        assert_eq!(envelope.into_rows().unwrap().len(), 1);
    }

    #[test]
    fn test_envelope_parse_rejects_html() {
        assert!(matches!(
            Envelope::parse("<!DOCTYPE html><html></html>"),
            Err(TransportError::InvalidResponse { .. })
        ));
    }
}
