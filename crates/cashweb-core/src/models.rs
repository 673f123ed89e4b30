//! Ledger records decoded from spreadsheet rows, and form submissions

use cashweb_remote::{Fields, Row};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::parse_amount;
use crate::columns;
use crate::error::{CoreError, CoreResult};
use crate::time::{normalize_submission_date, DateZone};
use crate::types::PaymentChannel;

/// Income row of the ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Date as stored in the spreadsheet
    pub date: String,
    /// Member the receipt is attributed to ("Nom Prénom")
    pub member: String,
    /// Type of receipt (dues, donation, ...)
    pub category: String,
    /// Channel label as stored in the spreadsheet
    pub channel: String,
    /// Amount text as stored in the spreadsheet
    pub amount: String,
    pub description: String,
}

impl ReceiptRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            date: columns::text(row, columns::DATE),
            member: columns::text(row, columns::RECEIPT_MEMBER),
            category: columns::text(row, columns::RECEIPT_TYPE),
            channel: columns::text(row, columns::CHANNEL),
            amount: columns::text(row, columns::AMOUNT),
            description: columns::text(row, columns::RECEIPT_DESCRIPTION),
        }
    }

    /// Calendar day of the date cell, timestamps read in `zone`
    pub fn date_in(&self, zone: DateZone) -> Option<NaiveDate> {
        zone.parse(&self.date)
    }

    /// Known payment channel, `None` when the label is not recognized
    pub fn payment_channel(&self) -> Option<PaymentChannel> {
        PaymentChannel::from_label(&self.channel)
    }

    pub fn amount_value(&self) -> Option<Decimal> {
        parse_amount(&self.amount)
    }
}

/// Spending row of the ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: String,
    /// Expense category (rent, supplies, ...)
    pub category: String,
    pub description: String,
    /// Link to the supporting document, may be empty
    pub justification: String,
    pub amount: String,
    pub channel: String,
}

impl ExpenseRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            date: columns::text(row, columns::DATE),
            category: columns::text(row, columns::EXPENSE_CATEGORY),
            description: columns::text(row, columns::EXPENSE_DESCRIPTION),
            justification: columns::text(row, columns::EXPENSE_JUSTIFICATION),
            amount: columns::text(row, columns::AMOUNT),
            channel: columns::text(row, columns::CHANNEL),
        }
    }

    /// Calendar day of the date cell, timestamps read in `zone`
    pub fn date_in(&self, zone: DateZone) -> Option<NaiveDate> {
        zone.parse(&self.date)
    }

    pub fn payment_channel(&self) -> Option<PaymentChannel> {
        PaymentChannel::from_label(&self.channel)
    }

    pub fn amount_value(&self) -> Option<Decimal> {
        parse_amount(&self.amount)
    }
}

/// Association member, as offered in the receipt form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub last_name: String,
    pub first_name: String,
}

impl Member {
    /// Decode a member row; rows missing either name are skipped
    pub fn from_row(row: &Row) -> Option<Self> {
        let last_name = columns::text(row, columns::MEMBER_LAST_NAME).trim().to_string();
        let first_name = columns::text(row, columns::MEMBER_FIRST_NAME).trim().to_string();
        if last_name.is_empty() || first_name.is_empty() {
            return None;
        }
        Some(Self { last_name, first_name })
    }

    /// "Nom Prénom"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// New receipt entered in the receipt form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptSubmission {
    pub date: String,
    pub member: String,
    pub category: String,
    pub channel: PaymentChannel,
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

impl ReceiptSubmission {
    /// Form fields of the `addReceipt` action
    pub fn to_fields(&self) -> CoreResult<Fields> {
        let date = submission_date(&self.date)?;
        if !self.channel.accepts_receipts() {
            return Err(CoreError::ValidationError {
                message: format!("« {} » ne peut pas servir pour une recette", self.channel.label()),
            });
        }

        Ok(vec![
            ("date".to_string(), date),
            ("membre".to_string(), self.member.trim().to_string()),
            ("type".to_string(), self.category.trim().to_string()),
            ("canal".to_string(), self.channel.label().to_string()),
            ("montant".to_string(), self.amount.trim().to_string()),
            ("description".to_string(), self.description.trim().to_string()),
        ])
    }
}

/// New expense entered in the expense form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSubmission {
    pub date: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub justification: String,
    pub amount: String,
    pub channel: PaymentChannel,
}

impl ExpenseSubmission {
    /// Form fields of the `addExpense` action
    pub fn to_fields(&self) -> CoreResult<Fields> {
        let date = submission_date(&self.date)?;

        Ok(vec![
            ("date".to_string(), date),
            ("categorie".to_string(), self.category.trim().to_string()),
            ("description".to_string(), self.description.trim().to_string()),
            ("justificatif".to_string(), self.justification.trim().to_string()),
            ("montant".to_string(), self.amount.trim().to_string()),
            ("canal".to_string(), self.channel.label().to_string()),
        ])
    }
}

fn submission_date(text: &str) -> CoreResult<String> {
    normalize_submission_date(text).ok_or_else(|| CoreError::ValidationError {
        message: format!("« {} » n'est pas une date valide", text),
    })
}
