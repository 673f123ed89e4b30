//! Unified transaction history: merge, sort and filter

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ExpenseRecord, ReceiptRecord};
use crate::time::DateZone;
use crate::types::{PaymentChannel, TransactionKind};

/// One receipt or expense, projected for the history table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedTransaction {
    /// Parsed date, `None` when the cell is not a recognized date
    pub date: Option<NaiveDate>,
    pub date_raw: String,
    pub kind: TransactionKind,
    pub description: String,
    /// Amount as recorded; unparsable amounts are `None`
    pub amount: Option<Decimal>,
    pub amount_raw: String,
    pub channel: Option<PaymentChannel>,
    /// Channel label as stored, shown when the channel is unknown
    pub channel_label: String,
    /// Receipt type or expense category
    pub category: String,
}

impl UnifiedTransaction {
    fn from_receipt(record: &ReceiptRecord, zone: DateZone) -> Self {
        Self {
            date: record.date_in(zone),
            date_raw: record.date.clone(),
            kind: TransactionKind::Receipt,
            description: record.description.clone(),
            amount: record.amount_value(),
            amount_raw: record.amount.clone(),
            channel: record.payment_channel(),
            channel_label: record.channel.clone(),
            category: record.category.clone(),
        }
    }

    fn from_expense(record: &ExpenseRecord, zone: DateZone) -> Self {
        Self {
            date: record.date_in(zone),
            date_raw: record.date.clone(),
            kind: TransactionKind::Expense,
            description: record.description.clone(),
            amount: record.amount_value(),
            amount_raw: record.amount.clone(),
            channel: record.payment_channel(),
            channel_label: record.channel.clone(),
            category: record.category.clone(),
        }
    }
}

/// Merge receipts then expenses and sort them by date.
///
/// The sort is stable, so same-day entries keep merge order. Undated rows
/// come first. Timestamp cells fall on their calendar day in `zone`.
pub fn merge_history(receipts: &[ReceiptRecord], expenses: &[ExpenseRecord], zone: DateZone) -> Vec<UnifiedTransaction> {
    let mut merged: Vec<UnifiedTransaction> = receipts
        .iter()
        .map(|record| UnifiedTransaction::from_receipt(record, zone))
        .chain(expenses.iter().map(|record| UnifiedTransaction::from_expense(record, zone)))
        .collect();
    merged.sort_by_key(|transaction| transaction.date);
    merged
}

/// History criteria; an unset criterion matches everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    #[serde(default)]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub channel: Option<PaymentChannel>,
}

impl HistoryFilter {
    pub fn matches(&self, transaction: &UnifiedTransaction) -> bool {
        let kind_ok = self.kind.map_or(true, |kind| kind == transaction.kind);
        // Unknown channels never match a channel criterion
        let channel_ok = self.channel.map_or(true, |channel| transaction.channel == Some(channel));
        kind_ok && channel_ok
    }

    /// Keep matching entries, preserving order
    pub fn apply(&self, transactions: Vec<UnifiedTransaction>) -> Vec<UnifiedTransaction> {
        transactions.into_iter().filter(|t| self.matches(t)).collect()
    }
}

/// Result of a history query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "entries", rename_all = "snake_case")]
pub enum HistoryView {
    Entries(Vec<UnifiedTransaction>),
    NoResults,
}

impl HistoryView {
    pub fn new(transactions: Vec<UnifiedTransaction>) -> Self {
        if transactions.is_empty() {
            HistoryView::NoResults
        } else {
            HistoryView::Entries(transactions)
        }
    }

    pub fn entries(&self) -> &[UnifiedTransaction] {
        match self {
            HistoryView::Entries(entries) => entries,
            HistoryView::NoResults => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, HistoryView::NoResults)
    }
}

/// Merge, sort and filter in one pass
pub fn build_history(
    receipts: &[ReceiptRecord],
    expenses: &[ExpenseRecord],
    filter: &HistoryFilter,
    zone: DateZone,
) -> HistoryView {
    HistoryView::new(filter.apply(merge_history(receipts, expenses, zone)))
}
