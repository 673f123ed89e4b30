//! Per-channel balance computation
//!
//! Receipts credit and expenses debit the bucket their channel maps to.
//! The fold is a plain sum over exact decimals, so input order never
//! changes the result.

use cashweb_config::{BalanceBucket, BalancesConfig};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::models::{ExpenseRecord, ReceiptRecord};
use crate::types::{PaymentChannel, TransactionKind};

/// Channel to bucket tables for both sides of the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMapping {
    receipts: HashMap<PaymentChannel, BalanceBucket>,
    expenses: HashMap<PaymentChannel, BalanceBucket>,
}

impl ChannelMapping {
    /// Build the tables from configuration, keyed by spreadsheet label
    pub fn from_config(config: &BalancesConfig) -> CoreResult<Self> {
        Ok(Self {
            receipts: Self::table("balances.receipts", &config.receipts)?,
            expenses: Self::table("balances.expenses", &config.expenses)?,
        })
    }

    fn table<'a>(
        field: &str,
        entries: impl IntoIterator<Item = (&'a String, &'a BalanceBucket)>,
    ) -> CoreResult<HashMap<PaymentChannel, BalanceBucket>> {
        entries
            .into_iter()
            .map(|(label, bucket)| {
                PaymentChannel::from_label(label)
                    .map(|channel| (channel, *bucket))
                    .ok_or_else(|| CoreError::ConfigError {
                        message: format!("{} : canal de paiement inconnu « {} »", field, label),
                    })
            })
            .collect()
    }

    pub fn receipt_bucket(&self, channel: PaymentChannel) -> Option<BalanceBucket> {
        self.receipts.get(&channel).copied()
    }

    pub fn expense_bucket(&self, channel: PaymentChannel) -> Option<BalanceBucket> {
        self.expenses.get(&channel).copied()
    }
}

impl Default for ChannelMapping {
    fn default() -> Self {
        // The default configuration only names known labels
        Self::from_config(&BalancesConfig::default()).unwrap_or_else(|_| Self {
            receipts: HashMap::new(),
            expenses: HashMap::new(),
        })
    }
}

/// Balance of each bucket plus their sum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelBalances {
    pub cash: Decimal,
    pub bank: Decimal,
    pub mobile_a: Decimal,
    pub mobile_b: Decimal,
    pub total: Decimal,
}

impl ChannelBalances {
    fn bucket_mut(&mut self, bucket: BalanceBucket) -> &mut Decimal {
        match bucket {
            BalanceBucket::Cash => &mut self.cash,
            BalanceBucket::Bank => &mut self.bank,
            BalanceBucket::MobileA => &mut self.mobile_a,
            BalanceBucket::MobileB => &mut self.mobile_b,
        }
    }

    /// Move `delta` into `bucket` and `total`; false (and nothing moved) on overflow
    fn apply(&mut self, bucket: BalanceBucket, delta: Delta) -> bool {
        let current = *self.bucket_mut(bucket);
        let (Some(balance), Some(total)) = (delta.on(current), delta.on(self.total)) else {
            return false;
        };
        *self.bucket_mut(bucket) = balance;
        self.total = total;
        true
    }
}

#[derive(Clone, Copy)]
enum Delta {
    Credit(Decimal),
    Debit(Decimal),
}

impl Delta {
    fn on(self, value: Decimal) -> Option<Decimal> {
        match self {
            Delta::Credit(amount) => value.checked_add(amount),
            Delta::Debit(amount) => value.checked_sub(amount),
        }
    }
}

/// Why a row was left out of the balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The amount is not a number
    Unparsable,
    /// Adding the amount would leave the decimal range
    Overflow,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Unparsable => write!(f, "unparsable amount"),
            SkipReason::Overflow => write!(f, "amount out of range"),
        }
    }
}

/// A row left out of the balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub kind: TransactionKind,
    pub reason: SkipReason,
    /// Position of the row in its source list
    pub row: usize,
    /// Raw amount text
    pub value: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}: {} '{}'", self.kind, self.row, self.reason, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceReport {
    pub balances: ChannelBalances,
    pub warnings: Vec<ParseWarning>,
}

/// Fold receipts and expenses into per-bucket balances.
///
/// Rows with an unparsable amount, or one that would overflow a balance,
/// are skipped and reported as warnings. Rows whose channel is unknown, or
/// has no bucket on their side of the ledger, move nothing.
pub fn compute_balances(
    receipts: &[ReceiptRecord],
    expenses: &[ExpenseRecord],
    mapping: &ChannelMapping,
) -> BalanceReport {
    let mut report = BalanceReport::default();

    for (index, receipt) in receipts.iter().enumerate() {
        let bucket = receipt.payment_channel().and_then(|c| mapping.receipt_bucket(c));
        let delta = receipt.amount_value().map(Delta::Credit);
        report.fold(TransactionKind::Receipt, index, &receipt.amount, bucket, delta);
    }

    for (index, expense) in expenses.iter().enumerate() {
        let bucket = expense.payment_channel().and_then(|c| mapping.expense_bucket(c));
        let delta = expense.amount_value().map(Delta::Debit);
        report.fold(TransactionKind::Expense, index, &expense.amount, bucket, delta);
    }

    report
}

impl BalanceReport {
    fn fold(
        &mut self,
        kind: TransactionKind,
        row: usize,
        raw: &str,
        bucket: Option<BalanceBucket>,
        delta: Option<Delta>,
    ) {
        let reason = match (delta, bucket) {
            (None, _) => SkipReason::Unparsable,
            (Some(_), None) => return,
            (Some(delta), Some(bucket)) => {
                if self.balances.apply(bucket, delta) {
                    return;
                }
                SkipReason::Overflow
            }
        };
        self.warnings.push(ParseWarning {
            kind,
            reason,
            row,
            value: raw.to_string(),
        });
    }
}
