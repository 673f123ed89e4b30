//! Cash ledger aggregation and the cashbook service
//!
//! Records are decoded from the ledger service's rows, folded into
//! per-channel balances and merged into a single dated history. The
//! aggregation functions are pure; `Cashbook` is the only part that talks
//! to the transport.

pub mod amount;
pub mod balances;
pub mod columns;
pub mod error;
pub mod history;
pub mod models;
pub mod time;
pub mod types;

use cashweb_config::Config;
use cashweb_remote::{Action, TransportRef};

pub use amount::{format_currency, parse_amount};
pub use balances::{compute_balances, BalanceReport, ChannelBalances, ChannelMapping, ParseWarning, SkipReason};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorDetails, ErrorLogger, ErrorSeverity};
pub use history::{build_history, merge_history, HistoryFilter, HistoryView, UnifiedTransaction};
pub use time::DateZone;
pub use models::{ExpenseRecord, ExpenseSubmission, Member, ReceiptRecord, ReceiptSubmission};
pub use types::{BalanceBucket, PaymentChannel, TransactionKind};
pub use rust_decimal::Decimal;

// ==================== Cashbook Service ====================

/// Entry point for every ledger query and submission.
///
/// Holds no mutable state; each call is its own round trip to the
/// ledger service.
pub struct Cashbook {
    transport: TransportRef,
    mapping: ChannelMapping,
    zone: DateZone,
    logger: DefaultErrorLogger,
}

impl Cashbook {
    pub fn new(transport: TransportRef, mapping: ChannelMapping) -> Self {
        Self {
            transport,
            mapping,
            zone: DateZone::Source,
            logger: DefaultErrorLogger,
        }
    }

    /// Read timestamp cells in `zone` instead of their own offset
    pub fn with_date_zone(mut self, zone: DateZone) -> Self {
        self.zone = zone;
        self
    }

    /// Create a cashbook with the channel mapping and date zone from configuration
    pub fn from_config(config: &Config, transport: TransportRef) -> CoreResult<Self> {
        let mapping = ChannelMapping::from_config(&config.balances)?;
        let zone = DateZone::from_setting(&config.dates.timezone)?;
        Ok(Self::new(transport, mapping).with_date_zone(zone))
    }

    pub fn mapping(&self) -> &ChannelMapping {
        &self.mapping
    }

    /// Fetch both sides of the ledger concurrently; either failure fails both
    async fn fetch_records(&self) -> CoreResult<(Vec<ReceiptRecord>, Vec<ExpenseRecord>)> {
        let (receipt_rows, expense_rows) = tokio::try_join!(
            self.transport.fetch_list(Action::GetReceipts, &[]),
            self.transport.fetch_list(Action::GetExpenses, &[]),
        )?;

        let receipts: Vec<ReceiptRecord> = receipt_rows.iter().map(ReceiptRecord::from_row).collect();
        let expenses: Vec<ExpenseRecord> = expense_rows.iter().map(ExpenseRecord::from_row).collect();
        log::debug!("Loaded {} receipts and {} expenses", receipts.len(), expenses.len());
        Ok((receipts, expenses))
    }

    fn report<T>(&self, operation: &str, result: CoreResult<T>) -> CoreResult<T> {
        if let Err(ref error) = result {
            self.logger.log_error(error, &ErrorContext::new(operation));
        }
        result
    }

    /// Current balance of every channel bucket
    pub async fn balances(&self) -> CoreResult<BalanceReport> {
        let result = self.fetch_records().await.map(|(receipts, expenses)| {
            let report = compute_balances(&receipts, &expenses, &self.mapping);
            let context = ErrorContext::new("balances");
            for warning in &report.warnings {
                self.logger.log_warning(&format!("Skipped {}", warning), &context);
            }
            report
        });
        self.report("balances", result)
    }

    /// Merged, sorted and filtered transaction history
    pub async fn history(&self, filter: &HistoryFilter) -> CoreResult<HistoryView> {
        let result = self
            .fetch_records()
            .await
            .map(|(receipts, expenses)| build_history(&receipts, &expenses, filter, self.zone));
        self.report("history", result)
    }

    /// Members offered in the receipt form
    pub async fn members(&self) -> CoreResult<Vec<Member>> {
        let result = self
            .transport
            .fetch_list(Action::GetAllMembers, &[])
            .await
            .map_err(CoreError::from)
            .map(|rows| {
                let members: Vec<Member> = rows.iter().filter_map(Member::from_row).collect();
                if members.len() != rows.len() {
                    log::debug!("Skipped {} incomplete member rows", rows.len() - members.len());
                }
                members
            });
        self.report("members", result)
    }

    pub async fn add_receipt(&self, submission: &ReceiptSubmission) -> CoreResult<()> {
        let result = match submission.to_fields() {
            Ok(fields) => self.submit(Action::AddReceipt, &fields).await,
            Err(error) => Err(error),
        };
        self.report("add_receipt", result)
    }

    pub async fn add_expense(&self, submission: &ExpenseSubmission) -> CoreResult<()> {
        let result = match submission.to_fields() {
            Ok(fields) => self.submit(Action::AddExpense, &fields).await,
            Err(error) => Err(error),
        };
        self.report("add_expense", result)
    }

    async fn submit(&self, action: Action, fields: &[(String, String)]) -> CoreResult<()> {
        self.transport.submit(action, fields).await?;
        log::info!("{} recorded", action);
        Ok(())
    }
}

// ==================== Tests ====================
