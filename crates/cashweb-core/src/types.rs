//! Basic types for the cash ledger

use serde::{Deserialize, Serialize};

pub use cashweb_config::BalanceBucket;

/// Payment channel of a receipt or an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentChannel {
    /// Physical cash
    Cash,
    /// Bank transfer
    BankTransfer,
    /// Check
    Check,
    /// Orange Money wallet
    MobileMoneyA,
    /// MTN Mobile Money wallet
    MobileMoneyB,
    /// Bank card, only ever used to pay expenses
    BankCard,
}

impl PaymentChannel {
    /// Every channel, in the order the forms list them
    pub const ALL: [PaymentChannel; 6] = [
        PaymentChannel::Cash,
        PaymentChannel::BankTransfer,
        PaymentChannel::Check,
        PaymentChannel::MobileMoneyA,
        PaymentChannel::MobileMoneyB,
        PaymentChannel::BankCard,
    ];

    /// Label stored in the spreadsheet
    pub fn label(&self) -> &'static str {
        match self {
            PaymentChannel::Cash => "Espèces",
            PaymentChannel::BankTransfer => "Virement bancaire",
            PaymentChannel::Check => "Chèque",
            PaymentChannel::MobileMoneyA => "Orange Money",
            PaymentChannel::MobileMoneyB => "MTN Mobile Money",
            PaymentChannel::BankCard => "Carte bancaire",
        }
    }

    /// Identifier used in URLs and form values
    pub fn code(&self) -> &'static str {
        match self {
            PaymentChannel::Cash => "cash",
            PaymentChannel::BankTransfer => "bank_transfer",
            PaymentChannel::Check => "check",
            PaymentChannel::MobileMoneyA => "mobile_money_a",
            PaymentChannel::MobileMoneyB => "mobile_money_b",
            PaymentChannel::BankCard => "bank_card",
        }
    }

    /// Match a spreadsheet label exactly (surrounding whitespace ignored)
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|channel| channel.label() == label)
    }

    /// Whether receipts can be recorded on this channel
    pub fn accepts_receipts(&self) -> bool {
        !matches!(self, PaymentChannel::BankCard)
    }
}

impl std::str::FromStr for PaymentChannel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|channel| channel.code() == trimmed)
            .or_else(|| Self::from_label(trimmed))
            .ok_or_else(|| format!("Invalid payment channel: {}", s))
    }
}

impl std::fmt::Display for PaymentChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Income (recette)
    Receipt,
    /// Spending (dépense)
    Expense,
}

impl TransactionKind {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Receipt => "Recette",
            TransactionKind::Expense => "Dépense",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TransactionKind::Receipt => "receipt",
            TransactionKind::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "receipt" | "recette" => Ok(TransactionKind::Receipt),
            "expense" | "dépense" | "depense" => Ok(TransactionKind::Expense),
            _ => Err(format!("Invalid transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_labels() {
        assert_eq!(PaymentChannel::from_label("Orange Money"), Some(PaymentChannel::MobileMoneyA));
        assert_eq!(PaymentChannel::from_label(" Chèque "), Some(PaymentChannel::Check));
        assert_eq!(PaymentChannel::from_label("Bitcoin"), None);
        assert_eq!(PaymentChannel::BankCard.to_string(), "Carte bancaire");
    }

    #[test]
    fn test_channel_parses_codes_and_labels() {
        assert_eq!("mobile_money_b".parse::<PaymentChannel>(), Ok(PaymentChannel::MobileMoneyB));
        assert_eq!("Espèces".parse::<PaymentChannel>(), Ok(PaymentChannel::Cash));
        assert!("".parse::<PaymentChannel>().is_err());
    }

    #[test]
    fn test_channel_serde_uses_codes() {
        let json = serde_json::to_string(&PaymentChannel::BankTransfer).unwrap();
        assert_eq!(json, "\"bank_transfer\"");
        let parsed: PaymentChannel = serde_json::from_str("\"mobile_money_a\"").unwrap();
        assert_eq!(parsed, PaymentChannel::MobileMoneyA);
    }

    #[test]
    fn test_bank_card_is_expense_only() {
        let receipt_channels: Vec<_> = PaymentChannel::ALL
            .into_iter()
            .filter(PaymentChannel::accepts_receipts)
            .collect();
        assert_eq!(receipt_channels.len(), 5);
        assert!(!receipt_channels.contains(&PaymentChannel::BankCard));
    }

    #[test]
    fn test_transaction_kind() {
        assert_eq!("Recette".parse::<TransactionKind>(), Ok(TransactionKind::Receipt));
        assert_eq!("expense".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert_eq!("Dépense".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert!("transfer".parse::<TransactionKind>().is_err());
        assert_eq!(TransactionKind::Expense.label(), "Dépense");
    }
}
