//! Amount parsing and currency display

use cashweb_config::{CurrencyConfig, SymbolPosition};
use cashweb_utils::group_thousands;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parse the leading number of a spreadsheet cell.
///
/// Anything after the number is ignored (`" 12.5 FCFA"` is 12.5). Text that
/// does not start with a number, after optional whitespace, yields `None`.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    static AMOUNT_PREFIX: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let prefix = AMOUNT_PREFIX.get_or_init(|| {
        regex::Regex::new(r"^\s*([+-]?)(\d+\.?\d*|\.\d+)(?:[eE]([+-]?\d+))?").unwrap()
    });

    let caps = prefix.captures(text)?;
    let negative = caps.get(1).map(|m| m.as_str()) == Some("-");

    let mut mantissa = caps.get(2)?.as_str().to_string();
    if mantissa.starts_with('.') {
        mantissa.insert(0, '0');
    }
    if mantissa.ends_with('.') {
        mantissa.pop();
    }

    let mut value = Decimal::from_str(&mantissa).ok()?;
    if let Some(exponent) = caps.get(3) {
        value = Decimal::from_scientific(&format!("{}e{}", value, exponent.as_str())).ok()?;
    }

    Some(if negative { -value } else { value })
}

/// Format an amount for display, e.g. `CFA 1 234`
pub fn format_currency(amount: Decimal, currency: &CurrencyConfig) -> String {
    let rounded = amount.round_dp_with_strategy(currency.decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", currency.decimal_places as usize, rounded.abs());

    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let mut number = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        number.push('-');
    }
    number.push_str(&group_thousands(integer, &currency.thousands_separator));
    if let Some(fraction) = fraction {
        number.push_str(&currency.decimal_separator);
        number.push_str(fraction);
    }

    match currency.symbol_position {
        SymbolPosition::Before => format!("{} {}", currency.symbol, number),
        SymbolPosition::After => format!("{} {}", number, currency.symbol),
    }
}
