//! Field-level coercion for loosely typed API values
//!
//! Every helper here is total: it returns `None` (or a zero amount) instead of
//! failing, and the caller decides whether the record survives.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use crate::models::{BudgetMonth, Money, TransactionType};

/// Integer id from a number or a numeric string
pub fn id(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Non-empty trimmed string
pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Transaction type from "INCOME"/"EXPENSE" in any case
pub fn kind(value: Option<&Value>) -> Option<TransactionType> {
    match value? {
        Value::String(s) => TransactionType::parse(s),
        _ => None,
    }
}

/// Calendar date from "YYYY-MM-DD", tolerating a trailing time component
pub fn date(value: Option<&Value>) -> Option<NaiveDate> {
    let s = match value? {
        Value::String(s) => s.trim(),
        _ => return None,
    };
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Budget month from "YYYY-MM" or a full date
pub fn month(value: Option<&Value>) -> Option<BudgetMonth> {
    match value? {
        Value::String(s) => BudgetMonth::parse(s).ok(),
        _ => None,
    }
}

/// Decimal amount from a number or a decimal string
///
/// Missing or malformed amounts contribute zero; a warning names the record
/// so the bad row can be traced back to the API.
pub fn amount(value: Option<&Value>, record: &str) -> Money {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|whole| whole.checked_mul(100))
            .map(Money::from_cents)
            .or_else(|| n.as_f64().and_then(Money::from_f64)),
        Some(Value::String(s)) => Money::parse(s).ok(),
        _ => None,
    };

    match parsed {
        Some(money) => money,
        None => {
            let raw = value.map(Value::to_string).unwrap_or_else(|| "missing".into());
            warn!(%record, amount = %raw, "Malformed amount, counting it as zero.");
            Money::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id() {
        assert_eq!(id(Some(&json!(7))), Some(7));
        assert_eq!(id(Some(&json!("12"))), Some(12));
        assert_eq!(id(Some(&json!("x"))), None);
        assert_eq!(id(Some(&json!(1.5))), None);
        assert_eq!(id(None), None);
    }

    #[test]
    fn test_amount() {
        assert_eq!(amount(Some(&json!("12.50")), "t"), Money::from_cents(1250));
        assert_eq!(amount(Some(&json!(40)), "t"), Money::from_cents(4000));
        assert_eq!(amount(Some(&json!(9.99)), "t"), Money::from_cents(999));
        assert_eq!(amount(Some(&json!("abc")), "t"), Money::zero());
        assert_eq!(amount(Some(&json!(null)), "t"), Money::zero());
        assert_eq!(amount(Some(&json!({"v": 1})), "t"), Money::zero());
        assert_eq!(amount(None, "t"), Money::zero());
    }

    #[test]
    fn test_date() {
        let may3 = NaiveDate::from_ymd_opt(2024, 5, 3);
        assert_eq!(date(Some(&json!("2024-05-03"))), may3);
        assert_eq!(date(Some(&json!("2024-05-03T10:00:00Z"))), may3);
        assert_eq!(date(Some(&json!("03/05/2024"))), None);
        assert_eq!(date(Some(&json!(20240503))), None);
    }

    #[test]
    fn test_text_and_kind() {
        assert_eq!(text(Some(&json!("  Food "))), Some("Food".to_string()));
        assert_eq!(text(Some(&json!(""))), None);
        assert_eq!(kind(Some(&json!("expense"))), Some(TransactionType::Expense));
        assert_eq!(kind(Some(&json!(1))), None);
    }

    #[test]
    fn test_month() {
        assert_eq!(month(Some(&json!("2024-05-01"))), BudgetMonth::new(2024, 5));
        assert_eq!(month(Some(&json!("2024-05"))), BudgetMonth::new(2024, 5));
        assert_eq!(month(Some(&json!("May"))), None);
    }
}
