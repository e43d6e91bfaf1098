//! Field-level validation of candidate records.
//!
//! Pure functions with no storage access. Checks run in a fixed order and the
//! first violated rule produces the error, so callers always get a single
//! specific message. Successful validation yields the typed, trimmed record
//! ready for persistence.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    LedgerError,
    entries::{EntryKind, NewEntry},
    stock::{NewStock, QualityLog},
};

pub const MAX_AMOUNT: i64 = i64::MAX;
pub const MAX_COUNT: i64 = i32::MAX as i64;
/// Upper bound matching a NUMERIC(10, 2) column: values below 100 million.
pub const MAX_VOLUME: f64 = 100_000_000.0;

/// Candidate cashflow entry, fields as they arrived on the wire.
#[derive(Clone, Debug, Default)]
pub struct EntryInput {
    pub id: Option<i64>,
    pub date: Option<String>,
    pub kind: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<i64>,
}

/// Candidate quality log within a stock entry.
#[derive(Clone, Debug, Default)]
pub struct QualityInput {
    pub count: Option<i64>,
    pub volume: Option<f64>,
    pub price: Option<i64>,
}

/// Candidate stock entry, fields as they arrived on the wire.
#[derive(Clone, Debug, Default)]
pub struct StockInput {
    pub id: Option<i64>,
    pub date: Option<String>,
    pub supplier: Option<String>,
    pub driver: Option<String>,
    pub origin: Option<String>,
    pub super_log: Option<QualityInput>,
    pub rijek_log: Option<QualityInput>,
}

fn invalid(message: impl Into<String>) -> LedgerError {
    LedgerError::Validation(message.into())
}

fn require_id(id: Option<i64>) -> Result<i64, LedgerError> {
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(invalid("Invalid or missing ID for update.")),
    }
}

/// Validates a new cashflow entry and returns it in typed form.
pub fn validate_entry(input: &EntryInput) -> Result<NewEntry, LedgerError> {
    let date = input
        .date
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .ok_or_else(|| invalid("Invalid or missing date."))?;

    let kind = input
        .kind
        .as_deref()
        .ok_or_else(|| invalid("Invalid or missing type."))
        .and_then(EntryKind::try_from)?;

    let category = input
        .category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .ok_or_else(|| invalid("Invalid or missing category."))?;

    // An empty description is fine; a missing one is not.
    let description = input
        .description
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| invalid("Invalid or missing description."))?;

    let amount = match input.amount {
        Some(amount) if amount > 0 => amount,
        _ => {
            return Err(invalid(format!(
                "Amount must be a positive integer up to {MAX_AMOUNT}."
            )));
        }
    };

    Ok(NewEntry {
        date,
        kind,
        category: category.to_string(),
        description: description.to_string(),
        amount,
        material_stock_id: None,
    })
}

/// Validates an entry update: a positive id plus a valid entry body.
pub fn validate_entry_update(input: &EntryInput) -> Result<(i64, NewEntry), LedgerError> {
    let id = require_id(input.id)?;
    let entry = validate_entry(input)?;
    Ok((id, entry))
}

fn validate_quality(input: Option<&QualityInput>, grade: &str) -> Result<QualityLog, LedgerError> {
    let input = input.ok_or_else(|| invalid(format!("{grade} quality log data is missing.")))?;

    let count = match input.count {
        Some(count) if (0..=MAX_COUNT).contains(&count) => count as i32,
        _ => {
            return Err(invalid(format!(
                "{grade} count must be a non-negative integer up to {MAX_COUNT}."
            )));
        }
    };

    let volume = match input.volume {
        Some(volume) if volume >= 0.0 && volume < MAX_VOLUME => volume,
        _ => {
            return Err(invalid(format!(
                "{grade} volume must be a non-negative number less than {MAX_VOLUME}."
            )));
        }
    };
    // The 2-decimal rule is measured on the decimal-string rendering, the
    // same check the browser form applies.
    let rendered = format!("{volume}");
    if let Some((_, fraction)) = rendered.split_once('.') {
        if fraction.len() > 2 {
            return Err(invalid(format!(
                "{grade} volume cannot have more than 2 decimal places."
            )));
        }
    }

    let price = match input.price {
        Some(price) if price >= 0 => price,
        _ => {
            return Err(invalid(format!(
                "{grade} price must be a non-negative integer up to {MAX_AMOUNT}."
            )));
        }
    };

    Ok(QualityLog {
        count,
        volume,
        price,
    })
}

/// Validates a new stock entry and returns it in typed form.
pub fn validate_stock(input: &StockInput) -> Result<NewStock, LedgerError> {
    let received_at = input
        .date
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|date| date.with_timezone(&Utc))
        .ok_or_else(|| invalid("A valid date is required."))?;

    let supplier = require_name(input.supplier.as_deref(), "Supplier name is required.")?;
    let driver = require_name(input.driver.as_deref(), "Driver name is required.")?;
    let origin = require_name(input.origin.as_deref(), "Origin is required.")?;

    let super_log = validate_quality(input.super_log.as_ref(), "Super")?;
    let rijek_log = validate_quality(input.rijek_log.as_ref(), "Rijek")?;

    // The summed prices become a cashflow amount and must stay in range.
    if super_log.price.checked_add(rijek_log.price).is_none() {
        return Err(invalid(format!(
            "Combined super and rijek price must not exceed {MAX_AMOUNT}."
        )));
    }

    Ok(NewStock {
        supplier,
        driver,
        origin,
        received_at,
        super_log,
        rijek_log,
    })
}

/// Validates a stock update: a positive id plus a valid stock body.
pub fn validate_stock_update(input: &StockInput) -> Result<(i64, NewStock), LedgerError> {
    let id = require_id(input.id)?;
    let stock = validate_stock(input)?;
    Ok((id, stock))
}

fn require_name(value: Option<&str>, message: &str) -> Result<String, LedgerError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| invalid(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_input() -> EntryInput {
        EntryInput {
            id: None,
            date: Some("2024-05-20".to_string()),
            kind: Some("income".to_string()),
            category: Some("Sales".to_string()),
            description: Some("Teak order #123".to_string()),
            amount: Some(150_000_000),
        }
    }

    fn stock_input() -> StockInput {
        StockInput {
            id: None,
            date: Some("2024-05-20T10:00:00Z".to_string()),
            supplier: Some("PT Jati Unggul".to_string()),
            driver: Some("Budi Santoso".to_string()),
            origin: Some("Jawa".to_string()),
            super_log: Some(QualityInput {
                count: Some(50),
                volume: Some(15.5),
                price: Some(75_000_000),
            }),
            rijek_log: Some(QualityInput {
                count: Some(10),
                volume: Some(2.1),
                price: Some(8_000_000),
            }),
        }
    }

    #[test]
    fn valid_entry_passes_and_is_trimmed() {
        let mut input = entry_input();
        input.category = Some("  Sales  ".to_string());
        let entry = validate_entry(&input).unwrap();
        assert_eq!(entry.category, "Sales");
        assert_eq!(entry.amount, 150_000_000);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let mut input = entry_input();
        input.amount = Some(0);
        assert!(validate_entry(&input).is_err());
    }

    #[test]
    fn max_amount_is_accepted() {
        let mut input = entry_input();
        input.amount = Some(i64::MAX);
        assert_eq!(validate_entry(&input).unwrap().amount, i64::MAX);
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let mut input = entry_input();
        input.date = Some("2024-02-30".to_string());
        assert_eq!(
            validate_entry(&input).unwrap_err(),
            LedgerError::Validation("Invalid or missing date.".to_string())
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut input = entry_input();
        input.kind = Some("transfer".to_string());
        assert!(validate_entry(&input).is_err());
    }

    #[test]
    fn whitespace_category_is_rejected() {
        let mut input = entry_input();
        input.category = Some("   ".to_string());
        assert_eq!(
            validate_entry(&input).unwrap_err(),
            LedgerError::Validation("Invalid or missing category.".to_string())
        );
    }

    #[test]
    fn empty_description_is_allowed_missing_is_not() {
        let mut input = entry_input();
        input.description = Some(String::new());
        assert!(validate_entry(&input).is_ok());

        input.description = None;
        assert!(validate_entry(&input).is_err());
    }

    #[test]
    fn update_requires_positive_id() {
        let mut input = entry_input();
        input.id = Some(0);
        assert_eq!(
            validate_entry_update(&input).unwrap_err(),
            LedgerError::Validation("Invalid or missing ID for update.".to_string())
        );

        input.id = Some(7);
        let (id, _) = validate_entry_update(&input).unwrap();
        assert_eq!(id, 7);
    }

    #[test]
    fn valid_stock_passes() {
        let stock = validate_stock(&stock_input()).unwrap();
        assert_eq!(stock.super_log.count, 50);
        assert_eq!(stock.mirror_amount(), Some(83_000_000));
    }

    #[test]
    fn combined_price_overflow_is_rejected() {
        let mut input = stock_input();
        input.super_log.as_mut().unwrap().price = Some(i64::MAX);
        input.rijek_log.as_mut().unwrap().price = Some(1);
        assert_eq!(
            validate_stock(&input).unwrap_err(),
            LedgerError::Validation(format!(
                "Combined super and rijek price must not exceed {MAX_AMOUNT}."
            ))
        );
    }

    #[test]
    fn volume_with_three_decimals_is_rejected() {
        let mut input = stock_input();
        input.super_log.as_mut().unwrap().volume = Some(15.505);
        assert_eq!(
            validate_stock(&input).unwrap_err(),
            LedgerError::Validation(
                "Super volume cannot have more than 2 decimal places.".to_string()
            )
        );
    }

    #[test]
    fn volume_at_ceiling_is_rejected() {
        let mut input = stock_input();
        input.rijek_log.as_mut().unwrap().volume = Some(MAX_VOLUME);
        assert!(validate_stock(&input).is_err());
    }

    #[test]
    fn count_above_i32_max_is_rejected() {
        let mut input = stock_input();
        input.super_log.as_mut().unwrap().count = Some(MAX_COUNT + 1);
        assert!(validate_stock(&input).is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut input = stock_input();
        input.rijek_log.as_mut().unwrap().price = Some(-1);
        assert!(validate_stock(&input).is_err());
    }

    #[test]
    fn missing_quality_log_is_rejected() {
        let mut input = stock_input();
        input.super_log = None;
        assert_eq!(
            validate_stock(&input).unwrap_err(),
            LedgerError::Validation("Super quality log data is missing.".to_string())
        );
    }

    #[test]
    fn stock_date_must_be_a_timestamp() {
        let mut input = stock_input();
        input.date = Some("2024-05-20".to_string());
        assert!(validate_stock(&input).is_err());
    }
}
