//! Cashflow ledger entry primitives.
//!
//! An entry is a single dated income or expense row. Amounts are integer
//! currency units (`i64`); the running balance over entries is derived on
//! read and never stored.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Signed multiplier used by balance computations.
    pub fn sign(self) -> i64 {
        match self {
            Self::Income => 1,
            Self::Expense => -1,
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(LedgerError::Validation(
                "Invalid or missing type.".to_string(),
            )),
        }
    }
}

/// A persisted cashflow entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub category: String,
    pub description: String,
    pub amount: i64,
    /// Set only on mirror rows derived from a material stock purchase.
    pub material_stock_id: Option<i64>,
}

impl CashflowEntry {
    /// The entry's contribution to a balance: positive income, negative
    /// expense.
    pub fn signed_amount(&self) -> i64 {
        self.kind.sign() * self.amount
    }
}

/// A validated entry that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub category: String,
    pub description: String,
    pub amount: i64,
    pub material_stock_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cashflow_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: Date,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: i64,
    #[sea_orm(unique)]
    pub material_stock_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewEntry> for ActiveModel {
    fn from(entry: &NewEntry) -> Self {
        Self {
            id: ActiveValue::NotSet,
            date: ActiveValue::Set(entry.date),
            kind: ActiveValue::Set(entry.kind.as_str().to_string()),
            category: ActiveValue::Set(entry.category.clone()),
            description: ActiveValue::Set(entry.description.clone()),
            amount: ActiveValue::Set(entry.amount),
            material_stock_id: ActiveValue::Set(entry.material_stock_id),
        }
    }
}

impl TryFrom<Model> for CashflowEntry {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            date: model.date,
            kind: EntryKind::try_from(model.kind.as_str())?,
            category: model.category,
            description: model.description,
            amount: model.amount,
            material_stock_id: model.material_stock_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_storage_strings() {
        assert_eq!(EntryKind::try_from("income").unwrap(), EntryKind::Income);
        assert_eq!(EntryKind::try_from("expense").unwrap(), EntryKind::Expense);
        assert_eq!(EntryKind::Income.as_str(), "income");
        assert_eq!(EntryKind::Expense.as_str(), "expense");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(EntryKind::try_from("transfer").is_err());
    }

    #[test]
    fn signed_amount_negates_expenses() {
        let entry = CashflowEntry {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            kind: EntryKind::Expense,
            category: "Operational".to_string(),
            description: String::new(),
            amount: 400,
            material_stock_id: None,
        };
        assert_eq!(entry.signed_amount(), -400);
    }
}
