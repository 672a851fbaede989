// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            other => Err(Error::validation(format!(
                "Invalid transaction type '{}', expected income|expense",
                other
            ))),
        }
    }
}

/// The fixed set of categories a transaction can be filed under.
///
/// Each variant carries the label, icon name and accent color shown next to
/// it. Labels are the only form persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Housing,
    Shopping,
    Entertainment,
    Salary,
    Health,
    Education,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Shopping,
        Category::Entertainment,
        Category::Salary,
        Category::Health,
        Category::Education,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Salary => "Salary",
            Category::Health => "Health",
            Category::Education => "Education",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "cart-outline",
            Category::Transport => "bus-outline",
            Category::Housing => "home-outline",
            Category::Shopping => "gift-outline",
            Category::Entertainment => "game-controller-outline",
            Category::Salary => "cash-outline",
            Category::Health => "medical-outline",
            Category::Education => "book-outline",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => "#FF9800",
            Category::Transport => "#2196F3",
            Category::Housing => "#9C27B0",
            Category::Shopping => "#E91E63",
            Category::Entertainment => "#673AB7",
            Category::Salary => "#4CAF50",
            Category::Health => "#F44336",
            Category::Education => "#795548",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::validation(format!("Unknown category '{}'", wanted)))
    }
}

/// Largest amount a single transaction or budget may carry. Sums of any
/// realistic number of these stay far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Amounts are whole cents.
pub const AMOUNT_SCALE: u32 = 2;

/// Range-check an amount. Amounts are magnitudes: the sign lives in the
/// transaction type, so negatives are rejected.
pub fn check_amount(d: Decimal) -> Result<Decimal> {
    if d.is_sign_negative() && !d.is_zero() {
        return Err(Error::validation(format!(
            "Amount must not be negative, got {}",
            d
        )));
    }
    if d.normalize().scale() > AMOUNT_SCALE {
        return Err(Error::validation(format!(
            "Amount must have at most {} decimal places, got {}",
            AMOUNT_SCALE, d
        )));
    }
    if d > MAX_AMOUNT {
        return Err(Error::validation(format!(
            "Amount must not exceed {}, got {}",
            MAX_AMOUNT, d
        )));
    }
    Ok(d)
}

/// Parse a user or stored amount.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| Error::validation(format!("Invalid amount '{}'", s.trim())))?;
    check_amount(d)
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| Error::validation(format!("Invalid timestamp '{}'", s.trim())))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub r#type: TxType,
    pub category: Category,
    pub icon: String,
    pub color: String,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.r#type == TxType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.r#type == TxType::Income
    }
}

/// A transaction that has not been saved yet. The store assigns `id` and
/// `date` on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub title: String,
    pub amount: Decimal,
    pub r#type: TxType,
    pub category: Category,
    pub icon: String,
    pub color: String,
}

impl NewTransaction {
    pub fn new(title: &str, amount: Decimal, r#type: TxType, category: Category) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::validation("Title must not be empty"));
        }
        let amount = check_amount(amount)?;
        Ok(Self {
            title: title.to_string(),
            amount,
            r#type,
            category,
            icon: category.icon().to_string(),
            color: category.color().to_string(),
        })
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.trim().to_string();
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.trim().to_string();
        self
    }

    /// The quick-add income entry from the home view.
    pub fn quick_income(amount: Decimal) -> Result<Self> {
        Self::new("Income", amount, TxType::Income, Category::Salary)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub monthly_limit: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
            NotificationKind::Success => "success",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "info" => Ok(NotificationKind::Info),
            "warning" => Ok(NotificationKind::Warning),
            "success" => Ok(NotificationKind::Success),
            other => Err(Error::validation(format!(
                "Invalid notification kind '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub read: bool,
    pub kind: NotificationKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_ignores_case_and_whitespace() {
        assert_eq!(" food ".parse::<Category>().unwrap(), Category::Food);
        assert_eq!("HEALTH".parse::<Category>().unwrap(), Category::Health);
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn parse_amount_rejects_garbage_and_negatives() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), Decimal::new(1250, 2));
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("-3").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn parse_amount_enforces_cents_and_ceiling() {
        assert_eq!(parse_amount("12.500").unwrap(), Decimal::new(125, 1));
        assert!(parse_amount("0.001").is_err());
        assert!(parse_amount("0.0000000000000000000000000001").is_err());
        assert_eq!(parse_amount("1000000000000000").unwrap(), MAX_AMOUNT);
        assert!(parse_amount("1000000000000000.01").is_err());
        assert!(parse_amount("79228162514264337593543950335").is_err());
    }

    #[test]
    fn new_transaction_rejects_out_of_range_amounts() {
        assert!(NewTransaction::new("Huge", Decimal::MAX, TxType::Expense, Category::Food).is_err());
        assert!(
            NewTransaction::new("Dust", Decimal::new(1, 3), TxType::Expense, Category::Food)
                .is_err()
        );
    }

    #[test]
    fn new_transaction_takes_category_presentation() {
        let tx = NewTransaction::new("Bus", Decimal::new(3, 0), TxType::Expense, Category::Transport)
            .unwrap();
        assert_eq!(tx.icon, "bus-outline");
        assert_eq!(tx.color, "#2196F3");
        assert!(NewTransaction::new("  ", Decimal::ONE, TxType::Expense, Category::Food).is_err());
    }
}
