// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! History filtering: which expenses match a search.

use crate::clock::start_of_day_days_ago;
use crate::error::{Error, Result};
use crate::models::{Category, Transaction};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DateRange {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
}

impl DateRange {
    pub fn days(&self) -> Option<u64> {
        match self {
            DateRange::All => None,
            DateRange::Last7Days => Some(7),
            DateRange::Last30Days => Some(30),
        }
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "7days" | "7d" => Ok(DateRange::Last7Days),
            "30days" | "30d" => Ok(DateRange::Last30Days),
            other => Err(Error::validation(format!(
                "Invalid date range '{}', expected all|7days|30days",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub search_text: String,
    pub category: Option<Category>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn search(text: &str) -> Self {
        Self {
            search_text: text.to_string(),
            ..Self::default()
        }
    }
}

/// Expenses matching every criterion, in input order. Income never matches.
pub fn filter_transactions<'a, Tz: TimeZone>(
    transactions: &'a [Transaction],
    criteria: &FilterCriteria,
    now: &DateTime<Tz>,
) -> Vec<&'a Transaction> {
    let needle = criteria.search_text.to_lowercase();
    let min = criteria.min_amount.unwrap_or(Decimal::ZERO);
    let cutoff: Option<DateTime<Utc>> = criteria
        .date_range
        .days()
        .map(|n| start_of_day_days_ago(now, n));

    transactions
        .iter()
        .filter(|t| {
            let matches_search = t.title.to_lowercase().contains(&needle)
                || t.category.label().to_lowercase().contains(&needle);
            let matches_category = criteria.category.is_none_or(|c| c == t.category);
            let matches_amount =
                t.amount >= min && criteria.max_amount.is_none_or(|max| t.amount <= max);
            let matches_date = cutoff.is_none_or(|c| t.date >= c);

            t.is_expense() && matches_search && matches_category && matches_amount && matches_date
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxType;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn tx(id: i64, title: &str, amount: i64, r#type: TxType, category: Category, days_ago: i64) -> Transaction {
        Transaction {
            id,
            title: title.into(),
            amount: Decimal::new(amount, 0),
            r#type,
            category,
            icon: category.icon().into(),
            color: category.color().into(),
            date: now() - Duration::days(days_ago),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, "Morning Coffee", 4, TxType::Expense, Category::Food, 1),
            tx(2, "Paycheck", 3000, TxType::Income, Category::Salary, 2),
            tx(3, "Train pass", 90, TxType::Expense, Category::Transport, 10),
            tx(4, "Rent", 1200, TxType::Expense, Category::Housing, 40),
            tx(5, "Coffee beans", 18, TxType::Expense, Category::Shopping, 3),
        ]
    }

    fn ids(v: Vec<&Transaction>) -> Vec<i64> {
        v.into_iter().map(|t| t.id).collect()
    }

    #[test]
    fn search_is_case_insensitive_on_title() {
        let txs = vec![tx(1, "Morning Coffee", 4, TxType::Expense, Category::Food, 0)];
        let out = filter_transactions(&txs, &FilterCriteria::search("coffee"), &now());
        assert_eq!(ids(out), vec![1]);
    }

    #[test]
    fn search_matches_category_label() {
        let txs = sample();
        let out = filter_transactions(&txs, &FilterCriteria::search("TRANS"), &now());
        assert_eq!(ids(out), vec![3]);
    }

    #[test]
    fn income_is_always_excluded() {
        let criteria = FilterCriteria {
            search_text: "pay".into(),
            category: Some(Category::Salary),
            ..FilterCriteria::default()
        };
        assert!(filter_transactions(&sample(), &criteria, &now()).is_empty());
        let txs = sample();
        let all = filter_transactions(&txs, &FilterCriteria::default(), &now());
        assert!(all.iter().all(|t| t.is_expense()));
        assert_eq!(ids(all), vec![1, 3, 4, 5]);
    }

    #[test]
    fn amount_bounds_are_inclusive() {
        let criteria = FilterCriteria {
            min_amount: Some(Decimal::new(18, 0)),
            max_amount: Some(Decimal::new(90, 0)),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(filter_transactions(&sample(), &criteria, &now())), vec![3, 5]);
    }

    #[test]
    fn date_window_uses_start_of_day() {
        let mut txs = sample();
        // exactly midnight seven days back is inside the window
        txs.push(Transaction {
            date: Utc.with_ymd_and_hms(2025, 6, 8, 0, 0, 0).unwrap(),
            ..tx(6, "Edge", 1, TxType::Expense, Category::Food, 0)
        });
        txs.push(Transaction {
            date: Utc.with_ymd_and_hms(2025, 6, 7, 23, 59, 59).unwrap(),
            ..tx(7, "Too old", 1, TxType::Expense, Category::Food, 0)
        });
        let week = FilterCriteria {
            date_range: DateRange::Last7Days,
            ..FilterCriteria::default()
        };
        assert_eq!(ids(filter_transactions(&txs, &week, &now())), vec![1, 5, 6]);
        let month = FilterCriteria {
            date_range: DateRange::Last30Days,
            ..FilterCriteria::default()
        };
        assert_eq!(ids(filter_transactions(&txs, &month, &now())), vec![1, 3, 5, 6, 7]);
    }

    #[test]
    fn combined_criteria_and_idempotent() {
        let criteria = FilterCriteria {
            search_text: "coffee".into(),
            category: Some(Category::Shopping),
            ..FilterCriteria::default()
        };
        let txs = sample();
        let first = ids(filter_transactions(&txs, &criteria, &now()));
        assert_eq!(first, vec![5]);
        assert_eq!(first, ids(filter_transactions(&txs, &criteria, &now())));
    }

    #[test]
    fn date_range_parses_short_forms() {
        assert_eq!("7d".parse::<DateRange>().unwrap(), DateRange::Last7Days);
        assert_eq!("30DAYS".parse::<DateRange>().unwrap(), DateRange::Last30Days);
        assert!("week".parse::<DateRange>().is_err());
    }
}
