// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregations over an in-memory list of transactions.
//!
//! Every function here is pure: it reads the slice it is given and returns a
//! fresh value. Amounts are validated, non-negative magnitudes; sums saturate
//! at `Decimal::MAX` instead of panicking.

use crate::clock::start_of_month;
use crate::models::{Category, Transaction, TxType};
use chrono::{DateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in transactions {
        match t.r#type {
            TxType::Income => income = income.saturating_add(t.amount),
            TxType::Expense => expense = expense.saturating_add(t.amount),
        }
    }
    Summary {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Decimal,
    pub color: String,
    pub icon: String,
}

/// Expense totals per category, largest first.
///
/// Icon and color come from the first transaction seen in each category.
/// Ties keep first-seen order.
pub fn by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        match totals.iter_mut().find(|c| c.category == t.category) {
            Some(entry) => entry.amount = entry.amount.saturating_add(t.amount),
            None => totals.push(CategoryTotal {
                category: t.category,
                amount: t.amount,
                color: t.color.clone(),
                icon: t.icon.clone(),
            }),
        }
    }
    // sort_by is stable
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// `part` as a percentage of `total`; zero when there is nothing to divide by.
/// Ratios too large to represent saturate at `Decimal::MAX`.
pub fn percent_of(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(total)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// Percentage rounded to a whole number for display, halves away from zero.
pub fn display_percent(p: Decimal) -> Decimal {
    p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum of expenses dated on or after the first instant of `now`'s month.
pub fn monthly_expense_total<Tz: TimeZone>(
    transactions: &[Transaction],
    now: &DateTime<Tz>,
) -> Decimal {
    let start = start_of_month(now);
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.date >= start)
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Utc};

    fn tx(id: i64, amount: i64, r#type: TxType, category: Category) -> Transaction {
        Transaction {
            id,
            title: format!("t{}", id),
            amount: Decimal::new(amount, 0),
            r#type,
            category,
            icon: category.icon().into(),
            color: category.color().into(),
            date: Utc::now(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, 2000, TxType::Income, Category::Salary),
            tx(2, 50, TxType::Expense, Category::Food),
            tx(3, 100, TxType::Expense, Category::Transport),
            tx(4, 100, TxType::Expense, Category::Shopping),
            tx(5, 25, TxType::Expense, Category::Food),
        ]
    }

    #[test]
    fn summary_partitions_by_type() {
        let txs = sample();
        let s = summarize(&txs);
        assert_eq!(s.income, Decimal::new(2000, 0));
        assert_eq!(s.expense, Decimal::new(275, 0));
        assert_eq!(s.balance, s.income - s.expense);
        let all: Decimal = txs.iter().map(|t| t.amount).sum();
        assert_eq!(s.income + s.expense, all);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(summarize(&[]), Summary::default());
        assert!(by_category(&[]).is_empty());
    }

    #[test]
    fn categories_sorted_desc_with_stable_ties() {
        let txs = vec![
            tx(1, 50, TxType::Expense, Category::Food),
            tx(2, 100, TxType::Expense, Category::Transport),
            tx(3, 100, TxType::Expense, Category::Housing),
        ];
        let cats: Vec<Category> = by_category(&txs).into_iter().map(|c| c.category).collect();
        assert_eq!(
            cats,
            vec![Category::Transport, Category::Housing, Category::Food]
        );
    }

    #[test]
    fn category_totals_add_up_to_expense() {
        let txs = sample();
        let total: Decimal = by_category(&txs).iter().map(|c| c.amount).sum();
        assert_eq!(total, summarize(&txs).expense);
    }

    #[test]
    fn first_seen_presentation_wins() {
        let mut first = tx(1, 10, TxType::Expense, Category::Food);
        first.color = "#000000".into();
        let mut second = tx(2, 10, TxType::Expense, Category::Food);
        second.color = "#FFFFFF".into();
        let cats = by_category(&[first, second]);
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].color, "#000000");
        assert_eq!(cats[0].amount, Decimal::new(20, 0));
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert_eq!(percent_of(Decimal::new(5, 0), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(
            display_percent(percent_of(Decimal::ONE, Decimal::new(3, 0))),
            Decimal::new(33, 0)
        );
    }

    #[test]
    fn oversized_sums_saturate() {
        let mut a = tx(1, 0, TxType::Expense, Category::Food);
        a.amount = Decimal::MAX;
        let b = a.clone();
        let txs = vec![a, b];
        let s = summarize(&txs);
        assert_eq!(s.expense, Decimal::MAX);
        assert_eq!(s.balance, Decimal::MIN);
        assert_eq!(by_category(&txs)[0].amount, Decimal::MAX);
        assert_eq!(monthly_expense_total(&txs, &Local::now()), Decimal::MAX);
    }

    #[test]
    fn percent_of_tiny_total_saturates() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(percent_of(Decimal::ONE, tiny), Decimal::MAX);
        assert_eq!(percent_of(Decimal::MAX, Decimal::ONE), Decimal::MAX);
    }

    #[test]
    fn aggregations_are_idempotent() {
        let txs = sample();
        assert_eq!(summarize(&txs), summarize(&txs));
        assert_eq!(by_category(&txs), by_category(&txs));
        let now = Local::now();
        assert_eq!(
            monthly_expense_total(&txs, &now),
            monthly_expense_total(&txs, &now)
        );
    }
}
