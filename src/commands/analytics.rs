// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{by_category, display_percent, monthly_expense_total, percent_of, summarize};
use crate::budget::progress;
use crate::clock::Clock;
use crate::models::{Category, Transaction};
use crate::store::{BudgetStore, SqliteStore, TransactionStore};
use crate::utils::{fmt_usd, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category: Category,
    pub icon: String,
    pub color: String,
    pub amount: Decimal,
    /// Whole percent of total expenses.
    pub percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub limit: Decimal,
    pub spent: Decimal,
    pub used_percent: Decimal,
    pub left_percent: Decimal,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub budget: Option<BudgetProgress>,
    pub categories: Vec<CategoryRow>,
}

pub fn category_rows(transactions: &[Transaction]) -> Vec<CategoryRow> {
    // same slice for numerator and denominator keeps shares within 100%
    let total = summarize(transactions).expense;
    by_category(transactions)
        .into_iter()
        .map(|c| CategoryRow {
            percent: display_percent(percent_of(c.amount, total)),
            category: c.category,
            icon: c.icon,
            color: c.color,
            amount: c.amount,
        })
        .collect()
}

pub fn budget_progress(spent: Decimal, limit: Decimal) -> Option<BudgetProgress> {
    if limit <= Decimal::ZERO {
        return None;
    }
    let used = progress(spent, limit);
    Some(BudgetProgress {
        limit,
        spent,
        used_percent: display_percent(used),
        left_percent: display_percent(Decimal::ONE_HUNDRED - used),
    })
}

pub fn report(conn: &Connection, clock: &dyn Clock) -> Result<Report> {
    let store = SqliteStore::new(conn);
    let txs = store.list()?;
    let spent = monthly_expense_total(&txs, &clock.now());
    let budget = store
        .budget()?
        .and_then(|b| budget_progress(spent, b.monthly_limit));
    Ok(Report {
        budget,
        categories: category_rows(&txs),
    })
}

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    let rep = report(conn, clock)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &rep)? {
        return Ok(());
    }

    if let Some(b) = &rep.budget {
        println!(
            "Monthly budget {}: {} spent ({}%), {}% left",
            fmt_usd(b.limit),
            fmt_usd(b.spent),
            b.used_percent,
            b.left_percent
        );
    }
    if rep.categories.is_empty() {
        println!("No data to analyze yet");
        return Ok(());
    }
    let rows = rep
        .categories
        .iter()
        .map(|c| {
            vec![
                c.category.to_string(),
                fmt_usd(c.amount),
                format!("{}%", c.percent),
                c.icon.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Share", "Icon"], rows)
    );
    Ok(())
}
