// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{monthly_expense_total, summarize, Summary};
use crate::budget::BudgetAlert;
use crate::clock::Clock;
use crate::commands::budgets;
use crate::store::{BudgetStore, NotificationStore, SqliteStore, TransactionStore};
use crate::utils::{fmt_balance, fmt_usd, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Overview {
    pub summary: Summary,
    pub monthly_expense: Decimal,
    pub monthly_limit: Option<Decimal>,
    pub alert: Option<BudgetAlert>,
    pub unread_notifications: usize,
}

/// Everything the home view shows. Files a budget notification when the
/// alert calls for one.
pub fn overview(conn: &Connection, clock: &dyn Clock) -> Result<Overview> {
    let store = SqliteStore::new(conn);
    let now = clock.now();
    let txs = store.list()?;

    let alert = match budgets::status(&store, &txs, &now)? {
        Some(st) => {
            budgets::notify_if_needed(&store, &st.alert, &now)?;
            Some(st.alert)
        }
        None => None,
    };
    let unread = store
        .load_notifications(now.with_timezone(&Utc))?
        .iter()
        .filter(|n| !n.read)
        .count();

    Ok(Overview {
        summary: summarize(&txs),
        monthly_expense: monthly_expense_total(&txs, &now),
        monthly_limit: store.budget()?.map(|b| b.monthly_limit),
        alert,
        unread_notifications: unread,
    })
}

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    let ov = overview(conn, clock)?;
    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&ov)?);
        return Ok(());
    }

    let mut rows = vec![
        vec!["Balance".to_string(), fmt_balance(ov.summary.balance)],
        vec!["Income".to_string(), fmt_usd(ov.summary.income)],
        vec!["Expense".to_string(), fmt_usd(ov.summary.expense)],
        vec!["Spent this month".to_string(), fmt_usd(ov.monthly_expense)],
    ];
    if let Some(limit) = ov.monthly_limit {
        rows.push(vec!["Monthly budget".to_string(), fmt_usd(limit)]);
    }
    println!("{}", pretty_table(&["", "Amount"], rows));

    if let Some(alert) = ov.alert.as_ref().filter(|a| !a.message.is_empty()) {
        println!("[{}] {}", alert.level, alert.message);
    }
    if ov.unread_notifications > 0 {
        println!(
            "{} unread notification(s), see `notify list`",
            ov.unread_notifications
        );
    }
    Ok(())
}
