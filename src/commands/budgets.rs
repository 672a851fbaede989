// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::monthly_expense_total;
use crate::budget::{evaluate, AlertLevel, BudgetAlert};
use crate::clock::{start_of_month, Clock};
use crate::models::{parse_amount, Transaction};
use crate::store::{BudgetStore, NotificationStore, SqliteStore, TransactionStore};
use crate::utils::{fmt_usd, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub const ALERT_TITLE: &str = "Budget alert";

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub limit: Decimal,
    pub spent: Decimal,
    pub alert: BudgetAlert,
}

/// Current month's spending against the configured limit, if there is one.
pub fn status(
    store: &SqliteStore,
    transactions: &[Transaction],
    now: &DateTime<Local>,
) -> Result<Option<BudgetStatus>> {
    let Some(budget) = store.budget()? else {
        return Ok(None);
    };
    let spent = monthly_expense_total(transactions, now);
    Ok(evaluate(spent, budget.monthly_limit).map(|alert| BudgetStatus {
        limit: budget.monthly_limit,
        spent,
        alert,
    }))
}

/// File a notification for a non-safe alert, once per message per month.
pub fn notify_if_needed(
    store: &SqliteStore,
    alert: &BudgetAlert,
    now: &DateTime<Local>,
) -> Result<bool> {
    if alert.level == AlertLevel::Safe {
        return Ok(false);
    }
    if store.has_notification_since(ALERT_TITLE, &alert.message, start_of_month(now))? {
        return Ok(false);
    }
    store.add_notification(
        ALERT_TITLE,
        &alert.message,
        alert.level.notification_kind(),
        now.with_timezone(&Utc),
    )?;
    tracing::info!(level = %alert.level, "budget alert filed");
    Ok(true)
}

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", _)) => show(conn, clock)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let limit = parse_amount(sub.get_one::<String>("limit").unwrap())?;
    SqliteStore::new(conn).save_budget(limit)?;
    println!("Monthly budget set to {}", fmt_usd(limit));
    Ok(())
}

fn show(conn: &Connection, clock: &dyn Clock) -> Result<()> {
    let store = SqliteStore::new(conn);
    let now = clock.now();
    let txs = store.list()?;
    match status(&store, &txs, &now)? {
        Some(st) => {
            notify_if_needed(&store, &st.alert, &now)?;
            let rows = vec![vec![
                fmt_usd(st.limit),
                fmt_usd(st.spent),
                st.alert.level.to_string(),
                st.alert.message.clone(),
            ]];
            println!(
                "{}",
                pretty_table(&["Monthly limit", "Spent this month", "Level", "Alert"], rows)
            );
        }
        None => println!("No monthly budget configured (use `budget set <limit>`)"),
    }
    Ok(())
}
