// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::commands::budgets;
use crate::filter::{filter_transactions, DateRange, FilterCriteria};
use crate::models::{parse_amount, Category, NewTransaction, Transaction, TxType};
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{fmt_local, fmt_signed, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Deserialize;

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, clock, sub)?,
        Some(("add-batch", sub)) => add_batch(conn, clock, sub)?,
        Some(("income", sub)) => income(conn, clock, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("history", sub)) => history(conn, clock, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let r#type: TxType = sub.get_one::<String>("type").unwrap().parse()?;
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;

    let mut tx = NewTransaction::new(title, amount, r#type, category)?;
    if let Some(icon) = sub.get_one::<String>("icon") {
        tx = tx.with_icon(icon);
    }
    if let Some(color) = sub.get_one::<String>("color") {
        tx = tx.with_color(color);
    }
    save_all(conn, clock, &[tx])?;
    Ok(())
}

fn add_batch(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("file").unwrap();
    let body =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let drafts = parse_drafts(&body).with_context(|| format!("Invalid drafts in {}", path))?;
    if drafts.is_empty() {
        println!("Nothing to save");
        return Ok(());
    }
    save_all(conn, clock, &drafts)?;
    Ok(())
}

fn income(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    save_all(conn, clock, &[NewTransaction::quick_income(amount)?])?;
    Ok(())
}

/// Insert every item or none, then re-check the budget against the
/// refreshed list.
pub fn save_all(conn: &Connection, clock: &dyn Clock, items: &[NewTransaction]) -> Result<Vec<i64>> {
    let now = clock.now();
    let db_tx = conn.unchecked_transaction()?;
    let mut ids = Vec::with_capacity(items.len());
    {
        let store = SqliteStore::new(&db_tx);
        for item in items {
            ids.push(store.insert(item, now.with_timezone(&Utc))?);
        }
    }
    db_tx.commit()?;

    for item in items {
        println!(
            "Recorded {} {} '{}' ({})",
            item.r#type, item.amount, item.title, item.category
        );
    }

    let store = SqliteStore::new(conn);
    let txs = store.list()?;
    if let Some(st) = budgets::status(&store, &txs, &now)? {
        if budgets::notify_if_needed(&store, &st.alert, &now)? {
            println!("{}", st.alert.message);
        }
    }
    Ok(ids)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DraftAmount {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Deserialize)]
struct Draft {
    title: String,
    amount: DraftAmount,
    #[serde(rename = "type", default = "default_type")]
    kind: String,
    category: String,
    icon: Option<String>,
    color: Option<String>,
}

fn default_type() -> String {
    "expense".into()
}

/// Parse a JSON array of drafts; every entry is validated before anything
/// is returned.
pub fn parse_drafts(json: &str) -> Result<Vec<NewTransaction>> {
    let drafts: Vec<Draft> = serde_json::from_str(json)?;
    let mut out = Vec::with_capacity(drafts.len());
    for (i, d) in drafts.into_iter().enumerate() {
        let amount = match &d.amount {
            DraftAmount::Text(s) => parse_amount(s),
            DraftAmount::Number(n) => parse_amount(&n.to_string()),
        }
        .with_context(|| format!("draft #{}", i + 1))?;
        let r#type = d
            .kind
            .parse::<TxType>()
            .with_context(|| format!("draft #{}", i + 1))?;
        let category = d
            .category
            .parse::<Category>()
            .with_context(|| format!("draft #{}", i + 1))?;
        let mut tx = NewTransaction::new(&d.title, amount, r#type, category)
            .with_context(|| format!("draft #{}", i + 1))?;
        if let Some(icon) = &d.icon {
            tx = tx.with_icon(icon);
        }
        if let Some(color) = &d.color {
            tx = tx.with_color(color);
        }
        out.push(tx);
    }
    Ok(out)
}

fn print_transactions(json_flag: bool, jsonl_flag: bool, data: &[Transaction]) -> Result<()> {
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    fmt_local(&t.date),
                    t.title.clone(),
                    t.category.to_string(),
                    fmt_signed(t),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Title", "Category", "Amount"], rows)
        );
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    print_transactions(sub.get_flag("json"), sub.get_flag("jsonl"), &data)
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let mut txs = SqliteStore::new(conn).list()?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }
    Ok(txs)
}

fn history(conn: &Connection, clock: &dyn Clock, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_history(conn, clock, sub)?;
    if data.is_empty() && !sub.get_flag("json") && !sub.get_flag("jsonl") {
        println!("No transactions match");
        return Ok(());
    }
    print_transactions(sub.get_flag("json"), sub.get_flag("jsonl"), &data)
}

fn optional_amount(sub: &clap::ArgMatches, name: &str) -> Result<Option<Decimal>> {
    match sub.get_one::<String>(name).filter(|s| !s.trim().is_empty()) {
        Some(s) => Ok(Some(
            parse_amount(s).with_context(|| format!("--{}", name))?,
        )),
        None => Ok(None),
    }
}

pub fn criteria_from_matches(sub: &clap::ArgMatches) -> Result<FilterCriteria> {
    let category = match sub.get_one::<String>("category") {
        Some(c) => Some(c.parse::<Category>()?),
        None => None,
    };
    let date_range = match sub.get_one::<String>("range") {
        Some(r) => r.parse::<DateRange>()?,
        None => DateRange::All,
    };
    Ok(FilterCriteria {
        search_text: sub.get_one::<String>("search").cloned().unwrap_or_default(),
        category,
        min_amount: optional_amount(sub, "min")?,
        max_amount: optional_amount(sub, "max")?,
        date_range,
    })
}

pub fn query_history(
    conn: &Connection,
    clock: &dyn Clock,
    sub: &clap::ArgMatches,
) -> Result<Vec<Transaction>> {
    let criteria = criteria_from_matches(sub)?;
    let txs = SqliteStore::new(conn).list()?;
    tracing::debug!(?criteria, total = txs.len(), "filtering history");
    Ok(filter_transactions(&txs, &criteria, &clock.now())
        .into_iter()
        .cloned()
        .collect())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("id").unwrap().trim();
    let id: i64 = raw
        .parse()
        .with_context(|| format!("Invalid transaction id '{}'", raw))?;
    SqliteStore::new(conn).delete(id)?;
    println!("Deleted transaction {}", id);
    Ok(())
}
