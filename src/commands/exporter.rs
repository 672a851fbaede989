// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{stamp, SqliteStore, TransactionStore};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    // oldest first, the order they were recorded in
    let mut txs = SqliteStore::new(conn).list()?;
    txs.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "title", "type", "category", "amount", "icon", "color",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.to_string(),
                    stamp(&t.date),
                    t.title.clone(),
                    t.r#type.to_string(),
                    t.category.to_string(),
                    t.amount.to_string(),
                    t.icon.clone(),
                    t.color.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&txs)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    tracing::info!(count = txs.len(), out = %out, "export finished");
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
