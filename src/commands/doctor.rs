// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::parse_amount;
use crate::store::SqliteStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

/// Problems found in the database, as (issue, detail) pairs.
pub fn issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Transactions that would be skipped when loading
    for (id, reason) in SqliteStore::new(conn).invalid_transactions()? {
        rows.push(vec!["invalid_transaction".into(), format!("#{}: {}", id, reason)]);
    }

    // 2) A stored budget limit that is not a positive amount
    let limit: Option<String> = conn
        .query_row("SELECT monthly_limit FROM budgets WHERE id=1", [], |r| {
            r.get(0)
        })
        .optional()?;
    if let Some(s) = limit {
        match parse_amount(&s) {
            Ok(d) if !d.is_zero() => {}
            Ok(_) => rows.push(vec!["zero_budget".into(), s]),
            Err(e) => rows.push(vec!["invalid_budget".into(), e.to_string()]),
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
