// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::store::{NotificationStore, SqliteStore};
use crate::utils::{fmt_local, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &Connection, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("list", sub)) => {
            let data = store.load_notifications(clock.now().with_timezone(&Utc))?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                if data.is_empty() {
                    println!("No notifications yet");
                    return Ok(());
                }
                let rows = data
                    .iter()
                    .map(|n| {
                        vec![
                            n.id.to_string(),
                            if n.read { " " } else { "*" }.to_string(),
                            n.kind.as_str().to_string(),
                            fmt_local(&n.date),
                            n.title.clone(),
                            n.message.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "New", "Kind", "Date", "Title", "Message"], rows)
                );
            }
        }
        Some(("read", sub)) => {
            let raw = sub.get_one::<String>("id").unwrap().trim();
            let id: i64 = raw
                .parse()
                .with_context(|| format!("Invalid notification id '{}'", raw))?;
            store.mark_read(id)?;
            println!("Marked notification {} as read", id);
        }
        Some(("clear", _)) => {
            let n = store.clear_notifications()?;
            println!("Cleared {} notification(s)", n);
        }
        Some(("unread", _)) => {
            println!("{}", store.unread_count()?);
        }
        _ => {}
    }
    Ok(())
}
