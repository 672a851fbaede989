// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, TimeZone, Utc};
use rusqlite::Connection;
use spendlog::clock::FixedClock;
use spendlog::models::NotificationKind;
use spendlog::store::{NotificationStore, SqliteStore, WELCOME_TITLE};
use spendlog::{cli, commands::notifications, db};

fn clock() -> FixedClock {
    FixedClock(Local.with_ymd_and_hms(2025, 5, 2, 10, 0, 0).unwrap())
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    let (_, m) = matches.subcommand().unwrap();
    notifications::handle(conn, &clock(), m)
}

#[test]
fn newest_first_and_mark_read() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let now = clock().0.with_timezone(&Utc);
    let first = store.load_notifications(now).unwrap();
    assert_eq!(first[0].title, WELCOME_TITLE);
    assert_eq!(first[0].kind, NotificationKind::Success);

    let later = now + chrono::Duration::minutes(5);
    let id = store
        .add_notification("Heads up", "Rent is due", NotificationKind::Info, later)
        .unwrap();
    let inbox = store.load_notifications(now).unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].id, id);
    assert_eq!(store.unread_count().unwrap(), 2);

    let id_arg = id.to_string();
    run(&conn, &["spendlog", "notify", "read", "--id", id_arg.as_str()]).unwrap();
    assert_eq!(store.unread_count().unwrap(), 1);
    assert!(store.load_notifications(now).unwrap()[0].read);
}

#[test]
fn read_unknown_id_fails() {
    let conn = setup();
    assert!(run(&conn, &["spendlog", "notify", "read", "--id", "99"]).is_err());
    assert!(run(&conn, &["spendlog", "notify", "read", "--id", "abc"]).is_err());
}

#[test]
fn clear_removes_everything() {
    let conn = setup();
    run(&conn, &["spendlog", "notify", "list"]).unwrap();
    run(&conn, &["spendlog", "notify", "clear"]).unwrap();
    let store = SqliteStore::new(&conn);
    assert_eq!(store.unread_count().unwrap(), 0);
    assert!(store
        .load_notifications(clock().0.with_timezone(&Utc))
        .unwrap()
        .is_empty());
}
