// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence behind small traits.
//!
//! Rows are validated on the way out: a transaction whose stored amount,
//! category or timestamp does not parse never reaches the aggregation code.

use crate::error::{Error, Result};
use crate::models::{
    check_amount, parse_amount, parse_timestamp, Budget, Category, NewTransaction, Notification,
    NotificationKind, Transaction,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub const WELCOME_TITLE: &str = "Welcome to Spendlog!";
pub const WELCOME_MESSAGE: &str =
    "Start tracking your daily expenses today. Use `spendlog tx add` to record your first transaction.";

pub trait TransactionStore {
    /// All transactions, newest first.
    fn list(&self) -> Result<Vec<Transaction>>;
    fn insert(&self, tx: &NewTransaction, at: DateTime<Utc>) -> Result<i64>;
    fn delete(&self, id: i64) -> Result<()>;
}

pub trait BudgetStore {
    fn budget(&self) -> Result<Option<Budget>>;
    fn save_budget(&self, monthly_limit: Decimal) -> Result<()>;
}

pub trait NotificationStore {
    /// Inbox, newest first. The first load ever seeds a welcome message.
    fn load_notifications(&self, now: DateTime<Utc>) -> Result<Vec<Notification>>;
    fn add_notification(
        &self,
        title: &str,
        message: &str,
        kind: NotificationKind,
        at: DateTime<Utc>,
    ) -> Result<i64>;
    fn mark_read(&self, id: i64) -> Result<()>;
    fn clear_notifications(&self) -> Result<usize>;
    fn unread_count(&self) -> Result<i64>;
    fn has_notification_since(
        &self,
        title: &str,
        message: &str,
        since: DateTime<Utc>,
    ) -> Result<bool>;
}

pub fn stamp(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A stored transaction row before validation.
#[derive(Debug, Clone)]
pub struct RawTransaction {
    pub id: i64,
    pub title: String,
    pub amount: String,
    pub r#type: String,
    pub category: String,
    pub icon: String,
    pub color: String,
    pub created_at: String,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = Error;

    fn try_from(raw: RawTransaction) -> Result<Self> {
        Ok(Transaction {
            id: raw.id,
            amount: parse_amount(&raw.amount)?,
            r#type: raw.r#type.parse()?,
            category: raw.category.parse::<Category>()?,
            date: parse_timestamp(&raw.created_at)?,
            title: raw.title,
            icon: raw.icon,
            color: raw.color,
        })
    }
}

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn raw_transactions(&self) -> Result<Vec<RawTransaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, amount, type, category, icon, color, created_at
             FROM transactions ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(RawTransaction {
                id: r.get(0)?,
                title: r.get(1)?,
                amount: r.get(2)?,
                r#type: r.get(3)?,
                category: r.get(4)?,
                icon: r.get(5)?,
                color: r.get(6)?,
                created_at: r.get(7)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Stored rows that fail validation, with the reason.
    pub fn invalid_transactions(&self) -> Result<Vec<(i64, String)>> {
        Ok(self
            .raw_transactions()?
            .into_iter()
            .filter_map(|raw| {
                let id = raw.id;
                Transaction::try_from(raw).err().map(|e| (id, e.to_string()))
            })
            .collect())
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

impl TransactionStore for SqliteStore<'_> {
    fn list(&self) -> Result<Vec<Transaction>> {
        let mut out = Vec::new();
        for raw in self.raw_transactions()? {
            let id = raw.id;
            match Transaction::try_from(raw) {
                Ok(t) => out.push(t),
                Err(e) => tracing::warn!(id, error = %e, "skipping invalid transaction row"),
            }
        }
        Ok(out)
    }

    fn insert(&self, tx: &NewTransaction, at: DateTime<Utc>) -> Result<i64> {
        check_amount(tx.amount)?;
        self.conn.execute(
            "INSERT INTO transactions(title, amount, type, category, icon, color, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tx.title,
                tx.amount.to_string(),
                tx.r#type.as_str(),
                tx.category.label(),
                tx.icon,
                tx.color,
                stamp(&at)
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, title = %tx.title, "transaction saved");
        Ok(id)
    }

    fn delete(&self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::NotFound {
                entity: "Transaction",
                id: id.to_string(),
            });
        }
        tracing::debug!(id, "transaction deleted");
        Ok(())
    }
}

impl BudgetStore for SqliteStore<'_> {
    fn budget(&self) -> Result<Option<Budget>> {
        let limit: Option<String> = self
            .conn
            .query_row("SELECT monthly_limit FROM budgets WHERE id=1", [], |r| {
                r.get(0)
            })
            .optional()?;
        match limit {
            Some(s) => Ok(Some(Budget {
                monthly_limit: parse_amount(&s)?,
            })),
            None => Ok(None),
        }
    }

    fn save_budget(&self, monthly_limit: Decimal) -> Result<()> {
        let monthly_limit = check_amount(monthly_limit)?;
        if monthly_limit.is_zero() {
            return Err(Error::validation(format!(
                "Monthly limit must be positive, got {}",
                monthly_limit
            )));
        }
        self.conn.execute(
            "INSERT INTO budgets(id, monthly_limit) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET monthly_limit=excluded.monthly_limit,
                                           updated_at=datetime('now')",
            params![monthly_limit.to_string()],
        )?;
        Ok(())
    }
}

impl NotificationStore for SqliteStore<'_> {
    fn load_notifications(&self, now: DateTime<Utc>) -> Result<Vec<Notification>> {
        if self.get_setting("notifications_seeded")?.is_none() {
            self.add_notification(
                WELCOME_TITLE,
                WELCOME_MESSAGE,
                NotificationKind::Success,
                now,
            )?;
            self.set_setting("notifications_seeded", "1")?;
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, title, message, kind, created_at, read
             FROM notifications ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, bool>(5)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, title, message, kind, created_at, read) = row?;
            out.push(Notification {
                id,
                title,
                message,
                date: parse_timestamp(&created_at)?,
                read,
                kind: kind.parse()?,
            });
        }
        Ok(out)
    }

    fn add_notification(
        &self,
        title: &str,
        message: &str,
        kind: NotificationKind,
        at: DateTime<Utc>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO notifications(title, message, kind, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![title, message, kind.as_str(), stamp(&at)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn mark_read(&self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("UPDATE notifications SET read=1 WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::NotFound {
                entity: "Notification",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn clear_notifications(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM notifications", [])?)
    }

    fn unread_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM notifications WHERE read=0", [], |r| {
                r.get(0)
            })?)
    }

    fn has_notification_since(
        &self,
        title: &str,
        message: &str,
        since: DateTime<Utc>,
    ) -> Result<bool> {
        let hit: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM notifications WHERE title=?1 AND message=?2 AND created_at>=?3 LIMIT 1",
                params![title, message, stamp(&since)],
                |r| r.get(0),
            )
            .optional()?;
        Ok(hit.is_some())
    }
}
