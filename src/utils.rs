// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxType};
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::{Decimal, RoundingStrategy};

/// en-US dollar formatting of the absolute value, e.g. `$1,234.50`.
pub fn fmt_usd(d: Decimal) -> String {
    let v = d
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", v);
    let (int, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}.{}", grouped, frac)
}

/// Amount with the sign implied by its type: `+$5.00` / `-$5.00`.
pub fn fmt_signed(t: &Transaction) -> String {
    let sign = match t.r#type {
        TxType::Income => '+',
        TxType::Expense => '-',
    };
    format!("{}{}", sign, fmt_usd(t.amount))
}

/// Balances only carry a sign when negative.
pub fn fmt_balance(d: Decimal) -> String {
    if d.is_sign_negative() && !d.is_zero() {
        format!("-{}", fmt_usd(d))
    } else {
        fmt_usd(d)
    }
}

pub fn fmt_local(d: &DateTime<Utc>) -> String {
    d.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn usd_groups_thousands_and_drops_sign() {
        assert_eq!(fmt_usd(d("0")), "$0.00");
        assert_eq!(fmt_usd(d("4.5")), "$4.50");
        assert_eq!(fmt_usd(d("1234.567")), "$1,234.57");
        assert_eq!(fmt_usd(d("-1000000")), "$1,000,000.00");
        assert_eq!(fmt_usd(d("999.995")), "$1,000.00");
    }

    #[test]
    fn balance_sign_only_when_negative() {
        assert_eq!(fmt_balance(d("-12.3")), "-$12.30");
        assert_eq!(fmt_balance(d("12.3")), "$12.30");
    }
}
