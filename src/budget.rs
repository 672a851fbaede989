// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::percent_of;
use crate::models::NotificationKind;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Safe,
    Info,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Safe => "safe",
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }

    /// How the alert is filed in the notification inbox.
    pub fn notification_kind(&self) -> NotificationKind {
        match self {
            AlertLevel::Safe => NotificationKind::Success,
            AlertLevel::Info => NotificationKind::Info,
            AlertLevel::Warning | AlertLevel::Danger => NotificationKind::Warning,
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetAlert {
    pub level: AlertLevel,
    pub message: String,
}

/// Classify monthly spending against a limit.
///
/// Returns `None` when no positive limit is configured.
pub fn evaluate(total_expense: Decimal, limit: Decimal) -> Option<BudgetAlert> {
    if limit <= Decimal::ZERO {
        return None;
    }
    let pct = percent_of(total_expense, limit);
    let (level, message) = if pct >= Decimal::ONE_HUNDRED {
        (AlertLevel::Danger, "Budget exceeded")
    } else if pct >= Decimal::from(90) {
        (AlertLevel::Warning, "90% budget used")
    } else if pct >= Decimal::from(70) {
        (AlertLevel::Info, "70% budget used")
    } else {
        (AlertLevel::Safe, "")
    };
    Some(BudgetAlert {
        level,
        message: message.to_string(),
    })
}

/// Share of the limit already spent, capped at 100.
pub fn progress(total_expense: Decimal, limit: Decimal) -> Decimal {
    percent_of(total_expense, limit).min(Decimal::ONE_HUNDRED)
}
