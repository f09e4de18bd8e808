//! Derived display values. Recomputed on every refresh, never persisted.

use serde::{Deserialize, Serialize};

use crate::domain::{category::CategoryKey, period::Period};

/// Usage percentage at which a budget turns to [`BudgetStatus::Warning`].
pub const WARNING_THRESHOLD: f64 = 70.0;
/// Usage percentage at which a budget turns to [`BudgetStatus::Danger`].
pub const DANGER_THRESHOLD: f64 = 90.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Safe,
    Warning,
    Danger,
}

impl BudgetStatus {
    pub fn from_percentage(percent: f64) -> Self {
        Self::with_thresholds(percent, WARNING_THRESHOLD, DANGER_THRESHOLD)
    }

    pub fn with_thresholds(percent: f64, warning: f64, danger: f64) -> Self {
        if percent >= danger {
            BudgetStatus::Danger
        } else if percent >= warning {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Safe
        }
    }

    /// Style class understood by progress-bar renderers.
    pub fn css_class(self) -> &'static str {
        match self {
            BudgetStatus::Safe => "progress-safe",
            BudgetStatus::Warning => "progress-warning",
            BudgetStatus::Danger => "progress-danger",
        }
    }
}

/// Budget versus spend for one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetTotals {
    pub budgeted: f64,
    pub spent: f64,
    /// May be negative when spend exceeds the budget.
    pub remaining: f64,
    /// Zero when nothing is budgeted.
    pub percent_used: f64,
    pub status: BudgetStatus,
}

impl BudgetTotals {
    pub fn from_parts(budgeted: f64, spent: f64) -> Self {
        let percent_used = spent_percentage(spent, budgeted);
        Self {
            budgeted,
            spent,
            remaining: budgeted - spent,
            percent_used,
            status: BudgetStatus::from_percentage(percent_used),
        }
    }
}

/// `spent / budgeted × 100`, or exactly `0` when the budget is zero.
pub fn spent_percentage(spent: f64, budgeted: f64) -> f64 {
    if budgeted == 0.0 {
        return 0.0;
    }
    let percent = spent / budgeted * 100.0;
    if percent.is_finite() {
        percent
    } else {
        0.0
    }
}

/// One category card for the selected period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryView {
    pub key: CategoryKey,
    pub label: String,
    pub totals: BudgetTotals,
}

/// The headline cards for the selected period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetOverview {
    pub period: Period,
    pub totals: BudgetTotals,
    pub period_savings: f64,
    pub emergency_fund: f64,
}
