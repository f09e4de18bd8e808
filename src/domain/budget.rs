//! The persisted budget record and its per-category entries.

use serde::{Deserialize, Serialize};

use crate::domain::{category::CategoryKey, common::Enumerated, period::Period};

/// Capacity of the quarterly spend window.
pub const QUARTER_WINDOW: usize = 3;
/// Capacity of the yearly spend window.
pub const YEAR_WINDOW: usize = 12;

/// Allocation and spend history for one spending category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudget {
    /// Monthly allocation.
    #[serde(default)]
    pub budget: f64,
    /// Current-month spend. Each expense overwrites it.
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub quarterly_spent: Vec<f64>,
    #[serde(default)]
    pub yearly_spent: Vec<f64>,
}

impl CategoryBudget {
    /// Records an expense: replaces `spent` and slides both history windows.
    pub fn record(&mut self, amount: f64) {
        self.spent = amount;
        push_bounded(&mut self.quarterly_spent, amount, QUARTER_WINDOW);
        push_bounded(&mut self.yearly_spent, amount, YEAR_WINDOW);
    }

    /// Drops the oldest history entries beyond window capacity.
    pub fn clamp_history(&mut self) {
        trim_front(&mut self.quarterly_spent, QUARTER_WINDOW);
        trim_front(&mut self.yearly_spent, YEAR_WINDOW);
    }
}

fn push_bounded(window: &mut Vec<f64>, amount: f64, capacity: usize) {
    trim_front(window, capacity.saturating_sub(1));
    window.push(amount);
}

fn trim_front(window: &mut Vec<f64>, keep: usize) {
    if window.len() > keep {
        let excess = window.len() - keep;
        window.drain(..excess);
    }
}

/// The fixed category table. Missing entries load as zero; unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Categories {
    pub housing: CategoryBudget,
    pub food: CategoryBudget,
    pub transportation: CategoryBudget,
    pub entertainment: CategoryBudget,
    pub shopping: CategoryBudget,
    pub utilities: CategoryBudget,
}

impl Categories {
    pub fn get(&self, key: CategoryKey) -> &CategoryBudget {
        match key {
            CategoryKey::Housing => &self.housing,
            CategoryKey::Food => &self.food,
            CategoryKey::Transportation => &self.transportation,
            CategoryKey::Entertainment => &self.entertainment,
            CategoryKey::Shopping => &self.shopping,
            CategoryKey::Utilities => &self.utilities,
        }
    }

    pub fn get_mut(&mut self, key: CategoryKey) -> &mut CategoryBudget {
        match key {
            CategoryKey::Housing => &mut self.housing,
            CategoryKey::Food => &mut self.food,
            CategoryKey::Transportation => &mut self.transportation,
            CategoryKey::Entertainment => &mut self.entertainment,
            CategoryKey::Shopping => &mut self.shopping,
            CategoryKey::Utilities => &mut self.utilities,
        }
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryKey, &CategoryBudget)> {
        CategoryKey::ALL.iter().map(move |key| (*key, self.get(*key)))
    }

    pub fn total_budget(&self) -> f64 {
        self.iter().map(|(_, entry)| entry.budget).sum()
    }
}

/// The whole budget record, persisted as one blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetState {
    /// Disposable income after savings, monthly basis.
    #[serde(default)]
    pub total_budget: f64,
    /// Absolute monthly savings amount.
    #[serde(default)]
    pub savings_goal: f64,
    #[serde(default)]
    pub emergency_fund: f64,
    #[serde(default)]
    pub current_period: Period,
    #[serde(default)]
    pub categories: Categories,
}

impl BudgetState {
    pub fn category(&self, key: CategoryKey) -> &CategoryBudget {
        self.categories.get(key)
    }

    pub fn category_mut(&mut self, key: CategoryKey) -> &mut CategoryBudget {
        self.categories.get_mut(key)
    }

    /// Re-establishes window bounds on a record read from storage.
    pub fn normalize(&mut self) {
        for key in CategoryKey::ALL {
            self.categories.get_mut(*key).clamp_history();
        }
    }
}
