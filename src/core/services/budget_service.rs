//! Derives category allocations from income and applies manual budget edits.

use tracing::debug;

use crate::domain::{BudgetState, CategoryKey, Enumerated, Period, UserProfile};

/// Months of income targeted by the emergency fund.
pub const EMERGENCY_FUND_MONTHS: f64 = 6.0;

/// Stateless allocation utilities that operate over a [`BudgetState`].
pub struct BudgetService;

impl BudgetService {
    /// Splits disposable income across the fixed categories.
    ///
    /// The profile must already be validated; see
    /// [`ProfileService::validate`](super::ProfileService::validate).
    pub fn calculate_budgets(state: &mut BudgetState, profile: &UserProfile) {
        let income = profile.monthly_income;
        let savings_amount = income * (profile.savings_goal / 100.0);
        let disposable = income - savings_amount;

        state.total_budget = disposable;
        state.savings_goal = savings_amount;
        state.emergency_fund = income * EMERGENCY_FUND_MONTHS;

        for key in CategoryKey::ALL {
            state.category_mut(*key).budget = disposable * key.weight();
        }
        debug!(income, disposable, savings_amount, "budgets recalculated");
    }

    /// Overwrites one category budget and re-derives the total from the categories.
    pub fn update_budget(state: &mut BudgetState, key: CategoryKey, amount: f64, period: Period) {
        let monthly = period.to_monthly(amount);
        state.category_mut(key).budget = monthly;
        state.total_budget = state.categories.total_budget();
        debug!(category = %key, monthly, total = state.total_budget, "category budget updated");
    }
}
