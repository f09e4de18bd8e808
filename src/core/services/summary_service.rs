//! Period aggregation: multipliers, spend rollups and derived display values.

use tracing::debug;

use crate::domain::{
    BudgetOverview, BudgetState, BudgetTotals, CategoryBudget, CategoryKey, CategoryView,
    Displayable, Enumerated, Period, QUARTER_WINDOW, YEAR_WINDOW,
};

pub struct SummaryService;

impl SummaryService {
    /// Scale factor from a monthly budget to the given period. Never applied to spend.
    pub fn period_multiplier(period: Period) -> f64 {
        f64::from(period.multiplier())
    }

    /// Spend for the period, read from the history windows.
    pub fn period_spent(entry: &CategoryBudget, period: Period) -> f64 {
        match period {
            Period::Monthly => entry.spent,
            Period::Quarterly => sum_tail(&entry.quarterly_spent, QUARTER_WINDOW),
            Period::Yearly => sum_tail(&entry.yearly_spent, YEAR_WINDOW),
        }
    }

    /// Records an expense against a category.
    ///
    /// `spent` is replaced rather than accumulated.
    pub fn add_expense(state: &mut BudgetState, key: CategoryKey, amount: f64) {
        state.category_mut(key).record(amount);
        debug!(category = %key, amount, "expense recorded");
    }

    pub fn switch_period(state: &mut BudgetState, period: Period) {
        state.current_period = period;
        debug!(%period, "reporting period switched");
    }

    pub fn category_view(state: &BudgetState, key: CategoryKey) -> CategoryView {
        let period = state.current_period;
        let entry = state.category(key);
        let budgeted = entry.budget * Self::period_multiplier(period);
        CategoryView {
            key,
            label: key.display_label(),
            totals: BudgetTotals::from_parts(budgeted, Self::period_spent(entry, period)),
        }
    }

    /// Category cards in declaration order.
    pub fn category_views(state: &BudgetState) -> Vec<CategoryView> {
        CategoryKey::ALL
            .iter()
            .map(|key| Self::category_view(state, *key))
            .collect()
    }

    pub fn overview(state: &BudgetState) -> BudgetOverview {
        let period = state.current_period;
        let multiplier = Self::period_multiplier(period);
        let spent: f64 = state
            .categories
            .iter()
            .map(|(_, entry)| Self::period_spent(entry, period))
            .sum();
        BudgetOverview {
            period,
            totals: BudgetTotals::from_parts(state.total_budget * multiplier, spent),
            period_savings: state.savings_goal * multiplier,
            emergency_fund: state.emergency_fund,
        }
    }
}

fn sum_tail(values: &[f64], count: usize) -> f64 {
    let start = values.len().saturating_sub(count);
    values[start..].iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BudgetStatus;

    fn state_with_food_history(amounts: &[f64]) -> BudgetState {
        let mut state = BudgetState::default();
        state.category_mut(CategoryKey::Food).budget = 1_000.0;
        for amount in amounts {
            SummaryService::add_expense(&mut state, CategoryKey::Food, *amount);
        }
        state
    }

    #[test]
    fn sliding_window_keeps_newest_three() {
        let state = state_with_food_history(&[100.0, 200.0, 300.0]);
        assert_eq!(
            state.category(CategoryKey::Food).quarterly_spent,
            vec![100.0, 200.0, 300.0]
        );
        let state = state_with_food_history(&[100.0, 200.0, 300.0, 400.0]);
        assert_eq!(
            state.category(CategoryKey::Food).quarterly_spent,
            vec![200.0, 300.0, 400.0]
        );
    }

    #[test]
    fn monthly_spend_is_latest_entry() {
        let state = state_with_food_history(&[120.0, 80.0, 45.0]);
        let entry = state.category(CategoryKey::Food);
        assert_eq!(SummaryService::period_spent(entry, Period::Monthly), 45.0);
        assert_eq!(SummaryService::period_spent(entry, Period::Quarterly), 245.0);
        assert_eq!(SummaryService::period_spent(entry, Period::Yearly), 245.0);
    }

    #[test]
    fn partial_windows_sum_what_exists() {
        let state = state_with_food_history(&[10.0]);
        let entry = state.category(CategoryKey::Food);
        assert_eq!(SummaryService::period_spent(entry, Period::Quarterly), 10.0);
    }

    #[test]
    fn views_scale_budget_but_not_spend() {
        let mut state = state_with_food_history(&[500.0, 700.0]);
        SummaryService::switch_period(&mut state, Period::Quarterly);
        let view = SummaryService::category_view(&state, CategoryKey::Food);
        assert_eq!(view.totals.budgeted, 3_000.0);
        assert_eq!(view.totals.spent, 1_200.0);
        assert_eq!(view.totals.remaining, 1_800.0);
        assert_eq!(view.totals.percent_used, 40.0);
        assert_eq!(view.totals.status, BudgetStatus::Safe);
        assert_eq!(view.label, "Food");
    }

    #[test]
    fn zero_budget_category_reports_zero_percent() {
        let mut state = BudgetState::default();
        SummaryService::add_expense(&mut state, CategoryKey::Shopping, 90.0);
        let view = SummaryService::category_view(&state, CategoryKey::Shopping);
        assert_eq!(view.totals.percent_used, 0.0);
        assert!(!view.totals.percent_used.is_nan());
    }

    #[test]
    fn overview_rolls_up_every_category() {
        let mut state = BudgetState {
            total_budget: 10_000.0,
            savings_goal: 2_000.0,
            ..BudgetState::default()
        };
        SummaryService::add_expense(&mut state, CategoryKey::Housing, 4_000.0);
        SummaryService::add_expense(&mut state, CategoryKey::Food, 3_500.0);
        let overview = SummaryService::overview(&state);
        assert_eq!(overview.totals.spent, 7_500.0);
        assert_eq!(overview.totals.status, BudgetStatus::Warning);

        SummaryService::switch_period(&mut state, Period::Yearly);
        let overview = SummaryService::overview(&state);
        assert_eq!(overview.totals.budgeted, 120_000.0);
        assert_eq!(overview.period_savings, 24_000.0);
        assert_eq!(overview.totals.spent, 7_500.0);
    }

    #[test]
    fn empty_state_overview_is_not_nan() {
        let overview = SummaryService::overview(&BudgetState::default());
        assert_eq!(overview.totals.percent_used, 0.0);
        assert_eq!(SummaryService::category_views(&BudgetState::default()).len(), 6);
    }
}
