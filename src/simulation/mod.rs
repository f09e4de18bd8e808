use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::core::services::SummaryService;
use crate::domain::{BudgetState, CategoryKey, Enumerated};

/// Lowest simulated spend, as a fraction of the category budget.
const MIN_SPEND_RATIO: f64 = 0.40;
/// Highest simulated spend, as a fraction of the category budget.
const MAX_SPEND_RATIO: f64 = 1.10;

/// What a simulation run pushed into the state.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub months: usize,
    pub expenses_recorded: usize,
}

/// Replays `months` of pseudo-random expenses through [`SummaryService::add_expense`].
///
/// Each amount falls between 40% and 110% of the category's monthly budget and is
/// rounded to whole units. Same seed, same history.
pub fn simulate_history(state: &mut BudgetState, months: usize, seed: u64) -> SimulationSummary {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut expenses_recorded = 0;

    for _ in 0..months {
        for key in CategoryKey::ALL {
            let budget = state.category(*key).budget.max(0.0);
            let ratio = rng.gen_range(MIN_SPEND_RATIO..=MAX_SPEND_RATIO);
            SummaryService::add_expense(state, *key, (budget * ratio).round());
            expenses_recorded += 1;
        }
    }

    info!(months, seed, expenses_recorded, "simulated spending history");
    SimulationSummary {
        months,
        expenses_recorded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QUARTER_WINDOW, YEAR_WINDOW};

    fn budgeted_state() -> BudgetState {
        let mut state = BudgetState::default();
        for key in CategoryKey::ALL {
            state.category_mut(*key).budget = 10_000.0 * key.weight();
        }
        state
    }

    #[test]
    fn same_seed_same_history() {
        let mut first = budgeted_state();
        let mut second = budgeted_state();
        simulate_history(&mut first, 5, 7);
        simulate_history(&mut second, 5, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn windows_stay_bounded_and_amounts_in_range() {
        let mut state = budgeted_state();
        let summary = simulate_history(&mut state, 20, 42);
        assert_eq!(summary.expenses_recorded, 20 * CategoryKey::ALL.len());
        for (_, entry) in state.categories.iter() {
            assert_eq!(entry.quarterly_spent.len(), QUARTER_WINDOW);
            assert_eq!(entry.yearly_spent.len(), YEAR_WINDOW);
            for amount in &entry.yearly_spent {
                assert!(*amount >= (entry.budget * MIN_SPEND_RATIO).floor());
                assert!(*amount <= (entry.budget * MAX_SPEND_RATIO).ceil());
                assert_eq!(amount.fract(), 0.0);
            }
        }
    }

    #[test]
    fn zero_budget_simulates_zero_spend() {
        let mut state = BudgetState::default();
        simulate_history(&mut state, 2, 1);
        assert_eq!(state.category(CategoryKey::Food).yearly_spent, vec![0.0, 0.0]);
    }
}
