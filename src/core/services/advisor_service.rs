//! Investment mix recommendations and budget alerts.

use serde::{Deserialize, Serialize};

use crate::core::services::SummaryService;
use crate::domain::{
    BudgetState, BudgetStatus, CategoryKey, RiskTolerance, DANGER_THRESHOLD, WARNING_THRESHOLD,
};

/// Percentage split across asset classes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentMix {
    pub stocks: u8,
    pub bonds: u8,
    pub fixed_deposits: u8,
}

impl InvestmentMix {
    pub fn labels() -> [&'static str; 3] {
        ["Stocks", "Bonds", "Fixed Deposits"]
    }

    pub fn values(&self) -> [f64; 3] {
        [
            f64::from(self.stocks),
            f64::from(self.bonds),
            f64::from(self.fixed_deposits),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetAlert {
    pub category: CategoryKey,
    pub status: BudgetStatus,
    pub percent_used: f64,
    pub title: String,
    pub message: String,
}

pub struct AdvisorService;

impl AdvisorService {
    pub fn recommended_allocation(risk: RiskTolerance) -> InvestmentMix {
        let (stocks, bonds, fixed_deposits) = match risk {
            RiskTolerance::Conservative => (20, 50, 30),
            RiskTolerance::Moderate => (50, 30, 20),
            RiskTolerance::Aggressive => (70, 20, 10),
        };
        InvestmentMix {
            stocks,
            bonds,
            fixed_deposits,
        }
    }

    /// Alerts for the current period using the default status bands.
    pub fn budget_alerts(state: &BudgetState) -> Vec<BudgetAlert> {
        Self::budget_alerts_with(state, WARNING_THRESHOLD, DANGER_THRESHOLD)
    }

    pub fn budget_alerts_with(state: &BudgetState, warning: f64, danger: f64) -> Vec<BudgetAlert> {
        SummaryService::category_views(state)
            .into_iter()
            .filter_map(|view| {
                let percent = view.totals.percent_used;
                let status = BudgetStatus::with_thresholds(percent, warning, danger);
                let message = match status {
                    BudgetStatus::Safe => return None,
                    BudgetStatus::Danger if percent > 100.0 => format!(
                        "You've exceeded your {} budget by {:.0}%.",
                        view.label,
                        percent - 100.0
                    ),
                    _ => format!("You're close to your {} budget limit.", view.label),
                };
                Some(BudgetAlert {
                    category: view.key,
                    status,
                    percent_used: percent,
                    title: "Budget Alert".into(),
                    message,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocations_sum_to_one_hundred() {
        for risk in [
            RiskTolerance::Conservative,
            RiskTolerance::Moderate,
            RiskTolerance::Aggressive,
        ] {
            let mix = AdvisorService::recommended_allocation(risk);
            assert_eq!(
                u32::from(mix.stocks) + u32::from(mix.bonds) + u32::from(mix.fixed_deposits),
                100
            );
        }
        assert_eq!(
            AdvisorService::recommended_allocation(RiskTolerance::Aggressive).stocks,
            70
        );
    }

    #[test]
    fn alerts_flag_warning_and_overrun() {
        let mut state = BudgetState::default();
        state.category_mut(CategoryKey::Transportation).budget = 1_000.0;
        state.category_mut(CategoryKey::Entertainment).budget = 1_000.0;
        state.category_mut(CategoryKey::Food).budget = 1_000.0;
        SummaryService::add_expense(&mut state, CategoryKey::Transportation, 1_150.0);
        SummaryService::add_expense(&mut state, CategoryKey::Entertainment, 750.0);
        SummaryService::add_expense(&mut state, CategoryKey::Food, 100.0);

        let alerts = AdvisorService::budget_alerts(&state);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].category, CategoryKey::Transportation);
        assert_eq!(alerts[0].status, BudgetStatus::Danger);
        assert_eq!(
            alerts[0].message,
            "You've exceeded your Transportation budget by 15%."
        );
        assert_eq!(alerts[1].status, BudgetStatus::Warning);
        assert!(alerts[1].message.contains("close to your Entertainment"));
    }

    #[test]
    fn custom_thresholds_shift_bands() {
        let mut state = BudgetState::default();
        state.category_mut(CategoryKey::Food).budget = 100.0;
        SummaryService::add_expense(&mut state, CategoryKey::Food, 55.0);
        assert!(AdvisorService::budget_alerts(&state).is_empty());
        let alerts = AdvisorService::budget_alerts_with(&state, 50.0, 80.0);
        assert_eq!(alerts[0].status, BudgetStatus::Warning);
    }
}
