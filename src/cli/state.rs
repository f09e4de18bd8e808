use tracing::info;

use crate::{
    charts::{self, ChartRegistry, ALLOCATION_CHART, BUDGET_DISTRIBUTION_CHART, BUDGET_TREND_CHART},
    config::Config,
    core::services::{
        AdvisorService, BudgetAlert, BudgetService, InvestmentMix, ProfileForm, ProfileService,
        SummaryService,
    },
    domain::{BudgetOverview, BudgetState, CategoryKey, CategoryView, Period, UserProfile},
    errors::Result,
    simulation::{self, SimulationSummary},
    storage::{BudgetRepository, KeyValueStore},
};

/// Session state owned by the UI layer.
///
/// Holds the budget record and passes it by reference into the services. Every
/// mutation is persisted before returning.
pub struct Dashboard {
    repository: BudgetRepository<Box<dyn KeyValueStore>>,
    config: Config,
    state: BudgetState,
    profile: Option<UserProfile>,
    charts: ChartRegistry,
}

impl Dashboard {
    pub fn open(store: Box<dyn KeyValueStore>, config: Config) -> Self {
        let mut dashboard = Self {
            repository: BudgetRepository::new(store),
            config,
            state: BudgetState::default(),
            profile: None,
            charts: ChartRegistry::new(),
        };
        dashboard.refresh();
        dashboard
    }

    /// Re-reads whatever is persisted and re-derives the charts.
    pub fn refresh(&mut self) {
        let stored = self.repository.store().get(crate::storage::BUDGET_KEY);
        let has_record = matches!(stored, Ok(Some(_)));
        self.state = self.repository.load_state();
        if !has_record {
            self.state.current_period = self.config.default_period;
        }
        self.profile = self.repository.load_profile();
        self.render_charts();
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    /// Swaps in new preferences. Stored figures are left alone.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Validates the form, stores the profile and allocates budgets from it.
    ///
    /// The allocation is stored before the profile, and nothing in memory changes
    /// until both writes succeed.
    pub fn submit_profile(&mut self, form: &ProfileForm) -> Result<UserProfile> {
        let profile = ProfileService::validate(form)?;
        let mut state = self.state.clone();
        BudgetService::calculate_budgets(&mut state, &profile);
        self.repository.save_state(&state)?;
        self.repository.save_profile(&profile)?;
        info!(name = %profile.full_name, "profile saved");

        self.state = state;
        self.profile = Some(profile.clone());
        self.render_charts();
        Ok(profile)
    }

    pub fn add_expense(&mut self, key: CategoryKey, amount: f64) -> Result<CategoryView> {
        SummaryService::add_expense(&mut self.state, key, amount);
        self.commit()?;
        Ok(SummaryService::category_view(&self.state, key))
    }

    pub fn update_budget(&mut self, key: CategoryKey, amount: f64, period: Period) -> Result<()> {
        BudgetService::update_budget(&mut self.state, key, amount, period);
        self.commit()
    }

    pub fn switch_period(&mut self, period: Period) -> Result<()> {
        SummaryService::switch_period(&mut self.state, period);
        self.commit()
    }

    pub fn simulate(&mut self, months: usize, seed: u64) -> Result<SimulationSummary> {
        let summary = simulation::simulate_history(&mut self.state, months, seed);
        self.commit()?;
        Ok(summary)
    }

    /// Forgets the profile and budget, starting again from zero.
    pub fn reset(&mut self) -> Result<()> {
        self.repository.reset()?;
        self.charts.clear();
        self.refresh();
        Ok(())
    }

    pub fn overview(&self) -> BudgetOverview {
        SummaryService::overview(&self.state)
    }

    pub fn category_views(&self) -> Vec<CategoryView> {
        SummaryService::category_views(&self.state)
    }

    pub fn alerts(&self) -> Vec<BudgetAlert> {
        AdvisorService::budget_alerts_with(
            &self.state,
            self.config.alert_warning,
            self.config.alert_danger,
        )
    }

    pub fn recommendation(&self) -> Option<InvestmentMix> {
        self.profile
            .as_ref()
            .map(|profile| AdvisorService::recommended_allocation(profile.risk_tolerance))
    }

    fn commit(&mut self) -> Result<()> {
        self.repository.save_state(&self.state)?;
        self.render_charts();
        Ok(())
    }

    fn render_charts(&mut self) {
        self.charts
            .render(BUDGET_TREND_CHART, charts::budget_vs_spent(&self.state));
        self.charts.render(
            BUDGET_DISTRIBUTION_CHART,
            charts::spending_distribution(&self.state),
        );
        if let Some(mix) = self.recommendation() {
            self.charts
                .render(ALLOCATION_CHART, charts::investment_mix(&mix));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BudgetError;
    use crate::storage::{MemoryStore, BUDGET_KEY, PROFILE_KEY};

    fn dashboard() -> Dashboard {
        Dashboard::open(Box::new(MemoryStore::new()), Config::default())
    }

    #[test]
    fn profile_submission_allocates_and_persists() {
        let mut dash = dashboard();
        dash.submit_profile(&ProfileForm::new("Meera", "100000", "20", "aggressive"))
            .unwrap();
        assert!((dash.state().category(CategoryKey::Housing).budget - 24_000.0).abs() < 1e-6);
        assert_eq!(dash.charts().len(), 3);

        dash.refresh();
        assert!((dash.state().total_budget - 80_000.0).abs() < 1e-6);
        assert_eq!(dash.profile().map(|p| p.full_name.as_str()), Some("Meera"));
    }

    #[test]
    fn invalid_profile_leaves_state_untouched() {
        let mut dash = dashboard();
        let err = dash
            .submit_profile(&ProfileForm::new("", "-5", "101", "bold"))
            .unwrap_err();
        match err {
            BudgetError::Validation(errors) => assert_eq!(errors.len(), 4),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(dash.state(), &BudgetState::default());
        assert!(dash.profile().is_none());
    }

    /// Accepts writes until `fail_key` is written.
    struct FailingStore {
        inner: MemoryStore,
        fail_key: &'static str,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if key == self.fail_key {
                return Err(BudgetError::Storage("disk full".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }

        fn clear(&self) -> Result<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn failed_budget_write_keeps_profile_unsaved() {
        let store = FailingStore {
            inner: MemoryStore::new(),
            fail_key: BUDGET_KEY,
        };
        let mut dash = Dashboard::open(Box::new(store), Config::default());
        let err = dash
            .submit_profile(&ProfileForm::new("Meera", "100000", "20", "aggressive"))
            .unwrap_err();
        assert!(matches!(err, BudgetError::Storage(_)));
        assert!(dash.profile().is_none());
        assert_eq!(dash.state(), &BudgetState::default());

        dash.refresh();
        assert!(dash.profile().is_none());
    }

    #[test]
    fn failed_profile_write_leaves_memory_untouched() {
        let store = FailingStore {
            inner: MemoryStore::new(),
            fail_key: PROFILE_KEY,
        };
        let mut dash = Dashboard::open(Box::new(store), Config::default());
        assert!(dash
            .submit_profile(&ProfileForm::new("Meera", "100000", "20", "aggressive"))
            .is_err());
        assert!(dash.profile().is_none());
        assert_eq!(dash.state(), &BudgetState::default());
    }

    #[test]
    fn new_session_uses_configured_period() {
        let config = Config {
            default_period: Period::Quarterly,
            ..Config::default()
        };
        let dash = Dashboard::open(Box::new(MemoryStore::new()), config);
        assert_eq!(dash.state().current_period, Period::Quarterly);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut dash = dashboard();
        dash.add_expense(CategoryKey::Food, 300.0).unwrap();
        dash.reset().unwrap();
        assert_eq!(dash.state(), &BudgetState::default());
    }
}
