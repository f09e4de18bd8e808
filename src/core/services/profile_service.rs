use crate::domain::{Enumerated, RiskTolerance, UserProfile};
use crate::errors::ValidationErrors;

/// Raw, unvalidated profile input as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub full_name: String,
    pub monthly_income: String,
    pub savings_goal: String,
    pub risk_tolerance: String,
}

impl ProfileForm {
    pub fn new(
        full_name: impl Into<String>,
        monthly_income: impl Into<String>,
        savings_goal: impl Into<String>,
        risk_tolerance: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            monthly_income: monthly_income.into(),
            savings_goal: savings_goal.into(),
            risk_tolerance: risk_tolerance.into(),
        }
    }
}

pub struct ProfileService;

impl ProfileService {
    /// Checks every field independently and reports all failures together.
    pub fn validate(form: &ProfileForm) -> Result<UserProfile, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let full_name = form.full_name.trim();
        if full_name.is_empty() {
            errors.push("fullName", "Please enter your full name");
        }

        let monthly_income = parse_number(&form.monthly_income);
        if !matches!(monthly_income, Some(income) if income > 0.0) {
            errors.push("monthlyIncome", "Please enter a valid monthly income");
        }

        let savings_goal = parse_number(&form.savings_goal);
        if !matches!(savings_goal, Some(goal) if (0.0..=100.0).contains(&goal)) {
            errors.push("savingsGoal", "Savings goal must be between 0 and 100");
        }

        let risk_tolerance = RiskTolerance::from_key(&form.risk_tolerance);
        if risk_tolerance.is_none() {
            errors.push(
                "riskTolerance",
                format!(
                    "Please select a risk tolerance ({})",
                    RiskTolerance::keys().join(", ")
                ),
            );
        }

        match (monthly_income, savings_goal, risk_tolerance) {
            (Some(monthly_income), Some(savings_goal), Some(risk_tolerance))
                if errors.is_empty() =>
            {
                Ok(UserProfile {
                    full_name: full_name.to_string(),
                    monthly_income,
                    savings_goal,
                    risk_tolerance,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
