use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::{
    core::services::ProfileForm,
    domain::{Displayable, Enumerated, RiskTolerance, UserProfile},
};

use super::CliError;

/// Collects raw profile answers. Validation happens when the form is submitted,
/// so every bad field is reported together.
pub fn profile_form(current: Option<&UserProfile>) -> Result<ProfileForm, CliError> {
    let theme = ColorfulTheme::default();

    let full_name = text(&theme, "Full name", current.map(|p| p.full_name.clone()))?;
    let monthly_income = text(
        &theme,
        "Monthly income",
        current.map(|p| p.monthly_income.to_string()),
    )?;
    let savings_goal = text(
        &theme,
        "Savings goal (% of income)",
        current.map(|p| p.savings_goal.to_string()),
    )?;

    let labels: Vec<String> = RiskTolerance::ALL
        .iter()
        .map(Displayable::display_label)
        .collect();
    let default = current
        .and_then(|p| RiskTolerance::ALL.iter().position(|r| *r == p.risk_tolerance))
        .unwrap_or(1);
    let index = Select::with_theme(&theme)
        .with_prompt("Risk tolerance")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(ProfileForm::new(
        full_name,
        monthly_income,
        savings_goal,
        RiskTolerance::ALL[index].key(),
    ))
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool, CliError> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CliError::from)
}

fn text(theme: &ColorfulTheme, prompt: &str, default: Option<String>) -> Result<String, CliError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(value) = default {
        input = input.default(value);
    }
    Ok(input.interact_text()?)
}
