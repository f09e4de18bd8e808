use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Enumerated};
use crate::errors::BudgetError;

/// Investment appetite chosen during profile intake.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl Enumerated for RiskTolerance {
    const ALL: &'static [Self] = &[
        RiskTolerance::Conservative,
        RiskTolerance::Moderate,
        RiskTolerance::Aggressive,
    ];

    fn key(&self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "conservative",
            RiskTolerance::Moderate => "moderate",
            RiskTolerance::Aggressive => "aggressive",
        }
    }
}

impl Displayable for RiskTolerance {
    fn display_label(&self) -> String {
        match self {
            RiskTolerance::Conservative => "Conservative",
            RiskTolerance::Moderate => "Moderate",
            RiskTolerance::Aggressive => "Aggressive",
        }
        .into()
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RiskTolerance {
    type Err = BudgetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        RiskTolerance::from_key(raw).ok_or_else(|| {
            BudgetError::InvalidInput(format!("unknown risk tolerance `{}`", raw.trim()))
        })
    }
}

/// A validated user profile, persisted as its own blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub monthly_income: f64,
    /// Percentage of income set aside, in `[0, 100]`.
    pub savings_goal: f64,
    pub risk_tolerance: RiskTolerance,
}
