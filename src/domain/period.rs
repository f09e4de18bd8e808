use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Enumerated};
use crate::errors::BudgetError;

/// Reporting granularity used to scale budgets and aggregate spend history.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    /// Number of months covered by one period.
    pub fn multiplier(self) -> u32 {
        match self {
            Period::Monthly => 1,
            Period::Quarterly => 3,
            Period::Yearly => 12,
        }
    }

    /// Converts an amount expressed for this period into a monthly figure.
    pub fn to_monthly(self, amount: f64) -> f64 {
        amount / f64::from(self.multiplier())
    }
}

impl Enumerated for Period {
    const ALL: &'static [Self] = &[Period::Monthly, Period::Quarterly, Period::Yearly];

    fn key(&self) -> &'static str {
        match self {
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
        }
    }
}

impl Displayable for Period {
    fn display_label(&self) -> String {
        match self {
            Period::Monthly => "Monthly",
            Period::Quarterly => "Quarterly",
            Period::Yearly => "Yearly",
        }
        .into()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Period {
    type Err = BudgetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Period::from_key(raw).ok_or_else(|| {
            BudgetError::InvalidInput(format!(
                "unknown period `{}` (expected one of {})",
                raw.trim(),
                Period::keys().join(", ")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_is_total() {
        assert_eq!(Period::Monthly.multiplier(), 1);
        assert_eq!(Period::Quarterly.multiplier(), 3);
        assert_eq!(Period::Yearly.multiplier(), 12);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Yearly".parse::<Period>().unwrap(), Period::Yearly);
        assert_eq!(" quarterly ".parse::<Period>().unwrap(), Period::Quarterly);
        assert!("weekly".parse::<Period>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Period::Quarterly).unwrap();
        assert_eq!(json, "\"quarterly\"");
    }
}
