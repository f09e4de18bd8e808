//! The fixed set of spending categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Enumerated};
use crate::errors::BudgetError;

/// Minimum Jaro-Winkler similarity before a typo earns a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Spending categories. The set never changes at runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Housing,
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Utilities,
}

impl CategoryKey {
    /// Fraction of disposable income allotted to the category.
    ///
    /// The weights sum to 0.90; the remaining tenth is an unallocated buffer.
    pub fn weight(self) -> f64 {
        match self {
            CategoryKey::Housing => 0.30,
            CategoryKey::Food => 0.15,
            CategoryKey::Transportation => 0.15,
            CategoryKey::Entertainment => 0.10,
            CategoryKey::Shopping => 0.10,
            CategoryKey::Utilities => 0.10,
        }
    }

    /// Closest known key to a misspelt one, if any is close enough.
    pub fn suggest(raw: &str) -> Option<&'static str> {
        let needle = raw.trim().to_ascii_lowercase();
        CategoryKey::ALL
            .iter()
            .map(|key| (key.key(), strsim::jaro_winkler(&needle, key.key())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(key, _)| key)
    }
}

impl Enumerated for CategoryKey {
    const ALL: &'static [Self] = &[
        CategoryKey::Housing,
        CategoryKey::Food,
        CategoryKey::Transportation,
        CategoryKey::Entertainment,
        CategoryKey::Shopping,
        CategoryKey::Utilities,
    ];

    fn key(&self) -> &'static str {
        match self {
            CategoryKey::Housing => "housing",
            CategoryKey::Food => "food",
            CategoryKey::Transportation => "transportation",
            CategoryKey::Entertainment => "entertainment",
            CategoryKey::Shopping => "shopping",
            CategoryKey::Utilities => "utilities",
        }
    }
}

impl Displayable for CategoryKey {
    fn display_label(&self) -> String {
        match self {
            CategoryKey::Housing => "Housing",
            CategoryKey::Food => "Food",
            CategoryKey::Transportation => "Transportation",
            CategoryKey::Entertainment => "Entertainment",
            CategoryKey::Shopping => "Shopping",
            CategoryKey::Utilities => "Utilities",
        }
        .into()
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CategoryKey {
    type Err = BudgetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        CategoryKey::from_key(raw).ok_or_else(|| BudgetError::UnknownCategory {
            key: raw.trim().to_string(),
            suggestion: CategoryKey::suggest(raw).map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_leave_a_tenth_unallocated() {
        let total: f64 = CategoryKey::ALL.iter().map(|key| key.weight()).sum();
        assert!((total - 0.90).abs() < 1e-9);
    }

    #[test]
    fn unknown_key_carries_suggestion() {
        let err = "transportaton".parse::<CategoryKey>().unwrap_err();
        match err {
            BudgetError::UnknownCategory { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("transportation"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unrelated_text_gets_no_suggestion() {
        assert_eq!(CategoryKey::suggest("zzz"), None);
    }

    #[test]
    fn labels_are_capitalized() {
        assert_eq!(CategoryKey::Entertainment.display_label(), "Entertainment");
    }
}
