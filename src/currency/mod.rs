//! Whole-unit amount formatting with locale digit grouping.

use serde::{Deserialize, Serialize};

/// Digit grouping convention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Grouping {
    /// Thousands, then pairs: `12,34,567`.
    Indian,
    /// Thousands throughout: `1,234,567`.
    Western,
}

impl Grouping {
    pub fn for_locale(locale: &str) -> Self {
        if locale.eq_ignore_ascii_case("en-IN") || locale.to_ascii_lowercase().ends_with("-in") {
            Grouping::Indian
        } else {
            Grouping::Western
        }
    }
}

/// Locale-aware formatter that rounds to whole currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormatter {
    pub symbol: String,
    pub grouping: Grouping,
}

impl Default for AmountFormatter {
    fn default() -> Self {
        Self::new("₹", "en-IN")
    }
}

impl AmountFormatter {
    pub fn new(symbol: impl Into<String>, locale: &str) -> Self {
        Self {
            symbol: symbol.into(),
            grouping: Grouping::for_locale(locale),
        }
    }

    /// Symbol followed by the grouped, rounded amount, e.g. `₹1,20,000` or `₹-500`.
    pub fn format(&self, amount: f64) -> String {
        format!("{}{}", self.symbol, group_digits(amount, self.grouping))
    }
}

/// Rounds to an integer and inserts grouping separators.
pub fn group_digits(amount: f64, grouping: Grouping) -> String {
    if !amount.is_finite() {
        return "0".into();
    }
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let grouped = match digits.len() {
        0..=3 => digits,
        len => {
            let (head, tail) = digits.split_at(len - 3);
            let step = match grouping {
                Grouping::Indian => 2,
                Grouping::Western => 3,
            };
            let mut groups: Vec<&str> = Vec::new();
            let mut end = head.len();
            while end > 0 {
                let start = end.saturating_sub(step);
                groups.push(&head[start..end]);
                end = start;
            }
            groups.reverse();
            format!("{},{}", groups.join(","), tail)
        }
    };

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping() {
        assert_eq!(group_digits(0.0, Grouping::Indian), "0");
        assert_eq!(group_digits(999.0, Grouping::Indian), "999");
        assert_eq!(group_digits(1_000.0, Grouping::Indian), "1,000");
        assert_eq!(group_digits(120_000.0, Grouping::Indian), "1,20,000");
        assert_eq!(group_digits(12_345_678.0, Grouping::Indian), "1,23,45,678");
    }

    #[test]
    fn western_grouping() {
        assert_eq!(group_digits(1_234_567.0, Grouping::Western), "1,234,567");
        assert_eq!(group_digits(100_000.0, Grouping::Western), "100,000");
    }

    #[test]
    fn rounds_to_whole_units() {
        assert_eq!(group_digits(2_666.67, Grouping::Indian), "2,667");
        assert_eq!(group_digits(-0.4, Grouping::Indian), "0");
        assert_eq!(group_digits(f64::NAN, Grouping::Indian), "0");
    }

    #[test]
    fn formatter_prefixes_symbol() {
        let formatter = AmountFormatter::default();
        assert_eq!(formatter.format(24_000.0), "₹24,000");
        assert_eq!(formatter.format(-1_500.0), "₹-1,500");
        let dollars = AmountFormatter::new("$", "en-US");
        assert_eq!(dollars.format(1_500_000.0), "$1,500,000");
    }
}
