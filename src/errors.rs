use std::fmt;

use thiserror::Error;

/// Unified error type for the domain, service and storage layers.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown category `{key}`{}", suggestion_suffix(.suggestion))]
    UnknownCategory {
        key: String,
        suggestion: Option<String>,
    },
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

pub type Result<T> = std::result::Result<T, BudgetError>;

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::Storage(err.to_string())
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(candidate) => format!(" (did you mean `{candidate}`?)"),
        None => String::new(),
    }
}

/// A single rejected profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Invalid profile: {joined}")
    }
}

/// Failures at the generative-text assistant boundary.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant request failed: {0}")]
    Transport(String),
    #[error("Unexpected assistant response format")]
    UnexpectedFormat,
    #[error("Assistant payload error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_mentions_suggestion() {
        let err = BudgetError::UnknownCategory {
            key: "fod".into(),
            suggestion: Some("food".into()),
        };
        assert_eq!(
            err.to_string(),
            "Unknown category `fod` (did you mean `food`?)"
        );
    }

    #[test]
    fn validation_errors_join_every_field() {
        let mut errors = ValidationErrors::default();
        errors.push("fullName", "is required");
        errors.push("riskTolerance", "must be selected");
        let message = BudgetError::from(errors).to_string();
        assert!(message.contains("fullName: is required"));
        assert!(message.contains("riskTolerance: must be selected"));
    }
}
