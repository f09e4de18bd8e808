//! Budget domain models and their persisted shapes.

pub mod budget;
pub mod category;
pub mod common;
pub mod period;
pub mod profile;
pub mod summary;

pub use budget::{BudgetState, Categories, CategoryBudget, QUARTER_WINDOW, YEAR_WINDOW};
pub use category::CategoryKey;
pub use common::{Displayable, Enumerated};
pub use period::Period;
pub use profile::{RiskTolerance, UserProfile};
pub use summary::{
    spent_percentage, BudgetOverview, BudgetStatus, BudgetTotals, CategoryView,
    DANGER_THRESHOLD, WARNING_THRESHOLD,
};
