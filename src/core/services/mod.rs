pub mod advisor_service;
pub mod budget_service;
pub mod profile_service;
pub mod summary_service;

pub use advisor_service::{AdvisorService, BudgetAlert, InvestmentMix};
pub use budget_service::BudgetService;
pub use profile_service::{ProfileForm, ProfileService};
pub use summary_service::SummaryService;
