use std::path::PathBuf;

use chrono::Utc;
use strsim::levenshtein;
use tracing::debug;

use crate::{
    assistant,
    charts::{ChartKind, ChartSeries, ALLOCATION_CHART, BUDGET_DISTRIBUTION_CHART, BUDGET_TREND_CHART},
    config::{Config, ConfigManager},
    core::{
        services::{InvestmentMix, ProfileForm},
        utils::PathResolver,
    },
    currency::AmountFormatter,
    domain::{CategoryKey, CategoryView, Displayable, Enumerated, Period},
    errors::BudgetError,
    storage::JsonFileStore,
};

use super::{
    forms,
    output::{self, OutputPreferences},
    CliError, Dashboard, LoopControl,
};

pub const COMMANDS: &[&str] = &[
    "profile", "setup", "show", "period", "expense", "budget", "chart", "alerts", "invest",
    "simulate", "ask", "config", "reset", "help", "exit", "quit",
];

const DEFAULT_SIMULATION_MONTHS: usize = 12;
const MAX_SUGGESTION_DISTANCE: usize = 3;

const HELP: &[(&str, &str)] = &[
    ("profile <name> <income> <savings%> <risk>", "Save a profile and allocate budgets"),
    ("setup", "Fill in the profile form interactively (shell only)"),
    ("show [period]", "Overview and category cards"),
    ("period <monthly|quarterly|yearly>", "Switch the displayed period"),
    ("expense <category> <amount>", "Record this month's spend for a category"),
    ("budget <category> <amount> [period]", "Set a category budget for a period"),
    ("chart <budget|distribution|allocation>", "Print chart data"),
    ("alerts", "Categories nearing or over budget"),
    ("invest", "Recommended investment mix"),
    ("simulate [months] [seed]", "Generate pseudo-random spending history"),
    ("ask <question>", "Show the assistant request for a question"),
    ("config [show | set <field> <value>]", "Show or change preferences"),
    ("reset", "Erase the profile and all budget data"),
    ("shell", "Start the interactive shell"),
    ("exit", "Leave the shell"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    /// rustyline prompt with dialoguer forms.
    Interactive,
    /// Commands read line by line from stdin.
    Script,
    /// One command taken from the process arguments.
    Single,
}

/// A dashboard bound to its on-disk store and configuration.
pub struct Session {
    dashboard: Dashboard,
    configs: ConfigManager,
    mode: CliMode,
}

impl Session {
    pub fn open(base: Option<PathBuf>, mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::resolve_base(base);
        let configs = ConfigManager::with_base_dir(base.clone())?;
        let config = configs.load()?;
        let store = JsonFileStore::in_base(Some(base))?;
        output::set_preferences(OutputPreferences {
            plain: mode == CliMode::Script,
        });
        debug!(?mode, store = %store.root().display(), "session opened");
        Ok(Self {
            dashboard: Dashboard::open(Box::new(store), config),
            configs,
            mode,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn prompt(&self) -> String {
        format!("spendr [{}]> ", self.dashboard.state().current_period)
    }

    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CliError> {
        match command {
            "profile" => self.cmd_profile(args),
            "setup" => self.cmd_setup(),
            "show" => self.cmd_show(args),
            "period" => self.cmd_period(args),
            "expense" => self.cmd_expense(args),
            "budget" => self.cmd_budget(args),
            "chart" => self.cmd_chart(args),
            "alerts" => self.cmd_alerts(),
            "invest" => self.cmd_invest(),
            "simulate" => self.cmd_simulate(args),
            "ask" => self.cmd_ask(args),
            "config" => self.cmd_config(args),
            "reset" => self.cmd_reset(),
            "help" => {
                print_help();
                Ok(LoopControl::Continue)
            }
            "exit" | "quit" => Ok(LoopControl::Exit),
            other => Err(unknown_command(other)),
        }
    }

    fn cmd_profile(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        if args.len() < 4 {
            return Err(CliError::usage("profile <name> <income> <savings%> <risk>"));
        }
        let (name, rest) = args.split_at(args.len() - 3);
        let form = ProfileForm::new(name.join(" "), rest[0], rest[1], rest[2]);
        self.submit(&form)
    }

    fn cmd_setup(&mut self) -> Result<LoopControl, CliError> {
        if self.mode != CliMode::Interactive {
            return Err(CliError::Input(
                "`setup` needs an interactive terminal; use `profile` instead".into(),
            ));
        }
        let form = forms::profile_form(self.dashboard.profile())?;
        self.submit(&form)
    }

    fn submit(&mut self, form: &ProfileForm) -> Result<LoopControl, CliError> {
        let profile = self.dashboard.submit_profile(form)?;
        output::success(format!("Profile saved for {}.", profile.full_name));
        self.print_overview();
        Ok(LoopControl::Continue)
    }

    fn cmd_show(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        if let Some(raw) = args.first() {
            let period: Period = raw.parse()?;
            self.dashboard.switch_period(period)?;
        }
        self.print_overview();
        Ok(LoopControl::Continue)
    }

    fn cmd_period(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let raw = args
            .first()
            .ok_or_else(|| CliError::usage("period <monthly|quarterly|yearly>"))?;
        let period: Period = raw.parse()?;
        self.dashboard.switch_period(period)?;
        output::success(format!("Showing {} figures.", period.key()));
        Ok(LoopControl::Continue)
    }

    fn cmd_expense(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let [category, amount] = args else {
            return Err(CliError::usage("expense <category> <amount>"));
        };
        let key: CategoryKey = category.parse()?;
        let amount = parse_amount(amount)?;
        let view = self.dashboard.add_expense(key, amount)?;
        output::success(format!(
            "Recorded {} for {}.",
            self.money(amount),
            key.display_label()
        ));
        output::line(self.category_line(&view));
        Ok(LoopControl::Continue)
    }

    fn cmd_budget(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        if !(2..=3).contains(&args.len()) {
            return Err(CliError::usage("budget <category> <amount> [period]"));
        }
        let key: CategoryKey = args[0].parse()?;
        let amount = parse_amount(args[1])?;
        let period = match args.get(2) {
            Some(raw) => raw.parse()?,
            None => self.dashboard.state().current_period,
        };
        self.dashboard.update_budget(key, amount, period)?;
        output::success(format!(
            "{} {} budget set to {}.",
            key.display_label(),
            period.key(),
            self.money(amount)
        ));
        Ok(LoopControl::Continue)
    }

    fn cmd_chart(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let (id, title) = match args.first().map(|raw| raw.to_ascii_lowercase()).as_deref() {
            Some("budget") => (BUDGET_TREND_CHART, "Budget vs spent"),
            Some("distribution") => (BUDGET_DISTRIBUTION_CHART, "Spending distribution"),
            Some("allocation") => (ALLOCATION_CHART, "Investment allocation"),
            _ => return Err(CliError::usage("chart <budget|distribution|allocation>")),
        };
        match self.dashboard.charts().get(id) {
            Some(chart) => self.print_chart(title, chart),
            None => output::warning("Nothing to chart yet. Save a profile first."),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_alerts(&mut self) -> Result<LoopControl, CliError> {
        let alerts = self.dashboard.alerts();
        if alerts.is_empty() {
            output::success("All categories are within budget.");
            return Ok(LoopControl::Continue);
        }
        output::section("Budget alerts");
        for alert in alerts {
            output::line(format!(
                "{} {}: {}",
                output::status_badge(alert.status),
                alert.title,
                alert.message
            ));
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_invest(&mut self) -> Result<LoopControl, CliError> {
        let (Some(profile), Some(mix)) = (self.dashboard.profile(), self.dashboard.recommendation())
        else {
            output::warning("Save a profile first to get an investment mix.");
            return Ok(LoopControl::Continue);
        };
        output::section(format!(
            "Recommended allocation ({} risk)",
            profile.risk_tolerance
        ));
        for (label, value) in InvestmentMix::labels().iter().zip(mix.values()) {
            output::line(format!("{label:<16}{value:>4.0}%"));
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_simulate(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let months = match args.first() {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| CliError::Input(format!("invalid month count `{raw}`")))?,
            None => DEFAULT_SIMULATION_MONTHS,
        };
        let seed = match args.get(1) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| CliError::Input(format!("invalid seed `{raw}`")))?,
            None => Utc::now().timestamp().unsigned_abs(),
        };
        let summary = self.dashboard.simulate(months, seed)?;
        output::success(format!(
            "Simulated {} months ({} expenses, seed {}).",
            summary.months, summary.expenses_recorded, seed
        ));
        Ok(LoopControl::Continue)
    }

    fn cmd_ask(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let question = args.join(" ");
        if question.trim().is_empty() {
            output::info("Try one of:");
            for suggestion in assistant::SUGGESTIONS {
                output::line(format!("  ask {suggestion}"));
            }
            return Ok(LoopControl::Continue);
        }
        let body = assistant::request_body(&assistant::build_prompt(&question));
        output::info("No assistant transport is configured. Request body:");
        output::line(format!("{body:#}"));
        Ok(LoopControl::Continue)
    }

    fn cmd_config(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        match args.first().copied().unwrap_or("show") {
            "show" => {
                let json = serde_json::to_string_pretty(self.dashboard.config())
                    .map_err(BudgetError::from)?;
                output::section("Configuration");
                output::line(format!("path: {}", self.configs.path().display()));
                output::line(json);
            }
            "set" => {
                let [_, field, value] = args else {
                    return Err(CliError::usage("config set <field> <value>"));
                };
                let mut config = self.dashboard.config().clone();
                apply_setting(&mut config, field, value)?;
                self.configs.save(&config)?;
                self.dashboard.set_config(config);
                output::success(format!("Set {field} to {value}."));
            }
            other => {
                return Err(CliError::Input(format!(
                    "unknown config action `{other}` (show, set)"
                )))
            }
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_reset(&mut self) -> Result<LoopControl, CliError> {
        if self.mode == CliMode::Interactive
            && !forms::confirm("Erase your profile and all budget data?", false)?
        {
            output::info("Reset cancelled.");
            return Ok(LoopControl::Continue);
        }
        self.dashboard.reset()?;
        output::success("All data cleared.");
        Ok(LoopControl::Continue)
    }

    fn print_overview(&self) {
        let overview = self.dashboard.overview();
        output::section(format!("{} overview", overview.period.display_label()));
        if let Some(profile) = self.dashboard.profile() {
            output::line(format!(
                "Profile: {} ({} risk)",
                profile.full_name, profile.risk_tolerance
            ));
        }
        let totals = &overview.totals;
        output::line(format!("Total budget     {:>14}", self.money(totals.budgeted)));
        output::line(format!("Spent            {:>14}", self.money(totals.spent)));
        output::line(format!("Remaining        {:>14}", self.money(totals.remaining)));
        output::line(format!(
            "Savings goal     {:>14}",
            self.money(overview.period_savings)
        ));
        output::line(format!(
            "Emergency fund   {:>14}",
            self.money(overview.emergency_fund)
        ));
        output::line(format!(
            "Used             {:>13.1}% {}",
            totals.percent_used,
            output::status_badge(totals.status)
        ));

        output::section("Categories");
        for view in self.dashboard.category_views() {
            output::line(self.category_line(&view));
        }
    }

    fn category_line(&self, view: &CategoryView) -> String {
        format!(
            "{:<14} {:>12} of {:>12} {:>6.1}% {}",
            view.label,
            self.money(view.totals.spent),
            self.money(view.totals.budgeted),
            view.totals.percent_used,
            output::status_badge(view.totals.status)
        )
    }

    fn print_chart(&self, title: &str, chart: &ChartSeries) {
        output::section(title);
        let header: String = chart
            .datasets
            .iter()
            .map(|dataset| format!("{:>16}", dataset.label))
            .collect();
        output::line(format!("{:<16}{header}", ""));

        let shares = chart.shares();
        for (idx, label) in chart.labels.iter().enumerate() {
            let mut row = format!("{label:<16}");
            for dataset in &chart.datasets {
                let value = dataset.data.get(idx).copied().unwrap_or_default();
                let cell = match chart.kind {
                    ChartKind::Pie => format!("{value:.0}%"),
                    _ => self.money(value),
                };
                row.push_str(&format!("{cell:>16}"));
            }
            if chart.kind == ChartKind::Doughnut {
                let share = shares.get(idx).copied().unwrap_or_default();
                row.push_str(&format!("{share:>8.1}%"));
            }
            output::line(row);
        }
    }

    fn money(&self, amount: f64) -> String {
        let config = self.dashboard.config();
        AmountFormatter::new(config.currency_symbol.as_str(), &config.locale).format(amount)
    }
}

/// Prints a command failure, listing every rejected profile field.
pub fn report_error(err: &CliError) {
    match err {
        CliError::Core(BudgetError::Validation(errors)) => {
            output::error("Profile not saved:");
            for field in errors.iter() {
                output::error(format!("  {field}"));
            }
        }
        other => output::error(other),
    }
}

pub fn print_help() {
    output::section("Commands");
    for (usage, summary) in HELP {
        output::line(format!("  {usage:<44}{summary}"));
    }
    output::line(format!("Categories: {}", CategoryKey::keys().join(", ")));
}

fn unknown_command(raw: &str) -> CliError {
    let closest = COMMANDS
        .iter()
        .map(|candidate| (levenshtein(raw, candidate), *candidate))
        .min();
    match closest {
        Some((distance, best)) if distance <= MAX_SUGGESTION_DISTANCE => {
            CliError::Input(format!("Unknown command `{raw}`. Did you mean `{best}`?"))
        }
        _ => CliError::Input(format!("Unknown command `{raw}`. Type `help` for a list.")),
    }
}

fn parse_amount(raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CliError::Input(format!("invalid amount `{raw}`")))
}

fn apply_setting(config: &mut Config, field: &str, value: &str) -> Result<(), CliError> {
    match field {
        "locale" => config.locale = value.to_string(),
        "currency" | "currency_symbol" => config.currency_symbol = value.to_string(),
        "default_period" => config.default_period = value.parse()?,
        "alert_warning" => config.alert_warning = parse_amount(value)?,
        "alert_danger" => config.alert_danger = parse_amount(value)?,
        other => {
            return Err(CliError::Input(format!(
                "unknown setting `{other}` (locale, currency_symbol, default_period, alert_warning, alert_danger)"
            )))
        }
    }
    config.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn session(dir: &tempfile::TempDir) -> Session {
        Session::open(Some(dir.path().to_path_buf()), CliMode::Script).unwrap()
    }

    #[test]
    fn unknown_command_suggests_neighbour() {
        let err = unknown_command("expnse");
        assert!(err.to_string().contains("Did you mean `expense`?"));
        let err = unknown_command("zzzzzzzzzz");
        assert!(err.to_string().contains("Type `help`"));
    }

    #[test]
    fn amounts_must_be_finite_numbers() {
        assert_eq!(parse_amount(" 1500 ").unwrap(), 1500.0);
        assert!(parse_amount("12abc").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn settings_reject_inverted_thresholds() {
        let mut config = Config::default();
        apply_setting(&mut config, "alert_warning", "80").unwrap();
        assert!(apply_setting(&mut config, "alert_danger", "50").is_err());
        assert!(apply_setting(&mut config, "colour", "blue").is_err());
        apply_setting(&mut config, "default_period", "yearly").unwrap();
        assert_eq!(config.default_period, Period::Yearly);
    }

    #[test]
    fn commands_persist_across_sessions() {
        let dir = tempdir().unwrap();
        {
            let mut first = session(&dir);
            first
                .execute("profile", &["Asha", "Rao", "50000", "10", "moderate"])
                .unwrap();
            first.execute("expense", &["food", "2500"]).unwrap();
            first.execute("period", &["quarterly"]).unwrap();
        }
        let second = session(&dir);
        let dashboard = second.dashboard();
        assert_eq!(
            dashboard.profile().map(|p| p.full_name.as_str()),
            Some("Asha Rao")
        );
        assert_eq!(dashboard.state().current_period, Period::Quarterly);
        assert_eq!(dashboard.state().category(CategoryKey::Food).spent, 2500.0);
    }

    #[test]
    fn setup_is_refused_outside_a_terminal() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        assert!(matches!(session.execute("setup", &[]), Err(CliError::Input(_))));
    }

    #[test]
    fn config_set_updates_formatting() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        session
            .execute("config", &["set", "currency_symbol", "$"])
            .unwrap();
        assert_eq!(session.money(1500.0), "$1,500");
        let reopened = ConfigManager::with_base_dir(dir.path().to_path_buf())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(reopened.currency_symbol, "$");
    }

    #[test]
    fn inverted_alert_bands_on_disk_stop_the_session() {
        let dir = tempdir().unwrap();
        let configs = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        std::fs::write(configs.path(), r#"{"alert_warning":95,"alert_danger":60}"#).unwrap();
        match Session::open(Some(dir.path().to_path_buf()), CliMode::Script) {
            Err(CliError::Core(BudgetError::Config(message))) => {
                assert!(message.contains("must not exceed"))
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("inverted bands were accepted"),
        }
    }

    #[test]
    fn alerts_agree_with_cards_after_config_changes() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        session.execute("budget", &["food", "1000"]).unwrap();
        session.execute("expense", &["food", "650"]).unwrap();

        assert!(session
            .execute("config", &["set", "alert_warning", "95"])
            .is_err());
        session
            .execute("config", &["set", "alert_danger", "60"])
            .unwrap_err();

        let config = session.dashboard().config();
        assert_eq!((config.alert_warning, config.alert_danger), (70.0, 90.0));
        let card = crate::core::services::SummaryService::category_view(
            session.dashboard().state(),
            CategoryKey::Food,
        );
        assert_eq!(card.totals.status, crate::domain::BudgetStatus::Safe);
        assert!(session.dashboard().alerts().is_empty());
    }

    #[test]
    fn config_only_shows_and_sets() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        for action in ["restore", "backup", "backups"] {
            let err = session
                .execute("config", &[action, "../../outside.json"])
                .unwrap_err();
            assert!(err.to_string().contains("unknown config action"));
        }
    }

    #[test]
    fn exit_stops_the_loop() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        assert_eq!(session.execute("quit", &[]).unwrap(), LoopControl::Exit);
    }
}
