//! Chart-ready numeric series with parallel labels.
//!
//! Renderers consume these; nothing here knows about drawing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::services::{InvestmentMix, SummaryService};
use crate::domain::{BudgetState, Displayable};

pub const BUDGET_TREND_CHART: &str = "budgetTrend";
pub const BUDGET_DISTRIBUTION_CHART: &str = "budgetDist";
pub const ALLOCATION_CHART: &str = "allocation";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
    Pie,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    /// Each value of the first dataset as a percentage of the dataset total.
    pub fn shares(&self) -> Vec<f64> {
        let Some(first) = self.datasets.first() else {
            return Vec::new();
        };
        let total: f64 = first.data.iter().sum();
        first
            .data
            .iter()
            .map(|value| {
                if total == 0.0 {
                    0.0
                } else {
                    value / total * 100.0
                }
            })
            .collect()
    }
}

/// Period budgets next to period spend, one bar pair per category.
pub fn budget_vs_spent(state: &BudgetState) -> ChartSeries {
    let views = SummaryService::category_views(state);
    ChartSeries {
        kind: ChartKind::Bar,
        labels: views.iter().map(|view| view.label.clone()).collect(),
        datasets: vec![
            Dataset {
                label: format!("{} Budget", state.current_period.display_label()),
                data: views.iter().map(|view| view.totals.budgeted).collect(),
            },
            Dataset {
                label: "Spent".into(),
                data: views.iter().map(|view| view.totals.spent).collect(),
            },
        ],
    }
}

/// Period spend per category, for a share-of-total chart.
pub fn spending_distribution(state: &BudgetState) -> ChartSeries {
    let views = SummaryService::category_views(state);
    ChartSeries {
        kind: ChartKind::Doughnut,
        labels: views.iter().map(|view| view.label.clone()).collect(),
        datasets: vec![Dataset {
            label: "Spent".into(),
            data: views.iter().map(|view| view.totals.spent).collect(),
        }],
    }
}

pub fn investment_mix(mix: &InvestmentMix) -> ChartSeries {
    ChartSeries {
        kind: ChartKind::Pie,
        labels: InvestmentMix::labels().iter().map(|s| s.to_string()).collect(),
        datasets: vec![Dataset {
            label: "Allocation".into(),
            data: mix.values().to_vec(),
        }],
    }
}

/// Live charts keyed by caller-chosen id. Rendering under a used id replaces the old chart.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: BTreeMap<String, ChartSeries>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `chart` to `id`, handing back whatever was bound before.
    pub fn render(&mut self, id: impl Into<String>, chart: ChartSeries) -> Option<ChartSeries> {
        let id = id.into();
        let previous = self.charts.insert(id.clone(), chart);
        if previous.is_some() {
            debug!(chart = %id, "replaced existing chart");
        }
        previous
    }

    pub fn get(&self, id: &str) -> Option<&ChartSeries> {
        self.charts.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.charts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Drops every chart, as on navigation.
    pub fn clear(&mut self) {
        self.charts.clear();
    }
}
