//! Side-by-side states / time / memory bars for both methods.

use super::panels::{grouped_bars, GroupedBars};
use super::{render, style, ChartOutcome};
use crate::error::Result;
use crate::metrics::{MetricsTable, ModelMetrics};
use crate::utils::common::short_model_name;
use std::path::Path;

pub const FILE_NAME: &str = "chart_performance_comparison.png";
const SIZE: (u32, u32) = (2250, 750);

pub struct Panel {
    pub title: &'static str,
    pub y_desc: &'static str,
    pub explicit: Vec<f64>,
    pub bdd: Vec<f64>,
    pub value_labels: bool,
}

fn column(metrics: &MetricsTable, value: impl Fn(&ModelMetrics) -> f64) -> Vec<f64> {
    metrics.models.iter().map(value).collect()
}

pub fn panels(metrics: &MetricsTable) -> [Panel; 3] {
    [
        Panel {
            title: "Reachable States Count",
            y_desc: "Number of States",
            explicit: column(metrics, |m| m.explicit_states() as f64),
            bdd: column(metrics, |m| m.bdd_states() as f64),
            value_labels: true,
        },
        Panel {
            title: "Execution Time",
            y_desc: "Time (seconds)",
            explicit: column(metrics, ModelMetrics::explicit_time),
            bdd: column(metrics, ModelMetrics::bdd_time),
            value_labels: false,
        },
        Panel {
            title: "Memory Usage",
            y_desc: "Memory (MB)",
            explicit: column(metrics, ModelMetrics::explicit_mem),
            bdd: column(metrics, ModelMetrics::bdd_mem),
            value_labels: false,
        },
    ]
}

pub fn render_comparison(metrics: &MetricsTable, path: Option<&Path>) -> Result<ChartOutcome> {
    let labels: Vec<String> = metrics
        .models
        .iter()
        .map(|m| short_model_name(&m.model))
        .collect();
    let panels = panels(metrics);

    render("performance comparison", SIZE, path, |root| {
        let body = root.titled("Performance Comparison: Explicit vs BDD", style::title(32))?;
        for (area, panel) in body.split_evenly((1, 3)).iter().zip(panels) {
            grouped_bars(
                area,
                &GroupedBars {
                    title: panel.title,
                    y_desc: panel.y_desc,
                    labels: &labels,
                    explicit: panel.explicit,
                    bdd: panel.bdd,
                    value_labels: panel.value_labels,
                    font_size: 16,
                },
            )?;
        }
        Ok(())
    })
}
