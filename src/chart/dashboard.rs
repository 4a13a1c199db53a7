//! Eight-panel overview of a solver run.

use super::panels::{grouped_bars, text_panel, GroupedBars};
use super::style::{
    self, category_label, deadlock_color, method_color, value_axis_max, BDD, EXPLICIT,
    LIGHT_CYAN, LIGHT_YELLOW,
};
use super::{render, Area, ChartOutcome, DrawResult};
use crate::error::Result;
use crate::metrics::{MethodScores, MetricsTable, ModelMetrics, Summary, SCORE_LABELS};
use crate::results::{Deadlock, Method, StatusReport};
use crate::utils::common::{short_model_name, truncated_model_name};
use chrono::Local;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;

pub const FILE_NAME: &str = "chart_dashboard.png";
const SIZE: (u32, u32) = (2400, 1800);
const LABEL_CHARS: usize = 10;
const BAR_WIDTH: f64 = 0.35;

pub fn status_lines(status: &StatusReport, generated: &str) -> Vec<String> {
    let rule = "─".repeat(30);
    let mut lines = vec!["ANALYSIS RESULTS".to_string(), rule.clone(), String::new()];
    lines.push("Deadlock Detection:".into());
    lines.extend(status.deadlock.lines().map(|l| format!("   {}", l)));
    lines.push(String::new());
    lines.push("Optimization:".into());
    lines.extend(status.optimization.lines().map(|l| format!("   {}", l)));
    lines.push(String::new());
    lines.push(rule);
    lines.push(format!("Generated: {}", generated));
    lines
}

pub fn summary_lines(summary: &Summary) -> Vec<String> {
    vec![
        "SUMMARY STATISTICS".into(),
        "─".repeat(25),
        String::new(),
        format!("Total Models: {}", summary.models),
        String::new(),
        "Explicit Method:".into(),
        format!("  • Total States: {}", summary.explicit_states),
        format!("  • Total Time: {:.4}s", summary.explicit_time),
        String::new(),
        "BDD Method:".into(),
        format!("  • Total States: {}", summary.bdd_states),
        format!("  • Total Time: {:.4}s", summary.bdd_time),
        String::new(),
        format!("Avg Speedup: {:.2}x", summary.average_speedup()),
    ]
}

/// Pie slices as (method, share of all rows).
pub fn method_shares(metrics: &MetricsTable) -> Vec<(Method, f64)> {
    let counts = metrics.method_counts();
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .into_iter()
        .map(|(method, n)| (method, n as f64 / total.max(1) as f64))
        .collect()
}

pub fn render_dashboard(
    metrics: &MetricsTable,
    status: &StatusReport,
    path: Option<&Path>,
) -> Result<ChartOutcome> {
    let short: Vec<String> = metrics
        .models
        .iter()
        .map(|m| truncated_model_name(&m.model, LABEL_CHARS))
        .collect();
    let full: Vec<String> = metrics
        .models
        .iter()
        .map(|m| short_model_name(&m.model))
        .collect();
    let summary = metrics.summary();
    let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();

    render("dashboard", SIZE, path, |root| {
        let body = root.titled("Petri Net Solver - Performance Dashboard", style::title(36))?;
        let rows = body.split_evenly((3, 1));
        let top = rows[0].split_evenly((1, 3));
        let (middle_width, _) = rows[1].dim_in_pixel();
        let (timeline, status_area) = rows[1].split_horizontally((middle_width * 2 / 3) as i32);
        let bottom = rows[2].split_evenly((1, 3));

        let values = |f: fn(&ModelMetrics) -> f64| metrics.models.iter().map(f).collect::<Vec<_>>();
        grouped_bars(
            &top[0],
            &GroupedBars {
                title: "Reachable States",
                y_desc: "States",
                labels: &short,
                explicit: values(|m| m.explicit_states() as f64),
                bdd: values(|m| m.bdd_states() as f64),
                value_labels: false,
                font_size: 12,
            },
        )?;
        grouped_bars(
            &top[1],
            &GroupedBars {
                title: "Execution Time (s)",
                y_desc: "Time (s)",
                labels: &short,
                explicit: values(ModelMetrics::explicit_time),
                bdd: values(ModelMetrics::bdd_time),
                value_labels: false,
                font_size: 12,
            },
        )?;
        method_pie(&top[2], &method_shares(metrics))?;
        time_lines(
            &timeline,
            &full,
            &values(ModelMetrics::explicit_time),
            &values(ModelMetrics::bdd_time),
        )?;
        text_panel(&status_area, &status_lines(status, &generated), LIGHT_YELLOW)?;
        text_panel(&bottom[0], &summary_lines(&summary), LIGHT_CYAN)?;
        deadlock_bars(&bottom[1], &full, metrics)?;
        score_bars(&bottom[2], &MethodScores::heuristic(&summary))?;
        Ok(())
    })
}

fn method_pie(area: &Area<'_>, shares: &[(Method, f64)]) -> DrawResult {
    let area = area.titled("Method Distribution", style::title(16))?;
    let (width, height) = area.dim_in_pixel();
    let center = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let radius = f64::from(width.min(height)) * 0.35;
    let point = |c: (f64, f64), r: f64, angle: f64| {
        ((c.0 + r * angle.cos()) as i32, (c.1 - r * angle.sin()) as i32)
    };

    // Slices run counter-clockwise from twelve o'clock, each pushed out a little
    let mut start = FRAC_PI_2;
    for (method, share) in shares {
        let sweep = 2.0 * PI * share;
        let mid = start + sweep / 2.0;
        let c = (
            center.0 + 0.05 * radius * mid.cos(),
            center.1 - 0.05 * radius * mid.sin(),
        );
        let steps = ((sweep / (2.0 * PI)) * 90.0).ceil().max(2.0) as usize;
        let mut outline = vec![point(c, 0.0, 0.0)];
        outline.extend((0..=steps).map(|k| point(c, radius, start + sweep * k as f64 / steps as f64)));
        area.draw(&Polygon::new(outline, method_color(*method).filled()))?;

        area.draw(&Text::new(
            format!("{:.1}%", share * 100.0),
            point(c, radius * 0.6, mid),
            style::text(14).pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        area.draw(&Text::new(
            method.to_string(),
            point(c, radius * 1.15, mid),
            style::text(14).pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        start += sweep;
    }
    Ok(())
}

fn time_lines(area: &Area<'_>, labels: &[String], explicit: &[f64], bdd: &[f64]) -> DrawResult {
    let n = labels.len().max(1) as f64;
    let y_max = value_axis_max(explicit.iter().chain(bdd).copied());
    let mut chart = ChartBuilder::on(area)
        .caption("Execution Time Comparison", style::title(16))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n - 0.5), 0f64..y_max)?;

    let formatter = |x: &f64| category_label(labels, *x);
    chart
        .configure_mesh()
        .x_labels(labels.len() + 2)
        .x_label_formatter(&formatter)
        .x_desc("Model")
        .y_desc("Time (seconds)")
        .draw()?;

    for (values, color, name) in [(explicit, EXPLICIT, "Explicit"), (bdd, BDD, "BDD")] {
        let points: Vec<(f64, f64)> = values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect();
        chart.draw_series(AreaSeries::new(points.clone(), 0.0, color.mix(0.3)))?;
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        if color == EXPLICIT {
            chart.draw_series(points.iter().map(|p| Circle::new(*p, 6, color.filled())))?;
        } else {
            chart.draw_series(points.iter().map(|p| TriangleMarker::new(*p, 7, color.filled())))?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn deadlock_bars(area: &Area<'_>, labels: &[String], metrics: &MetricsTable) -> DrawResult {
    let n = labels.len().max(1) as f64;
    let y_max = value_axis_max(metrics.models.iter().map(|m| m.bdd_states() as f64));
    let mut chart = ChartBuilder::on(area)
        .caption("States & Deadlock Status", style::title(16))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n - 0.5), 0f64..y_max)?;

    let formatter = |x: &f64| category_label(labels, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() + 2)
        .x_label_formatter(&formatter)
        .x_label_style(style::text(11))
        .x_desc("Model")
        .y_desc("States")
        .draw()?;

    chart.draw_series(metrics.models.iter().enumerate().map(|(i, m)| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.4, 0.0), (x + 0.4, m.bdd_states() as f64)],
            deadlock_color(m.deadlock()).filled(),
        )
    }))?;

    for (status, name) in [(Deadlock::Yes, "Has Deadlock"), (Deadlock::No, "No Deadlock")] {
        let color = deadlock_color(status);
        chart
            .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn score_bars(area: &Area<'_>, scores: &MethodScores) -> DrawResult {
    let labels: Vec<String> = SCORE_LABELS.iter().map(|s| s.to_string()).collect();
    let mut chart = ChartBuilder::on(area)
        .caption("Method Comparison", style::title(16))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(130)
        .build_cartesian_2d(0f64..1.2f64, -0.5f64..(SCORE_LABELS.len() as f64 - 0.5))?;

    let formatter = |y: &f64| category_label(&labels, *y);
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(SCORE_LABELS.len() + 2)
        .y_label_formatter(&formatter)
        .x_desc("Score (normalized)")
        .draw()?;

    for (values, offset, color, name) in [
        (&scores.explicit, -BAR_WIDTH, EXPLICIT, "Explicit"),
        (&scores.bdd, 0.0, BDD, "BDD"),
    ] {
        chart
            .draw_series(values.iter().enumerate().map(|(i, v)| {
                let y = i as f64 + offset;
                Rectangle::new([(0.0, y), (*v, y + BAR_WIDTH)], color.filled())
            }))?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}
