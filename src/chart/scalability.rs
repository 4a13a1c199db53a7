//! Execution time against state-space size, on a linear and a log scale.

use super::style::{self, value_axis_max, BDD, EXPLICIT};
use super::{render, Area, ChartOutcome, DrawResult};
use crate::error::Result;
use crate::metrics::{MetricsTable, ScalabilityPoint};
use log::warn;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

pub const FILE_NAME: &str = "chart_scalability.png";
const SIZE: (u32, u32) = (2100, 750);
const MIN_POINTS: usize = 2;

/// One method's curve as (states, seconds) pairs.
pub fn series(points: &[ScalabilityPoint]) -> [(&'static str, RGBColor, Vec<(f64, f64)>); 2] {
    let curve = |time: fn(&ScalabilityPoint) -> f64| {
        points
            .iter()
            .map(|p| (p.states as f64, time(p)))
            .collect::<Vec<_>>()
    };
    [
        ("Explicit", EXPLICIT, curve(|p| p.explicit_time)),
        ("BDD", BDD, curve(|p| p.bdd_time)),
    ]
}

fn state_range(points: &[ScalabilityPoint]) -> Range<f64> {
    let lo = points.iter().map(|p| p.states as f64).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p.states as f64).fold(0.0, f64::max);
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad)..(hi + pad)
    } else {
        (lo - 1.0)..(hi + 1.0)
    }
}

/// Bounds of the positive times, widened so every point sits inside a log
/// axis.
pub fn log_time_range(points: &[ScalabilityPoint]) -> Range<f64> {
    let positive = points
        .iter()
        .flat_map(|p| [p.explicit_time, p.bdd_time])
        .filter(|t| *t > 0.0);
    let (lo, hi) = positive.fold((f64::INFINITY, 0.0f64), |(lo, hi), t| (lo.min(t), hi.max(t)));
    if hi > 0.0 {
        (lo / 2.0)..(hi * 2.0)
    } else {
        1e-3..1.0
    }
}

pub fn render_scalability(metrics: &MetricsTable, path: Option<&Path>) -> Result<ChartOutcome> {
    let points = metrics.scalability_points();
    if points.len() < MIN_POINTS {
        let reason = format!(
            "{} of {} models have both an Explicit and a BDD run, need {}",
            points.len(),
            metrics.len(),
            MIN_POINTS
        );
        warn!("Not enough data for scalability analysis: {}", reason);
        return Ok(ChartOutcome::Skipped(reason));
    }
    let curves = series(&points);
    let x_range = state_range(&points);
    let y_max = value_axis_max(points.iter().flat_map(|p| [p.explicit_time, p.bdd_time]));

    render("scalability", SIZE, path, |root| {
        let body = root.titled("Scalability Analysis", style::title(32))?;
        let panels = body.split_evenly((1, 2));
        time_panel(
            &panels[0],
            "Execution Time vs State Space Size",
            "Time (seconds)",
            x_range.clone(),
            0f64..y_max,
            &curves,
        )?;
        let log_curves = curves.clone().map(|(name, color, pts)| {
            (name, color, pts.into_iter().filter(|(_, t)| *t > 0.0).collect::<Vec<_>>())
        });
        time_panel(
            &panels[1],
            "Execution Time (Log Scale)",
            "Time (seconds) - Log Scale",
            x_range,
            log_time_range(&points).log_scale(),
            &log_curves,
        )
    })
}

fn time_panel<Y>(
    area: &Area<'_>,
    title: &str,
    y_desc: &str,
    x_range: Range<f64>,
    y_range: Y,
    curves: &[(&'static str, RGBColor, Vec<(f64, f64)>)],
) -> DrawResult
where
    Y: AsRangedCoord<Value = f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let mut chart = ChartBuilder::on(area)
        .caption(title, style::title(20))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .x_desc("Number of States")
        .y_desc(y_desc)
        .draw()?;

    for (i, (name, color, pts)) in curves.iter().enumerate() {
        let color = *color;
        chart
            .draw_series(LineSeries::new(pts.clone(), color.stroke_width(2)))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        if i == 0 {
            chart.draw_series(pts.iter().map(|p| Circle::new(*p, 7, color.filled())))?;
        } else {
            chart.draw_series(pts.iter().map(|p| TriangleMarker::new(*p, 8, color.filled())))?;
        }
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::tests::row;
    use crate::results::Method;

    fn point(states: u64, explicit_time: f64, bdd_time: f64) -> ScalabilityPoint {
        ScalabilityPoint {
            states,
            explicit_time,
            bdd_time,
        }
    }

    #[test]
    fn skipped_with_a_single_pair() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        let metrics = MetricsTable::from_rows(&[
            row("a", Method::Explicit, 10, 1.0, 1.0),
            row("a", Method::Bdd, 10, 0.5, 1.0),
            row("b", Method::Explicit, 20, 1.0, 1.0),
        ]);
        let outcome = render_scalability(&metrics, Some(&path)).unwrap();
        assert!(matches!(outcome, ChartOutcome::Skipped(_)));
        assert!(!path.exists());
    }

    #[test]
    fn saves_png_with_a_zero_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        let metrics = MetricsTable::from_rows(&[
            row("a", Method::Explicit, 10, 0.0, 1.0),
            row("a", Method::Bdd, 10, 0.01, 1.0),
            row("b", Method::Explicit, 5000, 3.5, 1.0),
            row("b", Method::Bdd, 5000, 0.4, 1.0),
        ]);
        let outcome = render_scalability(&metrics, Some(&path)).unwrap();
        assert_eq!(outcome, ChartOutcome::Saved(path.clone()));
        assert!(path.exists());
    }

    #[test]
    fn series_follow_sorted_points() {
        let points = [point(10, 0.1, 0.2), point(1000, 9.0, 1.0)];
        let [(explicit_name, _, explicit), (bdd_name, _, bdd)] = series(&points);
        assert_eq!(explicit_name, "Explicit");
        assert_eq!(explicit, vec![(10.0, 0.1), (1000.0, 9.0)]);
        assert_eq!(bdd_name, "BDD");
        assert_eq!(bdd, vec![(10.0, 0.2), (1000.0, 1.0)]);
    }

    #[test]
    fn log_range_ignores_zero_times() {
        let points = [point(1, 0.0, 0.5), point(2, 4.0, 0.0)];
        assert_eq!(log_time_range(&points), 0.25..8.0);
        assert_eq!(log_time_range(&[point(1, 0.0, 0.0)]), 1e-3..1.0);
    }

    #[test]
    fn flat_state_range_is_widened() {
        let points = [point(5, 1.0, 1.0), point(5, 2.0, 1.0)];
        assert_eq!(state_range(&points), 4.0..6.0);
    }
}
