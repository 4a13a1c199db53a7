//! Per-model speedup of the BDD method over explicit enumeration.

use super::style::{self, category_label, value_axis_max, BDD, EXPLICIT, REFERENCE, WHEAT};
use super::{render, ChartOutcome};
use crate::error::Result;
use crate::metrics::{MetricsTable, Speedups};
use crate::utils::common::short_model_name;
use log::warn;
use plotters::prelude::*;
use std::path::Path;

pub const FILE_NAME: &str = "chart_speedup.png";
const SIZE: (u32, u32) = (1500, 900);

pub fn bar_color(speedup: f64) -> RGBColor {
    if speedup > 1.0 {
        BDD
    } else {
        EXPLICIT
    }
}

pub fn tally_lines(speedups: &Speedups) -> [String; 2] {
    [
        format!("BDD faster: {} models", speedups.bdd_faster()),
        format!("Explicit faster: {} models", speedups.explicit_faster()),
    ]
}

pub fn render_speedup(metrics: &MetricsTable, path: Option<&Path>) -> Result<ChartOutcome> {
    let speedups = metrics.speedups();
    if !speedups.excluded.is_empty() {
        warn!(
            "No speedup for {} (missing run or zero BDD time)",
            speedups.excluded.join(", ")
        );
    }
    if speedups.values.is_empty() {
        let reason = "no model has both runs with a positive BDD time".to_string();
        warn!("Not enough data to create speedup chart: {}", reason);
        return Ok(ChartOutcome::Skipped(reason));
    }

    let labels: Vec<String> = speedups
        .values
        .iter()
        .map(|(model, _)| short_model_name(model))
        .collect();
    let n = labels.len() as f64;
    let y_max = value_axis_max(speedups.values.iter().map(|(_, s)| *s).chain([1.0]));

    render("speedup", SIZE, path, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption("BDD Speedup over Explicit Method", style::title(28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5f64..(n - 0.5), 0f64..y_max)?;

        let formatter = |x: &f64| category_label(&labels, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len() + 2)
            .x_label_formatter(&formatter)
            .x_desc("Model")
            .y_desc("Speedup (Explicit Time / BDD Time)")
            .axis_desc_style(style::text(20))
            .draw()?;

        chart.draw_series(speedups.values.iter().enumerate().map(|(i, (_, s))| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *s)], bar_color(*s).filled())
        }))?;
        chart.draw_series(speedups.values.iter().enumerate().map(|(i, (_, s))| {
            Text::new(format!("{:.2}x", s), (i as f64, *s), style::bar_label(18))
        }))?;

        chart
            .draw_series(LineSeries::new(
                vec![(-0.5, 1.0), (n - 0.5, 1.0)],
                REFERENCE.stroke_width(2),
            ))?
            .label("No speedup (1x)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], REFERENCE.stroke_width(2)));
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        let (left, top) = (110, 80);
        root.draw(&Rectangle::new(
            [(left, top), (left + 280, top + 60)],
            WHEAT.mix(0.5).filled(),
        ))?;
        for (i, line) in tally_lines(&speedups).iter().enumerate() {
            root.draw(&Text::new(
                line.as_str(),
                (left + 10, top + 10 + 22 * i as i32),
                style::text(18),
            ))?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::tests::row;
    use crate::results::Method;

    #[test]
    fn colors_follow_the_faster_method() {
        assert_eq!(bar_color(4.0), BDD);
        assert_eq!(bar_color(1.0), EXPLICIT);
        assert_eq!(bar_color(0.3), EXPLICIT);
    }

    #[test]
    fn tally_counts_each_side() {
        let metrics = MetricsTable::from_rows(&[
            row("a", Method::Explicit, 1, 2.0, 1.0),
            row("a", Method::Bdd, 1, 0.5, 1.0),
            row("b", Method::Explicit, 1, 1.0, 1.0),
            row("b", Method::Bdd, 1, 1.0, 1.0),
            row("c", Method::Explicit, 1, 1.0, 1.0),
            row("c", Method::Bdd, 1, 4.0, 1.0),
        ]);
        assert_eq!(
            tally_lines(&metrics.speedups()),
            ["BDD faster: 1 models", "Explicit faster: 2 models"]
        );
    }

    #[test]
    fn skipped_without_valid_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        let metrics = MetricsTable::from_rows(&[
            row("a", Method::Explicit, 1, 2.0, 1.0),
            row("b", Method::Explicit, 1, 1.0, 1.0),
            row("b", Method::Bdd, 1, 0.0, 1.0),
        ]);
        match render_speedup(&metrics, Some(&path)).unwrap() {
            ChartOutcome::Skipped(reason) => assert!(reason.contains("positive BDD time")),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn excluded_model_does_not_stop_the_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        let metrics = MetricsTable::from_rows(&[
            row("zero.pnml", Method::Explicit, 1, 1.0, 1.0),
            row("zero.pnml", Method::Bdd, 1, 0.0, 1.0),
            row("ok.pnml", Method::Explicit, 1, 2.0, 1.0),
            row("ok.pnml", Method::Bdd, 1, 0.5, 1.0),
        ]);
        let outcome = render_speedup(&metrics, Some(&path)).unwrap();
        assert_eq!(outcome, ChartOutcome::Saved(path.clone()));
        assert!(path.exists());
    }
}
