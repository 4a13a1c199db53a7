use super::style::{self, category_label, value_axis_max, BDD, EXPLICIT};
use super::{Area, DrawResult};
use plotters::prelude::*;

const BAR_WIDTH: f64 = 0.35;

/// Explicit and BDD values of one quantity, one entry per model.
pub struct GroupedBars<'a> {
    pub title: &'a str,
    pub y_desc: &'a str,
    pub labels: &'a [String],
    pub explicit: Vec<f64>,
    pub bdd: Vec<f64>,
    /// Print the integer value on top of each bar.
    pub value_labels: bool,
    pub font_size: u32,
}

pub fn grouped_bars(area: &Area<'_>, bars: &GroupedBars<'_>) -> DrawResult {
    let n = bars.labels.len().max(1) as f64;
    let y_max = value_axis_max(bars.explicit.iter().chain(&bars.bdd).copied());

    let mut chart = ChartBuilder::on(area)
        .caption(bars.title, style::title(bars.font_size + 4))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n - 0.5), 0f64..y_max)?;

    let formatter = |x: &f64| category_label(bars.labels, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.labels.len() + 2)
        .x_label_formatter(&formatter)
        .x_label_style(style::text(bars.font_size))
        .x_desc("Model")
        .y_desc(bars.y_desc)
        .draw()?;

    for (values, offset, color, name) in [
        (&bars.explicit, -BAR_WIDTH, EXPLICIT, "Explicit"),
        (&bars.bdd, 0.0, BDD, "BDD"),
    ] {
        chart
            .draw_series(values.iter().enumerate().map(|(i, v)| {
                let x = i as f64 + offset;
                Rectangle::new([(x, 0.0), (x + BAR_WIDTH, *v)], color.filled())
            }))?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));

        if bars.value_labels {
            chart.draw_series(values.iter().enumerate().map(|(i, v)| {
                let x = i as f64 + offset + BAR_WIDTH / 2.0;
                Text::new(format!("{}", *v as u64), (x, *v), style::bar_label(bars.font_size))
            }))?;
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

/// Boxed block of monospace text, as used for the dashboard's info panels.
pub fn text_panel(area: &Area<'_>, lines: &[String], background: RGBColor) -> DrawResult {
    let (width, height) = area.dim_in_pixel();
    let (left, top) = ((width / 10) as i32, (height / 10) as i32);
    let line_height = 18;
    let bottom = (top + line_height * (lines.len() as i32 + 1)).min(height as i32 - 1);

    area.draw(&Rectangle::new(
        [(left - 10, top - 10), (width as i32 - 10, bottom)],
        background.mix(0.8).filled(),
    ))?;
    area.draw(&Rectangle::new(
        [(left - 10, top - 10), (width as i32 - 10, bottom)],
        BLACK.mix(0.3),
    ))?;
    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.as_str(),
            (left, top + line_height * i as i32),
            style::mono(14),
        ))?;
    }
    Ok(())
}
