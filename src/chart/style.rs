use crate::results::{Deadlock, Method};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

pub const EXPLICIT: RGBColor = RGBColor(0x34, 0x98, 0xdb);
pub const BDD: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
pub const NO_DEADLOCK: RGBColor = RGBColor(0x2e, 0xcc, 0x71);
pub const UNKNOWN: RGBColor = RGBColor(0x95, 0xa5, 0xa6);
pub const REFERENCE: RGBColor = RGBColor(0x80, 0x80, 0x80);
pub const WHEAT: RGBColor = RGBColor(0xf5, 0xde, 0xb3);
pub const LIGHT_YELLOW: RGBColor = RGBColor(0xff, 0xff, 0xe0);
pub const LIGHT_CYAN: RGBColor = RGBColor(0xe0, 0xff, 0xff);

pub const FONT: &str = "sans-serif";
pub const MONO: &str = "monospace";

pub fn method_color(method: Method) -> RGBColor {
    match method {
        Method::Explicit => EXPLICIT,
        Method::Bdd => BDD,
    }
}

pub fn deadlock_color(status: Deadlock) -> RGBColor {
    match status {
        Deadlock::Yes => BDD,
        Deadlock::No => NO_DEADLOCK,
        Deadlock::Unknown => UNKNOWN,
    }
}

pub fn title(size: u32) -> TextStyle<'static> {
    (FONT, f64::from(size)).into_font().style(FontStyle::Bold).into()
}

pub fn text(size: u32) -> TextStyle<'static> {
    (FONT, f64::from(size)).into_font().into()
}

/// Text anchored at its bottom center, for labels sitting on top of a bar.
pub fn bar_label(size: u32) -> TextStyle<'static> {
    text(size).pos(Pos::new(HPos::Center, VPos::Bottom))
}

pub fn mono(size: u32) -> TextStyle<'static> {
    (MONO, f64::from(size)).into_font().into()
}

/// Upper bound for a value axis starting at zero, leaving room for labels.
pub fn value_axis_max(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values.into_iter().fold(0.0f64, f64::max);
    if max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

/// Axis label for category `x`, blank away from integer positions.
pub fn category_label(labels: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}
