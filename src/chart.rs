use crate::error::{ReportError, Result};
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};

pub mod comparison;
pub mod dashboard;
mod panels;
pub mod scalability;
pub mod speedup;
mod style;

pub type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type DrawResult = std::result::Result<(), Box<dyn Error>>;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Saved(PathBuf),
    /// Drawn in memory only, no output path was given.
    Drawn,
    Skipped(String),
}

/// Draws a figure of `size` pixels onto a PNG file, or onto a throwaway
/// buffer when there is no path.
fn render<F>(chart: &'static str, size: (u32, u32), path: Option<&Path>, draw: F) -> Result<ChartOutcome>
where
    F: FnOnce(&Area<'_>) -> DrawResult,
{
    let failed = |e: Box<dyn Error>| ReportError::Chart {
        chart,
        message: e.to_string(),
    };
    match path {
        Some(path) => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_on(&root, draw).map_err(failed)?;
            info!("Chart saved: {}", path.display());
            Ok(ChartOutcome::Saved(path.to_path_buf()))
        }
        None => {
            let mut buffer = vec![0u8; size.0 as usize * size.1 as usize * 3];
            let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
            draw_on(&root, draw).map_err(failed)?;
            debug!("{} chart drawn without output path", chart);
            Ok(ChartOutcome::Drawn)
        }
    }
}

fn draw_on<F>(root: &Area<'_>, draw: F) -> DrawResult
where
    F: FnOnce(&Area<'_>) -> DrawResult,
{
    root.fill(&WHITE)?;
    draw(root)?;
    root.present()?;
    Ok(())
}

/// Hands a saved image to the platform viewer. Failures are only logged.
pub fn open_in_viewer(path: &Path) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    if let Err(err) = std::process::Command::new(opener).arg(path).spawn() {
        debug!("Could not open {}: {}", path.display(), err);
    }
}
