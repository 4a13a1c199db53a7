use crate::chart::{self, comparison, dashboard, scalability, speedup, ChartOutcome};
use crate::error::Result;
use crate::metrics::MetricsTable;
use crate::results::{load_results, StatusReport, RESULTS_FILE};
use crate::table::{comparison_table, deadlock_table, Table};
use crate::utils::file::write_file;
use log::{error, info};
use std::path::{Path, PathBuf};

pub const LATEX_FILE: &str = "table_performance.tex";
const LATEX_CAPTION: &str = "Performance Comparison: Explicit vs BDD";

pub struct Config {
    pub output_dir: PathBuf,
    pub charts: bool,
    pub open_charts: bool,
}

impl Config {
    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join(RESULTS_FILE)
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

fn banner(title: &str, width: usize) {
    println!("\n{}", "=".repeat(width));
    println!("  {}", title);
    println!("{}", "=".repeat(width));
}

fn print_table(table: &Table) {
    banner(&format!("📊 {}", table.title), 80);
    println!("{}", table.render_console());
}

/// Loads the solver output, prints the tables and writes the LaTeX fragment
/// and the charts. Returns the files written.
pub fn run(config: &Config) -> Result<Vec<PathBuf>> {
    banner("🔬 PETRI NET SOLVER - RESULTS ANALYZER", 60);
    println!("  📊 Generating Tables and Charts for Report");

    let rows = load_results(&config.results_path())?;
    let status = StatusReport::load(&config.output_dir);

    banner("📋 TABLES", 60);
    let comparison = comparison_table(&rows);
    print_table(&comparison);
    let deadlocks = deadlock_table(&rows);
    if !deadlocks.is_empty() {
        print_table(&deadlocks);
    }

    println!("\n📄 LaTeX Table Code:");
    println!("{}", "-".repeat(40));
    let latex = comparison.render_latex(LATEX_CAPTION);
    println!("{}", latex);
    let latex_path = config.output_path(LATEX_FILE);
    write_file(&latex_path, &latex)?;
    info!("LaTeX saved: {}", latex_path.display());

    let mut written = vec![latex_path];
    if config.charts {
        banner("📈 GENERATING CHARTS", 60);
        let metrics = MetricsTable::from_rows(&rows);
        written.extend(render_charts(config, &metrics, &status));
    }

    banner("✅ ANALYSIS COMPLETE", 60);
    println!("\n📁 Output directory: {}", config.output_dir.display());
    println!("\n📊 Generated files:");
    for path in &written {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        println!("   • {}", name);
    }
    println!();

    if config.open_charts {
        written
            .iter()
            .filter(|p| is_chart(p))
            .for_each(|p| chart::open_in_viewer(p));
    }
    Ok(written)
}

/// Renders every chart. A chart that fails or lacks data does not stop the
/// others.
fn render_charts(config: &Config, metrics: &MetricsTable, status: &StatusReport) -> Vec<PathBuf> {
    let comparison_path = config.output_path(comparison::FILE_NAME);
    let speedup_path = config.output_path(speedup::FILE_NAME);
    let dashboard_path = config.output_path(dashboard::FILE_NAME);
    let scalability_path = config.output_path(scalability::FILE_NAME);

    let outcomes = [
        comparison::render_comparison(metrics, Some(&comparison_path)),
        speedup::render_speedup(metrics, Some(&speedup_path)),
        dashboard::render_dashboard(metrics, status, Some(&dashboard_path)),
        scalability::render_scalability(metrics, Some(&scalability_path)),
    ];

    let mut saved = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(ChartOutcome::Saved(path)) => saved.push(path),
            // the renderer already warned about a skip
            Ok(ChartOutcome::Drawn | ChartOutcome::Skipped(_)) => {}
            Err(err) => error!("{}", err),
        }
    }
    saved
}

pub fn is_chart(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use std::fs;

    fn config(dir: &Path) -> Config {
        Config {
            output_dir: dir.to_path_buf(),
            charts: false,
            open_charts: false,
        }
    }

    #[test]
    fn missing_results_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&config(dir.path())).unwrap_err();
        assert!(matches!(err, ReportError::MissingResults { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn malformed_results_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(RESULTS_FILE),
            "Model,Method,States,TimeSec,MemMB\na,BDD,x,1,1\n",
        )
        .unwrap();
        let err = run(&config(dir.path())).unwrap_err();
        assert!(!err.is_missing_data());
        assert!(!dir.path().join(LATEX_FILE).exists());
    }

    #[test]
    fn writes_latex_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(RESULTS_FILE),
            "Model,Method,States,TimeSec,MemMB,Deadlock,OptObj,OptMarking\n\
             A,Explicit,100,2.0,10,N/A,N/A,N/A\n\
             A,BDD,100,0.5,8,No,N/A,N/A\n",
        )
        .unwrap();
        let written = run(&config(dir.path())).unwrap();
        assert_eq!(written, vec![dir.path().join(LATEX_FILE)]);

        let latex = fs::read_to_string(dir.path().join(LATEX_FILE)).unwrap();
        assert!(latex.contains("A & Explicit & 100 & 2.0000 & 10.0000 \\\\"));
        assert!(latex.contains("A & BDD & 100 & 0.5000 & 8.0000 \\\\"));
        assert!(!written.iter().any(|p| is_chart(p)));
    }

    #[test]
    fn skipped_charts_are_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(RESULTS_FILE),
            "Model,Method,States,TimeSec,MemMB\n\
             A,Explicit,100,2.0,10\n\
             A,BDD,100,0.5,8\n",
        )
        .unwrap();
        let config = Config {
            charts: true,
            ..config(dir.path())
        };
        let written = run(&config).unwrap();
        let names: Vec<_> = written
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                LATEX_FILE,
                comparison::FILE_NAME,
                speedup::FILE_NAME,
                dashboard::FILE_NAME
            ]
        );
        assert!(!dir.path().join(scalability::FILE_NAME).exists());
    }
}
