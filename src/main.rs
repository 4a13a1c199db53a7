mod chart;
mod error;
mod metrics;
mod report;
mod results;
mod table;
mod utils;

use crate::report::Config;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::exit;

const SOLVER_HINT: &str = "./petri_solver --input data/simple_test.pnml --mode all --optimize";

#[derive(Parser)]
pub struct Args {
    /// Directory holding the solver output (result.csv, deadlock.txt,
    /// optimum.txt). Tables and charts are written there too
    #[arg(short, long("output-dir"), default_value = "output")]
    output_dir: PathBuf,

    /// Print the tables and write the LaTeX file only
    #[arg(long("no-charts"), default_value_t = false)]
    no_charts: bool,

    /// Open the generated charts in the default image viewer
    #[arg(long, default_value_t = false)]
    open: bool,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            output_dir: args.output_dir,
            charts: !args.no_charts,
            open_charts: args.open,
        }
    }
}

fn main() {
    let args = Args::parse();
    init(args.verbose);
    info!("Starting petri-report...");
    let config = Config::from(args);
    if let Err(err) = report::run(&config) {
        if err.is_missing_data() {
            warn!("{}. Please run the solver first:\n    {}", err, SOLVER_HINT);
            return;
        }
        error!("{}", err);
        exit(1);
    }
}

fn init(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .default_format()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .format_module_path(false)
        .init()
}
