use crate::error::{ReportError, Result};
use crate::utils::common::ParseField;
use crate::utils::file::read_or_placeholder;
use csv::StringRecord;
use log::{info, warn};
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const RESULTS_FILE: &str = "result.csv";
pub const DEADLOCK_FILE: &str = "deadlock.txt";
pub const OPTIMUM_FILE: &str = "optimum.txt";

pub const NO_DEADLOCK_INFO: &str = "No deadlock info";
pub const NO_OPTIMIZATION_INFO: &str = "No optimization info";

// Text the solver writes for values it did not compute
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Explicit,
    Bdd,
}

impl Method {
    pub fn parse(value: &str) -> Option<Method> {
        match value {
            "Explicit" => Some(Method::Explicit),
            "BDD" => Some(Method::Bdd),
            _ => None,
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Explicit => "Explicit",
            Method::Bdd => "BDD",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadlock {
    Yes,
    No,
    Unknown,
}

impl Deadlock {
    pub fn parse(value: &str) -> Deadlock {
        match value {
            "Yes" => Deadlock::Yes,
            "No" => Deadlock::No,
            _ => Deadlock::Unknown,
        }
    }
}

impl Display for Deadlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Deadlock::Yes => "Yes",
            Deadlock::No => "No",
            Deadlock::Unknown => NOT_AVAILABLE,
        };
        write!(f, "{}", text)
    }
}

/// One (model, method) observation written by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub model: String,
    pub method: Method,
    pub states: u64,
    pub time_sec: f64,
    pub mem_mb: f64,
    pub deadlock: Deadlock,
    pub opt_obj: Option<String>,
    pub opt_marking: Option<String>,
}

/// Column positions resolved from the header line.
struct Columns {
    model: usize,
    method: usize,
    states: usize,
    time_sec: usize,
    mem_mb: usize,
    deadlock: Option<usize>,
    opt_obj: Option<usize>,
    opt_marking: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, path: &Path) -> Result<Columns> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &'static str| {
            find(name).ok_or_else(|| ReportError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
        };
        Ok(Columns {
            model: require("Model")?,
            method: require("Method")?,
            states: require("States")?,
            time_sec: require("TimeSec")?,
            mem_mb: require("MemMB")?,
            deadlock: find("Deadlock"),
            opt_obj: find("OptObj"),
            opt_marking: find("OptMarking"),
        })
    }

    /// Parses one record. Rows of a method this tool does not compare are
    /// skipped with a warning.
    fn row(&self, record: &StringRecord, line: u64) -> Result<Option<ResultRow>> {
        let field = |index: usize| record.get(index).unwrap_or("").trim();
        let optional = |index: Option<usize>| {
            index
                .map(field)
                .filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
                .map(str::to_string)
        };

        let method_text = field(self.method);
        let Some(method) = Method::parse(method_text) else {
            warn!("Skipping line {}: unknown method '{}'", line, method_text);
            return Ok(None);
        };

        Ok(Some(ResultRow {
            model: field(self.model).to_string(),
            method,
            states: field(self.states).parse_field(line, "States", "a non-negative integer")?,
            time_sec: non_negative(field(self.time_sec), line, "TimeSec")?,
            mem_mb: non_negative(field(self.mem_mb), line, "MemMB")?,
            deadlock: self
                .deadlock
                .map(|i| Deadlock::parse(field(i)))
                .unwrap_or(Deadlock::Unknown),
            opt_obj: optional(self.opt_obj),
            opt_marking: optional(self.opt_marking),
        }))
    }
}

fn non_negative(value: &str, line: u64, column: &'static str) -> Result<f64> {
    const EXPECTED: &str = "a non-negative number";
    let parsed: f64 = value.parse_field(line, column, EXPECTED)?;
    if parsed.is_finite() && parsed >= 0.0 {
        Ok(parsed)
    } else {
        Err(ReportError::InvalidField {
            line,
            column,
            value: value.to_string(),
            expected: EXPECTED,
        })
    }
}

pub fn load_results(path: &Path) -> Result<Vec<ResultRow>> {
    if !path.exists() {
        return Err(ReportError::MissingResults {
            path: path.to_path_buf(),
        });
    }
    let malformed = |source: csv::Error| ReportError::MalformedResults {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(malformed)?;
    let columns = Columns::resolve(reader.headers().map_err(malformed)?, path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if let Some(row) = columns.row(&record, line)? {
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return Err(ReportError::EmptyResults {
            path: path.to_path_buf(),
        });
    }
    info!("Loaded {} records from {}", rows.len(), path.display());
    Ok(rows)
}

/// Deadlock and optimization summaries written next to the CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub deadlock: String,
    pub optimization: String,
}

impl StatusReport {
    pub fn load(dir: &Path) -> StatusReport {
        StatusReport {
            deadlock: read_or_placeholder(&dir.join(DEADLOCK_FILE), NO_DEADLOCK_INFO),
            optimization: read_or_placeholder(&dir.join(OPTIMUM_FILE), NO_OPTIMIZATION_INFO),
        }
    }
}
