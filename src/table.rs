use crate::results::{Method, ResultRow};
use std::fmt::{Display, Formatter};

/// Extra characters added to the widest cell of each column.
const COLUMN_PADDING: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(u64),
    Float(f64),
}

impl Cell {
    fn console(&self) -> String {
        match self {
            Cell::Float(v) => format_float(*v),
            other => other.to_string(),
        }
    }

    fn latex(&self) -> String {
        match self {
            Cell::Float(v) => format!("{:.4}", v),
            other => other.to_string(),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(t) => write!(f, "{}", t),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Console float format: small magnitudes keep six decimals so they do not
/// collapse to zero.
pub fn format_float(value: f64) -> String {
    if value.abs() < 0.01 {
        format!("{:.6}", value)
    } else {
        format!("{:.4}", value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let widest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.console().chars().count())
                    .max()
                    .unwrap_or(0);
                header.chars().count().max(widest_cell) + COLUMN_PADDING
            })
            .collect()
    }

    /// Box-drawn table with centered cells.
    pub fn render_console(&self) -> String {
        let widths = self.widths();
        let border = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };
        let line = |cells: Vec<String>| {
            let mut out = String::from("│");
            for (cell, w) in cells.iter().zip(&widths) {
                out += &format!(" {:^w$} │", cell, w = *w);
            }
            out + "\n"
        };

        let mut out = border("┌", "┬", "┐");
        out += &line(self.headers.iter().map(|h| h.to_string()).collect());
        out += &border("├", "┼", "┤");
        for row in &self.rows {
            let mut cells: Vec<String> = row.iter().map(Cell::console).collect();
            cells.resize(widths.len(), String::new());
            out += &line(cells);
        }
        out += &border("└", "┴", "┘");
        out
    }

    /// LaTeX `table` float holding a ruled `tabular`. Cell text is written as
    /// is, so LaTeX special characters in model names break the output.
    pub fn render_latex(&self, caption: &str) -> String {
        let mut latex = String::from("\\begin{table}[htbp]\n");
        latex += "\\centering\n";
        latex += &format!("\\caption{{{}}}\n", caption);
        latex += &format!("\\begin{{tabular}}{{|{}}}\n", "c|".repeat(self.headers.len()));
        latex += "\\hline\n";

        let headers: Vec<String> = self
            .headers
            .iter()
            .map(|h| format!("\\textbf{{{}}}", h))
            .collect();
        latex += &format!("{} \\\\\n", headers.join(" & "));
        latex += "\\hline\n";

        for row in &self.rows {
            let values: Vec<String> = row.iter().map(Cell::latex).collect();
            latex += &format!("{} \\\\\n", values.join(" & "));
        }

        latex += "\\hline\n";
        latex += "\\end{tabular}\n";
        latex += "\\label{tab:performance}\n";
        latex += "\\end{table}\n";
        latex
    }
}

/// Model, method, states, time and memory of every row.
pub fn comparison_table(rows: &[ResultRow]) -> Table {
    Table {
        title: "Performance Comparison (Explicit vs BDD)".into(),
        headers: vec!["Model", "Method", "States", "TimeSec", "MemMB"],
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.model.clone()),
                    Cell::Text(r.method.to_string()),
                    Cell::Int(r.states),
                    Cell::Float(r.time_sec),
                    Cell::Float(r.mem_mb),
                ]
            })
            .collect(),
    }
}

/// Deadlock and optimization columns of the BDD rows.
pub fn deadlock_table(rows: &[ResultRow]) -> Table {
    let text = |v: &Option<String>| Cell::Text(v.clone().unwrap_or_else(|| "N/A".into()));
    Table {
        title: "Deadlock Detection & Optimization Results".into(),
        headers: vec!["Model", "States", "Deadlock", "OptObj", "OptMarking"],
        rows: rows
            .iter()
            .filter(|r| r.method == Method::Bdd)
            .map(|r| {
                vec![
                    Cell::Text(r.model.clone()),
                    Cell::Int(r.states),
                    Cell::Text(r.deadlock.to_string()),
                    text(&r.opt_obj),
                    text(&r.opt_marking),
                ]
            })
            .collect(),
    }
}
