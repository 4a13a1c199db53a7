use crate::results::{Deadlock, Method, ResultRow};
use log::warn;
use std::collections::HashMap;

/// Numbers of a single solver run, as used by the charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub states: u64,
    pub time_sec: f64,
    pub mem_mb: f64,
    pub deadlock: Deadlock,
}

impl Sample {
    fn of(row: &ResultRow) -> Sample {
        Sample {
            states: row.states,
            time_sec: row.time_sec,
            mem_mb: row.mem_mb,
            deadlock: row.deadlock,
        }
    }
}

/// Explicit and BDD results of one model. Either side may be missing, in
/// which case its accessors read as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMetrics {
    pub model: String,
    pub explicit: Option<Sample>,
    pub bdd: Option<Sample>,
}

impl ModelMetrics {
    pub fn explicit_states(&self) -> u64 {
        self.explicit.map_or(0, |s| s.states)
    }

    pub fn bdd_states(&self) -> u64 {
        self.bdd.map_or(0, |s| s.states)
    }

    pub fn explicit_time(&self) -> f64 {
        self.explicit.map_or(0.0, |s| s.time_sec)
    }

    pub fn bdd_time(&self) -> f64 {
        self.bdd.map_or(0.0, |s| s.time_sec)
    }

    pub fn explicit_mem(&self) -> f64 {
        self.explicit.map_or(0.0, |s| s.mem_mb)
    }

    pub fn bdd_mem(&self) -> f64 {
        self.bdd.map_or(0.0, |s| s.mem_mb)
    }

    /// Deadlock status as reported by the BDD run, the only run that checks it.
    pub fn deadlock(&self) -> Deadlock {
        self.bdd.map_or(Deadlock::Unknown, |s| s.deadlock)
    }

    /// Explicit time over BDD time. `None` unless both runs exist and the BDD
    /// time is strictly positive.
    pub fn speedup(&self) -> Option<f64> {
        match (self.explicit, self.bdd) {
            (Some(e), Some(b)) if b.time_sec > 0.0 => Some(e.time_sec / b.time_sec),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Speedups {
    pub values: Vec<(String, f64)>,
    pub excluded: Vec<String>,
}

impl Speedups {
    pub fn bdd_faster(&self) -> usize {
        self.values.iter().filter(|(_, s)| *s > 1.0).count()
    }

    pub fn explicit_faster(&self) -> usize {
        self.values.len() - self.bdd_faster()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalabilityPoint {
    pub states: u64,
    pub explicit_time: f64,
    pub bdd_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub models: usize,
    pub explicit_states: u64,
    pub bdd_states: u64,
    pub explicit_time: f64,
    pub bdd_time: f64,
}

impl Summary {
    /// Ratio of the total times. Zero when the BDD total is not positive.
    pub fn average_speedup(&self) -> f64 {
        if self.bdd_time > 0.0 {
            self.explicit_time / self.bdd_time
        } else {
            0.0
        }
    }
}

pub const SCORE_LABELS: [&str; 3] = ["Speed", "Memory Efficiency", "Scalability"];

/// Illustrative per-method scores shown on the dashboard. Only the BDD speed
/// score depends on the data, the rest are fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodScores {
    pub explicit: [f64; 3],
    pub bdd: [f64; 3],
}

impl MethodScores {
    pub fn heuristic(summary: &Summary) -> MethodScores {
        if summary.explicit_time > 0.0 && summary.bdd_time > 0.0 {
            let speed = (summary.explicit_time / summary.bdd_time).min(2.0) / 2.0;
            MethodScores {
                explicit: [1.0, 0.5, 0.3],
                bdd: [speed, 0.8, 0.9],
            }
        } else {
            MethodScores {
                explicit: [0.5, 0.5, 0.3],
                bdd: [0.7, 0.8, 0.9],
            }
        }
    }
}

/// Per-model view of the result rows, built in one pass and shared by every
/// chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    pub models: Vec<ModelMetrics>,
    pub explicit_rows: usize,
    pub bdd_rows: usize,
}

impl MetricsTable {
    pub fn from_rows(rows: &[ResultRow]) -> MetricsTable {
        let mut models: Vec<ModelMetrics> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let (mut explicit_rows, mut bdd_rows) = (0, 0);

        for row in rows {
            let i = *index.entry(row.model.as_str()).or_insert_with(|| {
                models.push(ModelMetrics {
                    model: row.model.clone(),
                    explicit: None,
                    bdd: None,
                });
                models.len() - 1
            });
            let slot = match row.method {
                Method::Explicit => {
                    explicit_rows += 1;
                    &mut models[i].explicit
                }
                Method::Bdd => {
                    bdd_rows += 1;
                    &mut models[i].bdd
                }
            };
            if slot.is_some() {
                warn!(
                    "Duplicate {} result for {}, keeping the first one",
                    row.method, row.model
                );
            } else {
                *slot = Some(Sample::of(row));
            }
        }

        MetricsTable {
            models,
            explicit_rows,
            bdd_rows,
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn speedups(&self) -> Speedups {
        let mut values = Vec::new();
        let mut excluded = Vec::new();
        for m in &self.models {
            match m.speedup() {
                Some(s) => values.push((m.model.clone(), s)),
                None => excluded.push(m.model.clone()),
            }
        }
        Speedups { values, excluded }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            models: self.models.len(),
            explicit_states: self.state_total(ModelMetrics::explicit_states),
            bdd_states: self.state_total(ModelMetrics::bdd_states),
            explicit_time: self.models.iter().map(ModelMetrics::explicit_time).sum(),
            bdd_time: self.models.iter().map(ModelMetrics::bdd_time).sum(),
        }
    }

    /// State counts can reach `u64::MAX`, so the total saturates.
    fn state_total(&self, states: fn(&ModelMetrics) -> u64) -> u64 {
        self.models.iter().map(states).fold(0, u64::saturating_add)
    }

    /// Row count per method over the whole input, duplicates included.
    /// Methods without rows are left out.
    pub fn method_counts(&self) -> Vec<(Method, usize)> {
        [
            (Method::Explicit, self.explicit_rows),
            (Method::Bdd, self.bdd_rows),
        ]
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .collect()
    }

    /// Paired models sorted by state count (taken from the BDD run).
    pub fn scalability_points(&self) -> Vec<ScalabilityPoint> {
        let mut points: Vec<ScalabilityPoint> = self
            .models
            .iter()
            .filter_map(|m| match (m.explicit, m.bdd) {
                (Some(e), Some(b)) => Some(ScalabilityPoint {
                    states: b.states,
                    explicit_time: e.time_sec,
                    bdd_time: b.time_sec,
                }),
                _ => None,
            })
            .collect();
        points.sort_by_key(|p| p.states);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::tests::row;

    #[test]
    fn speedup_of_paired_model() {
        let table = MetricsTable::from_rows(&[
            row("A", Method::Explicit, 100, 2.0, 10.0),
            row("A", Method::Bdd, 100, 0.5, 8.0),
        ]);
        assert_eq!(table.len(), 1);
        let a = &table.models[0];
        assert_eq!(a.speedup(), Some(4.0));
        assert_eq!(a.explicit_states(), 100);
        assert_eq!(a.bdd_states(), 100);
        assert_eq!(a.explicit_mem(), 10.0);
        assert_eq!(a.bdd_mem(), 8.0);
    }

    #[test]
    fn missing_side_reads_as_zero() {
        let table = MetricsTable::from_rows(&[row("only_bdd", Method::Bdd, 42, 0.3, 2.0)]);
        let m = &table.models[0];
        assert_eq!(m.explicit_states(), 0);
        assert_eq!(m.explicit_time(), 0.0);
        assert_eq!(m.explicit_mem(), 0.0);
        assert_eq!(m.bdd_states(), 42);
        assert_eq!(m.speedup(), None);
    }

    #[test]
    fn zero_bdd_time_is_excluded_from_speedups() {
        let table = MetricsTable::from_rows(&[
            row("fast", Method::Explicit, 10, 1.0, 1.0),
            row("fast", Method::Bdd, 10, 0.0, 1.0),
            row("slow", Method::Explicit, 20, 1.0, 1.0),
            row("slow", Method::Bdd, 20, 2.0, 1.0),
            row("lonely", Method::Explicit, 5, 1.0, 1.0),
        ]);
        let speedups = table.speedups();
        assert_eq!(speedups.values, vec![("slow".to_string(), 0.5)]);
        assert_eq!(speedups.excluded, vec!["fast".to_string(), "lonely".to_string()]);
        assert_eq!(speedups.bdd_faster(), 0);
        assert_eq!(speedups.explicit_faster(), 1);
    }

    #[test]
    fn models_keep_first_appearance_order() {
        let table = MetricsTable::from_rows(&[
            row("b", Method::Bdd, 1, 0.1, 1.0),
            row("a", Method::Explicit, 1, 0.1, 1.0),
            row("b", Method::Explicit, 1, 0.1, 1.0),
        ]);
        let names: Vec<_> = table.models.iter().map(|m| m.model.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn duplicate_rows_keep_the_first() {
        let table = MetricsTable::from_rows(&[
            row("a", Method::Bdd, 1, 0.1, 1.0),
            row("a", Method::Bdd, 99, 9.0, 9.0),
        ]);
        assert_eq!(table.models[0].bdd_states(), 1);
        assert_eq!(table.method_counts(), vec![(Method::Bdd, 2)]);
    }

    #[test]
    fn summary_totals() {
        let table = MetricsTable::from_rows(&[
            row("a", Method::Explicit, 10, 1.0, 1.0),
            row("a", Method::Bdd, 10, 0.5, 1.0),
            row("b", Method::Explicit, 30, 3.0, 1.0),
        ]);
        let summary = table.summary();
        assert_eq!(summary.models, 2);
        assert_eq!(summary.explicit_states, 40);
        assert_eq!(summary.bdd_states, 10);
        assert_eq!(summary.explicit_time, 4.0);
        assert_eq!(summary.bdd_time, 0.5);
        assert_eq!(summary.average_speedup(), 8.0);
    }

    #[test]
    fn summary_state_totals_saturate() {
        let huge = u64::MAX / 2 + 1;
        let table = MetricsTable::from_rows(&[
            row("a", Method::Bdd, huge, 1.0, 1.0),
            row("b", Method::Bdd, huge, 1.0, 1.0),
            row("b", Method::Explicit, 3, 1.0, 1.0),
        ]);
        let summary = table.summary();
        assert_eq!(summary.bdd_states, u64::MAX);
        assert_eq!(summary.explicit_states, 3);
    }

    #[test]
    fn average_speedup_without_bdd_time() {
        let table = MetricsTable::from_rows(&[row("a", Method::Explicit, 10, 1.0, 1.0)]);
        assert_eq!(table.summary().average_speedup(), 0.0);
    }

    #[test]
    fn scalability_points_are_sorted_and_paired() {
        let table = MetricsTable::from_rows(&[
            row("big", Method::Explicit, 900, 9.0, 1.0),
            row("big", Method::Bdd, 1000, 1.0, 1.0),
            row("half", Method::Explicit, 5, 0.1, 1.0),
            row("small", Method::Bdd, 10, 0.2, 1.0),
            row("small", Method::Explicit, 10, 0.1, 1.0),
        ]);
        let points = table.scalability_points();
        assert_eq!(
            points,
            vec![
                ScalabilityPoint {
                    states: 10,
                    explicit_time: 0.1,
                    bdd_time: 0.2
                },
                ScalabilityPoint {
                    states: 1000,
                    explicit_time: 9.0,
                    bdd_time: 1.0
                },
            ]
        );
    }

    #[test]
    fn heuristic_scores() {
        let summary = Summary {
            models: 1,
            explicit_states: 1,
            bdd_states: 1,
            explicit_time: 3.0,
            bdd_time: 1.0,
        };
        let scores = MethodScores::heuristic(&summary);
        assert_eq!(scores.explicit, [1.0, 0.5, 0.3]);
        assert_eq!(scores.bdd, [1.0, 0.8, 0.9]);

        let no_time = Summary {
            bdd_time: 0.0,
            ..summary
        };
        let scores = MethodScores::heuristic(&no_time);
        assert_eq!(scores.explicit, [0.5, 0.5, 0.3]);
        assert_eq!(scores.bdd, [0.7, 0.8, 0.9]);
    }
}
