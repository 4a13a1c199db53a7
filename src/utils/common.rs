use crate::error::{ReportError, Result};
use std::str::FromStr;

const MODEL_SUFFIX: &str = ".pnml";

/// Model label used on chart axes: the file name without its `.pnml` suffix.
pub fn short_model_name(model: &str) -> String {
    model.replace(MODEL_SUFFIX, "")
}

/// Like [`short_model_name`] but cut to at most `max_chars` characters.
pub fn truncated_model_name(model: &str, max_chars: usize) -> String {
    short_model_name(model).chars().take(max_chars).collect()
}

pub trait ParseField {
    fn parse_field<T: FromStr>(&self, line: u64, column: &'static str, expected: &'static str)
        -> Result<T>;
}

impl ParseField for &str {
    fn parse_field<T: FromStr>(
        &self,
        line: u64,
        column: &'static str,
        expected: &'static str,
    ) -> Result<T> {
        self.parse::<T>().map_err(|_| ReportError::InvalidField {
            line,
            column,
            value: self.to_string(),
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_pnml_suffix() {
        assert_eq!(short_model_name("philosophers.pnml"), "philosophers");
        assert_eq!(short_model_name("plain"), "plain");
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncated_model_name("producer_consumer.pnml", 10), "producer_c");
        assert_eq!(truncated_model_name("ñandú.pnml", 3), "ñan");
    }

    #[test]
    fn parse_field_reports_column() {
        let ok: u64 = "42".parse_field(2, "States", "an integer").unwrap();
        assert_eq!(ok, 42);
        let err = "x".parse_field::<u64>(5, "States", "an integer").unwrap_err();
        match err {
            ReportError::InvalidField { line, column, value, .. } => {
                assert_eq!(line, 5);
                assert_eq!(column, "States");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
