//! Numeric coercion of value columns.
//!
//! Unlike the time column, value columns are coerced one cell at a time: a
//! cell that cannot be read as a finite number becomes missing and is
//! counted, it never aborts the pipeline.

use hydro_model::{ValidationError, ValveStatePolicy};

/// Cell spellings treated as an intentionally empty value.
const MISSING_TOKENS: &[&str] = &[
    "nan", "-nan", "na", "n/a", "#n/a", "null", "none", "<na>",
];

/// Parses a string as f64, returning None for invalid, non-finite or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn is_missing_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || MISSING_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Arithmetic mean of the present values, `None` when there are none.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0_f64, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// A value column after coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoercedColumn {
    pub values: Vec<Option<f64>>,
    /// Empty cells or explicit missing markers.
    pub empty: usize,
    /// Non-empty cells that were not finite numbers.
    pub invalid: usize,
}

/// Coerces raw cells to floats, one value per input cell.
pub fn coerce_values<'a>(cells: impl IntoIterator<Item = &'a str>) -> CoercedColumn {
    let mut column = CoercedColumn::default();
    for cell in cells {
        if is_missing_token(cell) {
            column.empty += 1;
            column.values.push(None);
            continue;
        }
        let parsed = parse_f64(cell);
        if parsed.is_none() {
            column.invalid += 1;
        }
        column.values.push(parsed);
    }
    column
}

/// The valve column after integer conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValveColumn {
    pub values: Vec<i64>,
    /// Missing cells set to 0 (closed).
    pub filled: usize,
    /// Values outside {0, 1}, counted before any clamping.
    pub out_of_range: usize,
}

/// Rounds coerced valve readings to integers and applies the range policy.
///
/// Missing readings become 0. Under [`ValveStatePolicy::Reject`] the first
/// value outside {0, 1} fails with its 1-based row number.
pub fn coerce_valve(
    coerced: &CoercedColumn,
    policy: ValveStatePolicy,
) -> Result<ValveColumn, ValidationError> {
    let mut column = ValveColumn {
        values: Vec::with_capacity(coerced.values.len()),
        ..ValveColumn::default()
    };
    for (index, value) in coerced.values.iter().enumerate() {
        let Some(value) = value else {
            column.filled += 1;
            column.values.push(0);
            continue;
        };
        let rounded = value.round() as i64;
        if !(0..=1).contains(&rounded) {
            column.out_of_range += 1;
            match policy {
                ValveStatePolicy::PassThrough => {}
                ValveStatePolicy::Clamp => {
                    column.values.push(rounded.clamp(0, 1));
                    continue;
                }
                ValveStatePolicy::Reject => {
                    return Err(ValidationError::ValveStateOutOfRange {
                        row: index + 1,
                        value: rounded,
                    });
                }
            }
        }
        column.values.push(rounded);
    }
    Ok(column)
}

#[cfg(test)]
mod tests {
    use hydro_model::ValidationErrorKind;

    use super::*;

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(" 21.5 "), Some(21.5));
        assert_eq!(parse_f64("1e2"), Some(100.0));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("warm"), None);
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_f64("NaN"), None);
    }

    #[test]
    fn coercion_counts_empty_and_invalid_separately() {
        let column = coerce_values(["21.5", "", "NaN", "err", "22"]);
        assert_eq!(
            column.values,
            vec![Some(21.5), None, None, None, Some(22.0)]
        );
        assert_eq!(column.empty, 2);
        assert_eq!(column.invalid, 1);
    }

    #[test]
    fn mean_ignores_missing() {
        assert_eq!(mean(&[Some(60.0), None, Some(62.0)]), Some(61.0));
        assert_eq!(mean(&[None, None]), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn valve_rounds_and_fills() {
        let coerced = coerce_values(["0", "1.0", "0.9", "", "0.2"]);
        let valve = coerce_valve(&coerced, ValveStatePolicy::PassThrough).unwrap();
        assert_eq!(valve.values, vec![0, 1, 1, 0, 0]);
        assert_eq!(valve.filled, 1);
        assert_eq!(valve.out_of_range, 0);
    }

    #[test]
    fn valve_policies() {
        let coerced = coerce_values(["1", "3", "-1"]);

        let passed = coerce_valve(&coerced, ValveStatePolicy::PassThrough).unwrap();
        assert_eq!(passed.values, vec![1, 3, -1]);
        assert_eq!(passed.out_of_range, 2);

        let clamped = coerce_valve(&coerced, ValveStatePolicy::Clamp).unwrap();
        assert_eq!(clamped.values, vec![1, 1, 0]);
        assert_eq!(clamped.out_of_range, 2);

        let err = coerce_valve(&coerced, ValveStatePolicy::Reject).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::ValveStateOutOfRange);
        assert_eq!(
            err,
            ValidationError::ValveStateOutOfRange { row: 2, value: 3 }
        );
    }
}
