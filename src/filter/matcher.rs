use crate::error::FilterError;

use super::model::{FilterSet, Operands, PredicateSpec};

// ---------------------------------------------------------------------------
// Row matching: score a data row against the compiled filter set
// ---------------------------------------------------------------------------

/// What to do when an ordering operator hits a field that is neither
/// empty nor parseable as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonNumericPolicy {
    /// Abort the run with [`FilterError::NonNumericField`].
    #[default]
    Fail,
    /// Abandon the row; it is excluded from the output.
    SkipRow,
    /// Log a warning and let the predicate contribute zero points.
    Ignore,
}

/// Score one row against the filter set.
///
/// The score is the count of predicate-satisfactions: AND across
/// columns, OR within a column's operand list.  An equality predicate
/// contributes at most one point however many operands it carries; an
/// ordering predicate contributes one point per satisfied operand, so a
/// single multi-threshold column can push a row past the match bar on
/// its own.
///
/// Returns `None` when a non-numeric field abandons the row under
/// [`NonNumericPolicy::SkipRow`].  `row_number` is 1-based with the
/// header as row 1; it only feeds error messages.
pub fn score_row(
    row: &csv::StringRecord,
    filters: &FilterSet,
    row_number: usize,
    policy: NonNumericPolicy,
) -> Result<Option<usize>, FilterError> {
    let mut score = 0;
    for spec in filters.predicates() {
        // A row too short for this column reads as an empty field.
        let field = row.get(spec.index).unwrap_or("");
        match score_predicate(field, spec, row_number, policy)? {
            Some(points) => score += points,
            None => return Ok(None),
        }
    }
    Ok(Some(score))
}

/// Whether a row satisfies the whole filter set (score reaches one point
/// per predicate).  Rows abandoned under `SkipRow` never match.
pub fn row_matches(
    row: &csv::StringRecord,
    filters: &FilterSet,
    row_number: usize,
    policy: NonNumericPolicy,
) -> Result<bool, FilterError> {
    let score = score_row(row, filters, row_number, policy)?;
    Ok(score.is_some_and(|s| s >= filters.required_score()))
}

fn score_predicate(
    field: &str,
    spec: &PredicateSpec,
    row_number: usize,
    policy: NonNumericPolicy,
) -> Result<Option<usize>, FilterError> {
    match &spec.operands {
        Operands::Text(operands) => {
            let field = field.to_lowercase();
            // Exact match first, substring as the fuzzy fallback; either
            // way the predicate is worth a single point.
            if operands.iter().any(|op| field == *op) {
                Ok(Some(1))
            } else if operands.iter().any(|op| field.contains(op.as_str())) {
                Ok(Some(1))
            } else {
                Ok(Some(0))
            }
        }
        Operands::Numeric(operands) => {
            // Empty fields never satisfy an ordering predicate.
            if field.is_empty() {
                return Ok(Some(0));
            }
            let value = match field.trim().parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    return match policy {
                        NonNumericPolicy::Fail => Err(FilterError::NonNumericField {
                            row: row_number,
                            column: spec.column.clone(),
                            value: field.to_string(),
                        }),
                        NonNumericPolicy::SkipRow => Ok(None),
                        NonNumericPolicy::Ignore => {
                            log::warn!(
                                "row {row_number}: ignoring non-numeric value '{field}' \
                                 in column '{}'",
                                spec.column
                            );
                            Ok(Some(0))
                        }
                    };
                }
            };
            let points = operands
                .iter()
                .filter(|&&op| spec.operator.compare(value, op))
                .count();
            Ok(Some(points))
        }
    }
}
