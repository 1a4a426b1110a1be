use crate::error::FilterError;

use super::model::{Operands, Operator};

// ---------------------------------------------------------------------------
// Raw filter parsing: "<operator>,<value>" strings → operator + operands
// ---------------------------------------------------------------------------

/// Parse one column's raw filter strings into a single operator and its
/// operand list.
///
/// Each raw string splits on the first comma, so values may themselves
/// contain commas.  All strings for one column must share one operator;
/// mixing operators within a column's OR list is rejected here rather
/// than silently letting the last one win.  Operands of ordering
/// operators are parsed as numbers once, up front.
pub fn parse_column_filters(
    column: &str,
    raws: &[String],
) -> Result<(Operator, Operands), FilterError> {
    let mut operator: Option<Operator> = None;
    let mut values: Vec<String> = Vec::new();

    for raw in raws {
        let (token, value) = raw.split_once(',').ok_or_else(|| {
            FilterError::malformed(column, raw, "missing ',' between operator and value")
        })?;
        let op = Operator::from_token(token).ok_or_else(|| {
            FilterError::malformed(column, raw, format!("unknown operator '{token}'"))
        })?;
        match operator {
            None => operator = Some(op),
            Some(prev) if prev == op => {}
            Some(prev) => {
                return Err(FilterError::malformed(
                    column,
                    raw,
                    format!("operator '{op}' conflicts with earlier '{prev}'"),
                ));
            }
        }
        values.push(value.to_string());
    }

    let operator = operator
        .ok_or_else(|| FilterError::malformed(column, "", "no filter values supplied"))?;

    let operands = if operator.is_ordering() {
        let numbers = values
            .iter()
            .map(|v| {
                v.trim().parse::<f64>().map_err(|_| {
                    FilterError::malformed(
                        column,
                        v,
                        format!("operator '{operator}' needs a numeric value"),
                    )
                })
            })
            .collect::<Result<Vec<f64>, FilterError>>()?;
        Operands::Numeric(numbers)
    } else {
        // Equality matching is case-insensitive; normalize once here.
        Operands::Text(values.iter().map(|v| v.to_lowercase()).collect())
    };

    Ok((operator, operands))
}
