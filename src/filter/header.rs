use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Header resolution: column names → positional indices
// ---------------------------------------------------------------------------

/// What to do when a requested column is missing from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingColumnPolicy {
    /// Abort the run with [`FilterError::ColumnNotFound`].
    #[default]
    Fail,
    /// Drop that column's predicate and keep filtering on the rest.
    Skip,
}

/// Find the position of `column` in the header row.  Header fields are
/// lowercased before comparison; `column` is expected lowercased already.
/// With duplicate header names the first occurrence wins.
pub fn resolve_index(headers: &csv::StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|h| h.to_lowercase() == column)
}

/// Resolve `column` under the given policy.  `Ok(None)` means the column
/// was skipped.
pub fn resolve_column(
    headers: &csv::StringRecord,
    column: &str,
    policy: MissingColumnPolicy,
) -> Result<Option<usize>, FilterError> {
    match resolve_index(headers, column) {
        Some(index) => Ok(Some(index)),
        None => match policy {
            MissingColumnPolicy::Fail => Err(FilterError::ColumnNotFound {
                column: column.to_string(),
            }),
            MissingColumnPolicy::Skip => {
                log::warn!("column '{column}' not found in header, skipping its filter");
                Ok(None)
            }
        },
    }
}
