use thiserror::Error;

// ---------------------------------------------------------------------------
// FilterError – everything that can go wrong building or running a pass
// ---------------------------------------------------------------------------

/// Errors raised while compiling a filter request or scanning a file.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A requested column name is absent from the file's header row.
    #[error("column '{column}' was not found in the file header")]
    ColumnNotFound { column: String },

    /// A raw filter string could not be turned into a predicate.
    #[error("bad filter '{raw}' for column '{column}': {reason}")]
    MalformedFilterSpec {
        column: String,
        raw: String,
        reason: String,
    },

    /// An ordering operator hit a field that is neither empty nor a number.
    #[error("row {row}: column '{column}' holds non-numeric value '{value}'")]
    NonNumericField {
        row: usize,
        column: String,
        value: String,
    },

    /// The input path carries an extension we cannot map to a delimiter.
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    /// Opening or reading the delimited file failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl FilterError {
    pub(crate) fn malformed(
        column: &str,
        raw: &str,
        reason: impl Into<String>,
    ) -> Self {
        FilterError::MalformedFilterSpec {
            column: column.to_string(),
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}
