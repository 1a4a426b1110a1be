use std::io;
use std::path::Path;

use crate::error::FilterError;

use super::header::{self, MissingColumnPolicy};
use super::matcher::{self, NonNumericPolicy};
use super::model::{FilterSet, PredicateSpec, RawFilterRequest};
use super::parse::parse_column_filters;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Options controlling one filtering pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    pub missing_column: MissingColumnPolicy,
    pub non_numeric: NonNumericPolicy,
    /// Field delimiter; `None` picks one from the file extension.
    pub delimiter: Option<u8>,
}

/// Matching rows in file order, plus the total count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub rows: Vec<Vec<String>>,
    pub matched: usize,
}

/// Filter a delimited file.  Dispatch the delimiter by extension unless
/// the options carry one explicitly.
///
/// Supported extensions:
/// * `.tsv` / `.tab` – tab-separated
/// * `.csv`          – comma-separated
pub fn filter_file(
    path: &Path,
    request: &RawFilterRequest,
    options: &FilterOptions,
) -> Result<FilterOutcome, FilterError> {
    let delimiter = match options.delimiter {
        Some(d) => d,
        None => delimiter_for(path)?,
    };
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;
    scan(reader, request, options)
}

/// Filter rows from any reader.  Used for in-memory input and tests;
/// the extension dispatch of [`filter_file`] does not apply here.
pub fn filter_reader<R: io::Read>(
    input: R,
    delimiter: u8,
    request: &RawFilterRequest,
    options: &FilterOptions,
) -> Result<FilterOutcome, FilterError> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(input);
    scan(reader, request, options)
}

/// Map a file extension to its field delimiter.
pub fn delimiter_for(path: &Path) -> Result<u8, FilterError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "tsv" | "tab" => Ok(b'\t'),
        "csv" => Ok(b','),
        other => Err(FilterError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Filter compilation: raw request + header row → FilterSet
// ---------------------------------------------------------------------------

/// Resolve column indices against the header and parse every raw filter
/// string, producing the read-only [`FilterSet`] used for matching.
/// Parsing is fail-fast: a malformed filter anywhere means no filter set
/// at all.
pub fn compile_filters(
    headers: &csv::StringRecord,
    request: &RawFilterRequest,
    policy: MissingColumnPolicy,
) -> Result<FilterSet, FilterError> {
    let mut filters = FilterSet::default();
    for (column, raws) in request.iter() {
        let column = column.to_lowercase();
        let Some(index) = header::resolve_column(headers, &column, policy)? else {
            continue;
        };
        let (operator, operands) = parse_column_filters(&column, raws)?;
        filters.push(PredicateSpec {
            column,
            index,
            operator,
            operands,
        });
    }
    Ok(filters)
}

// ---------------------------------------------------------------------------
// The pass itself
// ---------------------------------------------------------------------------

/// One full pass: consume the header row for resolution, stream the data
/// rows through the matcher, collect matches in file order.
fn scan<R: io::Read>(
    mut reader: csv::Reader<R>,
    request: &RawFilterRequest,
    options: &FilterOptions,
) -> Result<FilterOutcome, FilterError> {
    let headers = reader.headers()?.clone();
    let filters = compile_filters(&headers, request, options.missing_column)?;
    log::debug!(
        "compiled {} predicate(s) over {} header column(s)",
        filters.len(),
        headers.len()
    );

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        // 1-based row numbers with the header as row 1, for diagnostics.
        let row_number = i + 2;
        match matcher::score_row(&record, &filters, row_number, options.non_numeric)? {
            Some(score) if score >= filters.required_score() => {
                rows.push(record.iter().map(str::to_string).collect());
            }
            _ => {}
        }
    }

    let matched = rows.len();
    Ok(FilterOutcome { rows, matched })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TSV: &str = "id\tname\tscore\n1\tAlice\t85\n2\tBob\t40\n3\tCarol\t\n";

    fn run(request: &RawFilterRequest, options: &FilterOptions) -> FilterOutcome {
        filter_reader(SAMPLE_TSV.as_bytes(), b'\t', request, options).unwrap()
    }

    #[test]
    fn ordering_filter_keeps_matching_rows_only() {
        let mut request = RawFilterRequest::new();
        request.add("score", ">=,50");
        let outcome = run(&request, &FilterOptions::default());
        assert_eq!(outcome.rows, vec![vec!["1", "Alice", "85"]]);
        assert_eq!(outcome.matched, 1);
    }

    #[test]
    fn or_across_operands_matches_both_rows() {
        let mut request = RawFilterRequest::new();
        request.add("name", "==,alice");
        request.add("name", "==,bob");
        let outcome = run(&request, &FilterOptions::default());
        assert_eq!(outcome.matched, 2);
        assert_eq!(outcome.rows[0][1], "Alice");
        assert_eq!(outcome.rows[1][1], "Bob");
    }

    #[test]
    fn header_row_never_appears_in_output() {
        let mut request = RawFilterRequest::new();
        request.add("name", "==,o");
        let outcome = run(&request, &FilterOptions::default());
        assert!(outcome.rows.iter().all(|r| r[0] != "id"));
    }

    #[test]
    fn output_preserves_file_order() {
        let mut request = RawFilterRequest::new();
        request.add("id", ">,0");
        let outcome = run(&request, &FilterOptions::default());
        let ids: Vec<&str> = outcome.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn empty_request_matches_every_data_row() {
        let outcome = run(&RawFilterRequest::new(), &FilterOptions::default());
        assert_eq!(outcome.matched, 3);
    }

    #[test]
    fn repeated_passes_are_identical() {
        let mut request = RawFilterRequest::new();
        request.add("score", ">=,50");
        let first = run(&request, &FilterOptions::default());
        let second = run(&request, &FilterOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_column_skipped_still_filters_the_rest() {
        let mut request = RawFilterRequest::new();
        request.add("missing", "==,x");
        request.add("score", ">=,50");
        let options = FilterOptions {
            missing_column: MissingColumnPolicy::Skip,
            ..FilterOptions::default()
        };
        let outcome = run(&request, &options);
        assert_eq!(outcome.matched, 1);
    }

    #[test]
    fn unknown_column_aborts_under_fail_policy() {
        let mut request = RawFilterRequest::new();
        request.add("missing", "==,x");
        let err =
            filter_reader(SAMPLE_TSV.as_bytes(), b'\t', &request, &FilterOptions::default())
                .unwrap_err();
        assert!(matches!(err, FilterError::ColumnNotFound { .. }));
    }

    #[test]
    fn malformed_filter_aborts_before_matching() {
        let mut request = RawFilterRequest::new();
        request.add("score", "50");
        let err =
            filter_reader(SAMPLE_TSV.as_bytes(), b'\t', &request, &FilterOptions::default())
                .unwrap_err();
        assert!(matches!(err, FilterError::MalformedFilterSpec { .. }));
    }

    #[test]
    fn delimiter_dispatch_by_extension() {
        assert_eq!(delimiter_for(Path::new("data.tsv")).unwrap(), b'\t');
        assert_eq!(delimiter_for(Path::new("data.TAB")).unwrap(), b'\t');
        assert_eq!(delimiter_for(Path::new("data.csv")).unwrap(), b',');
        assert!(matches!(
            delimiter_for(Path::new("data.parquet")),
            Err(FilterError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            delimiter_for(Path::new("data")),
            Err(FilterError::UnsupportedExtension(_))
        ));
    }
}
