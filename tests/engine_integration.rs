use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use rowsift::filter::engine::{filter_file, FilterOptions};
use rowsift::filter::header::MissingColumnPolicy;
use rowsift::filter::matcher::NonNumericPolicy;
use rowsift::filter::model::RawFilterRequest;
use rowsift::FilterError;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("writing fixture");
    path
}

fn request(filters: &[(&str, &str)]) -> RawFilterRequest {
    let mut req = RawFilterRequest::new();
    for (column, raw) in filters {
        req.add(column, raw);
    }
    req
}

const PEOPLE_TSV: &str = "id\tname\tscore\n1\tAlice\t85\n2\tBob\t40\n";

#[test]
fn score_threshold_keeps_only_alice() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.tsv", PEOPLE_TSV);

    let outcome =
        filter_file(&path, &request(&[("score", ">=,50")]), &FilterOptions::default()).unwrap();
    assert_eq!(outcome.matched, 1);
    assert_eq!(outcome.rows, vec![vec!["1", "Alice", "85"]]);
}

#[test]
fn or_across_operands_matches_both_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.tsv", PEOPLE_TSV);

    let req = request(&[("name", "==,alice"), ("name", "==,bob")]);
    let outcome = filter_file(&path, &req, &FilterOptions::default()).unwrap();
    assert_eq!(outcome.matched, 2);
}

#[test]
fn csv_extension_switches_to_comma() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.csv", "id,name,score\n1,Alice,85\n2,Bob,40\n");

    let outcome =
        filter_file(&path, &request(&[("score", "<,50")]), &FilterOptions::default()).unwrap();
    assert_eq!(outcome.rows, vec![vec!["2", "Bob", "40"]]);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.dat", PEOPLE_TSV);

    let err = filter_file(&path, &request(&[("score", ">,0")]), &FilterOptions::default())
        .unwrap_err();
    assert!(matches!(err, FilterError::UnsupportedExtension(_)));
}

#[test]
fn delimiter_override_beats_extension_dispatch() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.csv", "id;name;score\n1;Alice;85\n");

    let options = FilterOptions {
        delimiter: Some(b';'),
        ..FilterOptions::default()
    };
    let outcome = filter_file(&path, &request(&[("name", "==,alice")]), &options).unwrap();
    assert_eq!(outcome.matched, 1);
}

#[test]
fn json_request_file_matches_flag_built_request() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.tsv", PEOPLE_TSV);

    let from_json: RawFilterRequest =
        serde_json::from_str(r#"{"name": ["==,alice", "==,bob"], "score": [">=,30"]}"#).unwrap();
    let from_flags = request(&[("name", "==,alice"), ("name", "==,bob"), ("score", ">=,30")]);

    let a = filter_file(&path, &from_json, &FilterOptions::default()).unwrap();
    let b = filter_file(&path, &from_flags, &FilterOptions::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.matched, 2);
}

#[test]
fn repeated_runs_over_the_same_file_are_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.tsv", PEOPLE_TSV);

    let req = request(&[("score", ">=,50")]);
    let first = filter_file(&path, &req, &FilterOptions::default()).unwrap();
    let second = filter_file(&path, &req, &FilterOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn non_numeric_field_policies_on_a_real_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "people.tsv",
        "id\tname\tscore\n1\tAlice\t85\n2\tBob\tn/a\n3\tCarol\t60\n",
    );
    let req = request(&[("score", ">=,50")]);

    let err = filter_file(&path, &req, &FilterOptions::default()).unwrap_err();
    match err {
        FilterError::NonNumericField { row, column, value } => {
            assert_eq!(row, 3);
            assert_eq!(column, "score");
            assert_eq!(value, "n/a");
        }
        other => panic!("expected NonNumericField, got {other:?}"),
    }

    let skip = FilterOptions {
        non_numeric: NonNumericPolicy::SkipRow,
        ..FilterOptions::default()
    };
    let outcome = filter_file(&path, &req, &skip).unwrap();
    let names: Vec<&str> = outcome.rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(names, ["Alice", "Carol"]);
}

#[test]
fn missing_column_policies_on_a_real_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.tsv", PEOPLE_TSV);
    let req = request(&[("salary", ">,0"), ("name", "==,bob")]);

    let err = filter_file(&path, &req, &FilterOptions::default()).unwrap_err();
    assert!(matches!(err, FilterError::ColumnNotFound { .. }));

    let skip = FilterOptions {
        missing_column: MissingColumnPolicy::Skip,
        ..FilterOptions::default()
    };
    let outcome = filter_file(&path, &req, &skip).unwrap();
    assert_eq!(outcome.matched, 1);
    assert_eq!(outcome.rows[0][1], "Bob");
}
