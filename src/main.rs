use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use rowsift::filter::engine::{delimiter_for, filter_file, FilterOptions};
use rowsift::filter::header::MissingColumnPolicy;
use rowsift::filter::matcher::NonNumericPolicy;
use rowsift::filter::model::RawFilterRequest;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "rowsift")]
#[command(about = "Filter delimited tabular files (TSV/CSV) with per-column predicates")]
#[command(long_about = "Filter delimited tabular files with per-column predicates.

A filter is written COLUMN=OP,VALUE where OP is one of ==, >=, >, < or =<
(less-or-equal).  Repeating --filter for the same column ORs the values
together; filters on different columns must all hold.

EXAMPLES:
  # Rows whose score is at least 50
  rowsift data.tsv --filter 'score=>=,50'

  # Alice or Bob
  rowsift people.csv --filter 'name===,alice' --filter 'name===,bob'

  # Filters from a JSON request file: {\"score\": [\">=,50\"]}
  rowsift data.tsv --request filters.json")]
struct Args {
    /// Input file (.tsv, .tab or .csv)
    file: PathBuf,

    /// Column filter as COLUMN=OP,VALUE; may repeat
    #[arg(short, long = "filter", value_name = "COLUMN=OP,VALUE")]
    filters: Vec<String>,

    /// JSON file holding {"column": ["==,value", ...]}; merged with --filter
    #[arg(long, value_name = "FILE")]
    request: Option<PathBuf>,

    /// Field delimiter override (single ASCII character)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// What to do when a requested column is missing from the header
    #[arg(long, value_enum, default_value = "fail")]
    missing_column: MissingColumnArg,

    /// What to do when an ordering filter hits a non-numeric field
    #[arg(long, value_enum, default_value = "fail")]
    non_numeric: NonNumericArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MissingColumnArg {
    Fail,
    Skip,
}

impl From<MissingColumnArg> for MissingColumnPolicy {
    fn from(arg: MissingColumnArg) -> Self {
        match arg {
            MissingColumnArg::Fail => MissingColumnPolicy::Fail,
            MissingColumnArg::Skip => MissingColumnPolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NonNumericArg {
    Fail,
    SkipRow,
    Ignore,
}

impl From<NonNumericArg> for NonNumericPolicy {
    fn from(arg: NonNumericArg) -> Self {
        match arg {
            NonNumericArg::Fail => NonNumericPolicy::Fail,
            NonNumericArg::SkipRow => NonNumericPolicy::SkipRow,
            NonNumericArg::Ignore => NonNumericPolicy::Ignore,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let request = build_request(&args)?;
    if request.is_empty() {
        bail!("no filters given; use --filter or --request");
    }

    let delimiter = match args.delimiter {
        Some(c) => {
            if !c.is_ascii() {
                bail!("delimiter must be a single ASCII character, got '{c}'");
            }
            c as u8
        }
        None => delimiter_for(&args.file)
            .with_context(|| format!("choosing a delimiter for {}", args.file.display()))?,
    };

    let options = FilterOptions {
        missing_column: args.missing_column.into(),
        non_numeric: args.non_numeric.into(),
        delimiter: Some(delimiter),
    };

    let outcome = filter_file(&args.file, &request, &options)
        .with_context(|| format!("filtering {}", args.file.display()))?;

    let separator = (delimiter as char).to_string();
    for row in &outcome.rows {
        println!("{}", row.join(&separator));
    }
    println!("A total of {} matches were found.", outcome.matched);
    Ok(())
}

/// Assemble the filter request from the JSON request file (if any) plus
/// every --filter flag.
fn build_request(args: &Args) -> Result<RawFilterRequest> {
    let mut request = match &args.request {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading request file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing request file {}", path.display()))?
        }
        None => RawFilterRequest::new(),
    };

    for flag in &args.filters {
        let (column, raw) = flag
            .split_once('=')
            .with_context(|| format!("filter '{flag}' is not COLUMN=OP,VALUE"))?;
        if column.is_empty() {
            bail!("filter '{flag}' has an empty column name");
        }
        request.add(column, raw);
    }

    Ok(request)
}
