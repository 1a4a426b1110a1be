//! rowsift – filter delimited tabular files with per-column predicates.
//!
//! A filter request maps column names to lists of `"<operator>,<value>"`
//! strings.  Rows must satisfy every filtered column (AND), while the
//! values listed for one column are alternatives (OR).  Recognized
//! operators: `==`, `>=`, `>`, `<` and `=<` (less-or-equal).
//!
//! ```no_run
//! use rowsift::filter::engine::{filter_file, FilterOptions};
//! use rowsift::filter::model::RawFilterRequest;
//!
//! let mut request = RawFilterRequest::new();
//! request.add("score", ">=,50");
//! let outcome = filter_file(
//!     std::path::Path::new("data.tsv"),
//!     &request,
//!     &FilterOptions::default(),
//! )?;
//! println!("{} rows matched", outcome.matched);
//! # Ok::<(), rowsift::FilterError>(())
//! ```

pub mod error;
pub mod filter;

pub use error::FilterError;
pub use filter::engine::{filter_file, filter_reader, FilterOptions, FilterOutcome};
pub use filter::model::RawFilterRequest;
