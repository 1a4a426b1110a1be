/// Filter layer: predicate model, compilation, and row matching.
///
/// Data flow:
/// ```text
///  RawFilterRequest          .tsv / .csv file
///        │                         │
///        │                   ┌───────────┐
///        │                   │ header row │
///        │                   └───────────┘
///        ▼                         │
///   ┌──────────────┐               │
///   │ header/parse  │◀─────────────┘  resolve indices, split "op,value"
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ FilterSet │  compiled predicates, read-only from here on
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  matcher  │  score each data row → matching rows + count
///   └──────────┘
/// ```
pub mod engine;
pub mod header;
pub mod matcher;
pub mod model;
pub mod parse;
