use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Operator – the comparison applied between a row field and the operands
// ---------------------------------------------------------------------------

/// Comparison operator of a column filter.
///
/// The user-facing tokens are `==`, `>=`, `>`, `<` and `=<`.  Note the
/// last one: less-or-equal is spelled `=<`, and `<=` is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ge,
    Gt,
    Lt,
    Le,
}

impl Operator {
    /// Parse an exact operator token; anything else is unknown.
    pub fn from_token(token: &str) -> Option<Operator> {
        match token {
            "==" => Some(Operator::Eq),
            ">=" => Some(Operator::Ge),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            "=<" => Some(Operator::Le),
            _ => None,
        }
    }

    /// The user-facing token for this operator.
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ge => ">=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Le => "=<",
        }
    }

    /// Whether this operator compares numbers rather than text.
    pub fn is_ordering(&self) -> bool {
        !matches!(self, Operator::Eq)
    }

    /// Numeric comparison between a row field and one operand.
    pub fn compare(&self, field: f64, operand: f64) -> bool {
        match self {
            Operator::Eq => field == operand,
            Operator::Ge => field >= operand,
            Operator::Gt => field > operand,
            Operator::Lt => field < operand,
            Operator::Le => field <= operand,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

// ---------------------------------------------------------------------------
// Operands – the comparison values of one predicate
// ---------------------------------------------------------------------------

/// Comparison values of one predicate.  Equality filters keep lowercased
/// text; ordering filters keep numbers parsed once when the filter set is
/// built, never per row.
#[derive(Debug, Clone, PartialEq)]
pub enum Operands {
    Text(Vec<String>),
    Numeric(Vec<f64>),
}

impl Operands {
    pub fn len(&self) -> usize {
        match self {
            Operands::Text(v) => v.len(),
            Operands::Numeric(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// PredicateSpec – one column's compiled filter
// ---------------------------------------------------------------------------

/// One column's compiled filter: the operator, the operand list it is
/// OR'd over, and the column's resolved position in the header row.
#[derive(Debug, Clone)]
pub struct PredicateSpec {
    /// Lowercased column name, kept for diagnostics.
    pub column: String,
    /// Position of the column in the header row.
    pub index: usize,
    pub operator: Operator,
    pub operands: Operands,
}

// ---------------------------------------------------------------------------
// RawFilterRequest – the caller's unresolved filter request
// ---------------------------------------------------------------------------

/// Unresolved filter request: column name → raw `"<op>,<value>"` strings.
///
/// Column names are matched against the header case-insensitively.  The
/// request is built once by the caller and never mutated by the engine.
/// Deserializes from a JSON object of the same shape:
/// `{"score": [">=,50"], "name": ["==,alice", "==,bob"]}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawFilterRequest {
    filters: BTreeMap<String, Vec<String>>,
}

impl RawFilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one raw filter string to a column's OR list.
    pub fn add(&mut self, column: &str, raw: &str) {
        self.filters
            .entry(column.to_lowercase())
            .or_default()
            .push(raw.to_string());
    }

    /// Iterate columns with their raw filter strings, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilterSet – the compiled, read-only collection of predicates
// ---------------------------------------------------------------------------

/// The full compiled filter set.  Read-only during matching: scoring a
/// row never mutates predicate state, so repeated passes over the same
/// file produce identical results.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    predicates: Vec<PredicateSpec>,
}

impl FilterSet {
    pub(crate) fn push(&mut self, spec: PredicateSpec) {
        self.predicates.push(spec);
    }

    pub fn predicates(&self) -> &[PredicateSpec] {
        &self.predicates
    }

    /// Score a row must reach to count as a match (one point per
    /// predicate under AND-across-columns semantics).
    pub fn required_score(&self) -> usize {
        self.predicates.len()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}
