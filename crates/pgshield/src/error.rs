//! Error types for pgshield

use thiserror::Error;

/// Result type alias for query building operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Error types for query building.
///
/// Every variant is raised at the point of detection and means no SQL was
/// produced; a builder never returns partial or unsafe SQL alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Malformed, too-long, or reserved table/column name
    #[error("invalid {kind} name: {name:?}")]
    InvalidIdentifier { kind: &'static str, name: String },

    /// Condition operator key outside the allow-list
    #[error("invalid operator: {0:?}")]
    InvalidOperator(String),

    /// IN/NOT IN with an empty value list
    #[error("IN condition on {0:?} requires a non-empty value list")]
    EmptyMembershipList(String),

    /// AND/OR group with no children
    #[error("AND/OR group requires at least one child condition")]
    EmptyConjunction,

    /// BETWEEN with other than exactly two bounds
    #[error("BETWEEN requires exactly two bounds, got {0}")]
    InvalidRange(usize),

    /// Bulk insert with no rows
    #[error("bulk insert requires at least one row")]
    EmptyBatch,

    /// Bulk insert row whose columns differ from the first row's
    #[error("bulk insert row {row} does not match the column set of the first row")]
    RowShapeMismatch { row: usize },

    /// INSERT or UPDATE with no column assignments
    #[error("{0} requires at least one column assignment")]
    EmptyAssignments(&'static str),

    /// DELETE without a predicate
    #[error("DELETE without a WHERE clause is not allowed")]
    MissingWhereClause,
}

impl QueryError {
    /// Create an invalid-identifier error.
    pub fn invalid_identifier(kind: &'static str, name: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind,
            name: name.into(),
        }
    }

    /// Check if this is an invalid-identifier error.
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier { .. })
    }

    /// Check if this is an invalid-operator error.
    pub fn is_invalid_operator(&self) -> bool {
        matches!(self, Self::InvalidOperator(_))
    }
}
