//! Query descriptions and the prepared-query output type.

use tokio_postgres::types::ToSql;

use crate::condition::{CmpOp, Condition};
use crate::value::SqlValue;

/// Join kind for [`JoinSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub(crate) fn to_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

/// A join against another table.
///
/// The ON comparison goes through the same [`CmpOp`] allow-list as condition
/// operators; there is no free-form operator string here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub table: String,
    pub left: String,
    pub op: CmpOp,
    pub right: String,
}

impl JoinSpec {
    /// Create a join specification.
    pub fn new(
        kind: JoinKind,
        table: impl Into<String>,
        left: impl Into<String>,
        op: CmpOp,
        right: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            table: table.into(),
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    /// Create an INNER JOIN with an equality ON clause.
    pub fn inner(table: impl Into<String>, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(JoinKind::Inner, table, left, CmpOp::Eq, right)
    }

    /// Create a LEFT JOIN with an equality ON clause.
    pub fn left(table: impl Into<String>, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(JoinKind::Left, table, left, CmpOp::Eq, right)
    }

    /// Create a RIGHT JOIN with an equality ON clause.
    pub fn right(table: impl Into<String>, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(JoinKind::Right, table, left, CmpOp::Eq, right)
    }

    /// Create a FULL JOIN with an equality ON clause.
    pub fn full(table: impl Into<String>, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(JoinKind::Full, table, left, CmpOp::Eq, right)
    }
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub(crate) fn to_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// A single ORDER BY item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub column: String,
    pub dir: SortDir,
}

/// A structured SELECT description consumed by
/// [`build_select`](crate::builder::build_select).
///
/// Built once per call with the consuming methods below and never mutated
/// afterwards.
///
/// # Example
/// ```ignore
/// let request = QueryRequest::table("orders")
///     .columns(&["id", "status"])
///     .filter(Condition::eq("status", "paid"))
///     .order_by("created_at", SortDir::Desc)
///     .limit(10);
/// let query = build_select(&request)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub table: String,
    pub columns: Option<Vec<String>>,
    pub joins: Vec<JoinSpec>,
    pub r#where: Option<Condition>,
    pub group_by: Vec<String>,
    pub having: Option<Condition>,
    pub order_by: Vec<OrderSpec>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl QueryRequest {
    /// Start a request against `table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            joins: Vec::new(),
            r#where: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Set the column projection. Without this, `*` is selected.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = Some(columns.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// Add a join.
    pub fn join(mut self, join: JoinSpec) -> Self {
        self.joins.push(join);
        self
    }

    /// Set the WHERE condition tree.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.r#where = Some(condition);
        self
    }

    /// Set the GROUP BY columns.
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.group_by = columns.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Set the HAVING condition tree.
    pub fn having(mut self, condition: Condition) -> Self {
        self.having = Some(condition);
        self
    }

    /// Add an ORDER BY item.
    pub fn order_by(mut self, column: impl Into<String>, dir: SortDir) -> Self {
        self.order_by.push(OrderSpec {
            column: column.into(),
            dir,
        });
        self
    }

    /// Set LIMIT (bound as a parameter, not inlined).
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET (bound as a parameter, not inlined).
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }
}

/// SQL text plus its ordered parameter list.
///
/// Invariant: the number of `$k` placeholders in `sql` equals
/// `parameters.len()`, and `$k` always refers to `parameters[k - 1]`. The
/// builders uphold this by threading one [`Params`](crate::params::Params)
/// list through every clause; callers hand the result unmodified to a
/// driver.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub sql: String,
    pub parameters: Vec<SqlValue>,
}

impl PreparedQuery {
    /// A statement with no parameters (`BEGIN`, `COMMIT`).
    pub(crate) fn bare(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            parameters: Vec::new(),
        }
    }

    /// Parameter refs compatible with `tokio-postgres`.
    ///
    /// ```ignore
    /// let query = build_select(&request)?;
    /// let rows = client.query(&query.sql, &query.params_ref()).await?;
    /// ```
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.parameters
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}
