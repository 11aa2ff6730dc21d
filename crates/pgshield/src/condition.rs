//! Condition trees for WHERE/HAVING clauses.
//!
//! [`Condition`] is a closed sum type: one case per condition kind, so every
//! compile path is covered by an exhaustive match and there is no raw-SQL
//! escape hatch. [`Condition::compile`] turns a tree into a SQL fragment,
//! appending each bound value to a shared [`Params`] list; the placeholder
//! counter is the list length itself, threaded explicitly through the whole
//! pass.

use crate::error::{QueryError, QueryResult};
use crate::ident::Ident;
use crate::params::Params;
use crate::value::SqlValue;
use crate::vocabulary::Vocabulary;

/// Comparison operator allow-list.
///
/// Symbolic keys (`$eq`, `$lt`, ...) resolve to these via
/// [`Vocabulary::operator`]; the SQL token mapping is the exhaustive match in
/// [`CmpOp::token`]. Nothing outside this enum ever reaches SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
}

impl CmpOp {
    /// The SQL token for this operator.
    pub fn token(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
            CmpOp::Gt => ">",
            CmpOp::Gte => ">=",
            CmpOp::Like => "LIKE",
            CmpOp::NotLike => "NOT LIKE",
        }
    }
}

/// Membership operator: `IN` / `NOT IN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    In,
    NotIn,
}

impl SetOp {
    fn token(self) -> &'static str {
        match self {
            SetOp::In => "IN",
            SetOp::NotIn => "NOT IN",
        }
    }
}

/// Null-check operator: `IS NULL` / `IS NOT NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOp {
    IsNull,
    IsNotNull,
}

impl NullOp {
    fn token(self) -> &'static str {
        match self {
            NullOp::IsNull => "IS NULL",
            NullOp::IsNotNull => "IS NOT NULL",
        }
    }
}

/// Logical connective for condition groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    fn separator(self) -> &'static str {
        match self {
            BoolOp::And => " AND ",
            BoolOp::Or => " OR ",
        }
    }
}

/// A WHERE/HAVING predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column op $n`
    Compare {
        column: String,
        op: CmpOp,
        value: SqlValue,
    },
    /// `column IN ($n, ...)` / `column NOT IN ($n, ...)`
    Membership {
        column: String,
        op: SetOp,
        values: Vec<SqlValue>,
    },
    /// `column BETWEEN $n AND $n+1`, bounds kept in caller order
    Range {
        column: String,
        low: SqlValue,
        high: SqlValue,
    },
    /// `column IS NULL` / `column IS NOT NULL`; consumes no parameters
    NullCheck { column: String, op: NullOp },
    /// Children joined with AND/OR, parenthesized as a group
    Group {
        op: BoolOp,
        children: Vec<Condition>,
    },
}

impl Condition {
    /// Create a comparison from a symbolic operator key (`$eq`, `$lt`, ...).
    ///
    /// Keys outside the allow-list fail with
    /// [`QueryError::InvalidOperator`].
    pub fn compare(
        column: impl Into<String>,
        key: &str,
        value: impl Into<SqlValue>,
    ) -> QueryResult<Self> {
        let op = Vocabulary::global().operator(key)?;
        Ok(Condition::Compare {
            column: column.into(),
            op,
            value: value.into(),
        })
    }

    /// Create an equality condition: column = value
    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::cmp(column, CmpOp::Eq, value)
    }

    /// Create an inequality condition: column != value
    pub fn ne(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::cmp(column, CmpOp::Ne, value)
    }

    /// Create a less-than condition: column < value
    pub fn lt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::cmp(column, CmpOp::Lt, value)
    }

    /// Create a less-than-or-equal condition: column <= value
    pub fn lte(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::cmp(column, CmpOp::Lte, value)
    }

    /// Create a greater-than condition: column > value
    pub fn gt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::cmp(column, CmpOp::Gt, value)
    }

    /// Create a greater-than-or-equal condition: column >= value
    pub fn gte(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::cmp(column, CmpOp::Gte, value)
    }

    /// Create a LIKE condition: column LIKE pattern
    pub fn like(column: impl Into<String>, pattern: impl Into<SqlValue>) -> Self {
        Self::cmp(column, CmpOp::Like, pattern)
    }

    /// Create a NOT LIKE condition: column NOT LIKE pattern
    pub fn not_like(column: impl Into<String>, pattern: impl Into<SqlValue>) -> Self {
        Self::cmp(column, CmpOp::NotLike, pattern)
    }

    fn cmp(column: impl Into<String>, op: CmpOp, value: impl Into<SqlValue>) -> Self {
        Condition::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Create an IN condition: column IN (values...)
    pub fn in_list<V: Into<SqlValue>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Condition::Membership {
            column: column.into(),
            op: SetOp::In,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a NOT IN condition: column NOT IN (values...)
    pub fn not_in<V: Into<SqlValue>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Condition::Membership {
            column: column.into(),
            op: SetOp::NotIn,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a BETWEEN condition from a bounds list.
    ///
    /// Fails with [`QueryError::InvalidRange`] unless exactly two bounds are
    /// given. Bounds are kept in (low, high) caller order; a reversed range
    /// is the caller's error to notice, not silently fixed here.
    pub fn between<V: Into<SqlValue>>(
        column: impl Into<String>,
        bounds: impl IntoIterator<Item = V>,
    ) -> QueryResult<Self> {
        let bounds: Vec<SqlValue> = bounds.into_iter().map(Into::into).collect();
        match <[SqlValue; 2]>::try_from(bounds) {
            Ok([low, high]) => Ok(Condition::Range {
                column: column.into(),
                low,
                high,
            }),
            Err(bounds) => Err(QueryError::InvalidRange(bounds.len())),
        }
    }

    /// Create an IS NULL condition: column IS NULL
    pub fn is_null(column: impl Into<String>) -> Self {
        Condition::NullCheck {
            column: column.into(),
            op: NullOp::IsNull,
        }
    }

    /// Create an IS NOT NULL condition: column IS NOT NULL
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Condition::NullCheck {
            column: column.into(),
            op: NullOp::IsNotNull,
        }
    }

    /// Create an AND group.
    pub fn and(children: Vec<Condition>) -> Self {
        Condition::Group {
            op: BoolOp::And,
            children,
        }
    }

    /// Create an OR group.
    pub fn or(children: Vec<Condition>) -> Self {
        Condition::Group {
            op: BoolOp::Or,
            children,
        }
    }

    /// Combine this condition with another using AND.
    pub fn and_with(self, other: Condition) -> Condition {
        match self {
            Condition::Group {
                op: BoolOp::And,
                mut children,
            } => {
                children.push(other);
                Condition::and(children)
            }
            _ => Condition::and(vec![self, other]),
        }
    }

    /// Compile this tree into a SQL fragment, appending bound values to
    /// `params`.
    ///
    /// Placeholder indices come from [`Params::push`] and therefore continue
    /// wherever the list already stands: sibling subtrees, and any clause
    /// compiled after this one, share the same strictly increasing counter.
    pub fn compile(&self, vocab: &Vocabulary, params: &mut Params) -> QueryResult<String> {
        match self {
            Condition::Compare { column, op, value } => {
                let col = Ident::column(column, vocab)?;
                let idx = params.push(value.clone());
                Ok(format!("{} {} ${}", col.to_sql(), op.token(), idx))
            }
            Condition::Membership { column, op, values } => {
                if values.is_empty() {
                    return Err(QueryError::EmptyMembershipList(column.clone()));
                }
                let col = Ident::column(column, vocab)?;
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| format!("${}", params.push(v.clone())))
                    .collect();
                Ok(format!(
                    "{} {} ({})",
                    col.to_sql(),
                    op.token(),
                    placeholders.join(", ")
                ))
            }
            Condition::Range { column, low, high } => {
                let col = Ident::column(column, vocab)?;
                let lo = params.push(low.clone());
                let hi = params.push(high.clone());
                Ok(format!("{} BETWEEN ${lo} AND ${hi}", col.to_sql()))
            }
            Condition::NullCheck { column, op } => {
                let col = Ident::column(column, vocab)?;
                Ok(format!("{} {}", col.to_sql(), op.token()))
            }
            Condition::Group { op, children } => {
                if children.is_empty() {
                    return Err(QueryError::EmptyConjunction);
                }
                let parts: Vec<String> = children
                    .iter()
                    .map(|child| child.compile(vocab, params))
                    .collect::<QueryResult<_>>()?;
                Ok(format!("({})", parts.join(op.separator())))
            }
        }
    }
}
