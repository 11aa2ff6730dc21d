use crate::condition::Condition;
use crate::error::{QueryError, QueryResult};
use crate::ident::Ident;
use crate::params::Params;
use crate::query::PreparedQuery;
use crate::value::SqlValue;
use crate::vocabulary::Vocabulary;

use super::returning_clause;

/// Build an UPDATE statement.
///
/// SET placeholders are numbered before any WHERE placeholders, since
/// the SET clause is emitted first. A `None` filter updates every row;
/// an empty assignment list is rejected with
/// [`QueryError::EmptyAssignments`].
pub fn build_update(
    table: &str,
    assignments: &[(&str, SqlValue)],
    filter: Option<&Condition>,
    returning: &[&str],
) -> QueryResult<PreparedQuery> {
    let vocab = Vocabulary::global();
    let table = Ident::table(table, vocab)?;
    if assignments.is_empty() {
        return Err(QueryError::EmptyAssignments("UPDATE"));
    }

    let mut params = Params::new();
    let set_parts: Vec<String> = assignments
        .iter()
        .map(|(column, value)| {
            let col = Ident::column(column, vocab)?;
            Ok(format!("{} = ${}", col.to_sql(), params.push(value.clone())))
        })
        .collect::<QueryResult<_>>()?;

    let mut sql = format!("UPDATE {} SET {}", table.to_sql(), set_parts.join(", "));
    if let Some(tree) = filter {
        sql.push_str(" WHERE ");
        sql.push_str(&tree.compile(vocab, &mut params)?);
    }
    if let Some(clause) = returning_clause(returning, vocab)? {
        sql.push_str(&clause);
    }

    tracing::debug!(param_count = params.len(), "built UPDATE");
    Ok(PreparedQuery {
        sql,
        parameters: params.into_values(),
    })
}
