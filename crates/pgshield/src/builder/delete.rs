use crate::condition::Condition;
use crate::error::{QueryError, QueryResult};
use crate::ident::Ident;
use crate::params::Params;
use crate::query::PreparedQuery;
use crate::vocabulary::Vocabulary;

use super::returning_clause;

/// Build a DELETE statement.
///
/// A filter is mandatory: passing `None` fails with
/// [`QueryError::MissingWhereClause`] rather than emitting an
/// unconditioned `DELETE FROM`.
pub fn build_delete(
    table: &str,
    filter: Option<&Condition>,
    returning: &[&str],
) -> QueryResult<PreparedQuery> {
    let vocab = Vocabulary::global();
    let table = Ident::table(table, vocab)?;
    let Some(tree) = filter else {
        return Err(QueryError::MissingWhereClause);
    };

    let mut params = Params::new();
    let mut sql = format!(
        "DELETE FROM {} WHERE {}",
        table.to_sql(),
        tree.compile(vocab, &mut params)?
    );
    if let Some(clause) = returning_clause(returning, vocab)? {
        sql.push_str(&clause);
    }

    tracing::debug!(param_count = params.len(), "built DELETE");
    Ok(PreparedQuery {
        sql,
        parameters: params.into_values(),
    })
}
