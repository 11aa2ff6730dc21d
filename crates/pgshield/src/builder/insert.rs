use crate::error::{QueryError, QueryResult};
use crate::ident::Ident;
use crate::params::Params;
use crate::query::PreparedQuery;
use crate::value::SqlValue;
use crate::vocabulary::Vocabulary;

use super::returning_clause;

/// Build a single-row INSERT.
///
/// `row` is an ordered list of `(column, value)` pairs. Column names are
/// validated, values are sanitized and bound as `$k` placeholders in the
/// order given. Pass column names in `returning` to append a
/// `RETURNING` clause.
pub fn build_insert(
    table: &str,
    row: &[(&str, SqlValue)],
    returning: &[&str],
) -> QueryResult<PreparedQuery> {
    let vocab = Vocabulary::global();
    let table = Ident::table(table, vocab)?;
    if row.is_empty() {
        return Err(QueryError::EmptyAssignments("INSERT"));
    }

    let mut params = Params::new();
    let mut columns = Vec::with_capacity(row.len());
    let mut placeholders = Vec::with_capacity(row.len());
    for (column, value) in row {
        columns.push(Ident::column(column, vocab)?.to_sql());
        placeholders.push(format!("${}", params.push(value.clone())));
    }

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.to_sql(),
        columns.join(", "),
        placeholders.join(", ")
    );
    if let Some(clause) = returning_clause(returning, vocab)? {
        sql.push_str(&clause);
    }

    tracing::debug!(param_count = params.len(), "built INSERT");
    Ok(PreparedQuery {
        sql,
        parameters: params.into_values(),
    })
}

/// Build a multi-row INSERT with one `VALUES` tuple per row.
///
/// The first row fixes the column list; every subsequent row must carry
/// the same columns in the same order or the build fails with
/// [`QueryError::RowShapeMismatch`]. Parameters are numbered row-major,
/// so two rows of two columns bind `$1..$4`.
pub fn build_bulk_insert(
    table: &str,
    rows: &[Vec<(&str, SqlValue)>],
    returning: &[&str],
) -> QueryResult<PreparedQuery> {
    let vocab = Vocabulary::global();
    if rows.is_empty() {
        return Err(QueryError::EmptyBatch);
    }
    let table = Ident::table(table, vocab)?;

    let first = &rows[0];
    if first.is_empty() {
        return Err(QueryError::EmptyAssignments("INSERT"));
    }
    let column_names: Vec<&str> = first.iter().map(|(c, _)| *c).collect();
    let columns: Vec<String> = column_names
        .iter()
        .map(|c| Ok(Ident::column(c, vocab)?.to_sql()))
        .collect::<QueryResult<_>>()?;

    let mut params = Params::new();
    let mut tuples = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        let shape_ok = row.len() == column_names.len()
            && row.iter().zip(&column_names).all(|((c, _), want)| c == want);
        if !shape_ok {
            return Err(QueryError::RowShapeMismatch { row: row_idx });
        }
        let placeholders: Vec<String> = row
            .iter()
            .map(|(_, value)| format!("${}", params.push(value.clone())))
            .collect();
        tuples.push(format!("({})", placeholders.join(", ")));
    }

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES {}",
        table.to_sql(),
        columns.join(", "),
        tuples.join(", ")
    );
    if let Some(clause) = returning_clause(returning, vocab)? {
        sql.push_str(&clause);
    }

    tracing::debug!(rows = rows.len(), param_count = params.len(), "built bulk INSERT");
    Ok(PreparedQuery {
        sql,
        parameters: params.into_values(),
    })
}
