use crate::error::QueryResult;
use crate::ident::Ident;
use crate::params::Params;
use crate::query::{PreparedQuery, QueryRequest};
use crate::value::SqlValue;
use crate::vocabulary::Vocabulary;

/// Build a SELECT statement from a [`QueryRequest`].
///
/// Clauses are emitted in fixed order regardless of the order the
/// request was assembled in: projection, FROM, JOINs, WHERE, GROUP BY,
/// HAVING, ORDER BY, LIMIT, OFFSET. Every identifier in the request is
/// validated, and LIMIT/OFFSET values are bound as parameters rather
/// than spliced into the text.
pub fn build_select(request: &QueryRequest) -> QueryResult<PreparedQuery> {
    let vocab = Vocabulary::global();
    let mut params = Params::new();

    let table = Ident::table(&request.table, vocab)?;

    let projection = match &request.columns {
        Some(cols) if !cols.is_empty() => cols
            .iter()
            .map(|c| Ok(Ident::column(c, vocab)?.to_sql()))
            .collect::<QueryResult<Vec<_>>>()?
            .join(", "),
        _ => "*".to_owned(),
    };

    let mut sql = format!("SELECT {projection} FROM {}", table.to_sql());

    for join in &request.joins {
        let joined = Ident::table(&join.table, vocab)?;
        let left = Ident::column(&join.left, vocab)?;
        let right = Ident::column(&join.right, vocab)?;
        sql.push(' ');
        sql.push_str(join.kind.to_sql());
        sql.push(' ');
        sql.push_str(&joined.to_sql());
        sql.push_str(" ON ");
        sql.push_str(&left.to_sql());
        sql.push(' ');
        sql.push_str(join.op.token());
        sql.push(' ');
        sql.push_str(&right.to_sql());
    }

    if let Some(tree) = &request.r#where {
        sql.push_str(" WHERE ");
        sql.push_str(&tree.compile(vocab, &mut params)?);
    }

    if !request.group_by.is_empty() {
        let cols: Vec<String> = request
            .group_by
            .iter()
            .map(|c| Ok(Ident::column(c, vocab)?.to_sql()))
            .collect::<QueryResult<_>>()?;
        sql.push_str(" GROUP BY ");
        sql.push_str(&cols.join(", "));
    }

    if let Some(tree) = &request.having {
        sql.push_str(" HAVING ");
        sql.push_str(&tree.compile(vocab, &mut params)?);
    }

    if !request.order_by.is_empty() {
        let items: Vec<String> = request
            .order_by
            .iter()
            .map(|o| {
                let col = Ident::column(&o.column, vocab)?;
                Ok(format!("{} {}", col.to_sql(), o.dir.to_sql()))
            })
            .collect::<QueryResult<_>>()?;
        sql.push_str(" ORDER BY ");
        sql.push_str(&items.join(", "));
    }

    if let Some(limit) = request.limit {
        let idx = params.push(SqlValue::Int(limit));
        sql.push_str(&format!(" LIMIT ${idx}"));
    }

    if let Some(offset) = request.offset {
        let idx = params.push(SqlValue::Int(offset));
        sql.push_str(&format!(" OFFSET ${idx}"));
    }

    tracing::debug!(table = %request.table, param_count = params.len(), "built SELECT");
    Ok(PreparedQuery {
        sql,
        parameters: params.into_values(),
    })
}
