use crate::query::PreparedQuery;

/// Wrap already-built statements in a transaction.
///
/// Each statement keeps its own parameter list; numbering restarts at
/// `$1` per statement because each is prepared and executed
/// independently. The BEGIN and COMMIT frames carry no parameters.
/// An empty input yields just the frames, a transaction that commits
/// nothing.
pub fn build_transaction(statements: Vec<PreparedQuery>) -> Vec<PreparedQuery> {
    let mut out = Vec::with_capacity(statements.len() + 2);
    out.push(PreparedQuery::bare("BEGIN"));
    out.extend(statements);
    out.push(PreparedQuery::bare("COMMIT"));
    out
}
