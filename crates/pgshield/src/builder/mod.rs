//! Statement builders.
//!
//! Each builder composes identifier validation and condition compilation
//! into a final [`PreparedQuery`]. One [`Params`](crate::params::Params)
//! list is threaded through every clause of a statement, so placeholder
//! numbering follows emission order exactly; clauses emitted after
//! WHERE/HAVING (LIMIT, OFFSET) continue the same counter.
//!
//! # Example
//! ```ignore
//! use pgshield::{Condition, QueryRequest, SortDir, builder};
//!
//! let query = builder::build_select(
//!     &QueryRequest::table("orders")
//!         .filter(Condition::eq("status", "paid"))
//!         .order_by("created_at", SortDir::Desc)
//!         .limit(10),
//! )?;
//!
//! let deleted = builder::build_delete(
//!     "sessions",
//!     Some(&Condition::lt("expires_at", now)),
//!     &[],
//! )?;
//! ```

mod delete;
mod insert;
mod select;
mod transaction;
mod update;

pub use delete::build_delete;
pub use insert::{build_bulk_insert, build_insert};
pub use select::build_select;
pub use transaction::build_transaction;
pub use update::build_update;

use crate::error::QueryResult;
use crate::ident::Ident;
use crate::query::PreparedQuery;
use crate::vocabulary::Vocabulary;

/// Validate and render a ` RETURNING ...` clause, or nothing for an empty
/// column list.
pub(crate) fn returning_clause(
    columns: &[&str],
    vocab: &Vocabulary,
) -> QueryResult<Option<String>> {
    if columns.is_empty() {
        return Ok(None);
    }
    let cols: Vec<String> = columns
        .iter()
        .map(|c| Ok(Ident::column(c, vocab)?.to_sql()))
        .collect::<QueryResult<_>>()?;
    Ok(Some(format!(" RETURNING {}", cols.join(", "))))
}

#[cfg(test)]
mod tests;
