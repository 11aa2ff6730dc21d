//! # pgshield
//!
//! A defensive Postgres statement builder. Every statement comes out as
//! parameterized SQL text plus an ordered value list, ready to hand to a
//! prepared-statement API.
//!
//! ## Guarantees
//!
//! - **Parameterized everywhere**: user values never appear in SQL text,
//!   only as `$1..$n` placeholders bound in emission order
//! - **Validated identifiers**: table and column names must match a strict
//!   shape, pass a reserved-word check, and are always double-quoted
//! - **Closed operator set**: comparison operators come from a fixed
//!   vocabulary (`$eq`, `$lt`, ...); unknown keys are rejected, never
//!   passed through
//! - **Sanitized values**: text values are truncated and stripped of quote
//!   and statement metacharacters on their way into the parameter list
//! - **Safe defaults**: DELETE requires a filter, empty IN lists and empty
//!   condition groups are build errors
//!
//! ## Building a query
//!
//! ```ignore
//! use pgshield::{builder, Condition, QueryRequest, SortDir};
//!
//! let query = builder::build_select(
//!     &QueryRequest::table("orders")
//!         .columns(&["id", "total"])
//!         .filter(Condition::or(vec![
//!             Condition::eq("status", "paid"),
//!             Condition::eq("status", "pending"),
//!         ]))
//!         .order_by("created_at", SortDir::Desc)
//!         .limit(10),
//! )?;
//!
//! // query.sql:        SELECT "id", "total" FROM "orders" WHERE ...
//! // query.parameters: values for $1..$n, in order
//! let rows = client.query(&query.sql, &query.params_ref()).await?;
//! ```

pub mod builder;
pub mod condition;
pub mod error;
pub mod ident;
pub mod params;
pub mod query;
pub mod value;
pub mod vocabulary;

pub use builder::{
    build_bulk_insert, build_delete, build_insert, build_select, build_transaction, build_update,
};
pub use condition::{BoolOp, CmpOp, Condition, NullOp, SetOp};
pub use error::{QueryError, QueryResult};
pub use ident::{Ident, IdentKind, MAX_IDENT_LEN};
pub use params::Params;
pub use query::{JoinKind, JoinSpec, OrderSpec, PreparedQuery, QueryRequest, SortDir};
pub use value::{looks_like_injection, sanitize, SqlValue, MAX_TEXT_CHARS};
pub use vocabulary::Vocabulary;
