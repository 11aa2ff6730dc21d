//! Parameter values and the value sanitizer.
//!
//! [`SqlValue`] is the concrete parameter representation carried by a
//! [`PreparedQuery`](crate::PreparedQuery). It implements
//! [`tokio_postgres::types::ToSql`] so a built query binds directly to the
//! driver; values are never interpolated into SQL text.
//!
//! [`sanitize`] is a defense-in-depth layer on top of parameterization: it
//! truncates oversized text and strips quote characters from values that look
//! like injection payloads, emitting `tracing` warnings either way. It is
//! never a substitute for rejecting malformed structural input.

use std::sync::LazyLock;

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use regex::RegexSet;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use uuid::Uuid;

/// Text values longer than this are truncated before binding.
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Injection-indicative sequences. Best effort only; a match triggers
/// character stripping, never an error.
static INJECTION_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // comment tokens
        r"--|/\*|\*/",
        // statement separator
        r";",
        // stacked quotes
        r#"''|"""#,
        // UNION SELECT probes
        r"(?i)\bUNION\b\s+(?:ALL\s+)?SELECT\b",
        // piggybacked DML/DDL
        r"(?i)\bDROP\s+TABLE\b|\bDELETE\s+FROM\b|\bINSERT\s+INTO\b",
    ])
    .expect("invalid built-in injection pattern")
});

/// A query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
}

impl SqlValue {
    /// Check if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl ToSql for SqlValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            SqlValue::Null => Ok(IsNull::Yes),
            SqlValue::Bool(v) => v.to_sql(ty, out),
            SqlValue::Int(v) => v.to_sql(ty, out),
            SqlValue::Float(v) => v.to_sql(ty, out),
            SqlValue::Text(v) => v.to_sql(ty, out),
            SqlValue::Bytes(v) => v.to_sql(ty, out),
            SqlValue::Uuid(v) => v.to_sql(ty, out),
            SqlValue::Timestamp(v) => v.to_sql(ty, out),
            SqlValue::Json(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // The variant is only known per value; type mismatches surface from
        // the delegated impl at bind time.
        true
    }

    to_sql_checked!();
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(v)
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(v: serde_json::Value) -> Self {
        SqlValue::Json(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

/// Normalize a value before it becomes a bound parameter.
///
/// Text is truncated at [`MAX_TEXT_CHARS`] characters and, when the
/// injection heuristic matches, stripped of `'`, `"`, `;`, and `\`. All
/// other variants pass through unchanged.
pub fn sanitize(value: SqlValue) -> SqlValue {
    match value {
        SqlValue::Text(s) => SqlValue::Text(sanitize_text(s)),
        other => other,
    }
}

/// Report whether text matches the injection heuristic.
///
/// Callers that want to reject suspicious input outright (rather than
/// rely on the stripping [`sanitize`] applies) can gate on this.
pub fn looks_like_injection(s: &str) -> bool {
    INJECTION_PATTERNS.is_match(s)
}

fn sanitize_text(mut s: String) -> String {
    let char_count = s.chars().count();
    if char_count > MAX_TEXT_CHARS {
        let cut = s
            .char_indices()
            .nth(MAX_TEXT_CHARS)
            .map_or(s.len(), |(i, _)| i);
        s.truncate(cut);
        tracing::warn!(
            original_length = char_count,
            "text value truncated to maximum length"
        );
    }

    if looks_like_injection(&s) {
        tracing::warn!(
            value_length = s.len(),
            "injection-like pattern in text value, stripping quote characters"
        );
        s.retain(|c| !matches!(c, '\'' | '"' | ';' | '\\'));
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_non_text_pass_through() {
        assert_eq!(sanitize(SqlValue::Null), SqlValue::Null);
        assert_eq!(sanitize(SqlValue::Int(42)), SqlValue::Int(42));
        assert_eq!(sanitize(SqlValue::Bool(true)), SqlValue::Bool(true));
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(
            sanitize(SqlValue::from("hello world")),
            SqlValue::from("hello world")
        );
    }

    #[test]
    fn oversized_text_is_truncated() {
        let long = "x".repeat(10_500);
        let SqlValue::Text(out) = sanitize(SqlValue::Text(long)) else {
            panic!("expected text");
        };
        assert_eq!(out.chars().count(), 10_000);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "ß".repeat(10_001);
        let SqlValue::Text(out) = sanitize(SqlValue::Text(long)) else {
            panic!("expected text");
        };
        assert_eq!(out.chars().count(), 10_000);
    }

    #[test]
    fn injection_payload_is_stripped() {
        let SqlValue::Text(out) = sanitize(SqlValue::from("'; DROP TABLE users;--")) else {
            panic!("expected text");
        };
        assert!(!out.contains('\''));
        assert!(!out.contains(';'));
        assert!(!out.contains('"'));
    }

    #[test]
    fn union_select_triggers_stripping() {
        let SqlValue::Text(out) = sanitize(SqlValue::from("x' UNION SELECT password")) else {
            panic!("expected text");
        };
        assert!(!out.contains('\''));
    }

    #[test]
    fn injection_predicate() {
        assert!(looks_like_injection("1 OR 1=1; --"));
        assert!(looks_like_injection("x' UNION ALL SELECT name"));
        assert!(!looks_like_injection("ordinary comment text"));
    }

    #[test]
    fn option_converts_to_null() {
        let none: Option<i64> = None;
        assert_eq!(SqlValue::from(none), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(7_i64)), SqlValue::Int(7));
    }
}
