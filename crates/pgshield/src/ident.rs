//! Safe SQL identifier handling.
//!
//! [`Ident`] represents a validated table or column name. Validation is the
//! primary defense for identifiers (Postgres cannot parameterize them):
//! names must match `[A-Za-z_][A-Za-z0-9_]*` per segment, stay within 64
//! characters, use at most one dot (qualified column names only), and must
//! not be reserved words. Quoting on output is applied only after validation
//! succeeds and is never relied on alone.

use crate::error::{QueryError, QueryResult};
use crate::vocabulary::Vocabulary;

/// Maximum identifier length, matching the Postgres NAMEDATALEN convention.
pub const MAX_IDENT_LEN: usize = 64;

/// Which syntax position an identifier occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentKind {
    /// Table name: a single unqualified segment.
    Table,
    /// Column name: one segment, or two for a qualified `table.column`.
    Column,
}

impl IdentKind {
    fn as_str(self) -> &'static str {
        match self {
            IdentKind::Table => "table",
            IdentKind::Column => "column",
        }
    }
}

/// A validated SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    segments: Vec<String>,
}

impl Ident {
    /// Validate a table name.
    pub fn table(name: &str, vocab: &Vocabulary) -> QueryResult<Self> {
        Self::validate(name, IdentKind::Table, vocab)
    }

    /// Validate a column name, allowing one qualifying dot.
    pub fn column(name: &str, vocab: &Vocabulary) -> QueryResult<Self> {
        Self::validate(name, IdentKind::Column, vocab)
    }

    fn validate(name: &str, kind: IdentKind, vocab: &Vocabulary) -> QueryResult<Self> {
        let reject = || QueryError::invalid_identifier(kind.as_str(), name);

        if name.is_empty() || name.len() > MAX_IDENT_LEN {
            return Err(reject());
        }

        let segments: Vec<&str> = name.split('.').collect();
        let max_segments = match kind {
            IdentKind::Table => 1,
            IdentKind::Column => 2,
        };
        if segments.len() > max_segments {
            return Err(reject());
        }

        for seg in &segments {
            let mut chars = seg.chars();
            let first_ok = chars
                .next()
                .is_some_and(|c| c == '_' || c.is_ascii_alphabetic());
            if !first_ok || !chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
                return Err(reject());
            }
            if vocab.is_reserved(seg) {
                return Err(reject());
            }
        }

        Ok(Self {
            segments: segments.into_iter().map(str::to_string).collect(),
        })
    }

    /// Render the identifier as quoted SQL.
    ///
    /// Each segment is wrapped in double quotes with embedded quotes doubled.
    /// Validation already forbids quote characters; the doubling is kept so
    /// the quoting step is safe in isolation.
    pub fn to_sql(&self) -> String {
        let mut out = String::with_capacity(self.sql_len());
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push('"');
            for ch in seg.chars() {
                if ch == '"' {
                    out.push('"');
                }
                out.push(ch);
            }
            out.push('"');
        }
    }

    fn sql_len(&self) -> usize {
        // dots plus two quotes per segment
        self.segments.len().saturating_sub(1)
            + self.segments.iter().map(|s| s.len() + 2).sum::<usize>()
    }
}
