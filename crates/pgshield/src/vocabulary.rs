//! Immutable SQL vocabulary: reserved words and the operator allow-list.
//!
//! Both sets are deliberately modeled as one configuration value constructed
//! once at startup and passed by reference, so the "never mutated at runtime"
//! invariant is visible in the types instead of hidden in statics.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::condition::CmpOp;
use crate::error::{QueryError, QueryResult};

/// Identifier names that are rejected outright, case-insensitively.
const RESERVED_WORDS: [&str; 10] = [
    "SELECT", "INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "EXEC", "EXECUTE", "UNION",
];

/// Symbolic operator keys accepted from structured query descriptions.
const OPERATOR_KEYS: [(&str, CmpOp); 8] = [
    ("$eq", CmpOp::Eq),
    ("$ne", CmpOp::Ne),
    ("$lt", CmpOp::Lt),
    ("$lte", CmpOp::Lte),
    ("$gt", CmpOp::Gt),
    ("$gte", CmpOp::Gte),
    ("$like", CmpOp::Like),
    ("$notLike", CmpOp::NotLike),
];

static GLOBAL: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::new);

/// The reserved-word set and symbolic-operator allow-list used by validation.
///
/// Anything not listed is rejected; there is no deny-list fallback and no way
/// to extend the sets after construction.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    reserved_words: BTreeSet<&'static str>,
    operators: BTreeMap<&'static str, CmpOp>,
}

impl Vocabulary {
    /// Build the vocabulary from the built-in sets.
    pub fn new() -> Self {
        Self {
            reserved_words: RESERVED_WORDS.into_iter().collect(),
            operators: OPERATOR_KEYS.into_iter().collect(),
        }
    }

    /// The process-wide vocabulary, initialized on first use.
    pub fn global() -> &'static Vocabulary {
        &GLOBAL
    }

    /// Check whether `word` is reserved, case-insensitively.
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words
            .contains(word.to_ascii_uppercase().as_str())
    }

    /// Resolve a symbolic operator key (`$eq`, `$lt`, ...) to its operator.
    ///
    /// Keys outside the allow-list fail with
    /// [`QueryError::InvalidOperator`]; this closes the injection vector of
    /// operator-controlled input.
    pub fn operator(&self, key: &str) -> QueryResult<CmpOp> {
        self.operators
            .get(key)
            .copied()
            .ok_or_else(|| QueryError::InvalidOperator(key.to_string()))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
