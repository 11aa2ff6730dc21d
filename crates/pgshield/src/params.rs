//! Ordered parameter accumulation with 1-based placeholder indices.

use crate::value::{SqlValue, sanitize};

/// The ordered parameter list threaded through a single build.
///
/// `push` returns the 1-based placeholder index of the value it appended, so
/// the index is always `values.len()` after the push: strictly increasing
/// across every clause of a statement, with no gaps, duplicates, or resets.
/// All values pass through [`sanitize`] here, making this the single choke
/// point between caller input and bound parameters.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: Vec<SqlValue>,
}

impl Params {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize and append a value, returning its 1-based placeholder index.
    pub fn push(&mut self, value: SqlValue) -> usize {
        self.values.push(sanitize(value));
        self.values.len()
    }

    /// Current parameter count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the list, yielding the values in placeholder order.
    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }
}
