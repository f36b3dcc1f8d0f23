//! # Element Identifiers
//!
//! Freshly created UI elements (array rows, radio groups, label targets)
//! need unique ids. Each form owns an [`IdSequence`] and threads it through
//! construction, so two forms never share a counter and tests see the same
//! ids on every run. Ids are never used for ordering or correctness.

/// Monotonic identifier source owned by one form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current counter value and advance it.
    pub fn next_value(&mut self) -> u64 {
        let value = self.next;
        self.next += 1;
        value
    }

    /// Mint an id of the form `<prefix>-<n>`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_value())
    }
}
