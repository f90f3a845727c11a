//! A store whose writes can be made to fail.

use anchor_identity::{AttributeStore, ResourceState, StateMap, StoreError};
use serde_json::Value;

/// In-memory store that rejects the N-th attribute write (1-based) and every
/// write after it.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub state: StateMap,
    fail_at: Option<usize>,
    writes: usize,
}

impl FailingStore {
    /// A store that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that fails from the `n`-th write on.
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    /// Seeds the underlying state.
    #[must_use]
    pub fn with_state(mut self, state: StateMap) -> Self {
        self.state = state;
        self
    }

    /// Number of attempted writes, including rejected ones.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl AttributeStore for FailingStore {
    fn get(&self, name: &str) -> Option<Value> {
        self.state.get(name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), StoreError> {
        self.writes += 1;
        if self.fail_at.is_some_and(|n| self.writes >= n) {
            return Err(StoreError::Rejected {
                attribute: name.to_string(),
                message: format!("write #{} refused", self.writes),
            });
        }
        self.state.set(name, value)
    }
}

impl ResourceState for FailingStore {
    fn id(&self) -> &str {
        self.state.id()
    }

    fn set_id(&mut self, id: &str) {
        self.state.set_id(id);
    }
}
