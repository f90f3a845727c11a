//! Ambient context that records how it is used.

use std::cell::Cell;

use anchor_identity::{AmbientContext, CancellationToken, StaticAmbient};

/// Wraps a [`StaticAmbient`] and counts accessor calls.
///
/// It can also cancel a token once a number of calls has been made, which
/// lets tests cancel an operation part way through.
#[derive(Debug)]
pub struct RecordingAmbient {
    inner: StaticAmbient,
    calls: Cell<usize>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl RecordingAmbient {
    pub fn new(account_id: &str, region: &str) -> Self {
        Self {
            inner: StaticAmbient::new(account_id, region),
            calls: Cell::new(0),
            cancel_after: None,
        }
    }

    /// Cancels `token` after `calls` accessor calls.
    #[must_use]
    pub fn cancel_after(mut self, calls: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((calls, token));
        self
    }

    /// Total accessor calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record(&self) {
        let calls = self.calls.get() + 1;
        self.calls.set(calls);
        if let Some((limit, token)) = &self.cancel_after {
            if calls >= *limit {
                token.cancel();
            }
        }
    }
}

impl AmbientContext for RecordingAmbient {
    fn account_id(&self, ctx: &CancellationToken) -> String {
        self.record();
        self.inner.account_id(ctx)
    }

    fn region(&self, ctx: &CancellationToken) -> String {
        self.record();
        self.inner.region(ctx)
    }

    fn partition(&self, ctx: &CancellationToken) -> String {
        self.record();
        self.inner.partition(ctx)
    }
}
