use crate::data::VoteRecord;

/// Receives per-row progress from the vote table parser. Passed in rather
/// than logged globally so the parser itself has no side effects.
pub trait Diagnostics: Send + Sync {
    fn table_start(&self, _index: Option<usize>) {}
    fn row_parsed(&self, _ordinal: usize, _record: &VoteRecord) {}
    fn row_rejected(&self, _ordinal: usize, _token: &str) {}
    fn footer_reached(&self, _index: usize) {}
}

pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}

pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn table_start(&self, index: Option<usize>) {
        tracing::debug!(?index, "vote table start");
    }

    fn row_parsed(&self, ordinal: usize, record: &VoteRecord) {
        tracing::debug!(ordinal, ?record, "parsed vote");
    }

    fn row_rejected(&self, ordinal: usize, token: &str) {
        tracing::debug!(ordinal, token, "unparseable vote row");
    }

    fn footer_reached(&self, index: usize) {
        tracing::debug!(index, "vote table footer");
    }
}
