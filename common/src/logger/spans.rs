use tracing::{Span, field};

use super::TraceId;

/// Root span for one polling tick.
pub fn tick_span(tick: u64, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "tick",
        tick,
        trace_id = %trace_id,
        signals = field::Empty
    )
}

/// Child span for the per-pair leg of a tick (inherits tick + trace_id).
pub fn pair_span(pair_id: &str) -> Span {
    tracing::info_span!("pair", pair = %pair_id)
}
