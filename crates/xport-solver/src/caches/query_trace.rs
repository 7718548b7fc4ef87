//! Structured query tracing for collector entry points.
//!
//! Events use target `xport::query_json` and are intended to be consumed with:
//! `XPORT_LOG=xport::query_json=trace XPORT_LOG_FORMAT=json`.
//!
//! Environment:
//! - `XPORT_QUERY_RUN_ID`: optional run identifier attached to every event.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, trace};

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);
static QUERY_RUN_ID: OnceLock<String> = OnceLock::new();

#[inline]
pub(crate) fn enabled() -> bool {
    tracing::enabled!(target: "xport::query_json", Level::TRACE)
}

#[inline]
pub(crate) fn next_query_id() -> u64 {
    NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed)
}

#[inline]
fn run_id() -> &'static str {
    QUERY_RUN_ID
        .get_or_init(|| {
            std::env::var("XPORT_QUERY_RUN_ID").unwrap_or_else(|_| "default".to_string())
        })
        .as_str()
}

#[inline]
pub(crate) fn collect_start(query_id: u64, op: &'static str, class: Option<u32>, arg_count: usize) {
    trace!(
        target: "xport::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        class_id = class,
        arg_count
    );
}

#[inline]
pub(crate) fn collect_end(query_id: u64, op: &'static str, result_len: usize, cache_hit: bool) {
    trace!(
        target: "xport::query_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        result_len,
        cache_hit
    );
}
