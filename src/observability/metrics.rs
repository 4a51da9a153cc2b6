//! Metrics collection.
//!
//! # Metrics
//! - `bridge_requests_total` (counter): answered content requests by `source`
//!   (`virtual`, `live`, `document`, `missing`, `markdown`)
//! - `bridge_registry_syncs_total` (counter): registry pushes by `outcome`
//!   (`ok`, `error`)
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding process picks the
//!   exporter (none installed means the calls are no-ops)

pub fn record_request(source: &'static str) {
    ::metrics::counter!("bridge_requests_total", "source" => source).increment(1);
}

pub fn record_registry_sync(ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    ::metrics::counter!("bridge_registry_syncs_total", "outcome" => outcome).increment(1);
}
