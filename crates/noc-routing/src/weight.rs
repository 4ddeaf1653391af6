//! Load-sensitive channel weights.
//!
//! Weights are a pure function of a channel's load and capacity. They are
//! recomputed from the ledger for every routing attempt and never stored
//! on the graph.

use noc_topology::Torus;

use crate::LoadLedger;

/// Fraction of capacity at which a channel starts to cost more than 1.
pub const CONGESTION_THRESHOLD: f64 = 0.8;

/// `load / capacity`.
///
/// A zero-capacity channel is measured against a capacity of 1 so the ratio
/// stays finite.
#[inline]
pub fn utilization(load: u64, capacity: u64) -> f64 {
    load as f64 / capacity.max(1) as f64
}

/// Weight of one channel.
///
/// Below the congestion threshold every channel costs 1. At or above it the
/// cost is `1 + load / capacity`, so loaded channels look longer to the
/// search.
#[inline]
pub fn channel_weight(load: u64, capacity: u64) -> f64 {
    if (load as f64) < CONGESTION_THRESHOLD * capacity as f64 {
        1.0
    } else {
        1.0 + utilization(load, capacity)
    }
}

/// Congestion weights for every channel, indexed by channel id.
pub fn congestion_weights(torus: &Torus, ledger: &LoadLedger) -> Vec<f64> {
    torus
        .channel_ids()
        .map(|id| channel_weight(ledger.load(id), torus.channel(id).capacity))
        .collect()
}

/// A weight of 1 for every channel: plain hop count.
pub fn unit_weights(torus: &Torus) -> Vec<f64> {
    vec![1.0; torus.channel_count()]
}
