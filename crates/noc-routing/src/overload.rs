//! Overload detection over a ledger snapshot.

use noc_topology::{ChannelId, Node, Torus};
use serde::Serialize;

use crate::LoadLedger;

/// A channel carrying more than its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overload {
    pub channel: ChannelId,
    pub from: Node,
    pub to: Node,
    pub load: u64,
    pub capacity: u64,
}

impl std::fmt::Display for Overload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({}/{})", self.from, self.to, self.load, self.capacity)
    }
}

/// Whether `load` strictly exceeds `capacity`.
#[inline]
pub const fn is_overloaded(load: u64, capacity: u64) -> bool {
    load > capacity
}

/// Every overloaded channel, in ascending channel id order.
pub fn detect_overloads(torus: &Torus, ledger: &LoadLedger) -> Vec<ChannelId> {
    torus
        .channel_ids()
        .filter(|&id| is_overloaded(ledger.load(id), torus.channel(id).capacity))
        .collect()
}

/// Like [`detect_overloads`], with endpoints, load and capacity attached.
pub fn overload_details(torus: &Torus, ledger: &LoadLedger) -> Vec<Overload> {
    detect_overloads(torus, ledger)
        .into_iter()
        .map(|id| {
            let channel = torus.channel(id);
            Overload {
                channel: id,
                from: channel.from,
                to: channel.to,
                load: ledger.load(id),
                capacity: channel.capacity,
            }
        })
        .collect()
}
