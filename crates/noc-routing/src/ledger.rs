//! Per-channel accumulated load.
//!
//! The ledger starts at zero for every channel of a torus and only ever
//! grows. The simulation loop is its single writer; routers and detectors
//! only read it.

use noc_topology::{ChannelId, Torus};

use crate::router::Path;

/// Accumulated load on each channel of one torus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadLedger {
    loads: Vec<u64>,
}

impl LoadLedger {
    /// A zeroed ledger covering every channel of `torus`.
    pub fn new(torus: &Torus) -> Self {
        Self {
            loads: vec![0; torus.channel_count()],
        }
    }

    /// Current load on `id`. Channels outside the ledger carry no load.
    #[inline]
    pub fn load(&self, id: ChannelId) -> u64 {
        self.loads.get(id.index()).copied().unwrap_or(0)
    }

    /// Load on `id` as a fraction of `capacity`.
    pub fn utilization(&self, id: ChannelId, capacity: u64) -> f64 {
        crate::weight::utilization(self.load(id), capacity)
    }

    /// Number of channels tracked.
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    /// Whether the ledger tracks no channels.
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Iterate `(channel, load)` pairs in ascending channel order.
    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, u64)> + '_ {
        self.loads.iter().enumerate().map(|(i, &load)| (ChannelId(i), load))
    }

    /// Sum of the load over all channels.
    pub fn total(&self) -> u64 {
        self.loads.iter().sum()
    }

    /// Add `volume` to every channel of `path`.
    ///
    /// Only the simulation loop calls this, and only for an admitted route.
    pub(crate) fn commit(&mut self, path: &Path, volume: u64) {
        for id in path.channels() {
            if let Some(load) = self.loads.get_mut(id.index()) {
                *load = load.saturating_add(volume);
            }
        }
    }
}
