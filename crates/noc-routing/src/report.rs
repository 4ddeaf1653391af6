//! Read-only observation surface for renderers and exporters.
//!
//! A [`LoadReport`] is a detached snapshot: it copies everything a
//! presentation layer needs out of the torus and ledger, so it can be
//! printed, serialized or kept after the simulation moves on.

use noc_topology::{ChannelId, Direction, Node, Torus};
use serde::Serialize;

use crate::error::Result;
use crate::overload::{is_overloaded, overload_details, Overload};
use crate::weight::utilization;
use crate::{DroppedDemand, LoadLedger};

/// Load on one channel at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelLoad {
    pub channel: ChannelId,
    pub from: Node,
    pub to: Node,
    pub direction: Direction,
    pub load: u64,
    pub capacity: u64,
    pub utilization: f64,
    pub overloaded: bool,
}

impl ChannelLoad {
    /// `load/capacity`, the annotation a renderer puts on the edge.
    pub fn label(&self) -> String {
        format!("{}/{}", self.load, self.capacity)
    }
}

/// Snapshot of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub rows: usize,
    pub cols: usize,
    pub capacity: u64,
    pub routed: usize,
    pub dropped: Vec<DroppedDemand>,
    pub channels: Vec<ChannelLoad>,
    pub overloads: Vec<Overload>,
    pub total_load: u64,
    pub max_utilization: f64,
    pub mean_utilization: f64,
}

impl LoadReport {
    /// Capture the current state.
    pub fn capture(
        torus: &Torus,
        ledger: &LoadLedger,
        routed: usize,
        dropped: &[DroppedDemand],
    ) -> Self {
        let channels: Vec<ChannelLoad> = torus
            .channel_ids()
            .map(|id| {
                let channel = torus.channel(id);
                let load = ledger.load(id);
                ChannelLoad {
                    channel: id,
                    from: channel.from,
                    to: channel.to,
                    direction: channel.direction,
                    load,
                    capacity: channel.capacity,
                    utilization: utilization(load, channel.capacity),
                    overloaded: is_overloaded(load, channel.capacity),
                }
            })
            .collect();

        let max_utilization = channels
            .iter()
            .map(|c| c.utilization)
            .fold(0.0, f64::max);
        let mean_utilization = if channels.is_empty() {
            0.0
        } else {
            channels.iter().map(|c| c.utilization).sum::<f64>() / channels.len() as f64
        };

        Self {
            rows: torus.rows(),
            cols: torus.cols(),
            capacity: torus.capacity(),
            routed,
            dropped: dropped.to_vec(),
            channels,
            overloads: overload_details(torus, ledger),
            total_load: ledger.total(),
            max_utilization,
            mean_utilization,
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Channels carrying any load.
    pub fn busy_channels(&self) -> impl Iterator<Item = &ChannelLoad> {
        self.channels.iter().filter(|c| c.load > 0)
    }
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Torus {}x{}, capacity {}: {} routed, {} dropped",
            self.rows,
            self.cols,
            self.capacity,
            self.routed,
            self.dropped.len()
        )?;
        writeln!(
            f,
            "Total load {}, max utilization {:.2}, mean utilization {:.2}",
            self.total_load, self.max_utilization, self.mean_utilization
        )?;
        if self.overloads.is_empty() {
            writeln!(f, "No channels are overloaded.")
        } else {
            writeln!(f, "Overloaded Channels:")?;
            for overload in &self.overloads {
                writeln!(f, "Channel {} -> {} is overloaded.", overload.from, overload.to)?;
            }
            Ok(())
        }
    }
}
