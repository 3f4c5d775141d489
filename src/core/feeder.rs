use itertools::Itertools;
use thiserror::Error;

use super::bus::Bus;
use crate::{
    api::{Asset, AssetKind, FeederPayload, NodeId},
    network::{NetworkBuilder, NetworkError},
    prelude::*,
};

/// A failed derivation stage.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("feeder `{0}` has no infeeds")]
    MissingInfeed(String),

    #[error("infeeder asset `{0}` is not in the feeder's asset list")]
    UnknownInfeeder(String),

    #[error("infeeder asset `{0}` has no connections")]
    UnconnectedInfeeder(String),

    #[error("head connectivity node `{0}` has no derived bus")]
    UnknownHeadNode(NodeId),

    #[error("assets disagree on the voltage of node `{node}`: {first} V vs {other} V")]
    VoltageConflict { node: NodeId, first: f64, other: f64 },
}

/// Options for populating the power-flow network.
#[derive(Clone, Debug)]
pub struct PopulateOptions {
    /// Substituted for zero conductor lengths, which the line model rejects.
    pub min_line_length_km: f64,

    pub line_std_type: String,
    pub trafo_std_type: String,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            min_line_length_km: 0.01,
            line_std_type: "NAYY 4x50 SE".to_string(),
            trafo_std_type: "0.4 MVA 20/0.4 kV".to_string(),
        }
    }
}

/// The root aggregate: one distribution-grid segment with its derived tables.
#[derive(Debug)]
pub struct Feeder {
    pub id: String,

    /// Identifier of the asset representing the feeder's point of supply.
    pub infeeder_id: String,

    pub assets: Vec<Asset>,
    pub buses: Vec<Bus>,

    /// Connectivity node at which the infeeder attaches.
    pub head_node: NodeId,

    /// Voltage of the head bus, in volts.
    pub base_voltage: f64,
}

impl Feeder {
    /// Build the derived tables from a fetched payload, in a fixed order:
    /// infeeder id, buses, head node, base voltage.
    pub fn try_from_payload(
        id: impl Into<String>,
        payload: FeederPayload,
    ) -> Result<Self, BuildError> {
        let id = id.into();
        let FeederPayload { assets, infeeds } = payload;
        let infeeder_id =
            infeeds.into_iter().next().ok_or_else(|| BuildError::MissingInfeed(id.clone()))?;
        info!(%infeeder_id, "Resolved the infeeder");

        let buses = Bus::derive(&assets)?;
        let infeeder = assets
            .iter()
            .find(|asset| asset.id == infeeder_id)
            .ok_or_else(|| BuildError::UnknownInfeeder(infeeder_id.clone()))?;
        let head_node = infeeder
            .connections
            .first()
            .ok_or_else(|| BuildError::UnconnectedInfeeder(infeeder_id.clone()))?
            .connectivity_node_id
            .clone();
        let base_voltage = buses
            .iter()
            .find(|bus| bus.name == head_node)
            .ok_or_else(|| BuildError::UnknownHeadNode(head_node.clone()))?
            .vn_v;
        info!(%head_node, base_voltage, n_buses = buses.len(), "Derived the feeder head");

        Ok(Self { id, infeeder_id, assets, buses, head_node, base_voltage })
    }

    /// Conductor assets, in fetch order.
    pub fn conductors(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(|asset| asset.kind == AssetKind::Conductor)
    }

    /// Distribution transformers deduplicated by name, first-seen wins.
    pub fn transformers(&self) -> impl Iterator<Item = &Asset> {
        self.assets
            .iter()
            .filter(|asset| asset.kind == AssetKind::DistTransformer)
            .unique_by(|asset| asset.name.clone())
    }

    /// Create one bus per derived row. Voltages arrive in volts and the
    /// network takes kilovolts.
    pub fn create_buses<N: NetworkBuilder>(&self, net: &mut N) {
        for bus in &self.buses {
            net.add_bus(&bus.name, bus.vn_v / 1000.0, bus.geo);
        }
        info!(n_buses = self.buses.len(), "Created the buses");
    }

    /// Create one line per conductor, endpoints taken from its first two
    /// connections. Zero lengths are lifted to the configured minimum.
    pub fn create_lines<N: NetworkBuilder>(
        &self,
        net: &mut N,
        options: &PopulateOptions,
    ) -> Result {
        let mut n_lines = 0;
        for conductor in self.conductors() {
            let (from, to) = endpoints(conductor)?;
            let from_bus =
                net.bus_index(from).ok_or_else(|| NetworkError::UnknownBus(from.clone()))?;
            let to_bus = net.bus_index(to).ok_or_else(|| NetworkError::UnknownBus(to.clone()))?;
            let length_km = if conductor.length == 0.0 {
                options.min_line_length_km
            } else {
                conductor.length
            };
            net.add_line(
                &format!("{from}-{to}"),
                from_bus,
                to_bus,
                length_km,
                &options.line_std_type,
            )?;
            n_lines += 1;
        }
        info!(n_lines, "Created the lines");
        Ok(())
    }

    /// Create one transformer per uniquely named distribution transformer,
    /// HV side first.
    pub fn create_transformers<N: NetworkBuilder>(
        &self,
        net: &mut N,
        options: &PopulateOptions,
    ) -> Result {
        let mut n_trafos = 0;
        for trafo in self.transformers() {
            let (hv, lv) = endpoints(trafo)?;
            let hv_bus = net.bus_index(hv).ok_or_else(|| NetworkError::UnknownBus(hv.clone()))?;
            let lv_bus = net.bus_index(lv).ok_or_else(|| NetworkError::UnknownBus(lv.clone()))?;
            net.add_transformer(&trafo.name, hv_bus, lv_bus, &options.trafo_std_type)?;
            n_trafos += 1;
        }
        info!(n_trafos, "Created the transformers");
        Ok(())
    }

    /// Attach the external grid at the head bus, 1.0 p.u. at zero angle.
    pub fn create_external_grid<N: NetworkBuilder>(&self, net: &mut N) -> Result {
        let bus = net
            .bus_index(&self.head_node)
            .ok_or_else(|| NetworkError::UnknownBus(self.head_node.clone()))?;
        net.add_external_grid(bus, 1.0, 0.0);
        info!(bus, "Created the external grid");
        Ok(())
    }
}

/// First two connections of an asset: its `from` and `to` endpoints.
fn endpoints(asset: &Asset) -> Result<(&NodeId, &NodeId)> {
    match asset.connections.as_slice() {
        [from, to, ..] => Ok((&from.connectivity_node_id, &to.connectivity_node_id)),
        _ => bail!("asset `{}` has fewer than two connections", asset.id),
    }
}
