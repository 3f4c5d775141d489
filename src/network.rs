//! Pandapower-style power-flow network: element tables plus the capability
//! to grow them.

mod std_types;

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

pub use self::std_types::{LineType, TransformerType};
use crate::{api::NodeId, core::GeoPoint};

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no bus named `{0}`")]
    UnknownBus(NodeId),

    #[error("unknown standard line type `{0}`")]
    UnknownLineType(String),

    #[error("unknown standard transformer type `{0}`")]
    UnknownTransformerType(String),
}

/// Capability to grow a power-flow network.
///
/// Element indices are the row positions of the respective tables.
pub trait NetworkBuilder {
    fn add_bus(&mut self, name: &NodeId, vn_kv: f64, geo: Option<GeoPoint>) -> usize;

    fn add_line(
        &mut self,
        name: &str,
        from_bus: usize,
        to_bus: usize,
        length_km: f64,
        std_type: &str,
    ) -> Result<usize, NetworkError>;

    fn add_transformer(
        &mut self,
        name: &str,
        hv_bus: usize,
        lv_bus: usize,
        std_type: &str,
    ) -> Result<usize, NetworkError>;

    fn add_external_grid(&mut self, bus: usize, vm_pu: f64, va_degree: f64) -> usize;

    /// Index of the bus with the given name.
    fn bus_index(&self, name: &NodeId) -> Option<usize>;
}

/// One row of the `bus` element table.
#[derive(Clone, Debug, Serialize)]
pub struct BusRecord {
    pub name: String,
    pub vn_kv: f64,
    pub in_service: bool,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// One row of the `line` element table.
#[derive(Clone, Debug, Serialize)]
pub struct LineRecord {
    pub name: String,
    pub from_bus: usize,
    pub to_bus: usize,
    pub length_km: f64,
    pub r_ohm_per_km: f64,
    pub x_ohm_per_km: f64,
    pub c_nf_per_km: f64,
    pub max_i_ka: f64,
    pub std_type: String,
    pub in_service: bool,
}

/// One row of the `trafo` element table.
#[derive(Clone, Debug, Serialize)]
pub struct TrafoRecord {
    pub name: String,
    pub hv_bus: usize,
    pub lv_bus: usize,
    pub sn_mva: f64,
    pub vn_hv_kv: f64,
    pub vn_lv_kv: f64,
    pub vk_percent: f64,
    pub vkr_percent: f64,
    pub pfe_kw: f64,
    pub i0_percent: f64,
    pub shift_degree: f64,
    pub std_type: String,
    pub in_service: bool,
}

/// One row of the `ext_grid` element table.
#[derive(Clone, Debug, Serialize)]
pub struct ExtGridRecord {
    pub bus: usize,
    pub vm_pu: f64,
    pub va_degree: f64,
    pub in_service: bool,
}

/// The network as plain element tables, one vector per element kind.
#[derive(Debug, Default)]
pub struct Network {
    pub bus: Vec<BusRecord>,
    pub line: Vec<LineRecord>,
    pub trafo: Vec<TrafoRecord>,
    pub ext_grid: Vec<ExtGridRecord>,

    index_by_name: HashMap<NodeId, usize>,
}

impl NetworkBuilder for Network {
    fn add_bus(&mut self, name: &NodeId, vn_kv: f64, geo: Option<GeoPoint>) -> usize {
        let index = self.bus.len();
        self.index_by_name.insert(name.clone(), index);
        self.bus.push(BusRecord {
            name: name.to_string(),
            vn_kv,
            in_service: true,
            lat: geo.map(|geo| geo.latitude),
            lon: geo.map(|geo| geo.longitude),
        });
        index
    }

    fn add_line(
        &mut self,
        name: &str,
        from_bus: usize,
        to_bus: usize,
        length_km: f64,
        std_type: &str,
    ) -> Result<usize, NetworkError> {
        let line_type = std_types::line_type(std_type)
            .ok_or_else(|| NetworkError::UnknownLineType(std_type.to_string()))?;
        let index = self.line.len();
        self.line.push(LineRecord {
            name: name.to_string(),
            from_bus,
            to_bus,
            length_km,
            r_ohm_per_km: line_type.r_ohm_per_km,
            x_ohm_per_km: line_type.x_ohm_per_km,
            c_nf_per_km: line_type.c_nf_per_km,
            max_i_ka: line_type.max_i_ka,
            std_type: std_type.to_string(),
            in_service: true,
        });
        Ok(index)
    }

    fn add_transformer(
        &mut self,
        name: &str,
        hv_bus: usize,
        lv_bus: usize,
        std_type: &str,
    ) -> Result<usize, NetworkError> {
        let trafo_type = std_types::transformer_type(std_type)
            .ok_or_else(|| NetworkError::UnknownTransformerType(std_type.to_string()))?;
        let index = self.trafo.len();
        self.trafo.push(TrafoRecord {
            name: name.to_string(),
            hv_bus,
            lv_bus,
            sn_mva: trafo_type.sn_mva,
            vn_hv_kv: trafo_type.vn_hv_kv,
            vn_lv_kv: trafo_type.vn_lv_kv,
            vk_percent: trafo_type.vk_percent,
            vkr_percent: trafo_type.vkr_percent,
            pfe_kw: trafo_type.pfe_kw,
            i0_percent: trafo_type.i0_percent,
            shift_degree: trafo_type.shift_degree,
            std_type: std_type.to_string(),
            in_service: true,
        });
        Ok(index)
    }

    fn add_external_grid(&mut self, bus: usize, vm_pu: f64, va_degree: f64) -> usize {
        let index = self.ext_grid.len();
        self.ext_grid.push(ExtGridRecord { bus, vm_pu, va_degree, in_service: true });
        index
    }

    fn bus_index(&self, name: &NodeId) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }
}
