use std::collections::HashMap;

use serde::Serialize;

use super::feeder::BuildError;
use crate::api::{Asset, LngLat, NodeId};

/// Geographic coordinates of a bus, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LngLat> for GeoPoint {
    fn from(lng_lat: LngLat) -> Self {
        Self { latitude: lng_lat.latitude, longitude: lng_lat.longitude }
    }
}

/// One derived bus: a distinct connectivity node with the voltage level copied
/// from the first asset that referenced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bus {
    pub name: NodeId,

    /// Nominal voltage in volts.
    pub vn_v: f64,

    pub geo: Option<GeoPoint>,
}

impl Bus {
    /// Derive the bus table: one row per distinct connectivity-node id, in
    /// first-seen order across all assets' connections.
    ///
    /// Duplicates collapse keeping the first-seen row, except that assets
    /// disagreeing on a node's voltage are a [`BuildError::VoltageConflict`].
    pub fn derive(assets: &[Asset]) -> Result<Vec<Self>, BuildError> {
        let mut buses: Vec<Self> = Vec::new();
        let mut index_by_name: HashMap<NodeId, usize> = HashMap::new();
        for asset in assets {
            for connection in &asset.connections {
                let name = &connection.connectivity_node_id;
                if let Some(index) = index_by_name.get(name) {
                    let first = &buses[*index];
                    if (first.vn_v - asset.voltage).abs() > f64::EPSILON {
                        return Err(BuildError::VoltageConflict {
                            node: name.clone(),
                            first: first.vn_v,
                            other: asset.voltage,
                        });
                    }
                    continue;
                }
                index_by_name.insert(name.clone(), buses.len());
                buses.push(Self {
                    name: name.clone(),
                    vn_v: asset.voltage,
                    geo: connection.lng_lat.map(GeoPoint::from),
                });
            }
        }
        Ok(buses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AssetKind, Connection};

    fn asset(id: &str, voltage: f64, nodes: &[&str]) -> Asset {
        Asset {
            id: id.to_string(),
            name: String::new(),
            kind: AssetKind::Conductor,
            voltage,
            length: 0.0,
            connections: nodes
                .iter()
                .map(|node| Connection {
                    connectivity_node_id: NodeId::from(*node),
                    lng_lat: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_one_row_per_distinct_node_ok() -> Result<(), BuildError> {
        let assets =
            [asset("c1", 415.0, &["a", "b"]), asset("c2", 415.0, &["b", "c"])];
        let buses = Bus::derive(&assets)?;
        assert_eq!(
            buses.iter().map(|bus| bus.name.0.as_str()).collect::<Vec<_>>(),
            ["a", "b", "c"],
        );
        Ok(())
    }

    #[test]
    fn test_first_seen_wins_ok() -> Result<(), BuildError> {
        let mut first = asset("c1", 415.0, &["a"]);
        first.connections[0].lng_lat = Some(LngLat { longitude: 145.2, latitude: -37.8 });
        let second = asset("c2", 415.0, &["a"]);
        let buses = Bus::derive(&[first, second])?;
        assert_eq!(buses.len(), 1);
        assert_eq!(buses[0].geo, Some(GeoPoint { latitude: -37.8, longitude: 145.2 }));
        Ok(())
    }

    #[test]
    fn test_missing_lng_lat_yields_no_geo_ok() -> Result<(), BuildError> {
        let buses = Bus::derive(&[asset("c1", 415.0, &["a"])])?;
        assert!(buses[0].geo.is_none());
        Ok(())
    }

    #[test]
    fn test_voltage_conflict_fails() {
        let assets = [asset("c1", 415.0, &["a", "b"]), asset("c2", 22000.0, &["b", "c"])];
        let error = Bus::derive(&assets).expect_err("the voltages disagree on `b`");
        assert!(matches!(error, BuildError::VoltageConflict { .. }));
    }
}
