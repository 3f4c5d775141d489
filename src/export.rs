//! Flat CSV snapshots of the fetched and derived tables.

use std::path::Path;

use itertools::Itertools;
use serde::Serialize;

use crate::{api::Asset, core::Feeder, network::Network, prelude::*};

/// Write all snapshots into the output directory, creating it if needed.
pub fn write_snapshots(path: &Path, feeder: &Feeder, net: &Network) -> Result {
    std::fs::create_dir_all(path)
        .with_context(|| format!("failed to create `{}`", path.display()))?;
    write(path, "assets.csv", feeder.assets.iter().map(AssetRow::from))?;
    write(path, "ewb_conductors.csv", feeder.conductors().map(AssetRow::from))?;
    write(path, "ewb_trafos.csv", feeder.transformers().map(AssetRow::from))?;
    write(path, "connections.csv", connection_rows(&feeder.assets))?;
    write(path, "pp_buses.csv", net.bus.iter())?;
    write(path, "pp_lines.csv", net.line.iter())?;
    write(path, "pp_trafos.csv", net.trafo.iter())?;
    info!(feeder_id = %feeder.id, path = %path.display(), "Exported the snapshots");
    Ok(())
}

fn write<R: Serialize>(path: &Path, file_name: &str, rows: impl Iterator<Item = R>) -> Result {
    let path = path.join(file_name);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create `{}`", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("failed to write a row of `{}`", path.display()))?;
    }
    writer.flush().with_context(|| format!("failed to flush `{}`", path.display()))
}

/// Flattened asset row: the connection list collapses into a `;`-separated
/// node list.
#[derive(Serialize)]
struct AssetRow<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: String,
    voltage_v: f64,
    length_km: f64,
    connections: String,
}

impl<'a> From<&'a Asset> for AssetRow<'a> {
    fn from(asset: &'a Asset) -> Self {
        Self {
            id: &asset.id,
            name: &asset.name,
            kind: asset.kind.to_string(),
            voltage_v: asset.voltage,
            length_km: asset.length,
            connections: asset
                .connections
                .iter()
                .map(|connection| &connection.connectivity_node_id)
                .join(";"),
        }
    }
}

/// One row per asset endpoint.
#[derive(Serialize)]
struct ConnectionRow<'a> {
    asset_id: &'a str,
    terminal: usize,
    connectivity_node_id: &'a str,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

fn connection_rows(assets: &[Asset]) -> impl Iterator<Item = ConnectionRow<'_>> {
    assets.iter().flat_map(|asset| {
        asset.connections.iter().enumerate().map(move |(terminal, connection)| ConnectionRow {
            asset_id: &asset.id,
            terminal,
            connectivity_node_id: &connection.connectivity_node_id.0,
            latitude: connection.lng_lat.map(|lng_lat| lng_lat.latitude),
            longitude: connection.lng_lat.map(|lng_lat| lng_lat.longitude),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{AssetKind, Connection, FeederPayload, NodeId},
        core::PopulateOptions,
        network::NetworkBuilder,
    };

    const SNAPSHOTS: [&str; 7] = [
        "assets.csv",
        "ewb_conductors.csv",
        "ewb_trafos.csv",
        "connections.csv",
        "pp_buses.csv",
        "pp_lines.csv",
        "pp_trafos.csv",
    ];

    fn test_feeder() -> Result<Feeder> {
        let conductor = Asset {
            id: "c1".to_string(),
            name: "Overhead 1".to_string(),
            kind: AssetKind::Conductor,
            voltage: 415.0,
            length: 0.5,
            connections: vec![
                Connection { connectivity_node_id: NodeId::from("a"), lng_lat: None },
                Connection { connectivity_node_id: NodeId::from("b"), lng_lat: None },
            ],
        };
        Ok(Feeder::try_from_payload(
            "AL002",
            FeederPayload { assets: vec![conductor], infeeds: vec!["c1".to_string()] },
        )?)
    }

    #[test]
    fn test_write_snapshots_ok() -> Result {
        let feeder = test_feeder()?;
        let mut net = Network::default();
        feeder.create_buses(&mut net);
        feeder.create_lines(&mut net, &PopulateOptions::default())?;
        feeder.create_external_grid(&mut net)?;

        let directory = tempfile::tempdir()?;
        write_snapshots(directory.path(), &feeder, &net)?;
        for file_name in SNAPSHOTS {
            assert!(directory.path().join(file_name).is_file(), "missing `{file_name}`");
        }

        // Header plus one row per derived bus.
        let buses = std::fs::read_to_string(directory.path().join("pp_buses.csv"))?;
        assert_eq!(buses.lines().count(), 3);
        assert!(buses.starts_with("name,vn_kv,in_service,lat,lon"));
        Ok(())
    }

    #[test]
    fn test_connection_rows_ok() -> Result {
        let feeder = test_feeder()?;
        let rows: Vec<_> = connection_rows(&feeder.assets).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].asset_id, "c1");
        assert_eq!(rows[0].terminal, 0);
        assert_eq!(rows[1].connectivity_node_id, "b");
        Ok(())
    }
}
