use comfy_table::{Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{api::Asset, network::Network};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(header);
    table
}

/// The `bus` element table for the console. Medium-voltage buses stand out.
#[must_use]
pub fn bus_table(net: &Network) -> Table {
    let mut table = new_table(vec!["Index", "Name", "vn_kv", "Latitude", "Longitude"]);
    for (index, bus) in net.bus.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(&bus.name),
            Cell::new(format!("{:.3}", bus.vn_kv))
                .set_alignment(CellAlignment::Right)
                .fg(if bus.vn_kv >= 1.0 { Color::DarkYellow } else { Color::Reset }),
            Cell::new(bus.lat.map_or_else(String::new, |lat| format!("{lat:.6}"))),
            Cell::new(bus.lon.map_or_else(String::new, |lon| format!("{lon:.6}"))),
        ]);
    }
    table
}

#[must_use]
pub fn line_table(net: &Network) -> Table {
    let mut table = new_table(vec!["Name", "From", "To", "Length, km", "Std type"]);
    for line in &net.line {
        table.add_row(vec![
            Cell::new(&line.name),
            Cell::new(line.from_bus),
            Cell::new(line.to_bus),
            Cell::new(format!("{:.3}", line.length_km)).set_alignment(CellAlignment::Right),
            Cell::new(&line.std_type),
        ]);
    }
    table
}

#[must_use]
pub fn trafo_table(net: &Network) -> Table {
    let mut table = new_table(vec!["Name", "HV bus", "LV bus", "sn_mva", "Std type"]);
    for trafo in &net.trafo {
        table.add_row(vec![
            Cell::new(&trafo.name),
            Cell::new(trafo.hv_bus),
            Cell::new(trafo.lv_bus),
            Cell::new(format!("{:.2}", trafo.sn_mva)).set_alignment(CellAlignment::Right),
            Cell::new(&trafo.std_type),
        ]);
    }
    table
}

/// Connection records of a single asset.
#[must_use]
pub fn connection_table(asset: &Asset) -> Table {
    let mut table = new_table(vec!["Terminal", "Connectivity node", "Latitude", "Longitude"]);
    for (terminal, connection) in asset.connections.iter().enumerate() {
        table.add_row(vec![
            Cell::new(terminal),
            Cell::new(&connection.connectivity_node_id),
            Cell::new(
                connection
                    .lng_lat
                    .map_or_else(String::new, |lng_lat| format!("{:.6}", lng_lat.latitude)),
            ),
            Cell::new(
                connection
                    .lng_lat
                    .map_or_else(String::new, |lng_lat| format!("{:.6}", lng_lat.longitude)),
            ),
        ]);
    }
    table
}
