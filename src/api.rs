mod client;
mod ewb;

pub use self::ewb::{Api as Ewb, Asset, AssetKind, Connection, FeederPayload, LngLat, NodeId};
