use serde::{Deserialize, Deserializer, Serialize, de};

/// Identifier of a topological point where grid assets electrically connect.
///
/// Every distinct node becomes one bus in the power-flow network.
#[derive(
    Clone,
    Debug,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    derive_more::AsRef,
    derive_more::Display,
    derive_more::From,
)]
pub struct NodeId(pub String);

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Asset type tag.
///
/// Only conductors and distribution transformers take part in network
/// population; any other tag is carried through untouched.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, derive_more::Display)]
#[serde(from = "String", into = "String")]
pub enum AssetKind {
    Conductor,
    DistTransformer,
    #[display("{_0}")]
    Other(String),
}

impl From<String> for AssetKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Conductor" => Self::Conductor,
            "DistTransformer" => Self::DistTransformer,
            _ => Self::Other(tag),
        }
    }
}

impl From<AssetKind> for String {
    fn from(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Conductor => "Conductor".to_string(),
            AssetKind::DistTransformer => "DistTransformer".to_string(),
            AssetKind::Other(tag) => tag,
        }
    }
}

/// One piece of grid equipment as returned by the service. Immutable after
/// fetch.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Asset {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,

    /// Display name; distribution transformers are deduplicated by it.
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: AssetKind,

    /// Nominal voltage in volts.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub voltage: f64,

    /// Conductor length in kilometres.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub length: f64,

    /// Ordered endpoints; the first one is the head end.
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// One endpoint of an asset.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Connection {
    #[serde(rename = "connectivityNodeId")]
    pub connectivity_node_id: NodeId,

    /// Geographic position of the connection point, when the service knows it.
    #[serde(rename = "lngLat", default)]
    pub lng_lat: Option<LngLat>,
}

/// Geographic coordinates in degrees.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct LngLat {
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: f64,
}

/// One entry of the `feeders` array: the asset list plus the identifiers of
/// the assets feeding the segment.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FeederPayload {
    #[serde(default)]
    pub assets: Vec<Asset>,

    #[serde(default, deserialize_with = "lenient_string_seq")]
    pub infeeds: Vec<String>,
}

/// The service is not consistent about quoting numbers, so accept both.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(number) => {
            number.as_f64().ok_or_else(|| de::Error::custom("the number does not fit an `f64`"))
        }
        serde_json::Value::String(string) => string.parse().map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Str(&string), &"a numeric string")
        }),
        value => Err(de::Error::custom(format!("expected a number, got `{value}`"))),
    }
}

/// Identifiers arrive as either strings or bare numbers.
fn stringify<E: de::Error>(value: serde_json::Value) -> Result<String, E> {
    match value {
        serde_json::Value::String(string) => Ok(string),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        value => Err(de::Error::custom(format!("expected an identifier, got `{value}`"))),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    stringify(serde_json::Value::deserialize(deserializer)?)
}

fn lenient_string_seq<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<serde_json::Value>::deserialize(deserializer)?.into_iter().map(stringify).collect()
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    use super::*;

    #[test]
    fn test_deserialize_asset_ok() -> Result {
        // language=JSON
        const ASSET: &str = r#"
            {
                "id": "cond-42",
                "name": "Overhead 42",
                "type": "Conductor",
                "voltage": "415",
                "length": 0.25,
                "connections": [
                    {"connectivityNodeId": "cn-a", "lngLat": {"longitude": 145.21, "latitude": "-37.81"}},
                    {"connectivityNodeId": "cn-b", "lngLat": null}
                ]
            }
        "#;
        let asset = serde_json::from_str::<Asset>(ASSET)?;
        assert_eq!(asset.kind, AssetKind::Conductor);
        assert_eq!(asset.voltage, 415.0);
        assert_eq!(asset.length, 0.25);
        assert_eq!(asset.connections[0].connectivity_node_id, NodeId::from("cn-a"));
        assert_eq!(
            asset.connections[0].lng_lat,
            Some(LngLat { longitude: 145.21, latitude: -37.81 }),
        );
        assert!(asset.connections[1].lng_lat.is_none());
        Ok(())
    }

    #[test]
    fn test_deserialize_unknown_kind_ok() -> Result {
        // language=JSON
        const ASSET: &str = r#"{"id": "sw-1", "type": "Switch", "voltage": 415}"#;
        let asset = serde_json::from_str::<Asset>(ASSET)?;
        assert_eq!(asset.kind, AssetKind::Other("Switch".to_string()));
        assert!(asset.connections.is_empty());
        Ok(())
    }

    #[test]
    fn test_deserialize_numeric_identifiers_ok() -> Result {
        // language=JSON
        const PAYLOAD: &str = r#"
            {
                "assets": [{"id": 30950287, "type": "Conductor", "voltage": 415}],
                "infeeds": [30950287]
            }
        "#;
        let payload = serde_json::from_str::<FeederPayload>(PAYLOAD)?;
        assert_eq!(payload.assets[0].id, "30950287");
        assert_eq!(payload.infeeds, ["30950287"]);
        Ok(())
    }

    #[test]
    fn test_asset_kind_display_ok() {
        assert_eq!(AssetKind::DistTransformer.to_string(), "DistTransformer");
        assert_eq!(AssetKind::Other("Fuse".to_string()).to_string(), "Fuse");
    }
}
