use serde::Deserialize;

use super::models::{Asset, FeederPayload};
use crate::prelude::*;

/// `assets/{asset_id}` response: an `assets` payload or an `errors` report.
#[derive(Deserialize)]
pub struct AssetsResponse {
    #[serde(default)]
    assets: Option<Vec<Asset>>,

    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

impl AssetsResponse {
    /// Extract the payload, mapping a service-level error report to [`None`].
    pub fn into_assets(self) -> Option<Vec<Asset>> {
        if self.errors.is_empty() {
            self.assets
        } else {
            warn!(errors = ?self.errors, "EWB reported errors");
            None
        }
    }
}

/// `feeder-assets/feeder/{feeder_id}` response: a `feeders` payload or an
/// `errors` report.
#[derive(Deserialize)]
pub struct FeederAssetsResponse {
    #[serde(default)]
    feeders: Vec<FeederPayload>,

    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

impl FeederAssetsResponse {
    pub fn into_first_feeder(self) -> Option<FeederPayload> {
        if self.errors.is_empty() {
            self.feeders.into_iter().next()
        } else {
            warn!(errors = ?self.errors, "EWB reported errors");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_errors_yield_none_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"{"errors": [{"message": "asset not found"}]}"#;
        assert!(serde_json::from_str::<AssetsResponse>(RESPONSE)?.into_assets().is_none());
        Ok(())
    }

    #[test]
    fn test_assets_payload_ok() -> Result {
        // language=JSON
        const RESPONSE: &str =
            r#"{"assets": [{"id": "cond-1", "type": "Conductor", "voltage": 415}]}"#;
        let assets =
            serde_json::from_str::<AssetsResponse>(RESPONSE)?.into_assets().expect("no errors");
        assert_eq!(assets.len(), 1);
        Ok(())
    }

    #[test]
    fn test_feeders_empty_yield_none_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"{"feeders": []}"#;
        assert!(
            serde_json::from_str::<FeederAssetsResponse>(RESPONSE)?.into_first_feeder().is_none()
        );
        Ok(())
    }

    #[test]
    fn test_feeders_first_entry_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "feeders": [
                    {"assets": [], "infeeds": ["tx-1"]},
                    {"assets": [], "infeeds": ["tx-2"]}
                ]
            }
        "#;
        let payload = serde_json::from_str::<FeederAssetsResponse>(RESPONSE)?
            .into_first_feeder()
            .expect("no errors");
        assert_eq!(payload.infeeds, ["tx-1"]);
        Ok(())
    }
}
