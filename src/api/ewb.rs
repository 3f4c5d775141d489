//! [EWB](https://www.zepben.com/) network-model service client.

mod models;
mod response;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

pub use self::models::{Asset, AssetKind, Connection, FeederPayload, LngLat, NodeId};
use self::response::{AssetsResponse, FeederAssetsResponse};
use crate::{api::client, prelude::*};

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new(base_url: Url) -> Result<Self> {
        Ok(Self { client: client::try_new()?, base_url })
    }

    /// Fetch the asset list for a single asset identifier.
    ///
    /// A service-level error report yields [`None`], so callers must check
    /// before use.
    #[instrument(skip_all, fields(asset_id = asset_id))]
    pub async fn get_asset(&self, asset_id: &str) -> Result<Option<Vec<Asset>>> {
        let response: AssetsResponse = self
            .call(&["assets", asset_id])
            .await
            .with_context(|| format!("failed to fetch asset `{asset_id}`"))?;
        Ok(response.into_assets())
    }

    /// Fetch the first feeder entry (assets plus infeeds) for a feeder
    /// identifier.
    #[instrument(skip_all, fields(feeder_id = feeder_id))]
    pub async fn get_feeder_assets(&self, feeder_id: &str) -> Result<Option<FeederPayload>> {
        let response: FeederAssetsResponse = self
            .call(&["feeder-assets", "feeder", feeder_id])
            .await
            .with_context(|| format!("failed to fetch the assets of feeder `{feeder_id}`"))?;
        Ok(response.into_first_feeder())
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    async fn call<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("invalid base URL"))?
            .extend(["ewb", "network", "api", "v1"])
            .extend(segments);
        info!(%url, "Requesting…");
        self.client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to call `{url}`"))?
            .error_for_status()
            .with_context(|| format!("`{url}` failed"))?
            .json()
            .await
            .with_context(|| format!("failed to deserialize the `{url}` response"))
    }
}
