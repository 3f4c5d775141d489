mod api;
mod cli;
mod core;
mod export;
mod network;
mod prelude;
mod render;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    api::Ewb,
    cli::{Args, Command, DebugEwbCommand},
    core::Feeder,
    network::Network,
    prelude::*,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match Args::parse().command {
        Command::Build(args) => {
            let api = Ewb::try_new(args.ewb.base_url.clone())?;
            let payload = api
                .get_feeder_assets(&args.feeder_id)
                .await?
                .with_context(|| format!("no feeder data for `{}`", args.feeder_id))?;
            info!(n_assets = payload.assets.len(), "Fetched the feeder");

            let feeder = Feeder::try_from_payload(args.feeder_id.clone(), payload)?;
            info!(
                infeeder_id = %feeder.infeeder_id,
                base_voltage = feeder.base_voltage,
                n_buses = feeder.buses.len(),
                "Built the feeder",
            );
            let options = args.network.populate_options();
            let mut net = Network::default();
            feeder.create_buses(&mut net);
            feeder.create_lines(&mut net, &options)?;
            feeder.create_transformers(&mut net, &options)?;
            feeder.create_external_grid(&mut net)?;

            println!("{}", render::bus_table(&net));
            println!("{}", render::line_table(&net));
            println!("{}", render::trafo_table(&net));

            export::write_snapshots(&args.output_path, &feeder, &net)
        }

        Command::DebugEwb(args) => {
            let api = Ewb::try_new(args.ewb.base_url.clone())?;
            match args.command {
                DebugEwbCommand::Asset(asset_args) => {
                    let assets = api
                        .get_asset(&asset_args.asset_id)
                        .await?
                        .with_context(|| format!("no data for asset `{}`", asset_args.asset_id))?;
                    for asset in &assets {
                        info!(
                            id = %asset.id,
                            kind = %asset.kind,
                            voltage = asset.voltage,
                            "Gotcha",
                        );
                        println!("{}", render::connection_table(asset));
                    }
                    Ok(())
                }

                DebugEwbCommand::FeederAssets(feeder_args) => {
                    let payload = api
                        .get_feeder_assets(&feeder_args.feeder_id)
                        .await?
                        .with_context(|| {
                            format!("no feeder data for `{}`", feeder_args.feeder_id)
                        })?;
                    info!(
                        n_assets = payload.assets.len(),
                        infeeds = %payload.infeeds.join(","),
                        "Gotcha",
                    );
                    Ok(())
                }
            }
        }
    }
}
