use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::Url;

use crate::core::PopulateOptions;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: fetch the feeder, build the power-flow network, and
    /// export the CSV snapshots.
    #[clap(name = "build")]
    Build(Box<BuildArgs>),

    /// Development tools against the EWB service.
    #[clap(name = "debug-ewb")]
    DebugEwb(Box<DebugEwbArgs>),
}

#[derive(Parser)]
pub struct EwbApiArgs {
    /// EWB service base URL. For example: `http://dev.cppal.ednar.net:9002`.
    #[clap(long = "ewb-base-url", env = "EWB_BASE_URL")]
    pub base_url: Url,
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Feeder identifier. For example: `AL002`.
    #[clap(long = "feeder-id", env = "FEEDER_ID")]
    pub feeder_id: String,

    /// Directory for the CSV snapshots.
    #[clap(long = "output-path", env = "OUTPUT_PATH", default_value = ".")]
    pub output_path: PathBuf,

    #[clap(flatten)]
    pub ewb: EwbApiArgs,

    #[clap(flatten)]
    pub network: NetworkArgs,
}

#[derive(Parser)]
pub struct NetworkArgs {
    /// Substituted for zero conductor lengths.
    #[clap(long = "min-line-length-km", default_value = "0.01", env = "MIN_LINE_LENGTH_KM")]
    pub min_line_length_km: f64,

    /// Standard type of the created lines.
    #[clap(long = "line-std-type", default_value = "NAYY 4x50 SE", env = "LINE_STD_TYPE")]
    pub line_std_type: String,

    /// Standard type of the created transformers.
    #[clap(long = "trafo-std-type", default_value = "0.4 MVA 20/0.4 kV", env = "TRAFO_STD_TYPE")]
    pub trafo_std_type: String,
}

impl NetworkArgs {
    #[must_use]
    pub fn populate_options(&self) -> PopulateOptions {
        PopulateOptions {
            min_line_length_km: self.min_line_length_km,
            line_std_type: self.line_std_type.clone(),
            trafo_std_type: self.trafo_std_type.clone(),
        }
    }
}

#[derive(Parser)]
pub struct DebugEwbArgs {
    #[clap(flatten)]
    pub ewb: EwbApiArgs,

    #[command(subcommand)]
    pub command: DebugEwbCommand,
}

#[derive(Subcommand)]
pub enum DebugEwbCommand {
    /// Fetch a single asset and print its connection records.
    Asset(DebugAssetArgs),

    /// Fetch the raw feeder payload and print a summary.
    FeederAssets(DebugFeederAssetsArgs),
}

#[derive(Parser)]
pub struct DebugAssetArgs {
    #[clap(long = "asset-id", env = "ASSET_ID")]
    pub asset_id: String,
}

#[derive(Parser)]
pub struct DebugFeederAssetsArgs {
    /// Feeder identifier. For example: `AL002`.
    #[clap(long = "feeder-id", env = "FEEDER_ID")]
    pub feeder_id: String,
}
