//! Check the files a node reads at startup: the runtime parameters and the
//! versioned genesis data. Optionally also check a governance update.
//!
//! Exits with a non-zero status and a description of the offending field or
//! version if any of the files is rejected.
use anyhow::Context;
use clap::AppSettings;
use concordium_governance_updates::{
    runtime_parameters::RuntimeParameters,
    types::{
        identity::{AnonymityRevokers, CryptographicParameters, IdentityProviders},
        UpdateValue,
    },
    versioned,
};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::Level;

#[derive(StructOpt)]
struct App {
    #[structopt(
        long = "runtime-parameters",
        help = "JSON file with the runtime parameters. The defaults are checked if absent."
    )]
    runtime_parameters:       Option<PathBuf>,
    #[structopt(long = "identity-providers", help = "Versioned identity providers.")]
    identity_providers:       Option<PathBuf>,
    #[structopt(long = "anonymity-revokers", help = "Versioned anonymity revokers.")]
    anonymity_revokers:       Option<PathBuf>,
    #[structopt(
        long = "cryptographic-parameters",
        help = "Versioned global cryptographic parameters."
    )]
    cryptographic_parameters: Option<PathBuf>,
    #[structopt(long = "update", help = "JSON file with a governance update.")]
    update:                   Option<PathBuf>,
    #[structopt(long = "verbose", help = "Log the reasons for rejecting inputs.")]
    verbose:                  bool,
}

fn main() -> anyhow::Result<()> {
    let app = {
        let app = App::clap().global_setting(AppSettings::ColoredHelp);
        let matches = app.get_matches();
        App::from_clap(&matches)
    };

    {
        use tracing_subscriber::prelude::*;
        let level = if app.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        };
        let log_filter = tracing_subscriber::filter::Targets::new()
            .with_target(module_path!(), Level::INFO)
            .with_target("ccd_updates", level);
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(log_filter)
            .init();
    }

    let params = match &app.runtime_parameters {
        Some(path) => RuntimeParameters::from_file(path)
            .with_context(|| format!("Invalid runtime parameters in {}.", path.display()))?,
        None => RuntimeParameters::default(),
    };
    params
        .validate()
        .context("Default runtime parameters are invalid.")?;
    println!(
        "Runtime parameters: block size {} bytes, block timeout {}ms.",
        params.block_size,
        params.block_timeout.num_milliseconds()
    );

    if let Some(path) = &app.identity_providers {
        let ips: IdentityProviders = versioned::read_file(path)
            .with_context(|| format!("Invalid identity providers in {}.", path.display()))?;
        println!("{} identity providers.", ips.len());
    }
    if let Some(path) = &app.anonymity_revokers {
        let ars: AnonymityRevokers = versioned::read_file(path)
            .with_context(|| format!("Invalid anonymity revokers in {}.", path.display()))?;
        println!("{} anonymity revokers.", ars.len());
    }
    if let Some(path) = &app.cryptographic_parameters {
        let params: CryptographicParameters = versioned::read_file(path).with_context(|| {
            format!("Invalid cryptographic parameters in {}.", path.display())
        })?;
        println!("Cryptographic parameters for {:?}.", params.genesis_string);
    }
    if let Some(path) = &app.update {
        let contents = std::fs::read(path)
            .with_context(|| format!("Could not read update {}.", path.display()))?;
        let update: UpdateValue = serde_json::from_slice(&contents)
            .with_context(|| format!("Invalid update in {}.", path.display()))?;
        println!(
            "Update of kind {} for {} is valid.",
            update.kind(),
            update.version()
        );
    }
    Ok(())
}
