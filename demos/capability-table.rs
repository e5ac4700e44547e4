//! Print which governance updates exist in which chain parameter version.
use clap::AppSettings;
use concordium_governance_updates::types::{
    CapabilityFlag, ChainParameterVersion, PayloadSchema, ProtocolVersion, UpdateKind,
};
use structopt::StructOpt;

#[derive(StructOpt)]
struct App {
    #[structopt(
        long = "protocol-version",
        help = "Only show the version used by this protocol version."
    )]
    protocol_version: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let app = {
        let app = App::clap().global_setting(AppSettings::ColoredHelp);
        let matches = app.get_matches();
        App::from_clap(&matches)
    };

    let versions = match app.protocol_version {
        Some(pv) => vec![ProtocolVersion::try_from(pv)?.chain_parameter_version()],
        None => ChainParameterVersion::ALL.to_vec(),
    };

    print!("{:<40}", "feature");
    for version in &versions {
        print!("{:>6}", version.to_string());
    }
    println!();
    for flag in CapabilityFlag::ALL {
        print!("{:<40}", flag.to_string());
        for version in &versions {
            print!("{:>6}", if version.supports(flag) { "yes" } else { "-" });
        }
        println!();
    }

    for version in versions {
        println!();
        println!("Updates in {version}:");
        for kind in UpdateKind::ALL.into_iter().filter(|k| k.is_supported(version)) {
            println!(
                "  {:<35} {}",
                kind.to_string(),
                PayloadSchema::select(kind, version)
            );
        }
    }
    Ok(())
}
