use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use address_input_boundary as json;
use address_input_core::{
    codec,
    entities::{AddressRecord, MapPoint},
};

use crate::{config::Config, replay};

#[derive(Parser)]
#[command(version, about = "Address input with map assisted search")]
struct Args {
    /// Configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a serialized form value and print the normalized record
    Decode {
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Serialize an address record as it would be emitted
    Encode {
        #[arg(long)]
        address: String,
        /// Position as LAT,LNG in degrees
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        pos: Option<MapPoint>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Replay a scripted session (JSON) and print the report
    Replay {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Decode { value } => {
            match codec::decode(&value)? {
                Some(record) => {
                    let record = json::AddressRecord::from(record);
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }
                None => {
                    println!("empty");
                }
            }
        }
        Command::Encode { address, pos, url } => {
            let record = AddressRecord { pos, address, url };
            println!("{}", codec::encode(&record));
        }
        Command::Replay { script } => {
            let cfg = Config::try_load_from_file_or_default(args.config.as_ref())?;
            let json = fs::read_to_string(&script)
                .with_context(|| format!("Unable to read {}", script.display()))?;
            let script = replay::load_script(&json)?;
            let report = replay::replay(cfg.props, cfg.settings, script);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn negative_coordinates() {
        let args = Args::try_parse_from([
            "address-input",
            "encode",
            "--address",
            "Somewhere",
            "--pos",
            "-33.9,-70.6",
        ])
        .unwrap();
        let Command::Encode { pos, .. } = args.command else {
            panic!("Unexpected command");
        };
        assert_eq!(Some(MapPoint::from_lat_lng_deg(-33.9, -70.6)), pos);
    }

    #[test]
    fn global_config_flag() {
        let args =
            Args::try_parse_from(["address-input", "replay", "session.json", "--config", "a.toml"])
                .unwrap();
        assert_eq!(Some(PathBuf::from("a.toml")), args.config);
    }
}
