use anyhow::{anyhow, Result};
use std::{env, fs, io::ErrorKind, path::Path};

use address_input_core::{
    entities::MapPoint,
    widget::{Props, Settings},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "address-input.toml";

const ENV_NAME_API_KEY: &str = "ADDRESS_INPUT_API_KEY";

const MAX_ZOOM: u8 = 22;

pub struct Config {
    pub props: Props,
    pub settings: Settings,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map_or_else(
            || {
                log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
                Path::new(DEFAULT_CONFIG_FILE_NAME)
            },
            AsRef::as_ref,
        );

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(api_key) = env::var(ENV_NAME_API_KEY) {
            cfg.props.api_key = api_key;
        }
        if cfg.props.api_key.is_empty() {
            log::warn!("No map provider API key found");
        }
        Ok(cfg)
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            widget,
            map,
            provider,
            advisory,
        } = from;

        let raw::Widget {
            id,
            label,
            extra,
            placeholder,
            with_label,
            with_map,
            required,
            disabled,
            inline_error,
        } = widget.unwrap_or_default();

        if id.trim().is_empty() {
            return Err(anyhow!("Missing widget id"));
        }

        let raw::Provider { api_key } = provider.unwrap_or_default();

        let props = Props {
            id,
            label: label.unwrap_or_default(),
            extra,
            placeholder: placeholder.unwrap_or_default(),
            with_label,
            with_map,
            required,
            disabled,
            inline_error,
            api_key: api_key.unwrap_or_default(),
        };

        let raw::Map {
            default_center_lat,
            default_center_lng,
            zoom,
        } = map.unwrap_or_default();

        let default_center = MapPoint::try_from_lat_lng_deg(default_center_lat, default_center_lng)
            .ok_or_else(|| {
                anyhow!("Invalid default center: {default_center_lat},{default_center_lng}")
            })?;
        if zoom > MAX_ZOOM {
            return Err(anyhow!("Zoom level {zoom} exceeds {MAX_ZOOM}"));
        }

        let raw::Advisory { no_results_delay } = advisory.unwrap_or_default();

        let settings = Settings {
            default_center,
            zoom,
            no_results_delay,
        };

        Ok(Self { props, settings })
    }
}
