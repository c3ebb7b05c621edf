use duration_str::deserialize_duration;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("address-input.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub widget: Option<Widget>,
    pub map: Option<Map>,
    pub provider: Option<Provider>,
    pub advisory: Option<Advisory>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Widget {
    pub id: String,
    pub label: Option<String>,
    pub extra: Option<String>,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub with_label: bool,
    #[serde(default = "enabled")]
    pub with_map: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default = "enabled")]
    pub inline_error: bool,
}

impl Default for Widget {
    fn default() -> Self {
        Config::default().widget.expect("Widget configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub zoom: u8,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Provider {
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Advisory {
    #[serde(deserialize_with = "deserialize_duration")]
    pub no_results_delay: Duration,
}

impl Default for Advisory {
    fn default() -> Self {
        Config::default().advisory.expect("Advisory configuration")
    }
}

const fn enabled() -> bool {
    true
}
