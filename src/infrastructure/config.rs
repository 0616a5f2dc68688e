use serde::Deserialize;
use std::path::Path;

use crate::domain::console::{ConsoleLinks, DEFAULT_MEDIALIVE_URL, DEFAULT_MEDIAPACKAGE_URL};
use crate::domain::metrics::OUTPUT_VIDEO_FRAME_RATE;

/// Default location, relative to the working directory, without extension.
const DEFAULT_CONFIG: &str = "config/dashboard";
const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub aws: AwsSettings,
    #[serde(default)]
    pub console: ConsoleSettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AwsSettings {
    /// Named profile from the shared AWS config files.
    pub profile: Option<String>,
    /// Region for CloudWatch; the SDK default chain applies when unset.
    pub cloudwatch_region: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleSettings {
    #[serde(default = "default_medialive_url")]
    pub medialive_url: String,
    #[serde(default = "default_mediapackage_url")]
    pub mediapackage_url: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            medialive_url: default_medialive_url(),
            mediapackage_url: default_mediapackage_url(),
        }
    }
}

impl ConsoleSettings {
    pub fn links(&self) -> ConsoleLinks {
        ConsoleLinks::new(&self.medialive_url, &self.mediapackage_url)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiscoverySettings {
    #[serde(default = "default_output_metric")]
    pub output_metric: String,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            output_metric: default_output_metric(),
        }
    }
}

fn default_medialive_url() -> String {
    DEFAULT_MEDIALIVE_URL.to_string()
}

fn default_mediapackage_url() -> String {
    DEFAULT_MEDIAPACKAGE_URL.to_string()
}

fn default_output_metric() -> String {
    OUTPUT_VIDEO_FRAME_RATE.to_string()
}

/// Load settings from `path` (required) or the optional default file,
/// then apply `DASHBOARD__SECTION__KEY` environment overrides.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG).required(false),
    };

    let settings = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
