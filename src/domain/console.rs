// Console link rendering for the summary text widget
use std::collections::HashMap;

use super::arn::Region;
use super::channel::ChannelGroup;

pub const DEFAULT_MEDIALIVE_URL: &str =
    "https://${region}.console.aws.amazon.com/medialive/home?region=${region}#/channels/${channel_id}";
pub const DEFAULT_MEDIAPACKAGE_URL: &str =
    "https://${region}.console.aws.amazon.com/mediapackage/home?region=${region}#/channels/${channel_name}";

/// URL patterns for the encoder and packaging consoles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLinks {
    pub medialive_url: String,
    pub mediapackage_url: String,
}

impl Default for ConsoleLinks {
    fn default() -> Self {
        Self {
            medialive_url: DEFAULT_MEDIALIVE_URL.to_string(),
            mediapackage_url: DEFAULT_MEDIAPACKAGE_URL.to_string(),
        }
    }
}

impl ConsoleLinks {
    pub fn new(medialive_url: impl Into<String>, mediapackage_url: impl Into<String>) -> Self {
        Self {
            medialive_url: medialive_url.into(),
            mediapackage_url: mediapackage_url.into(),
        }
    }

    /// One markdown line linking the encoder channel and its packaging channels.
    pub fn line(&self, region: &Region, group: &ChannelGroup) -> String {
        let mut vars = HashMap::new();
        vars.insert("region".to_string(), region.to_string());
        vars.insert("channel_id".to_string(), group.channel_id.clone());
        vars.insert("channel_name".to_string(), group.channel_name.clone());

        let mut line = format!(
            "MediaLive: [{} - {}]({}) MediaPackage: ",
            group.channel_name,
            group.channel_id,
            prepare_url(&self.medialive_url, &vars)
        );

        let packaging_links: Vec<String> = group
            .packaging_names()
            .map(|name| {
                vars.insert("channel_name".to_string(), name.to_string());
                format!(" [{}]({})", name, prepare_url(&self.mediapackage_url, &vars))
            })
            .collect();
        line.push_str(&packaging_links.join(" , "));
        line.push_str("   \n");
        line
    }
}

/// Replace `${key}` placeholders in a URL pattern with URL-encoded values.
pub fn prepare_url(pattern: &str, vars: &HashMap<String, String>) -> String {
    let mut result = pattern.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }
    result
}
