// Discovered channel topology for one MediaLive channel
use crate::error::{DashboardError, Result};

/// A MediaPackage channel fed by the encoder, with its origin endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingChannel {
    pub name: String,
    pub endpoint_ids: Vec<String>,
}

impl PackagingChannel {
    pub fn new(name: impl Into<String>, endpoint_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            endpoint_ids,
        }
    }
}

/// One `(ChannelId, OutputName, Pipeline)` combination reporting data for
/// `metric_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDimension {
    pub metric_name: String,
    pub channel_id: String,
    pub output_name: String,
    pub pipeline: String,
}

/// Everything discovered about one encoder channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelGroup {
    pub channel_id: String,
    pub channel_name: String,
    pub output_group_names: Vec<String>,
    pub output_dimensions: Vec<OutputDimension>,
    pub packaging_channels: Vec<PackagingChannel>,
}

impl ChannelGroup {
    /// A group without a channel name or without packaging channels cannot be
    /// shown; endpoint lists may be empty.
    pub fn validate(&self) -> Result<()> {
        if self.channel_name.is_empty() {
            return Err(DashboardError::missing_data(
                &self.channel_id,
                "MediaLive channel name is empty",
            ));
        }
        if self.packaging_channels.is_empty() {
            return Err(DashboardError::missing_data(
                &self.channel_id,
                "no MediaPackage channels resolved from the channel destinations",
            ));
        }
        Ok(())
    }

    pub fn packaging_names(&self) -> impl Iterator<Item = &str> {
        self.packaging_channels.iter().map(|c| c.name.as_str())
    }

    /// `(packaging channel name, endpoint id)` pairs in discovery order.
    pub fn endpoint_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.packaging_channels.iter().flat_map(|c| {
            c.endpoint_ids
                .iter()
                .map(move |e| (c.name.as_str(), e.as_str()))
        })
    }
}

/// Extract the MediaPackage channel unique id from a MediaLive destination
/// URL in `region`.
///
/// v1: `https://<host>.mediapackage.<region>.amazonaws.com/in/v1/<uid>/channel`
/// v2: `https://<host>.mediapackage.<region>.amazonaws.com/in/v2/<uid>/<uid>/channel`
pub fn packaging_channel_uid(url: &str, region: &str) -> Option<String> {
    if !url.contains(&format!("mediapackage.{}", region)) {
        return None;
    }

    let parts: Vec<&str> = url.split('/').collect();
    let expected_len = if url.contains("/v1/") {
        7
    } else if url.contains("/v2/") {
        8
    } else {
        return None;
    };

    if parts.len() == expected_len {
        Some(parts[5].to_string())
    } else {
        None
    }
}

/// Unique ids of all MediaPackage channels referenced by `urls`, first-seen order.
pub fn packaging_channel_uids<'a, I>(urls: I, region: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut uids: Vec<String> = Vec::new();
    for url in urls {
        match packaging_channel_uid(url, region) {
            Some(uid) if !uids.contains(&uid) => uids.push(uid),
            Some(_) => {}
            None => tracing::debug!("Ignoring destination URL {} for region {}", url, region),
        }
    }
    uids
}
