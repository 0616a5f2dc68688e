// MediaLive repository implementation
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_medialive::Client;

use crate::application::repositories::{EncoderChannel, EncoderRepository};

#[derive(Debug, Clone)]
pub struct MediaLiveRepository {
    client: Client,
}

impl MediaLiveRepository {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl EncoderRepository for MediaLiveRepository {
    async fn describe_channel(&self, channel_id: &str) -> Result<EncoderChannel> {
        let response = self
            .client
            .describe_channel()
            .channel_id(channel_id)
            .send()
            .await
            .with_context(|| format!("DescribeChannel failed for MediaLive channel {}", channel_id))?;

        let destination_urls = response
            .destinations()
            .iter()
            .flat_map(|destination| destination.settings())
            .filter_map(|settings| settings.url())
            .map(str::to_string)
            .collect();

        let output_group_names = response
            .encoder_settings()
            .map(|settings| {
                settings
                    .output_groups()
                    .iter()
                    .filter_map(|group| group.name())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!("Described MediaLive channel {}: {:?}", channel_id, response.name());

        Ok(EncoderChannel {
            name: response.name().map(str::to_string),
            destination_urls,
            output_group_names,
        })
    }
}
