// MediaPackage repository implementation
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_mediapackage::Client;

use crate::application::repositories::{
    OriginEndpointSummary, PackagingChannelSummary, PackagingRepository,
};

#[derive(Debug, Clone)]
pub struct MediaPackageRepository {
    client: Client,
}

impl MediaPackageRepository {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl PackagingRepository for MediaPackageRepository {
    async fn list_channels(&self) -> Result<Vec<PackagingChannelSummary>> {
        let channels = self
            .client
            .list_channels()
            .into_paginator()
            .items()
            .send()
            .collect::<std::result::Result<Vec<_>, _>>()
            .await
            .context("ListChannels failed for MediaPackage")?;

        Ok(channels
            .into_iter()
            .filter_map(|channel| {
                Some(PackagingChannelSummary {
                    id: channel.id?,
                    arn: channel.arn?,
                })
            })
            .collect())
    }

    async fn list_origin_endpoints(&self) -> Result<Vec<OriginEndpointSummary>> {
        let endpoints = self
            .client
            .list_origin_endpoints()
            .into_paginator()
            .items()
            .send()
            .collect::<std::result::Result<Vec<_>, _>>()
            .await
            .context("ListOriginEndpoints failed for MediaPackage")?;

        Ok(endpoints
            .into_iter()
            .filter_map(|endpoint| {
                Some(OriginEndpointSummary {
                    id: endpoint.id?,
                    channel_id: endpoint.channel_id?,
                })
            })
            .collect())
    }
}
