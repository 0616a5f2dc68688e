// Discovery service - Assembles a ChannelGroup from the AWS APIs
use std::sync::Arc;

use crate::application::repositories::{
    EncoderRepository, MetricDimensionRepository, PackagingRepository,
};
use crate::domain::arn::{ChannelArn, Region};
use crate::domain::channel::{ChannelGroup, PackagingChannel, packaging_channel_uids};
use crate::domain::metrics::OUTPUT_VIDEO_FRAME_RATE;
use crate::error::{DashboardError, Result};

#[derive(Clone)]
pub struct ChannelDiscoveryService {
    encoder: Arc<dyn EncoderRepository>,
    dimensions: Arc<dyn MetricDimensionRepository>,
    packaging: Arc<dyn PackagingRepository>,
    output_metric: String,
}

impl ChannelDiscoveryService {
    pub fn new(
        encoder: Arc<dyn EncoderRepository>,
        dimensions: Arc<dyn MetricDimensionRepository>,
        packaging: Arc<dyn PackagingRepository>,
    ) -> Self {
        Self {
            encoder,
            dimensions,
            packaging,
            output_metric: OUTPUT_VIDEO_FRAME_RATE.to_string(),
        }
    }

    /// Metric probed for reporting outputs; defaults to `OutputVideoFrameRate`.
    pub fn with_output_metric(mut self, metric: impl Into<String>) -> Self {
        self.output_metric = metric.into();
        self
    }

    pub async fn discover(&self, arn: &ChannelArn, region: &Region) -> Result<ChannelGroup> {
        let channel_id = arn.channel_id();
        tracing::info!("Retrieving information from MediaLive channel {}", arn);

        let encoder = self
            .encoder
            .describe_channel(channel_id)
            .await
            .map_err(|source| discovery_error(channel_id, source))?;

        let channel_name = encoder
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DashboardError::missing_data(channel_id, "channel has no name"))?;

        let packaging_urls: Vec<&str> = encoder
            .destination_urls
            .iter()
            .map(String::as_str)
            .filter(|url| url.contains("mediapackage"))
            .collect();
        if packaging_urls.is_empty() {
            return Err(DashboardError::missing_data(
                channel_id,
                "no MediaPackage destinations in the channel configuration",
            ));
        }
        tracing::info!("MediaLive channel name: {}", channel_name);

        let output_dimensions = self
            .dimensions
            .output_dimensions(channel_id, &self.output_metric)
            .await
            .map_err(|source| discovery_error(channel_id, source))?;
        tracing::debug!(
            "Found {} {} dimension combinations for channel {}",
            output_dimensions.len(),
            self.output_metric,
            channel_id
        );

        tracing::info!("Retrieving information from the MediaPackage channels");
        let packaging_channels = self
            .packaging_channels(channel_id, &packaging_urls, region)
            .await?;

        Ok(ChannelGroup {
            channel_id: channel_id.to_string(),
            channel_name,
            output_group_names: encoder.output_group_names,
            output_dimensions,
            packaging_channels,
        })
    }

    async fn packaging_channels(
        &self,
        channel_id: &str,
        urls: &[&str],
        region: &Region,
    ) -> Result<Vec<PackagingChannel>> {
        let uids = packaging_channel_uids(urls.iter().copied(), region.as_str());
        if uids.is_empty() {
            tracing::warn!(
                "No MediaPackage destination of channel {} is in region {}",
                channel_id,
                region
            );
            return Ok(Vec::new());
        }

        let listed = self
            .packaging
            .list_channels()
            .await
            .map_err(|source| discovery_error(channel_id, source))?;
        let names: Vec<String> = listed
            .into_iter()
            .filter(|c| uids.iter().any(|uid| uid == c.uid()))
            .map(|c| c.id)
            .collect();

        let endpoints = self
            .packaging
            .list_origin_endpoints()
            .await
            .map_err(|source| discovery_error(channel_id, source))?;

        Ok(names
            .into_iter()
            .map(|name| {
                let endpoint_ids = endpoints
                    .iter()
                    .filter(|e| e.channel_id == name)
                    .map(|e| e.id.clone())
                    .collect();
                PackagingChannel::new(name, endpoint_ids)
            })
            .collect())
    }
}

fn discovery_error(channel_id: &str, source: anyhow::Error) -> DashboardError {
    DashboardError::Discovery {
        channel: channel_id.to_string(),
        source,
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::repositories::*;
    use crate::domain::channel::OutputDimension;
    use crate::domain::metrics::OUTPUT_VIDEO_FRAME_RATE;

    #[derive(Default)]
    pub struct FakeAws {
        pub channels: Vec<(String, EncoderChannel)>,
        pub dimensions: Vec<OutputDimension>,
        pub packaging: Vec<PackagingChannelSummary>,
        pub endpoints: Vec<OriginEndpointSummary>,
        pub fail_listing: bool,
        pub calls: Mutex<Vec<String>>,
        pub published: Mutex<Vec<(String, String)>>,
        pub reject_publish: bool,
    }

    impl FakeAws {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EncoderRepository for FakeAws {
        async fn describe_channel(&self, channel_id: &str) -> anyhow::Result<EncoderChannel> {
            self.record(format!("describe_channel:{channel_id}"));
            self.channels
                .iter()
                .find(|(id, _)| id == channel_id)
                .map(|(_, c)| c.clone())
                .ok_or_else(|| anyhow::anyhow!("NotFoundException: channel {channel_id}"))
        }
    }

    #[async_trait]
    impl MetricDimensionRepository for FakeAws {
        async fn output_dimensions(
            &self,
            channel_id: &str,
            metric_name: &str,
        ) -> anyhow::Result<Vec<OutputDimension>> {
            self.record(format!("list_metrics:{metric_name}"));
            Ok(self
                .dimensions
                .iter()
                .filter(|d| d.channel_id == channel_id)
                .map(|d| OutputDimension {
                    metric_name: metric_name.to_string(),
                    ..d.clone()
                })
                .collect())
        }
    }

    #[async_trait]
    impl PackagingRepository for FakeAws {
        async fn list_channels(&self) -> anyhow::Result<Vec<PackagingChannelSummary>> {
            self.record("list_channels");
            if self.fail_listing {
                anyhow::bail!("AccessDeniedException");
            }
            Ok(self.packaging.clone())
        }

        async fn list_origin_endpoints(&self) -> anyhow::Result<Vec<OriginEndpointSummary>> {
            self.record("list_origin_endpoints");
            Ok(self.endpoints.clone())
        }
    }

    #[async_trait]
    impl DashboardPublisher for FakeAws {
        async fn put_dashboard(&self, name: &str, body: &str) -> anyhow::Result<Vec<String>> {
            self.record(format!("put_dashboard:{name}"));
            if self.reject_publish {
                anyhow::bail!("InvalidParameterInput: dashboard body invalid");
            }
            self.published
                .lock()
                .unwrap()
                .push((name.to_string(), body.to_string()));
            Ok(Vec::new())
        }
    }

    pub fn mp_url(uid: &str) -> String {
        format!("https://abcd.mediapackage.us-west-2.amazonaws.com/in/v1/{uid}/channel")
    }

    pub fn mp_url_v2(uid: &str) -> String {
        format!("https://abcd-1.ingest.mediapackage.us-west-2.amazonaws.com/in/v2/{uid}/{uid}/channel")
    }

    /// Channel `123` named `Ch1` feeding two MediaPackage channels with
    /// three endpoints between them.
    pub fn single_channel() -> FakeAws {
        FakeAws {
            channels: vec![(
                "123".into(),
                EncoderChannel {
                    name: Some("Ch1".into()),
                    destination_urls: vec![
                        mp_url("uid-a"),
                        mp_url_v2("uid-b"),
                        "rtmp://example.com/live/backup".into(),
                    ],
                    output_group_names: vec!["HLS".into()],
                },
            )],
            dimensions: vec![
                OutputDimension {
                    metric_name: OUTPUT_VIDEO_FRAME_RATE.into(),
                    channel_id: "123".into(),
                    output_name: "1080p".into(),
                    pipeline: "0".into(),
                },
                OutputDimension {
                    metric_name: OUTPUT_VIDEO_FRAME_RATE.into(),
                    channel_id: "123".into(),
                    output_name: "1080p".into(),
                    pipeline: "1".into(),
                },
            ],
            packaging: vec![
                PackagingChannelSummary {
                    id: "unrelated".into(),
                    arn: "arn:aws:mediapackage:us-west-2:0123456789:channels/uid-z".into(),
                },
                PackagingChannelSummary {
                    id: "live-a".into(),
                    arn: "arn:aws:mediapackage:us-west-2:0123456789:channels/uid-a".into(),
                },
                PackagingChannelSummary {
                    id: "live-b".into(),
                    arn: "arn:aws:mediapackage:us-west-2:0123456789:channels/uid-b".into(),
                },
            ],
            endpoints: vec![
                OriginEndpointSummary {
                    id: "live-a-hls".into(),
                    channel_id: "live-a".into(),
                },
                OriginEndpointSummary {
                    id: "unrelated-hls".into(),
                    channel_id: "unrelated".into(),
                },
                OriginEndpointSummary {
                    id: "live-b-hls".into(),
                    channel_id: "live-b".into(),
                },
                OriginEndpointSummary {
                    id: "live-a-dash".into(),
                    channel_id: "live-a".into(),
                },
            ],
            ..Default::default()
        }
    }
}
