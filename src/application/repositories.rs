// Repository traits for the AWS services the generator talks to
use async_trait::async_trait;

use crate::domain::channel::OutputDimension;

/// What `DescribeChannel` tells us about an encoder channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncoderChannel {
    pub name: Option<String>,
    pub destination_urls: Vec<String>,
    pub output_group_names: Vec<String>,
}

/// A MediaPackage channel as listed by `ListChannels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingChannelSummary {
    pub id: String,
    pub arn: String,
}

impl PackagingChannelSummary {
    /// Unique id: the last path segment of the channel ARN.
    pub fn uid(&self) -> &str {
        self.arn.rsplit('/').next().unwrap_or_default()
    }
}

/// A MediaPackage origin endpoint as listed by `ListOriginEndpoints`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginEndpointSummary {
    pub id: String,
    pub channel_id: String,
}

#[async_trait]
pub trait EncoderRepository: Send + Sync {
    async fn describe_channel(&self, channel_id: &str) -> anyhow::Result<EncoderChannel>;
}

#[async_trait]
pub trait MetricDimensionRepository: Send + Sync {
    /// `(ChannelId, OutputName, Pipeline)` combinations currently reporting
    /// `metric_name` for the channel.
    async fn output_dimensions(
        &self,
        channel_id: &str,
        metric_name: &str,
    ) -> anyhow::Result<Vec<OutputDimension>>;
}

#[async_trait]
pub trait PackagingRepository: Send + Sync {
    async fn list_channels(&self) -> anyhow::Result<Vec<PackagingChannelSummary>>;

    async fn list_origin_endpoints(&self) -> anyhow::Result<Vec<OriginEndpointSummary>>;
}

#[async_trait]
pub trait DashboardPublisher: Send + Sync {
    /// Create or overwrite the dashboard; returns validation messages.
    async fn put_dashboard(&self, name: &str, body: &str) -> anyhow::Result<Vec<String>>;
}
