// CloudWatch repository implementation
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_cloudwatch::Client;
use aws_sdk_cloudwatch::types::{DimensionFilter, Metric};

use crate::application::repositories::{DashboardPublisher, MetricDimensionRepository};
use crate::domain::channel::OutputDimension;

const MEDIALIVE_NAMESPACE: &str = "MediaLive";

#[derive(Debug, Clone)]
pub struct CloudWatchRepository {
    client: Client,
}

impl CloudWatchRepository {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    fn dimension_filter(name: &str, value: Option<&str>) -> DimensionFilter {
        DimensionFilter::builder()
            .name(name)
            .set_value(value.map(str::to_string))
            .build()
    }

    fn output_dimension(metric: &Metric) -> Option<OutputDimension> {
        let mut channel_id = None;
        let mut output_name = None;
        let mut pipeline = None;
        for dimension in metric.dimensions() {
            match dimension.name().unwrap_or_default() {
                "ChannelId" => channel_id = dimension.value(),
                "OutputName" => output_name = dimension.value(),
                "Pipeline" => pipeline = dimension.value(),
                _ => {}
            }
        }

        Some(OutputDimension {
            metric_name: metric.metric_name()?.to_string(),
            channel_id: channel_id?.to_string(),
            output_name: output_name?.to_string(),
            pipeline: pipeline?.to_string(),
        })
    }
}

#[async_trait]
impl MetricDimensionRepository for CloudWatchRepository {
    async fn output_dimensions(
        &self,
        channel_id: &str,
        metric_name: &str,
    ) -> Result<Vec<OutputDimension>> {
        let mut pages = self
            .client
            .list_metrics()
            .namespace(MEDIALIVE_NAMESPACE)
            .metric_name(metric_name)
            .dimensions(Self::dimension_filter("ChannelId", Some(channel_id)))
            .dimensions(Self::dimension_filter("OutputName", None))
            .dimensions(Self::dimension_filter("Pipeline", None))
            .into_paginator()
            .send();

        let mut dimensions = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.with_context(|| {
                format!("ListMetrics failed for {} on channel {}", metric_name, channel_id)
            })?;
            dimensions.extend(page.metrics().iter().filter_map(Self::output_dimension));
        }

        Ok(dimensions)
    }
}

#[async_trait]
impl DashboardPublisher for CloudWatchRepository {
    async fn put_dashboard(&self, name: &str, body: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .put_dashboard()
            .dashboard_name(name)
            .dashboard_body(body)
            .send()
            .await
            .context("PutDashboard failed")?;

        Ok(response
            .dashboard_validation_messages()
            .iter()
            .filter_map(|m| m.message())
            .map(str::to_string)
            .collect())
    }
}
