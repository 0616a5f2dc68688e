// Dashboard service - Use case for building and publishing the dashboard
use std::sync::Arc;

use crate::application::discovery_service::ChannelDiscoveryService;
use crate::application::repositories::DashboardPublisher;
use crate::domain::arn::ChannelArn;
use crate::domain::dashboard::{Dashboard, dashboard_resource_name};
use crate::domain::populator::Populator;
use crate::error::{DashboardError, Result};

/// Inputs for one dashboard build.
#[derive(Debug, Clone)]
pub struct DashboardRequest {
    pub name: String,
    pub channels: Vec<ChannelArn>,
    /// Custom layout; the standard layout is used when absent.
    pub template: Option<Dashboard>,
}

#[derive(Clone)]
pub struct DashboardService {
    discovery: ChannelDiscoveryService,
    publisher: Arc<dyn DashboardPublisher>,
    populator: Populator,
}

impl DashboardService {
    pub fn new(
        discovery: ChannelDiscoveryService,
        publisher: Arc<dyn DashboardPublisher>,
        populator: Populator,
    ) -> Self {
        Self {
            discovery,
            publisher,
            populator,
        }
    }

    /// Discover every channel in order and fold them into a fresh layout.
    pub async fn build(&self, request: DashboardRequest) -> Result<Dashboard> {
        let first = request
            .channels
            .first()
            .ok_or_else(|| DashboardError::Argument("no MediaLive channel ARN provided".into()))?;
        let region = first
            .region()
            .ok_or_else(|| DashboardError::MissingRegion(first.to_string()))?;

        let mut template = request.template.unwrap_or_else(Dashboard::standard);
        template.apply_section_titles(&request.name);

        let mut groups = Vec::with_capacity(request.channels.len());
        for arn in &request.channels {
            groups.push(self.discovery.discover(arn, &region).await?);
        }

        let dashboard = self.populator.populate(template, &region, &groups)?;
        let metric_total: usize = dashboard.widgets.iter().map(|w| w.metric_count()).sum();
        tracing::info!(
            "Built dashboard with {} widgets and {} metrics for {} channels",
            dashboard.widgets.len(),
            metric_total,
            groups.len()
        );
        Ok(dashboard)
    }

    /// Create or overwrite the dashboard; returns the resource name used.
    pub async fn publish(&self, name: &str, dashboard: &Dashboard) -> Result<String> {
        let resource_name = dashboard_resource_name(name);
        let body = dashboard.render();

        let messages = self
            .publisher
            .put_dashboard(&resource_name, &body)
            .await
            .map_err(|source| DashboardError::Publish {
                name: resource_name.clone(),
                source,
            })?;
        for message in &messages {
            tracing::warn!("Dashboard validation: {}", message);
        }

        tracing::info!("Successfully created dashboard '{}'", resource_name);
        Ok(resource_name)
    }
}
