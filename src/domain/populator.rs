// Folds discovered channel groups into a dashboard layout
use super::arn::Region;
use super::channel::ChannelGroup;
use super::console::ConsoleLinks;
use super::dashboard::{Dashboard, TextRole, WidgetBody};
use super::metrics::MetricTuple;
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct Populator {
    links: ConsoleLinks,
}

impl Populator {
    pub fn with_links(links: ConsoleLinks) -> Self {
        Self { links }
    }

    /// Append every group's metric tuples and console links to `dashboard`.
    ///
    /// Metric lists accumulate: populating an already populated dashboard
    /// adds the tuples again. All groups are validated before anything is
    /// touched, so an invalid group never yields a half-filled dashboard.
    pub fn populate(
        &self,
        mut dashboard: Dashboard,
        region: &Region,
        groups: &[ChannelGroup],
    ) -> Result<Dashboard> {
        for group in groups {
            group.validate()?;
        }

        for group in groups {
            for widget in &mut dashboard.widgets {
                match &mut widget.body {
                    WidgetBody::Metric {
                        role,
                        title,
                        metrics,
                        region: widget_region,
                        ..
                    } => {
                        let Some(role) = role else {
                            tracing::warn!(
                                "Unsupported metric '{}' found in the dashboard template",
                                title
                            );
                            continue;
                        };

                        let tuples = role.builder()(group);
                        if tuples.is_empty() {
                            continue;
                        }
                        metrics.extend(tuples.iter().map(MetricTuple::to_json));
                        *widget_region = region.to_string();
                    }
                    WidgetBody::Text {
                        role: Some(TextRole::ConsoleLinks),
                        markdown,
                        ..
                    } => {
                        markdown.push_str(&self.links.line(region, group));
                    }
                    _ => {}
                }
            }

            tracing::debug!(
                "Added channel {} ({}) to the dashboard",
                group.channel_name,
                group.channel_id
            );
        }

        Ok(dashboard)
    }
}
