// The standard MediaLive/MediaPackage dashboard layout
use serde_json::{Value, json};

use super::dashboard::{Dashboard, Layout, TextRole, Widget};
use super::metrics::MetricRole;

pub const CONSOLE_LINKS_HEADER: &str = "# Console Links for all channels\nHold down the Control (Ctrl) key when selecting a link to open the console in a new tab within the browser.   \n\n";

fn zero_min_axes() -> Value {
    json!({ "left": { "min": 0 }, "right": { "min": 0 } })
}

fn frame_rate_annotations() -> Value {
    json!({
        "horizontal": [
            { "label": "30 frames per second", "value": 30 },
            { "label": "30 frames per second", "value": 30, "yAxis": "right" },
            { "label": "60 frames per second", "value": 60 },
            { "label": "60 frames per second", "value": 60, "yAxis": "right" }
        ]
    })
}

fn time_series(stat: &str, period: u32) -> Value {
    json!({ "view": "timeSeries", "stacked": false, "stat": stat, "period": period })
}

fn with(mut base: Value, key: &str, value: Value) -> Value {
    if let Value::Object(map) = &mut base {
        map.insert(key.to_string(), value);
    }
    base
}

impl Dashboard {
    /// The fixed 21-widget layout: packaging section on top, encoding section
    /// below, console links in the bottom right. Built fresh on every call.
    pub fn standard() -> Self {
        let bottom_legend = json!({ "position": "bottom" });
        let sum_both_axes = || with(time_series("Sum", 60), "yAxis", zero_min_axes());

        let widgets = vec![
            Widget::text(Layout::new(0, 0, 24, 1), Some(TextRole::PackagingSectionTitle), "# MediaPackage Section Title"),
            Widget::text(Layout::new(0, 1, 12, 1), None, "## Ingress"),
            Widget::metric(Layout::new(0, 2, 12, 9), MetricRole::IngressBytes, sum_both_axes()),
            Widget::metric(
                Layout::new(0, 11, 12, 9),
                MetricRole::IngressResponseTimes,
                time_series("Average", 60),
            ),
            Widget::metric(Layout::new(12, 20, 12, 12), MetricRole::StatusCodes3xx5xx, sum_both_axes()),
            Widget::text(Layout::new(12, 1, 12, 1), None, "## Egress"),
            Widget::metric(Layout::new(12, 2, 12, 9), MetricRole::EgressRequestBytes, sum_both_axes()),
            Widget::metric(
                Layout::new(12, 11, 12, 9),
                MetricRole::EgressRequestCount,
                with(time_series("Sum", 60), "yAxis", json!({ "left": { "min": 0 } })),
            ),
            Widget::metric(Layout::new(0, 20, 12, 12), MetricRole::StatusCodes2xx4xx, sum_both_axes()),
            Widget::text(Layout::new(0, 32, 24, 1), Some(TextRole::EncodingSectionTitle), "# MediaLive Section Title"),
            Widget::text(Layout::new(0, 33, 12, 1), None, "## Input"),
            Widget::metric(
                Layout::new(0, 34, 12, 9),
                MetricRole::InputVideoFrameRate,
                with(
                    with(time_series("Average", 60), "annotations", frame_rate_annotations()),
                    "yAxis",
                    zero_min_axes(),
                ),
            ),
            Widget::metric(Layout::new(0, 43, 12, 9), MetricRole::NetworkIn, sum_both_axes()),
            Widget::metric(
                Layout::new(0, 52, 12, 6),
                MetricRole::DroppedFrames,
                with(sum_both_axes(), "legend", bottom_legend.clone()),
            ),
            Widget::metric(
                Layout::new(0, 58, 12, 6),
                MetricRole::FillMsec,
                with(time_series("Sum", 60), "legend", bottom_legend.clone()),
            ),
            Widget::metric(
                Layout::new(0, 64, 12, 6),
                MetricRole::SvqTime,
                with(time_series("Average", 300), "legend", bottom_legend),
            ),
            Widget::text(Layout::new(12, 33, 12, 1), None, "## Output"),
            Widget::metric(
                Layout::new(12, 34, 12, 9),
                MetricRole::OutputVideoFrameRate,
                with(
                    with(time_series("Average", 60), "annotations", frame_rate_annotations()),
                    "yAxis",
                    zero_min_axes(),
                ),
            ),
            Widget::metric(Layout::new(12, 43, 12, 9), MetricRole::NetworkOut, sum_both_axes()),
            Widget::metric(
                Layout::new(12, 52, 12, 12),
                MetricRole::ActiveOutputRenditions,
                with(
                    with(time_series("Average", 60), "stacked", Value::Bool(true)),
                    "yAxis",
                    json!({ "left": { "min": 0 } }),
                ),
            ),
            Widget::text(Layout::new(12, 64, 12, 6), Some(TextRole::ConsoleLinks), CONSOLE_LINKS_HEADER),
        ];

        Dashboard::new(widgets)
    }
}
