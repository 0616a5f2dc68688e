// CloudWatch metric addressing and the per-widget tuple builders
use serde_json::{Map, Value};

use super::channel::ChannelGroup;

const MEDIAPACKAGE_NAMESPACE: &str = "AWS/MediaPackage";
const MEDIALIVE_NAMESPACE: &str = "MediaLive";

/// Metric used to discover which outputs are reporting data.
pub const OUTPUT_VIDEO_FRAME_RATE: &str = "OutputVideoFrameRate";

/// One time series selector: `[namespace, metric, dim, value, ..., {options}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTuple {
    pub namespace: &'static str,
    pub metric_name: String,
    pub dimensions: Vec<(&'static str, String)>,
    pub right_axis: bool,
    pub label: Option<String>,
}

impl MetricTuple {
    fn new(namespace: &'static str, metric_name: impl Into<String>) -> Self {
        Self {
            namespace,
            metric_name: metric_name.into(),
            dimensions: Vec::new(),
            right_axis: false,
            label: None,
        }
    }

    fn dimension(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.dimensions.push((name, value.into()));
        self
    }

    fn on_right_axis(mut self) -> Self {
        self.right_axis = true;
        self
    }

    fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut items = vec![
            Value::from(self.namespace),
            Value::from(self.metric_name.as_str()),
        ];
        for (name, value) in &self.dimensions {
            items.push(Value::from(*name));
            items.push(Value::from(value.as_str()));
        }

        let mut options = Map::new();
        if let Some(label) = &self.label {
            options.insert("label".into(), Value::from(label.as_str()));
        }
        if self.right_axis {
            options.insert("yAxis".into(), Value::from("right"));
        }
        if !options.is_empty() {
            items.push(Value::Object(options));
        }

        Value::Array(items)
    }
}

/// The job a metric widget does in the layout. Titles are display labels;
/// the role decides which tuples a widget receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricRole {
    IngressBytes,
    IngressResponseTimes,
    EgressRequestBytes,
    EgressRequestCount,
    StatusCodes2xx4xx,
    StatusCodes3xx5xx,
    InputVideoFrameRate,
    NetworkIn,
    DroppedFrames,
    FillMsec,
    SvqTime,
    OutputVideoFrameRate,
    NetworkOut,
    ActiveOutputRenditions,
}

pub type MetricBuilder = fn(&ChannelGroup) -> Vec<MetricTuple>;

impl MetricRole {
    #[cfg(test)]
    pub const ALL: [MetricRole; 14] = [
        MetricRole::IngressBytes,
        MetricRole::IngressResponseTimes,
        MetricRole::EgressRequestBytes,
        MetricRole::EgressRequestCount,
        MetricRole::StatusCodes2xx4xx,
        MetricRole::StatusCodes3xx5xx,
        MetricRole::InputVideoFrameRate,
        MetricRole::NetworkIn,
        MetricRole::DroppedFrames,
        MetricRole::FillMsec,
        MetricRole::SvqTime,
        MetricRole::OutputVideoFrameRate,
        MetricRole::NetworkOut,
        MetricRole::ActiveOutputRenditions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MetricRole::IngressBytes => "Ingress Bytes (sum)",
            MetricRole::IngressResponseTimes => "Ingress Response Times (avg)",
            MetricRole::EgressRequestBytes => "Egress Request Bytes (sum)",
            MetricRole::EgressRequestCount => "Egress Request Count (sum)",
            MetricRole::StatusCodes2xx4xx => "Status Code Range (sum), 2xx,4xx",
            MetricRole::StatusCodes3xx5xx => "Status Code Range (sum), 3xx,5xx",
            MetricRole::InputVideoFrameRate => "Input Video Frame Rate (avg)",
            MetricRole::NetworkIn => "Network In (sum)",
            MetricRole::DroppedFrames => "Dropped Frames (sum)",
            MetricRole::FillMsec => "Fill Milliseconds (sum)",
            MetricRole::SvqTime => "SVQ Time (percentage)",
            MetricRole::OutputVideoFrameRate => "Output Video Frame Rate (avg)",
            MetricRole::NetworkOut => "Network Out (sum)",
            MetricRole::ActiveOutputRenditions => "Active Output Renditions (avg)",
        }
    }

    /// Resolve a role from a widget title in a user-supplied template.
    pub fn from_title(title: &str) -> Option<MetricRole> {
        // Status code titles share a prefix; match on the full range text.
        let keys: [(&str, MetricRole); 14] = [
            ("Ingress Bytes", MetricRole::IngressBytes),
            ("Ingress Response Times", MetricRole::IngressResponseTimes),
            ("Egress Request Bytes", MetricRole::EgressRequestBytes),
            ("Egress Request Count", MetricRole::EgressRequestCount),
            ("Status Code Range (sum), 2xx,4xx", MetricRole::StatusCodes2xx4xx),
            ("Status Code Range (sum), 3xx,5xx", MetricRole::StatusCodes3xx5xx),
            ("Active Output Renditions", MetricRole::ActiveOutputRenditions),
            ("Output Video Frame Rate", MetricRole::OutputVideoFrameRate),
            ("Input Video Frame Rate", MetricRole::InputVideoFrameRate),
            ("Network In", MetricRole::NetworkIn),
            ("Dropped Frames", MetricRole::DroppedFrames),
            ("Network Out", MetricRole::NetworkOut),
            ("SVQ Time", MetricRole::SvqTime),
            ("Fill Milliseconds", MetricRole::FillMsec),
        ];
        keys.iter()
            .find(|(key, _)| title.contains(key))
            .map(|(_, role)| *role)
    }

    pub fn builder(self) -> MetricBuilder {
        match self {
            MetricRole::IngressBytes => |g| per_packaging_channel(g, "IngressBytes"),
            MetricRole::IngressResponseTimes => |g| per_packaging_channel(g, "IngressResponseTime"),
            MetricRole::EgressRequestBytes => |g| per_endpoint(g, "EgressBytes"),
            MetricRole::EgressRequestCount => |g| per_endpoint(g, "EgressRequestCount"),
            MetricRole::StatusCodes2xx4xx => |g| status_code_ranges(g, "2xx", "4xx"),
            MetricRole::StatusCodes3xx5xx => |g| status_code_ranges(g, "3xx", "5xx"),
            MetricRole::InputVideoFrameRate => |g| per_pipeline(g, "InputVideoFrameRate"),
            MetricRole::NetworkIn => |g| per_pipeline(g, "NetworkIn"),
            MetricRole::DroppedFrames => |g| per_pipeline(g, "DroppedFrames"),
            MetricRole::FillMsec => |g| per_pipeline(g, "FillMsec"),
            MetricRole::SvqTime => |g| per_pipeline(g, "SvqTime"),
            MetricRole::NetworkOut => |g| per_pipeline(g, "NetworkOut"),
            MetricRole::OutputVideoFrameRate => output_video_frame_rate,
            MetricRole::ActiveOutputRenditions => active_output_renditions,
        }
    }
}

fn per_packaging_channel(group: &ChannelGroup, metric: &'static str) -> Vec<MetricTuple> {
    group
        .packaging_names()
        .map(|name| MetricTuple::new(MEDIAPACKAGE_NAMESPACE, metric).dimension("Channel", name))
        .collect()
}

fn endpoint_tuple(metric: &'static str, channel: &str, endpoint: &str) -> MetricTuple {
    MetricTuple::new(MEDIAPACKAGE_NAMESPACE, metric)
        .dimension("Channel", channel)
        .dimension("OriginEndpoint", endpoint)
}

fn per_endpoint(group: &ChannelGroup, metric: &'static str) -> Vec<MetricTuple> {
    group
        .endpoint_pairs()
        .map(|(channel, endpoint)| endpoint_tuple(metric, channel, endpoint))
        .collect()
}

fn status_code_ranges(group: &ChannelGroup, left: &str, right: &str) -> Vec<MetricTuple> {
    group
        .endpoint_pairs()
        .flat_map(|(channel, endpoint)| {
            [
                endpoint_tuple("EgressRequestCount", channel, endpoint)
                    .dimension("StatusCodeRange", left),
                endpoint_tuple("EgressRequestCount", channel, endpoint)
                    .dimension("StatusCodeRange", right)
                    .on_right_axis(),
            ]
        })
        .collect()
}

fn pipeline_pair(group: &ChannelGroup, base: MetricTuple) -> [MetricTuple; 2] {
    [
        base.clone()
            .dimension("Pipeline", "0")
            .label(format!("{}-0", group.channel_name)),
        base.dimension("Pipeline", "1")
            .on_right_axis()
            .label(format!("{}-1", group.channel_name)),
    ]
}

fn per_pipeline(group: &ChannelGroup, metric: &'static str) -> Vec<MetricTuple> {
    let base = MetricTuple::new(MEDIALIVE_NAMESPACE, metric).dimension("ChannelId", &group.channel_id);
    pipeline_pair(group, base).into()
}

fn active_output_renditions(group: &ChannelGroup) -> Vec<MetricTuple> {
    group
        .output_group_names
        .iter()
        .flat_map(|output_group| {
            let base = MetricTuple::new(MEDIALIVE_NAMESPACE, "ActiveOutputs")
                .dimension("OutputGroupName", output_group)
                .dimension("ChannelId", &group.channel_id);
            pipeline_pair(group, base)
        })
        .collect()
}

fn output_video_frame_rate(group: &ChannelGroup) -> Vec<MetricTuple> {
    group
        .output_dimensions
        .iter()
        .filter_map(|output| {
            let tuple = MetricTuple::new(MEDIALIVE_NAMESPACE, &output.metric_name)
                .dimension("ChannelId", &output.channel_id)
                .dimension("OutputName", &output.output_name);
            match output.pipeline.as_str() {
                "0" => Some(tuple.dimension("Pipeline", "0")),
                "1" => Some(tuple.dimension("Pipeline", "1").on_right_axis()),
                other => {
                    tracing::debug!(
                        "Skipping output {} on unknown pipeline {}",
                        output.output_name,
                        other
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channel::{OutputDimension, PackagingChannel};
    use serde_json::json;

    fn group() -> ChannelGroup {
        ChannelGroup {
            channel_id: "123".into(),
            channel_name: "Ch1".into(),
            output_group_names: vec!["HLS Group".into(), "Archive".into()],
            output_dimensions: vec![
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
                OutputDimension {
                    metric_name: OUTPUT_VIDEO_FRAME_RATE.into(),
                    channel_id: "123".into(),
                    output_name: "720p".into(),
                    pipeline: "2".into(),
                },
            ],
            packaging_channels: vec![
                PackagingChannel::new("mp-a", vec!["a-hls".into(), "a-dash".into()]),
                PackagingChannel::new("mp-b", vec!["b-hls".into()]),
            ],
        }
    }

    fn build(role: MetricRole) -> Vec<Value> {
        role.builder()(&group()).iter().map(MetricTuple::to_json).collect()
    }

    #[test]
    fn test_packaging_channel_and_endpoint_counts() {
        assert_eq!(build(MetricRole::IngressBytes).len(), 2);
        assert_eq!(build(MetricRole::IngressResponseTimes).len(), 2);
        assert_eq!(build(MetricRole::EgressRequestBytes).len(), 3);
        assert_eq!(build(MetricRole::EgressRequestCount).len(), 3);
        assert_eq!(build(MetricRole::StatusCodes2xx4xx).len(), 6);
        assert_eq!(build(MetricRole::StatusCodes3xx5xx).len(), 6);
    }

    #[test]
    fn test_ingress_bytes_tuple_shape() {
        assert_eq!(
            build(MetricRole::IngressBytes)[0],
            json!(["AWS/MediaPackage", "IngressBytes", "Channel", "mp-a"])
        );
    }

    #[test]
    fn test_status_codes_alternate_with_right_axis() {
        let tuples = build(MetricRole::StatusCodes3xx5xx);
        assert_eq!(tuples.len() % 2, 0);
        assert_eq!(
            tuples[0],
            json!([
                "AWS/MediaPackage", "EgressRequestCount", "Channel", "mp-a",
                "OriginEndpoint", "a-hls", "StatusCodeRange", "3xx"
            ])
        );
        assert_eq!(
            tuples[1],
            json!([
                "AWS/MediaPackage", "EgressRequestCount", "Channel", "mp-a",
                "OriginEndpoint", "a-hls", "StatusCodeRange", "5xx", {"yAxis": "right"}
            ])
        );
        for pair in tuples.chunks(2) {
            assert!(pair[0].as_array().unwrap().last().unwrap().is_string());
            assert!(pair[1].as_array().unwrap().last().unwrap().is_object());
        }
    }

    #[test]
    fn test_pipeline_pairs_are_labelled() {
        let tuples = build(MetricRole::SvqTime);
        assert_eq!(
            tuples,
            vec![
                json!(["MediaLive", "SvqTime", "ChannelId", "123", "Pipeline", "0", {"label": "Ch1-0"}]),
                json!(["MediaLive", "SvqTime", "ChannelId", "123", "Pipeline", "1", {"label": "Ch1-1", "yAxis": "right"}]),
            ]
        );
    }

    #[test]
    fn test_active_outputs_per_output_group() {
        let tuples = build(MetricRole::ActiveOutputRenditions);
        assert_eq!(tuples.len(), 4);
        assert_eq!(
            tuples[2],
            json!([
                "MediaLive", "ActiveOutputs", "OutputGroupName", "Archive", "ChannelId", "123",
                "Pipeline", "0", {"label": "Ch1-0"}
            ])
        );
    }

    #[test]
    fn test_output_frame_rate_skips_unknown_pipelines() {
        let tuples = build(MetricRole::OutputVideoFrameRate);
        assert_eq!(
            tuples,
            vec![
                json!(["MediaLive", "OutputVideoFrameRate", "ChannelId", "123", "OutputName", "1080p", "Pipeline", "0"]),
                json!(["MediaLive", "OutputVideoFrameRate", "ChannelId", "123", "OutputName", "1080p", "Pipeline", "1", {"yAxis": "right"}]),
            ]
        );
    }

    #[test]
    fn test_output_tuples_use_discovered_metric_name() {
        let mut g = group();
        g.output_dimensions.truncate(1);
        g.output_dimensions[0].metric_name = "ActiveOutputs".into();

        assert_eq!(
            MetricRole::OutputVideoFrameRate.builder()(&g)
                .iter()
                .map(MetricTuple::to_json)
                .collect::<Vec<_>>(),
            vec![json!(["MediaLive", "ActiveOutputs", "ChannelId", "123", "OutputName", "1080p", "Pipeline", "0"])]
        );
    }

    #[test]
    fn test_from_title_round_trips_every_role() {
        for role in MetricRole::ALL {
            assert_eq!(MetricRole::from_title(role.title()), Some(role), "{:?}", role);
        }
        assert_eq!(MetricRole::from_title("CPU Utilization"), None);
    }

    #[test]
    fn test_endpointless_group_yields_no_egress_tuples() {
        let mut g = group();
        g.packaging_channels.iter_mut().for_each(|c| c.endpoint_ids.clear());
        assert!(MetricRole::EgressRequestCount.builder()(&g).is_empty());
        assert_eq!(MetricRole::IngressBytes.builder()(&g).len(), 2);
    }
}
