// CloudWatch dashboard domain model
use serde_json::{Map, Value, json};

use super::metrics::MetricRole;
use crate::error::{DashboardError, Result};

const PACKAGING_SECTION_MARKER: &str = "MediaPackage Section Title";
const ENCODING_SECTION_MARKER: &str = "MediaLive Section Title";
const CONSOLE_LINKS_MARKER: &str = "Console Links for all channels";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Layout {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    PackagingSectionTitle,
    EncodingSectionTitle,
    ConsoleLinks,
}

impl TextRole {
    fn from_markdown(markdown: &str) -> Option<TextRole> {
        if markdown.contains(PACKAGING_SECTION_MARKER) {
            Some(TextRole::PackagingSectionTitle)
        } else if markdown.contains(ENCODING_SECTION_MARKER) {
            Some(TextRole::EncodingSectionTitle)
        } else if markdown.contains(CONSOLE_LINKS_MARKER) {
            Some(TextRole::ConsoleLinks)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetBody {
    Text {
        role: Option<TextRole>,
        markdown: String,
        /// Remaining text properties (background, ...) passed through as-is.
        style: Map<String, Value>,
    },
    Metric {
        role: Option<MetricRole>,
        title: String,
        /// CloudWatch metric arrays; append-only.
        metrics: Vec<Value>,
        region: String,
        /// Display settings (view, stat, period, axes, ...) passed through as-is.
        style: Map<String, Value>,
    },
    /// Any other CloudWatch widget type (alarm, log, explorer, ...), kept
    /// verbatim.
    Other {
        kind: String,
        properties: Map<String, Value>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub layout: Layout,
    pub body: WidgetBody,
}

impl Widget {
    pub fn text(layout: Layout, role: Option<TextRole>, markdown: impl Into<String>) -> Self {
        Self {
            layout,
            body: WidgetBody::Text {
                role,
                markdown: markdown.into(),
                style: Map::new(),
            },
        }
    }

    pub fn metric(layout: Layout, role: MetricRole, style: Value) -> Self {
        let style = match style {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            layout,
            body: WidgetBody::Metric {
                role: Some(role),
                title: role.title().to_string(),
                metrics: Vec::new(),
                region: String::new(),
                style,
            },
        }
    }

    pub fn metric_role(&self) -> Option<MetricRole> {
        match &self.body {
            WidgetBody::Metric { role, .. } => *role,
            _ => None,
        }
    }

    pub fn metric_count(&self) -> usize {
        match &self.body {
            WidgetBody::Metric { metrics, .. } => metrics.len(),
            _ => 0,
        }
    }

    fn to_json(&self) -> Value {
        let (kind, properties) = match &self.body {
            WidgetBody::Text {
                markdown, style, ..
            } => {
                let mut properties = style.clone();
                properties.insert("markdown".into(), Value::from(markdown.as_str()));
                ("text", Value::Object(properties))
            }
            WidgetBody::Metric {
                title,
                metrics,
                region,
                style,
                ..
            } => {
                let mut properties = style.clone();
                properties.insert("title".into(), Value::from(title.as_str()));
                properties.insert("metrics".into(), Value::Array(metrics.clone()));
                properties.insert("region".into(), Value::from(region.as_str()));
                ("metric", Value::Object(properties))
            }
            WidgetBody::Other { kind, properties } => {
                (kind.as_str(), Value::Object(properties.clone()))
            }
        };

        json!({
            "type": kind,
            "x": self.layout.x,
            "y": self.layout.y,
            "width": self.layout.width,
            "height": self.layout.height,
            "properties": properties,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let field = |name: &str| -> Result<u32> {
            value
                .get(name)
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    DashboardError::Template(format!("widget has no valid '{}'", name))
                })
        };
        let layout = Layout::new(field("x")?, field("y")?, field("width")?, field("height")?);

        let mut properties = value
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| DashboardError::Template("widget is missing 'properties'".into()))?;

        match value.get("type").and_then(Value::as_str) {
            Some("text") => {
                let markdown = match properties.remove("markdown") {
                    Some(Value::String(markdown)) => markdown,
                    _ => String::new(),
                };
                Ok(Widget {
                    layout,
                    body: WidgetBody::Text {
                        role: TextRole::from_markdown(&markdown),
                        markdown,
                        style: properties,
                    },
                })
            }
            Some("metric") => {
                let title = match properties.remove("title") {
                    Some(Value::String(title)) => title,
                    _ => String::new(),
                };
                let metrics = match properties.remove("metrics") {
                    Some(Value::Array(metrics)) => metrics,
                    _ => Vec::new(),
                };
                let region = match properties.remove("region") {
                    Some(Value::String(region)) => region,
                    _ => String::new(),
                };
                Ok(Widget {
                    layout,
                    body: WidgetBody::Metric {
                        role: MetricRole::from_title(&title),
                        title,
                        metrics,
                        region,
                        style: properties,
                    },
                })
            }
            Some(kind) => Ok(Widget {
                layout,
                body: WidgetBody::Other {
                    kind: kind.to_string(),
                    properties,
                },
            }),
            None => Err(DashboardError::Template("widget is missing 'type'".into())),
        }
    }
}

/// An ordered widget layout. The shape never changes after construction;
/// only metric lists, regions and markdown are filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub widgets: Vec<Widget>,
}

impl Dashboard {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self { widgets }
    }

    /// Load a layout from a CloudWatch dashboard body.
    pub fn from_json(value: &Value) -> Result<Self> {
        let widgets = value
            .get("widgets")
            .and_then(Value::as_array)
            .ok_or_else(|| DashboardError::Template("dashboard body has no 'widgets' array".into()))?;

        let widgets = widgets
            .iter()
            .map(Widget::from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(widgets))
    }

    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| DashboardError::Template(format!("invalid dashboard JSON: {}", e)))?;
        Self::from_json(&value)
    }

    pub fn to_json(&self) -> Value {
        json!({ "widgets": self.widgets.iter().map(Widget::to_json).collect::<Vec<_>>() })
    }

    /// Pretty-printed dashboard body, keys sorted.
    pub fn render(&self) -> String {
        // Value -> String cannot fail
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn layouts(&self) -> Vec<Layout> {
        self.widgets.iter().map(|w| w.layout).collect()
    }

    #[cfg(test)]
    pub fn metric_widget(&self, role: MetricRole) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.metric_role() == Some(role))
    }

    #[cfg(test)]
    pub fn markdown(&self, role: TextRole) -> Option<&str> {
        self.widgets.iter().find_map(|w| match &w.body {
            WidgetBody::Text {
                role: Some(r),
                markdown,
                ..
            } if *r == role => Some(markdown.as_str()),
            _ => None,
        })
    }

    /// Rename the two section headers after the dashboard.
    pub fn apply_section_titles(&mut self, dashboard_name: &str) {
        for widget in &mut self.widgets {
            if let WidgetBody::Text {
                role: Some(role),
                markdown,
                ..
            } = &mut widget.body
            {
                match role {
                    TextRole::PackagingSectionTitle => {
                        *markdown = format!("# {}: Packaging and Origination", dashboard_name);
                    }
                    TextRole::EncodingSectionTitle => {
                        *markdown = format!("# {}: Encoding", dashboard_name);
                    }
                    TextRole::ConsoleLinks => {}
                }
            }
        }
    }
}

/// CloudWatch dashboard names cannot contain spaces.
pub fn dashboard_resource_name(name: &str) -> String {
    name.replace(' ', "-")
}
