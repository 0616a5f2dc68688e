// Error taxonomy and process exit codes
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("argument error: {0}")]
    Argument(String),

    #[error("invalid MediaLive channel ARN '{0}'")]
    InvalidIdentifier(String),

    #[error("missing discovery data for channel {channel}: {detail}")]
    MissingDiscoveryData { channel: String, detail: String },

    #[error("unable to extract the region from MediaLive channel ARN '{0}'")]
    MissingRegion(String),

    #[error("discovery failed for channel {channel}: {source:#}")]
    Discovery {
        channel: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("dashboard template error: {0}")]
    Template(String),

    #[error("failed to publish dashboard '{name}': {source:#}")]
    Publish {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl DashboardError {
    pub fn missing_data(channel: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MissingDiscoveryData {
            channel: channel.into(),
            detail: detail.into(),
        }
    }

    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Argument(_) => -1,
            Self::InvalidIdentifier(_) => -2,
            Self::MissingDiscoveryData { .. } | Self::Discovery { .. } | Self::Template(_) => -3,
            Self::MissingRegion(_) => -4,
            Self::Publish { .. } => -5,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
