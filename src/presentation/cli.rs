// Command-line interface
use std::path::PathBuf;

use clap::Parser;

use crate::domain::arn::ChannelArn;
use crate::error::{DashboardError, Result};
use crate::infrastructure::files::load_channel_arns;

#[derive(Parser, Debug)]
#[command(name = "medialive-dashboard")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:\n  \
    medialive-dashboard -a arn:aws:medialive:us-west-2:0123456789:channel:123456 -n \"My TV Dashboard\"\n  \
    medialive-dashboard -l \"My EML arns.txt\" -n \"Primary Bouquet\"")]
/// Create a CloudWatch dashboard for MediaLive channels and the MediaPackage
/// channels and endpoints they feed.
pub struct Cli {
    /// MediaLive channel ARN
    #[arg(short, long)]
    pub arn: Option<String>,

    /// File with one MediaLive channel ARN per line; all channels must be in
    /// the region of the first one. Ignored when --arn is given.
    #[arg(short, long)]
    pub list: Option<PathBuf>,

    /// Name for the CloudWatch dashboard; spaces become hyphens
    #[arg(short, long)]
    pub name: Option<String>,

    /// Custom dashboard layout (CloudWatch dashboard body JSON)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Also write the dashboard body to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Build the dashboard but print it instead of publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Settings file (defaults to config/dashboard.* when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// AWS profile to use
    #[arg(long)]
    pub profile: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Channels first, then the dashboard name, so a bad ARN is reported as
    /// such even when other flags are missing.
    pub fn inputs(&self) -> Result<(Vec<ChannelArn>, String)> {
        let channels = self.channel_arns()?;
        let name = self.dashboard_name()?;
        Ok((channels, name))
    }

    pub fn dashboard_name(&self) -> Result<String> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(DashboardError::Argument(
                "please provide a name for the dashboard with -n/--name".into(),
            )),
        }
    }

    /// The channels to include. A single `--arn` is validated here, before
    /// any network call, and takes precedence over `--list`.
    pub fn channel_arns(&self) -> Result<Vec<ChannelArn>> {
        if let Some(arn) = &self.arn {
            if self.list.is_some() {
                tracing::warn!("Ignoring --list since a channel ARN was given with --arn");
            }
            return Ok(vec![ChannelArn::parse(arn)?]);
        }

        if let Some(list) = &self.list {
            let arns = load_channel_arns(list)?;
            if arns.is_empty() {
                return Err(DashboardError::Argument(format!(
                    "no valid MediaLive channel ARNs found in '{}'",
                    list.display()
                )));
            }
            return Ok(arns);
        }

        Err(DashboardError::Argument(
            "must provide a MediaLive channel ARN or a file containing a list of MediaLive channel ARNs".into(),
        ))
    }
}
