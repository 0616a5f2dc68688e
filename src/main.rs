// Main entry point - Dependency injection and the command-line run
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::{DashboardRequest, DashboardService};
use crate::application::discovery_service::ChannelDiscoveryService;
use crate::domain::populator::Populator;
use crate::error::{DashboardError, Result};
use crate::infrastructure::aws::load_sdk_config;
use crate::infrastructure::cloudwatch_repository::CloudWatchRepository;
use crate::infrastructure::config::load_config;
use crate::infrastructure::files::{load_template, write_body};
use crate::infrastructure::mediapackage_repository::MediaPackageRepository;
use crate::infrastructure::medialive_repository::MediaLiveRepository;
use crate::presentation::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not errors
            std::process::exit(if e.use_stderr() { -1 } else { 0 });
        }
    };

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::error!("{}", err);
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,medialive_dashboard={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Input validation happens before any AWS call
    let (channels, name) = cli.inputs()?;
    let region = channels[0]
        .region()
        .ok_or_else(|| DashboardError::MissingRegion(channels[0].to_string()))?;
    let template = cli.template.as_deref().map(load_template).transpose()?;

    let config = load_config(cli.config.as_deref())
        .map_err(|e| DashboardError::Argument(format!("invalid configuration: {:#}", e)))?;
    let profile = cli.profile.clone().or(config.aws.profile.clone());

    // Create repositories (infrastructure layer)
    let media_config = load_sdk_config(Some(region.as_str()), profile.as_deref()).await;
    let cloudwatch_region = config
        .aws
        .cloudwatch_region
        .clone()
        .unwrap_or_else(|| region.to_string());
    let cloudwatch_config = load_sdk_config(Some(cloudwatch_region.as_str()), profile.as_deref()).await;

    let cloudwatch = Arc::new(CloudWatchRepository::new(&cloudwatch_config));
    let medialive = Arc::new(MediaLiveRepository::new(&media_config));
    let mediapackage = Arc::new(MediaPackageRepository::new(&media_config));

    // Create services (application layer)
    let discovery = ChannelDiscoveryService::new(medialive, cloudwatch.clone(), mediapackage)
        .with_output_metric(&config.discovery.output_metric);
    let service = DashboardService::new(
        discovery,
        cloudwatch,
        Populator::with_links(config.console.links()),
    );

    let dashboard = service
        .build(DashboardRequest {
            name: name.clone(),
            channels,
            template,
        })
        .await?;

    if let Some(output) = &cli.output {
        write_body(output, &dashboard.render())?;
    }

    if cli.dry_run {
        println!("{}", dashboard.render());
        return Ok(());
    }

    let resource_name = service.publish(&name, &dashboard).await?;
    println!("Successfully created Dashboard '{}'", resource_name);
    Ok(())
}
