// Shared AWS SDK configuration
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load SDK configuration from the default provider chain, optionally pinned
/// to a region and a named profile.
pub async fn load_sdk_config(region: Option<&str>, profile: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}
