// MediaLive channel ARN model
use std::fmt;

use crate::error::{DashboardError, Result};

const MEDIALIVE_ARN_PREFIX: &str = "arn:aws:medialive:";

/// AWS region a set of channels lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region(String);

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated MediaLive channel ARN, e.g.
/// `arn:aws:medialive:us-west-2:0123456789:channel:123456`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelArn(String);

impl ChannelArn {
    pub fn parse(raw: &str) -> Result<Self> {
        let arn = raw.trim();
        if !Self::is_valid(arn) {
            return Err(DashboardError::InvalidIdentifier(arn.to_string()));
        }
        Ok(Self(arn.to_string()))
    }

    pub fn is_valid(arn: &str) -> bool {
        arn.starts_with(MEDIALIVE_ARN_PREFIX)
            && arn.contains("channel")
            && arn.rsplit(':').next().is_some_and(|id| !id.is_empty())
    }

    /// Region segment, present only for a complete 7-part ARN.
    pub fn region(&self) -> Option<Region> {
        let parts: Vec<&str> = self.0.split(':').collect();
        if parts.len() == 7 && !parts[3].is_empty() {
            Some(Region::new(parts[3]))
        } else {
            None
        }
    }

    pub fn channel_id(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filter a newline-delimited ARN list down to the channels a single
/// dashboard can show: valid ARNs, in the region of the first valid one,
/// without duplicates.
pub fn select_channel_arns<'a, I>(lines: I) -> Vec<ChannelArn>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut selected: Vec<ChannelArn> = Vec::new();
    let mut first_region: Option<Option<Region>> = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let arn = match ChannelArn::parse(line) {
            Ok(arn) => arn,
            Err(_) => {
                tracing::warn!("'{}' is not a valid MediaLive channel ARN", line);
                continue;
            }
        };

        let region = arn.region();
        let expected = first_region.get_or_insert_with(|| region.clone());
        if *expected != region {
            tracing::info!(
                "Ignoring MediaLive ARN '{}', since it's not in the same region as the first ARN in the list",
                arn
            );
            continue;
        }

        if selected.contains(&arn) {
            tracing::info!("Skipping duplicate MediaLive ARN '{}'", arn);
            continue;
        }

        selected.push(arn);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARN: &str = "arn:aws:medialive:us-west-2:0123456789:channel:123456";

    #[test]
    fn test_parse_valid_arn() {
        let arn = ChannelArn::parse(&format!("  {}\n", ARN)).unwrap();
        assert_eq!(arn.as_str(), ARN);
        assert_eq!(arn.channel_id(), "123456");
        assert_eq!(arn.region(), Some(Region::new("us-west-2")));
    }

    #[test]
    fn test_rejects_malformed_arns() {
        for raw in [
            "",
            "123456",
            "arn:aws:mediapackage:us-west-2:0123456789:channels/abc",
            "arn:aws:medialive:us-west-2:0123456789:input:99",
            "arn:aws:medialive:us-west-2:0123456789:channel:",
        ] {
            let err = ChannelArn::parse(raw).unwrap_err();
            assert!(matches!(err, DashboardError::InvalidIdentifier(_)), "{raw}");
        }
    }

    #[test]
    fn test_region_requires_complete_arn() {
        let arn = ChannelArn::parse("arn:aws:medialive:channel:42").unwrap();
        assert_eq!(arn.channel_id(), "42");
        assert_eq!(arn.region(), None);
    }

    #[test]
    fn test_select_filters_region_duplicates_and_invalid() {
        let input = format!(
            "{ARN}\n\nnot-an-arn\narn:aws:medialive:eu-west-1:0123456789:channel:777\n{ARN}\narn:aws:medialive:us-west-2:0123456789:channel:654321\n"
        );
        let selected = select_channel_arns(input.lines());

        let ids: Vec<&str> = selected.iter().map(|a| a.channel_id()).collect();
        assert_eq!(ids, vec!["123456", "654321"]);
    }

    #[test]
    fn test_select_empty_input() {
        assert!(select_channel_arns("\n  \n".lines()).is_empty());
    }
}
