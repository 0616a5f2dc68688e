// Local file inputs and outputs
use std::fs;
use std::path::Path;

use crate::domain::arn::{ChannelArn, select_channel_arns};
use crate::domain::dashboard::Dashboard;
use crate::error::{DashboardError, Result};

/// Read a newline-delimited list of MediaLive channel ARNs.
pub fn load_channel_arns(path: &Path) -> Result<Vec<ChannelArn>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        DashboardError::Argument(format!(
            "unable to read MediaLive channel ARN list '{}': {}",
            path.display(),
            e
        ))
    })?;

    let arns = select_channel_arns(contents.lines());
    tracing::info!(
        "Found {} valid MediaLive channel ARNs in the file {}",
        arns.len(),
        path.display()
    );
    Ok(arns)
}

/// Read a custom dashboard layout.
pub fn load_template(path: &Path) -> Result<Dashboard> {
    let body = fs::read_to_string(path).map_err(|e| {
        DashboardError::Template(format!("unable to read '{}': {}", path.display(), e))
    })?;
    let dashboard = Dashboard::parse(&body)?;
    tracing::debug!(
        "Loaded {} widgets from template {}",
        dashboard.widgets.len(),
        path.display()
    );
    Ok(dashboard)
}

pub fn write_body(path: &Path, body: &str) -> Result<()> {
    fs::write(path, body).map_err(|e| {
        DashboardError::Argument(format!("unable to write '{}': {}", path.display(), e))
    })?;
    tracing::info!("Dashboard body written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_channel_arns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "arn:aws:medialive:us-west-2:0123456789:channel:1").unwrap();
        writeln!(file, "arn:aws:medialive:us-east-1:0123456789:channel:2").unwrap();
        writeln!(file, "arn:aws:medialive:us-west-2:0123456789:channel:1").unwrap();
        writeln!(file, "arn:aws:medialive:us-west-2:0123456789:channel:3").unwrap();

        let arns = load_channel_arns(file.path()).unwrap();
        let ids: Vec<&str> = arns.iter().map(|a| a.channel_id()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_missing_list_file_is_argument_error() {
        let err = load_channel_arns(Path::new("/nonexistent/arns.txt")).unwrap_err();
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn test_unwritable_output_is_argument_error() {
        let err = write_body(Path::new("/nonexistent/dir/body.json"), "{}").unwrap_err();
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn test_template_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        write_body(&path, &Dashboard::standard().render()).unwrap();

        assert_eq!(load_template(&path).unwrap(), Dashboard::standard());
    }
}
