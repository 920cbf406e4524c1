//! CSV export command.
//!
//! Logs in through the dashboard client, fetches every message, applies the
//! same filter pipeline the dashboard uses, and writes the CSV to a file.

use std::path::PathBuf;

use sanad_dashboard::csv::export_csv;
use sanad_dashboard::{ApiClient, Dashboard, ReadFilter};

use super::CliError;

/// Arguments for the export command.
pub struct ExportArgs {
    pub url: String,
    pub username: String,
    pub password: String,
    pub output: PathBuf,
    pub search: Option<String>,
    pub service: Option<String>,
    pub read: Option<String>,
}

/// Fetch, filter, and write the CSV.
pub async fn run(args: &ExportArgs) -> Result<(), CliError> {
    let read = parse_read_filter(args.read.as_deref())?;

    let mut client = ApiClient::new(args.url.clone())?;
    client.login(&args.username, &args.password).await?;

    let messages = client.fetch_all_messages().await?;

    let mut dashboard = Dashboard::new();
    dashboard.set_messages(messages);
    if let Some(search) = &args.search {
        dashboard.set_query(search.clone());
    }
    if let Some(service) = &args.service {
        dashboard.set_service(service.clone());
    }
    dashboard.set_read(read);

    let filtered = dashboard.filtered();
    let rows = filtered.len();
    std::fs::write(&args.output, export_csv(&filtered))?;

    if let Err(e) = client.logout().await {
        tracing::warn!(error = %e, "Logout after export failed");
    }

    tracing::info!(rows, output = %args.output.display(), "Export complete");
    Ok(())
}

/// Parse the `--read` argument.
fn parse_read_filter(raw: Option<&str>) -> Result<ReadFilter, CliError> {
    match raw.map(str::to_lowercase).as_deref() {
        None | Some("all") => Ok(ReadFilter::All),
        Some("read") => Ok(ReadFilter::Read),
        Some("unread") => Ok(ReadFilter::Unread),
        Some(other) => Err(CliError::InvalidReadFilter(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read_filter() {
        assert!(matches!(parse_read_filter(None), Ok(ReadFilter::All)));
        assert!(matches!(parse_read_filter(Some("ALL")), Ok(ReadFilter::All)));
        assert!(matches!(parse_read_filter(Some("read")), Ok(ReadFilter::Read)));
        assert!(matches!(
            parse_read_filter(Some("Unread")),
            Ok(ReadFilter::Unread)
        ));
        assert!(parse_read_filter(Some("junk")).is_err());
    }
}
