//! The `sites` command: list everything the account can see.

use serde::Serialize;
use tabled::Tabled;

use wpenav_core::{ApiSource, Navigator, SiteDirectory};

use crate::cli::{GlobalOpts, OutputFormat, SitesArgs, SitesCommand};
use crate::error::CliError;
use crate::output;

/// One install, flattened with its owning site.
#[derive(Debug, Serialize)]
struct InstallListing {
    site: String,
    group: Option<String>,
    install: String,
    environment: String,
    domain: Option<String>,
}

#[derive(Tabled)]
struct InstallRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Install")]
    install: String,
    #[tabled(rename = "Environment")]
    environment: String,
    #[tabled(rename = "Domain")]
    domain: String,
}

impl From<&InstallListing> for InstallRow {
    fn from(listing: &InstallListing) -> Self {
        Self {
            site: listing.site.clone(),
            group: listing.group.clone().unwrap_or_else(|| "-".into()),
            install: listing.install.clone(),
            environment: listing.environment.clone(),
            domain: listing.domain.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

pub async fn handle(
    navigator: &Navigator<ApiSource>,
    args: SitesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List { refresh } => {
            let directory = navigator.directory(refresh).await?;
            let listings = flatten(&directory);

            let out = match global.output {
                OutputFormat::Table => {
                    let rows: Vec<InstallRow> = listings.iter().map(InstallRow::from).collect();
                    output::table(&rows)
                }
                OutputFormat::Json => output::json(&listings, false),
                OutputFormat::JsonCompact => output::json(&listings, true),
                OutputFormat::Yaml => output::yaml(&listings),
                OutputFormat::Plain => listings
                    .iter()
                    .map(|l| l.install.clone())
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            output::print(&out, global.quiet);
            Ok(())
        }
    }
}

fn flatten(directory: &SiteDirectory) -> Vec<InstallListing> {
    directory
        .sites
        .iter()
        .flat_map(|site| {
            site.installs.iter().map(|install| InstallListing {
                site: site.name.clone(),
                group: site.group.clone(),
                install: install.name.clone(),
                environment: install.environment.clone(),
                domain: install.domain.clone(),
            })
        })
        .collect()
}
