// ── Wire payload → domain model conversion ──

use wpenav_api::SiteRecord;

use crate::model::{Install, Site, SiteDirectory};

/// Build a directory snapshot from the raw API listing, preserving the
/// listing order of sites and installs.
pub fn directory_from_records(records: Vec<SiteRecord>) -> SiteDirectory {
    let sites = records
        .into_iter()
        .map(|record| Site {
            name: record.name,
            group: record.group_name,
            installs: record
                .installs
                .into_iter()
                .map(|install| Install {
                    name: install.name,
                    environment: install.environment,
                    domain: install.cname,
                })
                .collect(),
        })
        .collect();

    SiteDirectory::new(sites)
}
