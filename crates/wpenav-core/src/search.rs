//! Free-text filtering of the cached directory.
//!
//! Backs the live search box in the menu. The calling UI debounces
//! input (~300ms of inactivity) and discards stale in-flight responses
//! when a newer query has been issued; the functions here are one-shot.

use serde::Serialize;

use crate::model::SiteDirectory;

/// One search result row, shaped for the `{ results: [...] }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub site_name: String,
    pub install_name: String,
    pub environment: String,
    pub url: String,
}

/// Case-insensitive substring search across site name, install name,
/// and domain. The environment field is NOT searched.
///
/// An empty or whitespace-only query returns nothing (no "browse all"
/// fallback), installs without a domain are excluded (no URL can be
/// formed), and results come back in directory order -- site order,
/// then install order within each site.
pub fn search(directory: &SiteDirectory, query: &str, admin_links: bool) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();

    for site in &directory.sites {
        let site_name = site.name.to_lowercase();
        for install in &site.installs {
            let Some(url) = install.url(admin_links) else {
                continue;
            };
            let Some(domain) = install.domain.as_deref() else {
                continue;
            };

            let install_name = install.name.to_lowercase();
            let domain = domain.to_lowercase();

            if site_name.contains(&needle)
                || install_name.contains(&needle)
                || domain.contains(&needle)
            {
                hits.push(SearchHit {
                    site_name: site.name.clone(),
                    install_name: install.name.clone(),
                    environment: install.environment.clone(),
                    url,
                });
            }
        }
    }

    hits
}
