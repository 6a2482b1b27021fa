// ── Directory domain types ──

use serde::{Deserialize, Serialize};

/// One deployed environment (production, staging, ...) belonging to a
/// [`Site`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Install {
    pub name: String,
    /// "production", "staging", or "development".
    pub environment: String,
    /// Primary domain pointed at the install. An install without a
    /// domain cannot be matched or linked, but may still be listed.
    pub domain: Option<String>,
}

impl Install {
    /// The install's admin URL, or the bare site URL when `admin_links`
    /// is off. `None` when the install has no domain.
    pub fn url(&self, admin_links: bool) -> Option<String> {
        self.domain.as_ref().map(|domain| {
            if admin_links {
                format!("https://{domain}/wp-admin")
            } else {
                format!("https://{domain}")
            }
        })
    }

    /// Display label used in menus: `name (environment)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.environment)
    }
}

/// A site with its ordered installs. Identity is the name, assumed
/// unique within one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    /// Site group label, when the account uses groups.
    pub group: Option<String>,
    pub installs: Vec<Install>,
}

/// The full remote listing: an ordered sequence of sites.
///
/// Treated as an immutable snapshot once fetched -- the cache replaces
/// it wholesale on refresh and never mutates it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDirectory {
    pub sites: Vec<Site>,
}

impl SiteDirectory {
    pub fn new(sites: Vec<Site>) -> Self {
        Self { sites }
    }

    /// Number of sites in the listing.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
