// Account API site endpoints
//
// Site listing is account-scoped: `GET /sites` returns every site the
// authenticated user can see, each with its nested installs. The API
// paginates with `previous`/`next` links; `list_sites` follows `next`
// until the listing is exhausted.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::client::ApiClient;
use crate::error::Error;

/// Page size requested from the API (its documented maximum).
const PAGE_LIMIT: u32 = 100;

/// Upper bound on pages followed per listing. At `PAGE_LIMIT` sites per
/// page this covers far more sites than one account can hold; hitting
/// it means the `next` chain is cyclic or the API is misbehaving.
const MAX_PAGES: usize = 100;

/// One page of the paginated `/sites` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SitesPage {
    /// Absolute URL of the previous page, if any.
    pub previous: Option<String>,
    /// Absolute URL of the next page, if any.
    pub next: Option<String>,
    /// Total number of sites across all pages.
    pub count: u64,
    pub results: Vec<SiteRecord>,
}

/// A site as returned by the Account API.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteRecord {
    pub id: String,
    pub name: String,
    /// Site group label, when the account uses groups.
    pub group_name: Option<String>,
    #[serde(default)]
    pub installs: Vec<InstallRecord>,
}

/// One deployed environment belonging to a site.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallRecord {
    pub id: String,
    pub name: String,
    /// "production", "staging", or "development".
    pub environment: String,
    /// The install's primary domain. Absent while no domain is pointed
    /// at the install yet.
    pub cname: Option<String>,
}

impl ApiClient {
    /// List all sites visible to the authenticated account.
    ///
    /// `GET /sites?limit=100`, following `next` links until exhausted.
    /// Returns the concatenated results in listing order. The chain is
    /// capped at [`MAX_PAGES`] so a cyclic `next` link cannot loop
    /// forever.
    pub async fn list_sites(&self) -> Result<Vec<SiteRecord>, Error> {
        let mut url = self.api_url(&format!("sites?limit={PAGE_LIMIT}"))?;
        let mut sites = Vec::new();

        for _ in 0..MAX_PAGES {
            debug!("listing sites");
            let page: SitesPage = self.get(url).await?;
            sites.extend(page.results);

            match page.next {
                Some(next) => url = Url::parse(&next).map_err(Error::InvalidUrl)?,
                None => return Ok(sites),
            }
        }

        Err(Error::Pagination { pages: MAX_PAGES })
    }
}
