// ── Runtime account configuration ──
//
// These types describe *how* to reach the Account API and how the menu
// should behave. They carry credential data and tuning, but never touch
// disk -- the CLI resolves its profile into an `AccountConfig` and
// hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::menu::MenuMode;

/// API username and password for one hosting account.
///
/// The password only ever exists here as plaintext in memory; the
/// config layer stores it encrypted at rest.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Configuration for one account, built by the frontend.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Account API root (normally `wpenav_api::DEFAULT_API_URL`).
    pub api_url: Url,
    /// API credentials.
    pub credentials: Credentials,
    /// The current site's hostname, lower-cased by the caller.
    pub current_host: String,
    /// Directory snapshot time-to-live.
    pub cache_ttl: Duration,
    /// Menu correlation mode.
    pub menu_mode: MenuMode,
    /// Link installs to `https://{domain}/wp-admin` (true) or the bare
    /// site URL (false).
    pub admin_links: bool,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl AccountConfig {
    /// Fallback TTL, also used to coerce non-positive configured values.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);
}
