//! Async client for the WP Engine Account API.
//!
//! Narrow by design: the only operation the menu layer needs is the
//! paginated site listing (`GET /sites`), authenticated with the
//! account's API username and password over HTTP Basic auth.

pub mod client;
pub mod error;
pub mod sites;
pub mod transport;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::Error;
pub use sites::{InstallRecord, SiteRecord, SitesPage};
pub use transport::TransportConfig;
