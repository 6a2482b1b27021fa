//! Site matching and caching layer between `wpenav-api` and UI consumers.
//!
//! This crate owns the business logic of the related-installs menu:
//!
//! - **[`domain_root`]** — normalizes a hostname to the comparison key
//!   used to decide whether two domains belong to the same logical site.
//! - **[`DirectoryCache`]** — single-entry, TTL-bound read-through cache
//!   around the remote site listing. Replaced wholesale on refresh,
//!   dropped explicitly when credentials change.
//! - **[`matcher`]** / **[`search`]** — pure functions over a cached
//!   [`SiteDirectory`] snapshot: current-site correlation and free-text
//!   filtering.
//! - **[`Menu`]** — the ordered tree a frontend renders into an admin
//!   bar, built from the matcher's output.
//! - **[`Navigator`]** — facade owning the API source, the cache, and
//!   the account configuration. Constructed explicitly so tests can
//!   inject a fake directory source.

pub mod config;
pub mod convert;
pub mod directory;
pub mod domain;
pub mod error;
pub mod matcher;
pub mod menu;
pub mod model;
pub mod search;
pub mod service;

pub use config::{AccountConfig, Credentials};
pub use directory::{DirectoryCache, DirectorySource};
pub use domain::domain_root;
pub use error::CoreError;
pub use menu::{Menu, MenuMode, MenuNode};
pub use model::{Install, Site, SiteDirectory};
pub use search::SearchHit;
pub use service::{ApiSource, ErrorEnvelope, Navigator, SearchEnvelope, SecretOverride};
