//! The `Navigator` facade and the JSON envelopes the UI layer consumes.
//!
//! Replaces the original's process-wide lazily-initialized SDK with an
//! explicitly constructed object: the facade owns the API source, the
//! directory cache, and the account configuration, and tests swap the
//! source for a fake.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use wpenav_api::{ApiClient, TransportConfig};

use crate::config::{AccountConfig, Credentials};
use crate::convert::directory_from_records;
use crate::directory::{DirectoryCache, DirectorySource};
use crate::domain::domain_root;
use crate::error::CoreError;
use crate::menu::{self, Menu};
use crate::model::SiteDirectory;
use crate::search::{self, SearchHit};

// ── JSON envelopes ──────────────────────────────────────────────────

/// Success envelope for the search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchEnvelope {
    pub results: Vec<SearchHit>,
}

/// Error envelope: a human-readable message, never a raw trace.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(err: &CoreError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Secret override for a credential test.
///
/// The original treated the literal masked value (`"********"`) as
/// "use the stored secret", which collides with a user whose password
/// really is that string. The core takes the intent explicitly; only
/// UI boundaries translate the mask.
#[derive(Debug, Clone, Default)]
pub enum SecretOverride {
    /// Fall back to the stored secret.
    #[default]
    Stored,
    /// Use this value instead.
    Provided(SecretString),
}

// ── Production directory source ─────────────────────────────────────

/// [`DirectorySource`] backed by the Account API client.
#[derive(Debug)]
pub struct ApiSource {
    client: ApiClient,
}

impl ApiSource {
    /// Build a source from the account's stored credentials.
    pub fn new(config: &AccountConfig) -> Result<Self, CoreError> {
        Self::with_credentials(config, &config.credentials)
    }

    /// Build a source with explicit credentials (credential tests).
    ///
    /// Empty credentials are an authentication failure up front: the
    /// client cannot be constructed without them.
    pub fn with_credentials(
        config: &AccountConfig,
        credentials: &Credentials,
    ) -> Result<Self, CoreError> {
        if credentials.username.is_empty() || credentials.password.expose_secret().is_empty() {
            return Err(CoreError::AuthenticationFailed {
                message: "no API credentials configured".into(),
            });
        }

        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let client = ApiClient::new(
            config.api_url.clone(),
            credentials.username.clone(),
            credentials.password.clone(),
            &transport,
        )?;
        Ok(Self { client })
    }
}

impl DirectorySource for ApiSource {
    async fn fetch(&self) -> Result<SiteDirectory, CoreError> {
        let records = self.client.list_sites().await?;
        Ok(directory_from_records(records))
    }
}

// ── Facade ──────────────────────────────────────────────────────────

/// Owns the directory source, the cache, and the account config.
pub struct Navigator<S: DirectorySource> {
    config: AccountConfig,
    source: S,
    cache: DirectoryCache,
}

impl Navigator<ApiSource> {
    /// Construct a navigator backed by the real Account API.
    pub fn connect(config: AccountConfig) -> Result<Self, CoreError> {
        let source = ApiSource::new(&config)?;
        Ok(Self::with_source(config, source))
    }

    /// Test credentials against the API.
    ///
    /// Overrides fall back to the stored values. The cache is dropped
    /// up front -- credentials or account contents may have changed --
    /// and repopulated from the test fetch on success.
    pub async fn test_credentials(
        &self,
        username_override: Option<String>,
        secret: SecretOverride,
    ) -> Result<String, CoreError> {
        let credentials = Credentials {
            username: username_override
                .unwrap_or_else(|| self.config.credentials.username.clone()),
            password: match secret {
                SecretOverride::Provided(password) => password,
                SecretOverride::Stored => self.config.credentials.password.clone(),
            },
        };

        let source = ApiSource::with_credentials(&self.config, &credentials)?;
        self.verify_source(&source).await
    }
}

impl<S: DirectorySource> Navigator<S> {
    /// Construct a navigator with an injected source (tests).
    pub fn with_source(config: AccountConfig, source: S) -> Self {
        let cache = DirectoryCache::new(config.cache_ttl);
        Self {
            config,
            source,
            cache,
        }
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    /// The cached directory snapshot, fetching through the source when
    /// the entry is missing, expired, or `force_refresh` is set.
    pub async fn directory(&self, force_refresh: bool) -> Result<Arc<SiteDirectory>, CoreError> {
        self.cache.get(&self.source, force_refresh).await
    }

    /// Build the related-installs menu for the configured host.
    ///
    /// Returns the error instead of swallowing it; the frontend adapter
    /// decides that a missing menu beats a broken one.
    pub async fn menu(&self) -> Result<Menu, CoreError> {
        let directory = self.directory(false).await?;
        let current_root = domain_root(&self.config.current_host);
        Ok(menu::build_menu(
            &directory,
            &current_root,
            self.config.menu_mode,
            self.config.admin_links,
        ))
    }

    /// Run a free-text search over the cached directory.
    ///
    /// Interactive frontends debounce input (~300ms) and apply
    /// last-query-wins before calling this; the call itself is one-shot.
    pub async fn search(&self, query: &str) -> Result<SearchEnvelope, CoreError> {
        let directory = self.directory(false).await?;
        Ok(SearchEnvelope {
            results: search::search(&directory, query, self.config.admin_links),
        })
    }

    /// Invalidate the cache, then fetch through `source` and repopulate
    /// it. Returns the human-readable success message.
    pub async fn verify_source<T: DirectorySource>(
        &self,
        source: &T,
    ) -> Result<String, CoreError> {
        self.cache.invalidate().await;
        let directory = self.cache.get(source, true).await?;
        debug!(sites = directory.len(), "credential test succeeded");
        Ok(format!(
            "Success! Found {} site(s) associated with your account.",
            directory.len()
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::menu::{MenuMode, MenuNode};
    use crate::model::{Install, Site};

    struct FakeSource(SiteDirectory);

    impl DirectorySource for FakeSource {
        async fn fetch(&self) -> Result<SiteDirectory, CoreError> {
            Ok(self.0.clone())
        }
    }

    fn config() -> AccountConfig {
        AccountConfig {
            api_url: "https://api.wpengineapi.com/v1".parse().unwrap(),
            credentials: Credentials {
                username: "user".into(),
                password: SecretString::from("pass".to_string()),
            },
            current_host: "acme.com".into(),
            cache_ttl: Duration::from_secs(3600),
            menu_mode: MenuMode::CurrentFirst,
            admin_links: true,
            timeout: Duration::from_secs(30),
        }
    }

    fn fake_directory() -> SiteDirectory {
        SiteDirectory::new(vec![Site {
            name: "Acme".into(),
            group: None,
            installs: vec![Install {
                name: "acmeprod".into(),
                environment: "production".into(),
                domain: Some("acme.com".into()),
            }],
        }])
    }

    #[tokio::test]
    async fn menu_marks_configured_host_as_current() {
        let nav = Navigator::with_source(config(), FakeSource(fake_directory()));

        let menu = nav.menu().await.unwrap();

        assert_eq!(
            menu.nodes.first().unwrap(),
            &MenuNode::Label {
                text: "Current Site:".into()
            }
        );
    }

    #[tokio::test]
    async fn search_envelope_serializes_expected_shape() {
        let nav = Navigator::with_source(config(), FakeSource(fake_directory()));

        let envelope = nav.search("acme").await.unwrap();
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            json["results"][0]["site_name"],
            serde_json::Value::String("Acme".into())
        );
        assert_eq!(
            json["results"][0]["url"],
            serde_json::Value::String("https://acme.com/wp-admin".into())
        );
    }

    #[tokio::test]
    async fn verify_reports_site_count_and_repopulates_cache() {
        let nav = Navigator::with_source(config(), FakeSource(fake_directory()));

        let message = nav.verify_source(&FakeSource(fake_directory())).await.unwrap();
        assert_eq!(
            message,
            "Success! Found 1 site(s) associated with your account."
        );

        // The test fetch populated the cache; a plain read serves it.
        let directory = nav.directory(false).await.unwrap();
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn empty_credentials_fail_source_construction() {
        let mut cfg = config();
        cfg.credentials.password = SecretString::from(String::new());

        let err = ApiSource::new(&cfg).unwrap_err();
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }

    #[test]
    fn error_envelope_carries_human_readable_message() {
        let err = CoreError::FetchFailed {
            message: "connection refused".into(),
        };
        let envelope = ErrorEnvelope::new(&err);
        assert_eq!(
            envelope.message,
            "Could not fetch the site listing: connection refused"
        );
    }
}
