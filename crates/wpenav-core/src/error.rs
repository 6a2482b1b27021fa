use thiserror::Error;

/// Error type for the core layer.
///
/// Absence of a cache entry and absence of a domain match are not
/// errors -- they surface as a fetch and an empty result respectively.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The API rejected the credentials, or none were configured.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// The remote site listing could not be fetched.
    #[error("Could not fetch the site listing: {message}")]
    FetchFailed { message: String },

    /// The account configuration is unusable (bad URL, missing fields).
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl From<wpenav_api::Error> for CoreError {
    fn from(err: wpenav_api::Error) -> Self {
        match err {
            wpenav_api::Error::Authentication { message } => {
                Self::AuthenticationFailed { message }
            }
            wpenav_api::Error::InvalidUrl(e) => Self::Config {
                message: e.to_string(),
            },
            other => Self::FetchFailed {
                message: other.to_string(),
            },
        }
    }
}
