//! Authentication credentials for the storage endpoint.

use minio::s3::creds::StaticProvider;
use serde::{Deserialize, Serialize};

/// Static credentials for the storage endpoint.
///
/// The secret key is never serialized, and both keys are masked in debug
/// output so credentials cannot leak through diagnostic logging.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Access key for authentication.
    #[serde(default)]
    pub access_key: String,

    /// Secret key for authentication. Skipped on serialization.
    #[serde(default, skip_serializing)]
    pub secret_key: String,

    /// Optional session token for temporary credentials.
    #[serde(default)]
    pub session_token: Option<String>,
}

impl Credentials {
    /// Creates credentials from an access key and a secret key.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            session_token: None,
        }
    }

    /// Attaches a session token for temporary credentials.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    /// Returns the access key.
    #[inline]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Returns the session token if one is set.
    #[inline]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Returns a masked access key suitable for log output.
    ///
    /// Shows the first four characters followed by asterisks.
    pub fn access_key_masked(&self) -> String {
        if self.access_key.len() <= 4 {
            "*".repeat(self.access_key.len())
        } else {
            format!("{}***", &self.access_key[..4])
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key_masked())
            .field("secret_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl From<&Credentials> for StaticProvider {
    fn from(credentials: &Credentials) -> Self {
        StaticProvider::new(
            &credentials.access_key,
            &credentials.secret_key,
            credentials.session_token.as_deref(),
        )
    }
}
