//! Repository listing records shared by the page loader and the mirror
//! server.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account whose repositories the page lists.
pub const OWNER: &str = "dinonuwg";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// The subset of a repository listing entry the page needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    pub owner: RepoOwner,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    Network,
    Status(u16),
    Decode,
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    TooLarge,
}

impl FetchError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Status(_) => "http_status",
            Self::Decode => "decode",
            Self::TooLarge => "response_too_large",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "listing request failed with status {code}"),
            other => write!(f, "listing request failed: {}", other.as_str()),
        }
    }
}

impl std::error::Error for FetchError {}

/// Where repository listings come from: the browser fetch on the client, the
/// upstream HTTP client on the server, a stub in tests.
pub trait RepoSource {
    async fn list_repos(&self, owner: &str) -> Result<Vec<RepoRecord>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_status() {
        assert_eq!(
            FetchError::Status(502).to_string(),
            "listing request failed with status 502"
        );
        assert_eq!(FetchError::Decode.to_string(), "listing request failed: decode");
        assert_eq!(FetchError::Status(403).status_code(), Some(403));
        assert_eq!(FetchError::Network.status_code(), None);
    }

    #[test]
    fn record_ignores_extra_listing_fields() {
        let raw = r#"{"name": "a", "html_url": "https://github.com/o/a", "owner": {"login": "o"}, "fork": true}"#;

        let record: RepoRecord = serde_json::from_str(raw).expect("record decodes");

        assert_eq!(record.description, None);
        assert_eq!(record.owner.login, "o");
    }
}
