//! Store client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Which write protocol the store speaks.
///
/// Both variants share the retrieve endpoint and the store endpoint URL;
/// they differ in the body sent to `POST /store`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProtocol {
    /// `{ meta: { id, typeId, roleId, executionId }, content: "<json>" }`
    #[default]
    Meta,
    /// `{ resource: { id, typeId, creationContext, timestamp, content } }`
    Resource,
}

impl fmt::Display for StoreProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreProtocol::Meta => write!(f, "meta"),
            StoreProtocol::Resource => write!(f, "resource"),
        }
    }
}

impl FromStr for StoreProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "meta" => Ok(StoreProtocol::Meta),
            "resource" => Ok(StoreProtocol::Resource),
            other => Err(format!(
                "unknown store protocol '{}', expected 'meta' or 'resource'",
                other
            )),
        }
    }
}

/// Connection settings for the external store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root of the store API, e.g. `http://host/api/cafs`.
    pub base_url: Url,
    /// Upper bound on every retrieve or store call.
    pub timeout: Duration,
    pub protocol: StoreProtocol,
}

impl StoreConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a configuration with the default timeout and protocol.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                message: format!("{} cannot be used as a base URL", base_url),
            });
        }

        Ok(Self {
            base_url,
            timeout: Self::DEFAULT_TIMEOUT,
            protocol: StoreProtocol::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_protocol(mut self, protocol: StoreProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    ///
    /// Each segment is percent-encoded, so resource paths containing `?` or
    /// `#` cannot escape the path.
    pub fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl {
                message: format!("{} cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
