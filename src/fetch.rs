//! Source fetchers: HTTP with retry/backoff, and local files.
//!
//! The pipeline only ever sees the final outcome; transient-failure policy
//! (which statuses to retry, how long to wait) stays in here.

use std::fs;
use std::path::PathBuf;

use crate::pipeline::SourceFetcher;
use crate::{Error, Result};

#[cfg(feature = "net")]
use crate::FetchConfig;
#[cfg(feature = "net")]
use std::thread;
#[cfg(feature = "net")]
use std::time::Duration;

/// HTTP statuses worth retrying: rate limiting and transient server errors.
#[cfg(feature = "net")]
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Blocking HTTP fetcher with exponential backoff on transient failures.
#[cfg(feature = "net")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    config: FetchConfig,
}

#[cfg(feature = "net")]
impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Fetch {
                resource: String::new(),
                status: None,
                cause: Some(Box::new(e)),
            })?;
        Ok(Self { client, config })
    }

    fn backoff(&self, attempt: u32) {
        // backoff_ms, 2*backoff_ms, 4*backoff_ms, ...
        let wait = self.config.backoff_ms.saturating_mul(1 << attempt.min(16));
        log::debug!("retrying in {wait}ms");
        thread::sleep(Duration::from_millis(wait));
    }
}

#[cfg(feature = "net")]
impl SourceFetcher for HttpFetcher {
    fn fetch(&self, identifier: &str) -> Result<String> {
        let parsed = url::Url::parse(identifier).map_err(|e| Error::Fetch {
            resource: identifier.to_string(),
            status: None,
            cause: Some(Box::new(e)),
        })?;

        let mut attempt = 0;
        loop {
            log::debug!("GET {parsed} (attempt {})", attempt + 1);
            let outcome = self.client.get(parsed.clone()).send();

            match outcome {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if resp.status().is_success() {
                        return resp.text().map_err(|e| Error::Fetch {
                            resource: identifier.to_string(),
                            status: Some(status),
                            cause: Some(Box::new(e)),
                        });
                    }
                    if RETRYABLE_STATUSES.contains(&status) && attempt < self.config.max_retries {
                        log::warn!("HTTP {status} for {identifier}, will retry");
                        self.backoff(attempt);
                        attempt += 1;
                        continue;
                    }
                    return Err(Error::Fetch {
                        resource: identifier.to_string(),
                        status: Some(status),
                        cause: None,
                    });
                }
                Err(e) => {
                    if attempt < self.config.max_retries {
                        log::warn!("transport error for {identifier}: {e}, will retry");
                        self.backoff(attempt);
                        attempt += 1;
                        continue;
                    }
                    return Err(Error::Fetch {
                        resource: identifier.to_string(),
                        status: None,
                        cause: Some(Box::new(e)),
                    });
                }
            }
        }
    }
}

/// Fetcher reading a saved document export from disk.
///
/// The identifier passed to [`SourceFetcher::fetch`] is interpreted as a
/// path relative to `base` (or absolute).
#[derive(Debug, Default)]
pub struct FileFetcher {
    base: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }
}

impl SourceFetcher for FileFetcher {
    fn fetch(&self, identifier: &str) -> Result<String> {
        let path = match &self.base {
            Some(base) => base.join(identifier),
            None => PathBuf::from(identifier),
        };
        fs::read_to_string(&path).map_err(|e| Error::Fetch {
            resource: path.display().to_string(),
            status: None,
            cause: Some(Box::new(e)),
        })
    }
}
