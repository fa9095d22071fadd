//! Report discovery by probing
//!
//! Reports are never listed by the API. The locator builds the URL of the
//! next expected artifact and sends a `HEAD` request: a hit is yielded and
//! the key advances, a 404 means there is nothing newer yet.

use super::types::{ProbeKey, ReportHandle, ReportLocation};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use futures::stream::{self, Stream};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// Probes one stream's report location
#[derive(Debug, Clone, Copy)]
pub struct ReportLocator<'a> {
    client: &'a HttpClient,
    location: &'a ReportLocation,
}

impl<'a> ReportLocator<'a> {
    pub fn new(client: &'a HttpClient, location: &'a ReportLocation) -> Self {
        Self { client, location }
    }

    /// Check whether the artifact for `key` exists
    ///
    /// Returns `Ok(None)` on 404 and on transport failures, which are logged.
    pub async fn probe(&self, key: ProbeKey) -> Result<Option<ReportHandle>> {
        let url = self.location.url_for(key)?;

        let response = match self.client.head(url.as_str()).await {
            Ok(response) => response,
            Err(e) if e.is_transport() => {
                warn!("Could not reach {url}: {e}; no more data found for now");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let status = response.status();
        if status.is_success() {
            info!("Found {} report for {key}", self.location.report_type());
            Ok(Some(ReportHandle { url, key }))
        } else if status == StatusCode::NOT_FOUND {
            debug!("No {} report for {key}", self.location.report_type());
            Ok(None)
        } else {
            Err(Error::unexpected_status(url.as_str(), status.as_u16()))
        }
    }

    /// Lazily yield every existing artifact from `start` onward
    ///
    /// The sequence ends at the first missing key. An unexpected status is
    /// yielded as the final item.
    pub fn locate(&self, start: ProbeKey) -> impl Stream<Item = Result<ReportHandle>> + 'a {
        let locator = *self;
        stream::try_unfold(Some(start), move |cursor| locator.advance(cursor))
    }

    /// One probe step: the handle found and the cursor after it
    async fn advance(
        self,
        cursor: Option<ProbeKey>,
    ) -> Result<Option<(ReportHandle, Option<ProbeKey>)>> {
        let Some(key) = cursor else {
            return Ok(None);
        };
        Ok(self.probe(key).await?.map(|handle| (handle, key.next())))
    }
}
