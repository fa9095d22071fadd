//! Report download

use super::types::ReportHandle;
use crate::decode::{CsvDecoder, ReportRows};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use tracing::debug;

/// Downloads located artifacts and decodes them into raw rows
#[derive(Debug)]
pub struct ReportRetriever<'a> {
    client: &'a HttpClient,
    decoder: CsvDecoder,
}

impl<'a> ReportRetriever<'a> {
    pub fn new(client: &'a HttpClient, decoder: CsvDecoder) -> Self {
        Self { client, decoder }
    }

    /// Download one artifact and start decoding it
    ///
    /// The artifact was just seen by a probe, so any failure here is fatal.
    /// Rows are decoded as the caller pulls them.
    pub async fn fetch(&self, handle: &ReportHandle) -> Result<ReportRows> {
        let response = self.client.get(handle.url.as_str()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::unexpected_status(handle.url.as_str(), status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Downloaded {} bytes from {}", body.len(), handle.url);

        let rows = self.decoder.rows(body)?;
        debug!("Report for {} has {} columns", handle.key, rows.headers().len());
        Ok(rows)
    }
}
