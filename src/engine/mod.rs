//! Execution engine module
//!
//! Drives each selected stream from its checkpoint to the newest report.
//!
//! # Overview
//!
//! Streams are synced one after another. Per stream the engine moves
//! through [`SyncPhase`]s:
//!
//! ```text
//! Pending -> Discovering -> (Emitting -> Checkpointed)* -> Done
//! ```
//!
//! Every drained artifact that produced records advances the stream's
//! bookmark, emits a `STATE` message and persists the state file, so an
//! aborted run resumes after the last completed artifact.

mod types;

pub use types::{SyncPhase, SyncStats};

use crate::clean::RowCleaner;
use crate::config::TapConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::output::Sink;
use crate::report::{ProbeKey, ReportLocation, ReportLocator, ReportRetriever};
use crate::schema::{StreamDefinition, StreamKind};
use crate::state::StateManager;
use chrono::Utc;
use futures::TryStreamExt;
use reqwest::StatusCode;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Sync engine for orchestrating report extraction
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// State manager
    state: StateManager,
    /// Tap configuration
    config: TapConfig,
    /// Statistics
    stats: SyncStats,
    /// Phase of the stream being synced
    phase: SyncPhase,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient, state: StateManager, config: TapConfig) -> Self {
        Self {
            client,
            state,
            config,
            stats: SyncStats::default(),
            phase: SyncPhase::default(),
        }
    }

    /// Create an engine with an authenticated client built from `config`
    pub fn from_config(config: TapConfig, state: StateManager) -> Result<Self> {
        let client = HttpClient::with_credentials(config.http_config(), config.credentials())?;
        Ok(Self::new(client, state, config))
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get sync statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Phase of the current (or last) stream
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Sync `streams` in order, stopping at the first failure
    pub async fn sync(&mut self, streams: &[StreamKind], sink: &mut dyn Sink) -> Result<SyncStats> {
        let start = Instant::now();

        for &kind in streams {
            if let Err(e) = self.sync_stream(kind, sink).await {
                error!(
                    stream = kind.name(),
                    phase = %self.phase,
                    "Stream sync failed: {e}"
                );
                return Err(e);
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            streams = self.stats.streams_synced,
            artifacts = self.stats.artifacts_processed,
            records = self.stats.records_emitted,
            skipped = self.stats.rows_skipped,
            "Sync completed in {} ms",
            self.stats.duration_ms
        );

        Ok(self.stats.clone())
    }

    /// Sync a single stream from its checkpoint
    pub async fn sync_stream(&mut self, kind: StreamKind, sink: &mut dyn Sink) -> Result<()> {
        let definition = kind.definition();
        let name = definition.name();

        enter(&mut self.phase, name, SyncPhase::Pending);
        sink.write_schema(name, &definition.json_schema(), &definition.key_properties())?;
        self.state.set_currently_syncing(Some(name)).await;

        enter(&mut self.phase, name, SyncPhase::Discovering);
        let start = self.start_key(definition).await?;
        info!(stream = name, "Starting sync at {start}");

        let location = ReportLocation::for_stream(
            &self.config.base_url(),
            definition,
            &self.config.company_account,
            &self.config.merchant_account,
        )?;
        let locator = ReportLocator::new(&self.client, &location);
        let retriever = ReportRetriever::new(&self.client, self.config.decoder());
        let cleaner = RowCleaner::new(definition, self.config.mapper());

        let mut checkpoint = start;
        let mut handles = std::pin::pin!(locator.locate(start));

        while let Some(handle) = handles.try_next().await? {
            enter(&mut self.phase, name, SyncPhase::Emitting);

            let mut rows = retriever.fetch(&handle).await?;

            let extracted_at = Utc::now();
            let mut last_id = None;
            let mut emitted = 0;
            for (ordinal, row) in (0u64..).zip(rows.by_ref()) {
                let record = cleaner.clean(row?, ordinal, handle.key)?;
                sink.write_record(name, &record, extracted_at)?;
                last_id = record.id().or(last_id);
                emitted += 1;
            }

            let skipped = rows.skipped();
            if skipped > 0 {
                warn!(
                    stream = name,
                    "Skipped {skipped} malformed rows in {}", handle.url
                );
            }
            self.stats.add_skipped(skipped);
            self.stats.add_artifact();
            self.stats.add_records(emitted);
            info!(stream = name, "Emitted {emitted} records from {}", handle.key);

            let Some(id) = last_id else {
                debug!(stream = name, "Empty report at {}, bookmark unchanged", handle.key);
                enter(&mut self.phase, name, SyncPhase::Discovering);
                continue;
            };

            match ProbeKey::from_record_id(definition.key_style, id)?.next() {
                Some(next) if next > checkpoint => {
                    checkpoint = next;
                    write_checkpoint(&self.state, sink, definition, next).await?;
                    info!(stream = name, "Checkpoint advanced to {next}");
                    enter(&mut self.phase, name, SyncPhase::Checkpointed);
                }
                _ => debug!(stream = name, "Checkpoint stays at {checkpoint}"),
            }
            enter(&mut self.phase, name, SyncPhase::Discovering);
        }

        self.state.set_currently_syncing(None).await;
        sink.write_state(&*self.state.state().await)?;
        self.state.checkpoint().await?;

        self.stats.add_stream();
        enter(&mut self.phase, name, SyncPhase::Done);
        Ok(())
    }

    /// Bookmark of the stream, else the configured default
    pub async fn start_key(&self, definition: &StreamDefinition) -> Result<ProbeKey> {
        let bookmark = self
            .state
            .get_bookmark(definition.name(), definition.bookmark_field)
            .await;

        match bookmark {
            Some(value) if !value.is_null() => {
                ProbeKey::from_checkpoint(definition.key_style, &value)
            }
            _ => self.config.default_start_key(definition.key_style),
        }
    }

    /// Probe the first payment accounting report to verify credentials
    ///
    /// A 404 still proves the credentials were accepted.
    pub async fn check(&self) -> Result<()> {
        let definition = StreamKind::PaymentAccounting.definition();
        let location = ReportLocation::for_stream(
            &self.config.base_url(),
            definition,
            &self.config.company_account,
            &self.config.merchant_account,
        )?;
        let url = location.url_for(self.config.default_start_key(definition.key_style)?)?;

        let status = self.client.head(url.as_str()).await?.status();
        debug!("Connection check {url} returned {status}");

        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(Error::ConnectionCheck {
                message: format!("credentials rejected with status {status}"),
            })
        } else {
            Err(Error::unexpected_status(url.as_str(), status.as_u16()))
        }
    }
}

fn enter(current: &mut SyncPhase, stream: &str, phase: SyncPhase) {
    debug!(stream, "{current} -> {phase}");
    *current = phase;
}

/// Write the bookmark, emit it and persist the state file
async fn write_checkpoint(
    state: &StateManager,
    sink: &mut dyn Sink,
    definition: &StreamDefinition,
    key: ProbeKey,
) -> Result<()> {
    {
        let mut current = state.state_mut().await;
        sink.write_bookmark(
            &mut current,
            definition.name(),
            definition.bookmark_field,
            key.to_checkpoint(),
        )?;
        sink.write_state(&current)?;
    }
    state.checkpoint().await
}
