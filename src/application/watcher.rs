//! Cycle orchestration
//!
//! One cycle runs fetch → extract → diff → notify → persist to completion.
//! Fetch, parse and persist failures end the cycle; a notification failure
//! is logged and swallowed so the snapshots still advance.
//!
//! A cycle-wide mutex serializes the timer and the on-demand trigger:
//! without it two overlapping cycles could interleave writes to the
//! previous-snapshot file.

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::domain::diff::new_ads;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http_client::{FetchError, HttpClient};
use crate::infrastructure::notifier::{Notifier, NotifyError};
use crate::infrastructure::parsing::{AdListParser, ParseError};
use crate::infrastructure::storage::{self, StoreError};

/// Anything that terminates a cycle early.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Persist(#[from] StoreError),

    #[error("failed to set up notifier: {0}")]
    NotifierSetup(NotifyError),
}

/// Outcome of one completed cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub extracted: usize,
    pub new: usize,
}

/// Owns the collaborators and the single-flight guard for cycle runs.
pub struct AdWatcher {
    config: AppConfig,
    fetcher: HttpClient,
    parser: AdListParser,
    notifier: Notifier,
    cycle_lock: Mutex<()>,
}

impl AdWatcher {
    pub fn new(config: AppConfig) -> Result<Self, CycleError> {
        let fetcher = HttpClient::new(std::time::Duration::from_secs(
            config.request_timeout_secs,
        ))?;
        let parser = AdListParser::new()?;
        let notifier = Notifier::new(config.smtp.clone()).map_err(CycleError::NotifierSetup)?;

        Ok(Self {
            config,
            fetcher,
            parser,
            notifier,
            cycle_lock: Mutex::new(()),
        })
    }

    /// Run one full cycle. Concurrent callers queue behind the guard, so
    /// the timer and the trigger endpoint never interleave snapshot writes.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let _guard = self.cycle_lock.lock().await;

        info!("cycle started for {}", self.config.listing_url);
        let markup = self.fetcher.fetch_listing_page(&self.config.listing_url).await?;

        let current = self.parser.extract(&markup)?;
        // Current snapshot is written right after extraction, regardless of
        // what the rest of the cycle does with it.
        storage::save(&self.config.current_ads_file, &current)?;
        info!("extracted {} ads", current.len());

        let previous = storage::load(&self.config.previous_ads_file);
        let fresh = new_ads(&previous, &current);
        info!("found {} new ads", fresh.len());

        // Best-effort notification: a send failure must not stop the
        // snapshots from advancing.
        if let Err(e) = self.notifier.notify(&fresh).await {
            error!("notification failed, continuing cycle: {e}");
        }

        storage::save(&self.config.previous_ads_file, &current)?;
        info!("cycle complete");

        Ok(CycleReport {
            extracted: current.len(),
            new: fresh.len(),
        })
    }
}
