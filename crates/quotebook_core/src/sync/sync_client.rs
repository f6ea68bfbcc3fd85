//! Fetch-and-merge and publish orchestration.

use super::remote::QuoteRemote;
use super::schedule::SyncSchedule;
use super::SyncResult;
use crate::model::quote::Quote;
use crate::repo::quote_repo::{QuoteRepository, RepoResult};
use crate::store::KeyValueStore;
use log::{debug, error, info};
use std::time::Instant;

/// Summary of one fetch-and-merge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeReport {
    /// Records returned by the remote endpoint.
    pub fetched: usize,
    /// Records dropped for lacking usable text.
    pub skipped: usize,
    /// Remote quotes that were new or replaced a differing local copy.
    pub changed: usize,
}

/// Best-effort synchronization against one remote endpoint.
pub struct SyncClient<R: QuoteRemote> {
    remote: R,
}

impl<R: QuoteRemote> SyncClient<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Fetches the remote collection and merges it into `repo`.
    ///
    /// Failures are logged here; callers may drop the error.
    pub async fn fetch_and_merge<S: KeyValueStore>(
        &self,
        repo: &mut QuoteRepository<S>,
    ) -> SyncResult<MergeReport> {
        let started_at = Instant::now();
        debug!("event=sync_fetch module=sync status=start");

        let records = match self.remote.fetch_quotes().await {
            Ok(records) => records,
            Err(err) => {
                error!(
                    "event=sync_fetch module=sync status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                return Err(err);
            }
        };

        let fetched = records.len();
        let quotes: Vec<Quote> = records
            .into_iter()
            .filter_map(|record| record.into_quote())
            .collect();
        let skipped = fetched - quotes.len();

        let changed = match repo.merge(quotes) {
            Ok(changed) => changed,
            Err(err) => {
                error!(
                    "event=sync_fetch module=sync status=error duration_ms={} error_code=persist error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        info!(
            "event=sync_fetch module=sync status=ok duration_ms={} fetched={} skipped={} changed={}",
            started_at.elapsed().as_millis(),
            fetched,
            skipped,
            changed
        );
        Ok(MergeReport {
            fetched,
            skipped,
            changed,
        })
    }

    /// Publishes one quote; the quote is dropped on failure.
    pub async fn publish(&self, quote: &Quote) -> SyncResult<serde_json::Value> {
        match self.remote.publish_quote(quote).await {
            Ok(ack) => {
                info!("event=quote_publish module=sync status=ok response={ack}");
                Ok(ack)
            }
            Err(err) => {
                error!(
                    "event=quote_publish module=sync status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Adds a quote locally, then publishes it once.
    ///
    /// The quote is persisted before the publish starts. A publish failure is
    /// logged by [`SyncClient::publish`] and does not fail the add.
    pub async fn add_and_publish<S: KeyValueStore>(
        &self,
        repo: &mut QuoteRepository<S>,
        text: &str,
        category: &str,
    ) -> RepoResult<Quote> {
        let quote = repo.add(text, category)?;
        let _ = self.publish(&quote).await;
        Ok(quote)
    }

    /// Runs `fetch_and_merge` on every schedule tick, forever.
    ///
    /// `on_report` sees each successful pass; failed passes are skipped.
    pub async fn run_periodic<S, F>(
        &self,
        repo: &mut QuoteRepository<S>,
        schedule: &mut SyncSchedule,
        mut on_report: F,
    ) where
        S: KeyValueStore,
        F: FnMut(&MergeReport),
    {
        info!(
            "event=sync_schedule module=sync status=start period_ms={}",
            schedule.period().as_millis()
        );
        loop {
            schedule.tick().await;
            if let Ok(report) = self.fetch_and_merge(repo).await {
                on_report(&report);
            }
        }
    }
}
