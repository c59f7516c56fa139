// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! The synchronization driver.
//!
//! [`SyncEngine::synchronize`] is the single entry point: it resolves the
//! form list (network fetch or cache), schedules one pull job per form
//! selected for download, and runs every pending job as an independent
//! task. The engine is a cheap clone over shared inner state, following
//! the same container shape as the server side.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, oneshot, Mutex};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogService, HttpCatalog};
use crate::config::SyncConfig;
use crate::events::SyncEvent;
use crate::job::Job;
use crate::queue::JobQueue;
use crate::state::SyncState;
use fw_core::{update_form_list, FormListEntry, JobKind, Result, TableRegistry};

/// The background synchronization engine.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<Inner>,
}

struct Inner {
    config: SyncConfig,
    /// Shared sync-in-progress flag.
    state: SyncState,
    /// The job queue, published to `state` on every refresh.
    queue: JobQueue,
    /// Remote catalog collaborator.
    catalog: Arc<dyn CatalogService>,
    /// Local store (protected by mutex for writes).
    registry: Mutex<TableRegistry>,
    /// Notification fanout for UI collaborators.
    events_tx: broadcast::Sender<SyncEvent>,
}

impl SyncEngine {
    /// Creates an engine over the given catalog service and local store.
    pub fn new(
        config: SyncConfig,
        catalog: Arc<dyn CatalogService>,
        registry: TableRegistry,
    ) -> Self {
        let state = SyncState::new();
        let queue = JobQueue::new(state.clone());
        let (events_tx, _) = broadcast::channel(256);
        SyncEngine {
            inner: Arc::new(Inner {
                config,
                state,
                queue,
                catalog,
                registry: Mutex::new(registry),
                events_tx,
            }),
        }
    }

    /// Creates an engine talking HTTP to the configured server.
    pub fn connect(config: SyncConfig, registry: TableRegistry) -> Result<Self> {
        let catalog = Arc::new(HttpCatalog::new(&config)?);
        Ok(SyncEngine::new(config, catalog, registry))
    }

    /// The shared sync-in-progress state.
    pub fn state(&self) -> &SyncState {
        &self.inner.state
    }

    /// The job queue.
    pub fn queue(&self) -> &JobQueue {
        &self.inner.queue
    }

    /// Subscribes to engine notifications.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SyncEvent> {
        self.inner.events_tx.subscribe()
    }

    fn emit(&self, event: SyncEvent) {
        // No subscribers is fine; the engine never blocks on listeners.
        let _ = self.inner.events_tx.send(event);
    }

    /// Resolves the list of available forms.
    ///
    /// A non-empty `prior` list is returned as-is (cache hit, no network
    /// call). Otherwise the server catalog is fetched and merged with
    /// the local table registry.
    pub async fn resolve_form_list(
        &self,
        prior: Vec<FormListEntry>,
    ) -> Result<Vec<FormListEntry>> {
        if !prior.is_empty() {
            return Ok(prior);
        }
        let catalog = self.inner.catalog.fetch_catalog().await?;
        let tables = self.inner.registry.lock().await.table_names()?;
        debug!(
            forms = catalog.len(),
            local_tables = tables.len(),
            "resolved form catalog"
        );
        Ok(update_form_list(&prior, &tables, catalog))
    }

    /// Schedules one pending pull job per entry selected for download.
    ///
    /// Entries with `download == false` are skipped. Returns the number
    /// of jobs created; never errors.
    pub async fn generate_jobs(&self, list: &[FormListEntry]) -> usize {
        let mut scheduled = 0;
        for entry in list.iter().filter(|e| e.download) {
            let job = Job::pull_form(entry.table_name.clone(), entry.reference.clone());
            self.inner.queue.push(Arc::new(job)).await;
            scheduled += 1;
        }
        debug!(scheduled, "generated sync jobs");
        scheduled
    }

    /// Runs one synchronization round.
    ///
    /// Publishes in-progress immediately, then either runs the jobs the
    /// queue already holds, or resolves the form list, schedules jobs,
    /// and goes around again so the new jobs get run in the same call.
    /// When nothing gets scheduled, one status refresh settles the
    /// optimistic flag back to false.
    ///
    /// Returns the resolved form list so the caller can pass it back in
    /// and skip the catalog fetch next time. A catalog fetch failure is
    /// propagated after emitting a [`SyncEvent::CatalogError`]; no jobs
    /// are scheduled in that case.
    pub async fn synchronize(
        &self,
        prior: Vec<FormListEntry>,
    ) -> Result<Vec<FormListEntry>> {
        self.inner.state.set(true);
        self.emit(SyncEvent::Started);

        let mut list = prior;
        loop {
            if !self.inner.queue.is_empty().await {
                let pending = self.inner.queue.pending_jobs().await;
                info!(jobs = pending.len(), "running pending sync jobs");
                for job in pending {
                    let engine = self.clone();
                    tokio::spawn(async move {
                        engine.run_job(job).await;
                    });
                }
                return Ok(list);
            }

            list = match self.resolve_form_list(list).await {
                Ok(list) => list,
                Err(err) => {
                    warn!("form list resolution failed: {err}");
                    self.emit(SyncEvent::catalog_error(&err));
                    self.inner.queue.refresh_status().await;
                    return Err(err);
                }
            };

            if self.generate_jobs(&list).await == 0 {
                // Nothing was started; correct the optimistic flag.
                self.inner.queue.refresh_status().await;
                return Ok(list);
            }
        }
    }

    /// Runs one job to completion.
    ///
    /// A job that is not pending is left untouched: no remote call is
    /// made and no status changes. Completion triggers a status refresh
    /// regardless of outcome.
    pub(crate) async fn run_job(&self, job: Arc<Job>) {
        if !job.begin() {
            return;
        }
        info!(table = %job.target, kind = %job.kind, "sync job started");
        let outcome = self.pull(&job).await;
        match &outcome {
            Ok(()) => info!(table = %job.target, "sync job finished"),
            Err(err) => warn!(table = %job.target, "sync job failed: {err}"),
        }
        job.finish(&outcome);
        self.emit(SyncEvent::JobFinished {
            target: job.target.clone(),
            status: job.status(),
        });
        self.inner.queue.refresh_status().await;
        if !self.inner.state.in_progress() {
            self.emit(SyncEvent::Idle);
        }
    }

    /// Fetches the job's form and applies it to the local store.
    async fn pull(&self, job: &Job) -> Result<()> {
        let payload = self
            .inner
            .catalog
            .fetch_form(&job.target, &job.reference)
            .await?;
        let mut registry = self.inner.registry.lock().await;
        match job.kind {
            JobKind::Form => {
                registry.install_form(&payload.schema)?;
                if !payload.data.is_empty() {
                    registry.insert_rows(&payload.schema.table_name, &payload.data)?;
                }
            }
            JobKind::Data => {
                registry.insert_rows(&job.target, &payload.data)?;
            }
        }
        Ok(())
    }

    /// Spawns the periodic status-aggregation task.
    ///
    /// The task runs a refresh every `status_poll_interval_ms` until the
    /// returned handle is stopped.
    pub fn spawn_status_poller(&self) -> StatusPoller {
        let engine = self.clone();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let period = Duration::from_millis(self.inner.config.status_poll_interval_ms.max(1));
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        engine.inner.queue.refresh_status().await;
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
        });
        StatusPoller {
            handle,
            shutdown_tx,
        }
    }

    /// Drops all jobs and clears the flag (logout/restart).
    pub async fn reset(&self) {
        self.inner.queue.clear().await;
        self.inner.state.reset();
    }
}

/// Handle to a running status-aggregation task.
pub struct StatusPoller {
    handle: tokio::task::JoinHandle<()>,
    shutdown_tx: oneshot::Sender<()>,
}

impl StatusPoller {
    /// Stops the poller and waits for its task to exit.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
