//! Background gathering scheduler
//!
//! Owns the single worker task that repeatedly runs batches in the selected
//! mode until told to stop. The lifecycle is:
//!
//! ```text
//! Idle --start--> Running --stop--> StopRequested --worker exits--> Idle
//! ```
//!
//! Stop is cooperative: a running batch always completes, the sleeps between
//! batches are cut short.

use crate::config::GatheringConfig;
use crate::crawler::banned::BannedListPager;
use crate::crawler::network::NetworkCrawler;
use crate::state::{GatheringMode, GatheringStatus, SchedulerState};
use crate::storage::ProfileStore;
use crate::ScoutError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Largest batch an operator may request
pub const MAX_BATCH_SIZE: u32 = 50;

/// Rejections from the control operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("Data gathering is already running")]
    AlreadyRunning,

    #[error("Data gathering is not running")]
    NotRunning,

    #[error("Batch size must be between 1 and 50, got {0}")]
    InvalidBatchSize(u32),
}

/// Mutable scheduler record, guarded by one mutex
struct Control {
    state: SchedulerState,
    mode: GatheringMode,
    batch_size: u32,
    started_at: Option<Instant>,
    stop_tx: Option<watch::Sender<bool>>,
    worker: Option<JoinHandle<()>>,
}

struct Shared {
    crawler: Arc<NetworkCrawler>,
    pager: Arc<BannedListPager>,
    store: Arc<dyn ProfileStore>,
    delay_between_batches: Duration,
    error_retry_delay: Duration,
    control: Mutex<Control>,
    total_gathered: AtomicU64,
}

impl Shared {
    fn control(&self) -> MutexGuard<'_, Control> {
        // The record stays consistent even if a holder panicked
        self.control.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Start/stop controller for background gathering
pub struct GatheringScheduler {
    shared: Arc<Shared>,
}

impl GatheringScheduler {
    pub fn new(
        crawler: Arc<NetworkCrawler>,
        pager: Arc<BannedListPager>,
        store: Arc<dyn ProfileStore>,
        config: &GatheringConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                crawler,
                pager,
                store,
                delay_between_batches: Duration::from_millis(config.delay_between_batches),
                error_retry_delay: Duration::from_millis(config.error_retry_delay),
                control: Mutex::new(Control {
                    state: SchedulerState::Idle,
                    mode: GatheringMode::Random,
                    batch_size: MAX_BATCH_SIZE,
                    started_at: None,
                    stop_tx: None,
                    worker: None,
                }),
                total_gathered: AtomicU64::new(0),
            }),
        }
    }

    /// Starts the background worker and returns immediately
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, mode: GatheringMode, batch_size: u32) -> Result<(), ControlError> {
        let mut control = self.shared.control();

        if control.state != SchedulerState::Idle {
            tracing::warn!("Data gathering is already running");
            return Err(ControlError::AlreadyRunning);
        }
        if !(1..=MAX_BATCH_SIZE).contains(&batch_size) {
            return Err(ControlError::InvalidBatchSize(batch_size));
        }

        let (stop_tx, stop_rx) = watch::channel(false);

        self.shared.total_gathered.store(0, Ordering::SeqCst);
        control.mode = mode;
        control.batch_size = batch_size;
        control.started_at = Some(Instant::now());
        control.stop_tx = Some(stop_tx);
        control.state = SchedulerState::Running;

        let shared = self.shared.clone();
        control.worker = Some(tokio::spawn(run_worker(shared, mode, batch_size, stop_rx)));

        tracing::info!(
            "Data gathering started - mode: {}, batch size: {}",
            mode,
            batch_size
        );
        Ok(())
    }

    /// Asks the worker to finish after its current batch
    pub fn stop(&self) -> Result<(), ControlError> {
        let mut control = self.shared.control();

        if control.state == SchedulerState::Idle {
            tracing::warn!("Data gathering is not running");
            return Err(ControlError::NotRunning);
        }

        tracing::info!("Stopping data gathering...");
        if let Some(stop_tx) = &control.stop_tx {
            let _ = stop_tx.send(true);
        }
        control.state = SchedulerState::StopRequested;
        Ok(())
    }

    pub fn state(&self) -> SchedulerState {
        self.shared.control().state
    }

    pub fn status(&self) -> GatheringStatus {
        let control = self.shared.control();
        let uptime = match (control.state.is_active(), control.started_at) {
            (true, Some(started)) => started.elapsed().as_secs(),
            _ => 0,
        };

        GatheringStatus {
            is_running: control.state.is_active(),
            state: control.state,
            mode: control.mode,
            batch_size: control.batch_size,
            total_profiles_gathered: self.total_gathered(),
            uptime,
        }
    }

    /// Profiles gathered since the last `start`
    pub fn total_gathered(&self) -> u64 {
        self.shared.total_gathered.load(Ordering::SeqCst)
    }

    /// Stops the worker if one is running and waits for it to exit
    pub async fn shutdown(&self) {
        let worker = {
            let mut control = self.shared.control();
            if control.state == SchedulerState::Running {
                if let Some(stop_tx) = &control.stop_tx {
                    let _ = stop_tx.send(true);
                }
                control.state = SchedulerState::StopRequested;
            }
            control.worker.take()
        };

        if let Some(worker) = worker {
            tracing::info!("Waiting for gathering worker to finish its batch");
            if let Err(e) = worker.await {
                tracing::error!("Gathering worker ended abnormally: {}", e);
                self.shared.control().state = SchedulerState::Idle;
            }
        }
    }
}

async fn run_worker(
    shared: Arc<Shared>,
    mode: GatheringMode,
    batch_size: u32,
    mut stop_rx: watch::Receiver<bool>,
) {
    tracing::info!(
        "Starting gathering loop - mode: {}, batch size: {}",
        mode,
        batch_size
    );

    while !*stop_rx.borrow() {
        // Run each batch on its own task so a panic only fails that batch
        let batch = tokio::spawn(run_batch(shared.clone(), mode, batch_size));

        let outcome = match batch.await {
            Ok(result) => result,
            Err(e) => Err(ScoutError::Batch(e.to_string())),
        };

        let delay = match outcome {
            Ok(gathered) => {
                let total = shared.total_gathered.fetch_add(gathered, Ordering::SeqCst) + gathered;
                tracing::info!("Batch complete - gathered: {} profiles, total: {}", gathered, total);
                shared.delay_between_batches
            }
            Err(e) => {
                tracing::error!("Error in gathering loop: {}", e);
                shared.error_retry_delay
            }
        };

        if pause(&mut stop_rx, delay).await {
            break;
        }
    }

    {
        let mut control = shared.control();
        control.state = SchedulerState::Idle;
        control.stop_tx = None;
    }

    tracing::info!(
        "Gathering loop finished - total profiles gathered: {}",
        shared.total_gathered.load(Ordering::SeqCst)
    );
}

async fn run_batch(
    shared: Arc<Shared>,
    mode: GatheringMode,
    batch_size: u32,
) -> Result<u64, ScoutError> {
    let target = batch_size as usize;

    let gathered = match mode {
        GatheringMode::Banned => {
            tracing::debug!("Fetching batch of {} banned players", batch_size);
            shared.pager.gather_banned(target).await.len()
        }
        GatheringMode::Random => {
            let seed = match shared.store.any_identity()? {
                Some(seed) => seed,
                None => {
                    tracing::warn!(
                        "No players in the store to seed random gathering; add some players first"
                    );
                    return Ok(0);
                }
            };
            tracing::info!("Using player {} as seed for network traversal", seed);
            shared.crawler.crawl(&seed, target).await.len()
        }
    };

    Ok(gathered as u64)
}

/// Sleeps for `delay` unless a stop arrives first; returns whether to stop
async fn pause(stop_rx: &mut watch::Receiver<bool>, delay: Duration) -> bool {
    if *stop_rx.borrow() {
        return true;
    }

    tokio::select! {
        _ = tokio::time::sleep(delay) => *stop_rx.borrow(),
        // A dropped sender also ends the loop
        _ = stop_rx.changed() => true,
    }
}
