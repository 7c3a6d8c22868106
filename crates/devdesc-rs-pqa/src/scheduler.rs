// crates/devdesc-rs-pqa/src/scheduler.rs

//! Periodic analysis sweeps.
//!
//! On start the scheduler queues every file that has never been analyzed,
//! then re-queues all files on each tick of the sweep interval. Work goes
//! through a [`PoolHandle`], so sweeps and manual requests share one queue.

use crate::config::PqaConfig;
use crate::error::PqaError;
use crate::ids::ProfileId;
use crate::worker::PoolHandle;
use crossbeam_channel::{Sender, bounded, select, tick};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Priority of a file queued by hand.
pub const MANUAL_PRIORITY: i32 = 10;
/// Priority of a never-analyzed file found at startup.
pub const STARTUP_PRIORITY: i32 = 5;
/// Priority of a recurring re-analysis.
pub const SWEEP_PRIORITY: i32 = 1;

pub struct Scheduler {
    pool: PoolHandle,
    interval: Duration,
    startup_sweep: bool,
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(pool: PoolHandle, config: &PqaConfig) -> Self {
        Self::with_interval(pool, config.sweep_interval(), config.startup_sweep)
    }

    pub fn with_interval(pool: PoolHandle, interval: Duration, startup_sweep: bool) -> Self {
        Self {
            pool,
            interval,
            startup_sweep,
            stop_tx: None,
            thread: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// Runs the startup sweep, then starts the recurring sweep thread.
    /// Starting a running scheduler does nothing.
    pub fn start(&mut self) -> Result<(), PqaError> {
        if self.is_running() {
            return Ok(());
        }
        if self.startup_sweep {
            let queued = startup_sweep(&self.pool)?;
            log::info!("startup sweep queued {} unanalyzed files", queued.len());
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticker = tick(self.interval);
        let pool = self.pool.clone();
        let interval = self.interval;
        let handle = thread::Builder::new()
            .name("pqa-scheduler".to_string())
            .spawn(move || {
                log::debug!("scheduler sweeping every {:?}", interval);
                loop {
                    let stopped = select! {
                        recv(stop_rx) -> _ => true,
                        recv(ticker) -> _ => {
                            match recurring_sweep(&pool) {
                                Ok(queued) => log::info!("recurring sweep queued {} files", queued.len()),
                                Err(e) => log::error!("recurring sweep failed: {}", e),
                            }
                            false
                        }
                    };
                    if stopped {
                        break;
                    }
                }
                log::debug!("scheduler stopped");
            })
            .map_err(|e| PqaError::Thread(format!("failed to spawn scheduler: {}", e)))?;

        self.stop_tx = Some(stop_tx);
        self.thread = Some(handle);
        Ok(())
    }

    /// Stops the sweep thread and waits for it. Queued work is left to the pool.
    pub fn stop(&mut self) -> Result<(), PqaError> {
        // Dropping the sender also wakes the thread if the send is missed.
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        match self.thread.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| PqaError::Thread("scheduler thread panicked".to_string())),
            None => Ok(()),
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("{}", e);
        }
    }
}

/// Queues every stored file that has no metrics yet.
pub fn startup_sweep(pool: &PoolHandle) -> Result<Vec<ProfileId>, PqaError> {
    let backend = pool.backend();
    let mut pending = Vec::new();
    for id in backend.ids()? {
        if backend.latest_metrics(id)?.is_none() {
            pending.push(id);
        }
    }
    enqueue_all(pool, &pending, STARTUP_PRIORITY)?;
    Ok(pending)
}

/// Queues every stored file.
pub fn recurring_sweep(pool: &PoolHandle) -> Result<Vec<ProfileId>, PqaError> {
    let ids = pool.backend().ids()?;
    enqueue_all(pool, &ids, SWEEP_PRIORITY)?;
    Ok(ids)
}

fn enqueue_all(pool: &PoolHandle, ids: &[ProfileId], priority: i32) -> Result<(), PqaError> {
    for id in ids {
        let file_type = pool.backend().get(*id)?.file_type();
        pool.enqueue(*id, file_type, priority)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::Orchestrator;
    use crate::repository::{InMemoryStore, PqaStore, ProfileRepository, QueueStatus};
    use crate::worker::WorkerPool;
    use devdesc_rs::{FileType, Profile};
    use devdesc_rs_eds::parse_eds;
    use std::sync::Arc;
    use std::time::Instant;

    fn store_with_files(n: u32) -> (Arc<InMemoryStore>, Vec<ProfileId>) {
        let store = Arc::new(InMemoryStore::new());
        let ids = (1..=n)
            .map(|vend_code| {
                let text = format!("[File]\n    DescText = \"x\";\n\n[Device]\n    VendCode = {};\n", vend_code);
                let (profile, _) = parse_eds(&text);
                let id = store.save(&Profile::Eds(profile)).unwrap();
                store.archive(id, &text).unwrap();
                id
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn test_startup_sweep_skips_analyzed_files() {
        let (store, ids) = store_with_files(3);
        let orchestrator = Orchestrator::new(store.clone());
        orchestrator.run_archived(ids[0]).unwrap();

        let pool = WorkerPool::start(orchestrator, 1).unwrap();
        let queued = startup_sweep(&pool.handle()).unwrap();
        assert_eq!(queued, vec![ids[1], ids[2]]);
        pool.shutdown().unwrap();

        for id in ids {
            assert_eq!(store.metrics_for(id).unwrap().len(), 1);
        }
        assert!(store.queue().unwrap().iter().all(|q| q.priority == STARTUP_PRIORITY));
    }

    #[test]
    fn test_recurring_sweep_runs_until_stopped() {
        let (store, ids) = store_with_files(2);
        let pool = WorkerPool::start(Orchestrator::new(store.clone()), 2).unwrap();
        let mut scheduler = Scheduler::with_interval(pool.handle(), Duration::from_millis(20), false);
        scheduler.start().unwrap();
        assert!(scheduler.is_running());

        let deadline = Instant::now() + Duration::from_secs(10);
        while store.metrics_for(ids[1]).unwrap().len() < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        scheduler.stop().unwrap();
        assert!(!scheduler.is_running());
        pool.shutdown().unwrap();

        assert!(store.metrics_for(ids[1]).unwrap().len() >= 2);
        let queue = store.queue().unwrap();
        assert!(queue.iter().all(|q| q.status == QueueStatus::Completed));
        assert!(queue.iter().all(|q| q.file_type == FileType::Eds));
    }

    #[test]
    fn test_stop_without_start() {
        let (store, _) = store_with_files(1);
        let pool = WorkerPool::start(Orchestrator::new(store), 1).unwrap();
        let mut scheduler = Scheduler::new(pool.handle(), &PqaConfig::default());
        assert!(scheduler.stop().is_ok());
    }
}
