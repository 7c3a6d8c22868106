// crates/devdesc-rs-pqa/src/worker.rs

//! Fixed-size pool of threads that drain the analysis queue.
//!
//! Workers block on a channel. Each `Wake` makes a worker claim and run
//! queue items until none is claimable; `Shutdown` makes it drain once more
//! and exit. The queue itself lives in the store, so claiming stays
//! exclusive whichever worker wakes first.

use crate::error::PqaError;
use crate::ids::ProfileId;
use crate::orchestrator::Orchestrator;
use crate::repository::{AnalysisQueueItem, PqaBackend};
use crossbeam_channel::{Receiver, Sender, unbounded};
use devdesc_rs::FileType;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerMessage {
    /// New work may be claimable.
    Wake,
    /// Drain what is left and exit.
    Shutdown,
}

/// Counters shared by all workers of a pool.
#[derive(Debug, Default)]
pub struct PoolStats {
    completed: AtomicU64,
    failed: AtomicU64,
}

impl PoolStats {
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Cloneable way to feed a running pool.
#[derive(Clone)]
pub struct PoolHandle {
    orchestrator: Orchestrator,
    sender: Sender<WorkerMessage>,
}

impl PoolHandle {
    /// Queues a file and wakes a worker.
    pub fn enqueue(
        &self,
        file_id: ProfileId,
        file_type: FileType,
        priority: i32,
    ) -> Result<AnalysisQueueItem, PqaError> {
        let item = self.orchestrator.backend().enqueue(file_id, file_type, priority)?;
        self.wake()?;
        Ok(item)
    }

    pub fn backend(&self) -> &Arc<dyn PqaBackend> {
        self.orchestrator.backend()
    }

    pub fn wake(&self) -> Result<(), PqaError> {
        self.sender
            .send(WorkerMessage::Wake)
            .map_err(|_| PqaError::Thread("worker pool is shut down".to_string()))
    }
}

pub struct WorkerPool {
    handle: PoolHandle,
    workers: Vec<JoinHandle<()>>,
    stats: Arc<PoolStats>,
}

impl WorkerPool {
    /// Spawns `size` workers. Items already pending are picked up right away.
    pub fn start(orchestrator: Orchestrator, size: usize) -> Result<Self, PqaError> {
        if size == 0 {
            return Err(PqaError::Config("worker pool needs at least one worker".to_string()));
        }
        log::info!("starting analysis worker pool with {} workers", size);

        let (sender, receiver) = unbounded();
        let stats = Arc::new(PoolStats::default());
        let mut pool = WorkerPool {
            handle: PoolHandle {
                orchestrator: orchestrator.clone(),
                sender,
            },
            workers: Vec::with_capacity(size),
            stats: stats.clone(),
        };

        for worker_id in 0..size {
            let orchestrator = orchestrator.clone();
            let receiver = receiver.clone();
            let stats = stats.clone();
            let spawned = thread::Builder::new()
                .name(format!("pqa-worker-{}", worker_id))
                .spawn(move || worker_loop(worker_id, orchestrator, receiver, stats));
            match spawned {
                Ok(handle) => pool.workers.push(handle),
                Err(e) => {
                    // Stop what was already started before reporting.
                    let _ = pool.stop();
                    return Err(PqaError::Thread(format!("failed to spawn worker: {}", e)));
                }
            }
        }

        pool.handle.wake()?;
        Ok(pool)
    }

    pub fn handle(&self) -> PoolHandle {
        self.handle.clone()
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Lets the workers drain the queue, then joins them.
    pub fn shutdown(mut self) -> Result<(), PqaError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), PqaError> {
        if self.workers.is_empty() {
            return Ok(());
        }
        for _ in 0..self.workers.len() {
            // Receivers live as long as their worker, so this only fails
            // for a worker that already died.
            let _ = self.handle.sender.send(WorkerMessage::Shutdown);
        }
        let mut panicked = 0;
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                panicked += 1;
            }
        }
        log::info!(
            "analysis worker pool stopped ({} completed, {} failed)",
            self.stats.completed(),
            self.stats.failed()
        );
        if panicked > 0 {
            return Err(PqaError::Thread(format!("{} worker(s) panicked", panicked)));
        }
        Ok(())
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("{}", e);
        }
    }
}

fn worker_loop(
    worker_id: usize,
    orchestrator: Orchestrator,
    receiver: Receiver<WorkerMessage>,
    stats: Arc<PoolStats>,
) {
    log::debug!("worker {} started", worker_id);
    // A closed channel means the pool is gone; treat it as shutdown.
    loop {
        let message = receiver.recv().unwrap_or(WorkerMessage::Shutdown);
        drain(worker_id, &orchestrator, &stats);
        if message == WorkerMessage::Shutdown {
            break;
        }
    }
    log::debug!("worker {} stopped", worker_id);
}

/// Runs claimable items until the queue has none left for this worker.
fn drain(worker_id: usize, orchestrator: &Orchestrator, stats: &PoolStats) {
    loop {
        let item = match orchestrator.backend().claim_next() {
            Ok(Some(item)) => item,
            Ok(None) => return,
            Err(e) => {
                log::error!("worker {}: cannot claim work: {}", worker_id, e);
                return;
            }
        };
        log::debug!(
            "worker {}: analyzing file {} (item {}, priority {})",
            worker_id,
            item.file_id,
            item.id,
            item.priority
        );
        match orchestrator.process_item(&item) {
            Ok(_) => stats.completed.fetch_add(1, Ordering::Relaxed),
            Err(_) => stats.failed.fetch_add(1, Ordering::Relaxed),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryStore, PqaStore, ProfileRepository, QueueStatus};
    use devdesc_rs::Profile;
    use devdesc_rs_eds::parse_eds;

    fn eds(vend_code: u32) -> String {
        format!("[File]\n    DescText = \"Adapter\";\n\n[Device]\n    VendCode = {};\n", vend_code)
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let result = WorkerPool::start(Orchestrator::new(store), 0);
        assert!(matches!(result, Err(PqaError::Config(_))));
    }

    #[test]
    fn test_pool_drains_queue_before_shutdown() {
        let _ = env_logger::builder().is_test(true).try_init();
        let store = Arc::new(InMemoryStore::new());
        let mut ids = Vec::new();
        for vend_code in 1..=6 {
            let text = eds(vend_code);
            let (profile, _) = parse_eds(&text);
            let id = store.save(&Profile::Eds(profile)).unwrap();
            store.archive(id, &text).unwrap();
            ids.push(id);
        }

        let pool = WorkerPool::start(Orchestrator::new(store.clone()), 3).unwrap();
        let handle = pool.handle();
        for id in &ids {
            handle.enqueue(*id, FileType::Eds, 1).unwrap();
        }
        pool.shutdown().unwrap();

        let queue = store.queue().unwrap();
        assert_eq!(queue.len(), 6);
        assert!(queue.iter().all(|q| q.status == QueueStatus::Completed));
        for id in ids {
            assert_eq!(store.metrics_for(id).unwrap().len(), 1);
        }
        assert!(handle.wake().is_err());
    }

    #[test]
    fn test_failed_items_are_marked() {
        let store = Arc::new(InMemoryStore::new());
        let (profile, _) = parse_eds(&eds(1));
        let id = store.save(&Profile::Eds(profile)).unwrap();
        // Nothing archived: the run fails.
        store.enqueue(id, FileType::Eds, 1).unwrap();

        let pool = WorkerPool::start(Orchestrator::new(store.clone()), 1).unwrap();
        assert_eq!(pool.size(), 1);
        let handle = pool.handle();
        pool.shutdown().unwrap();

        assert_eq!(store.queue().unwrap()[0].status, QueueStatus::Failed);
        assert!(handle.enqueue(id, FileType::Eds, 1).is_err());
    }
}
