// crates/devdesc-rs-pqa/src/repository.rs

//! Persistence boundary of the engine.
//!
//! [`ProfileRepository`] stores parsed profiles; [`PqaStore`] stores the
//! quality-assurance records. The physical store is external; the
//! [`InMemoryStore`] here guards all of its state with a single mutex, so
//! every write that touches several records is all-or-nothing.

use crate::error::PqaError;
use crate::ids::{ArchiveId, DiffId, IssueId, MetricsId, ProfileId, QueueItemId, ThresholdId};
use crate::metrics::{DiffDetail, QualityMetrics};
use crate::orchestrator::{IssueSink, QualityIssue};
use crate::score::Threshold;
use chrono::{DateTime, Utc};
use devdesc_rs::{FileType, Profile};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::{Mutex, MutexGuard};

/// Lower-case hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Checksum of a profile's canonical JSON form.
pub fn profile_checksum(profile: &Profile) -> Result<String, PqaError> {
    let json = serde_json::to_vec(profile)?;
    Ok(sha256_hex(&json))
}

/// Saves and loads parsed profiles.
pub trait ProfileRepository: Send + Sync {
    /// Stores a profile. Saving content that is already stored returns the
    /// existing id and writes nothing.
    fn save(&self, profile: &Profile) -> Result<ProfileId, PqaError>;

    /// Read model that drives reconstruction.
    fn get(&self, id: ProfileId) -> Result<Profile, PqaError>;

    fn ids(&self) -> Result<Vec<ProfileId>, PqaError>;
}

/// Original file content, archived before each analysis. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileArchive {
    pub id: ArchiveId,
    pub file_id: ProfileId,
    pub content: String,
    pub sha256: String,
    pub size: usize,
    pub archived_at: DateTime<Utc>,
}

/// A stored threshold. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredThreshold {
    pub id: ThresholdId,
    pub threshold: Threshold,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// A request to analyze one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisQueueItem {
    pub id: QueueItemId,
    pub file_id: ProfileId,
    pub file_type: FileType,
    pub status: QueueStatus,
    /// Higher runs first.
    pub priority: i32,
    pub error_message: Option<String>,
    pub enqueued_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Quality-assurance records.
pub trait PqaStore: Send + Sync {
    /// Archives original content. If it equals the latest archive of the
    /// file, that archive is returned instead.
    fn archive(&self, file_id: ProfileId, content: &str) -> Result<FileArchive, PqaError>;
    fn latest_archive(&self, file_id: ProfileId) -> Result<Option<FileArchive>, PqaError>;
    fn archives(&self, file_id: ProfileId) -> Result<Vec<FileArchive>, PqaError>;

    /// Writes a run and its differences together. On error nothing is written.
    /// Returns the stored metrics and diffs with their ids filled in.
    fn record_analysis(
        &self,
        metrics: QualityMetrics,
        diffs: Vec<DiffDetail>,
    ) -> Result<(QualityMetrics, Vec<DiffDetail>), PqaError>;
    /// Runs of one file, oldest first.
    fn metrics_for(&self, file_id: ProfileId) -> Result<Vec<QualityMetrics>, PqaError>;
    fn latest_metrics(&self, file_id: ProfileId) -> Result<Option<QualityMetrics>, PqaError>;
    fn all_metrics(&self) -> Result<Vec<QualityMetrics>, PqaError>;
    fn diffs_for(&self, metrics_id: MetricsId) -> Result<Vec<DiffDetail>, PqaError>;
    fn all_diffs(&self) -> Result<Vec<DiffDetail>, PqaError>;

    /// Stores a threshold and makes it the only active one.
    fn activate_threshold(&self, threshold: Threshold) -> Result<StoredThreshold, PqaError>;
    /// The active threshold. A default one is created on first use.
    fn active_threshold(&self) -> Result<StoredThreshold, PqaError>;

    /// Queues a file. A file that already has a pending item keeps that
    /// item, with its priority raised to `priority` if higher.
    fn enqueue(
        &self,
        file_id: ProfileId,
        file_type: FileType,
        priority: i32,
    ) -> Result<AnalysisQueueItem, PqaError>;
    /// Moves the highest-priority pending item to running. Files that
    /// already have a running item are skipped.
    fn claim_next(&self) -> Result<Option<AnalysisQueueItem>, PqaError>;
    fn complete(&self, id: QueueItemId) -> Result<(), PqaError>;
    fn fail(&self, id: QueueItemId, message: &str) -> Result<(), PqaError>;
    fn queue(&self) -> Result<Vec<AnalysisQueueItem>, PqaError>;
}

/// Everything the orchestrator and the workers need.
pub trait PqaBackend: ProfileRepository + PqaStore + IssueSink {}

impl<T: ProfileRepository + PqaStore + IssueSink> PqaBackend for T {}

struct StoredProfile {
    id: ProfileId,
    checksum: String,
    profile: Profile,
}

#[derive(Default)]
struct State {
    profiles: Vec<StoredProfile>,
    archives: Vec<FileArchive>,
    metrics: Vec<QualityMetrics>,
    diffs: Vec<DiffDetail>,
    thresholds: Vec<StoredThreshold>,
    queue: Vec<AnalysisQueueItem>,
    issues: Vec<(IssueId, QualityIssue)>,
    next_id: u64,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn has_profile(&self, id: ProfileId) -> bool {
        self.profiles.iter().any(|p| p.id == id)
    }

    fn queue_item(&mut self, id: QueueItemId) -> Result<&mut AnalysisQueueItem, PqaError> {
        self.queue
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(PqaError::NotFound {
                kind: "queue item",
                id: id.0,
            })
    }
}

/// Reference store kept in memory.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, PqaError> {
        self.state
            .lock()
            .map_err(|_| PqaError::Store("store mutex poisoned".to_string()))
    }

    /// Issues opened through the [`IssueSink`] implementation.
    pub fn issues(&self) -> Result<Vec<(IssueId, QualityIssue)>, PqaError> {
        Ok(self.lock()?.issues.clone())
    }
}

impl ProfileRepository for InMemoryStore {
    fn save(&self, profile: &Profile) -> Result<ProfileId, PqaError> {
        let checksum = profile_checksum(profile)?;
        let mut state = self.lock()?;
        if let Some(existing) = state.profiles.iter().find(|p| p.checksum == checksum) {
            log::debug!("profile {} already stored ({})", existing.id, checksum);
            return Ok(existing.id);
        }
        let id = ProfileId(state.next_id());
        state.profiles.push(StoredProfile {
            id,
            checksum,
            profile: profile.clone(),
        });
        log::info!("saved {} profile {}", profile.file_type(), id);
        Ok(id)
    }

    fn get(&self, id: ProfileId) -> Result<Profile, PqaError> {
        self.lock()?
            .profiles
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.profile.clone())
            .ok_or(PqaError::profile_not_found(id))
    }

    fn ids(&self) -> Result<Vec<ProfileId>, PqaError> {
        Ok(self.lock()?.profiles.iter().map(|p| p.id).collect())
    }
}

impl PqaStore for InMemoryStore {
    fn archive(&self, file_id: ProfileId, content: &str) -> Result<FileArchive, PqaError> {
        let sha256 = sha256_hex(content.as_bytes());
        let mut state = self.lock()?;
        if !state.has_profile(file_id) {
            return Err(PqaError::profile_not_found(file_id));
        }
        if let Some(latest) = state.archives.iter().rev().find(|a| a.file_id == file_id) {
            if latest.sha256 == sha256 {
                return Ok(latest.clone());
            }
        }
        let archive = FileArchive {
            id: ArchiveId(state.next_id()),
            file_id,
            content: content.to_string(),
            sha256,
            size: content.len(),
            archived_at: Utc::now(),
        };
        state.archives.push(archive.clone());
        log::debug!("archived {} bytes for file {}", archive.size, file_id);
        Ok(archive)
    }

    fn latest_archive(&self, file_id: ProfileId) -> Result<Option<FileArchive>, PqaError> {
        Ok(self
            .lock()?
            .archives
            .iter()
            .rev()
            .find(|a| a.file_id == file_id)
            .cloned())
    }

    fn archives(&self, file_id: ProfileId) -> Result<Vec<FileArchive>, PqaError> {
        Ok(self
            .lock()?
            .archives
            .iter()
            .filter(|a| a.file_id == file_id)
            .cloned()
            .collect())
    }

    fn record_analysis(
        &self,
        mut metrics: QualityMetrics,
        mut diffs: Vec<DiffDetail>,
    ) -> Result<(QualityMetrics, Vec<DiffDetail>), PqaError> {
        let mut state = self.lock()?;

        // Validate everything before the first write.
        if !state.has_profile(metrics.file_id) {
            return Err(PqaError::profile_not_found(metrics.file_id));
        }
        if !state.thresholds.iter().any(|t| t.id == metrics.threshold_id) {
            return Err(PqaError::NotFound {
                kind: "threshold",
                id: metrics.threshold_id.0,
            });
        }
        if metrics.diff_count as usize != diffs.len() {
            return Err(PqaError::Store(format!(
                "metrics announce {} diffs but {} were given",
                metrics.diff_count,
                diffs.len()
            )));
        }

        metrics.id = MetricsId(state.next_id());
        for diff in &mut diffs {
            diff.id = DiffId(state.next_id());
            diff.metrics_id = metrics.id;
        }
        state.metrics.push(metrics.clone());
        state.diffs.extend(diffs.iter().cloned());
        log::debug!(
            "recorded metrics {} for file {} with {} diffs",
            metrics.id,
            metrics.file_id,
            diffs.len()
        );
        Ok((metrics, diffs))
    }

    fn metrics_for(&self, file_id: ProfileId) -> Result<Vec<QualityMetrics>, PqaError> {
        Ok(self
            .lock()?
            .metrics
            .iter()
            .filter(|m| m.file_id == file_id)
            .cloned()
            .collect())
    }

    fn latest_metrics(&self, file_id: ProfileId) -> Result<Option<QualityMetrics>, PqaError> {
        let state = self.lock()?;
        Ok(latest(state.metrics.iter().filter(|m| m.file_id == file_id)).cloned())
    }

    fn all_metrics(&self) -> Result<Vec<QualityMetrics>, PqaError> {
        Ok(self.lock()?.metrics.clone())
    }

    fn diffs_for(&self, metrics_id: MetricsId) -> Result<Vec<DiffDetail>, PqaError> {
        Ok(self
            .lock()?
            .diffs
            .iter()
            .filter(|d| d.metrics_id == metrics_id)
            .cloned()
            .collect())
    }

    fn all_diffs(&self) -> Result<Vec<DiffDetail>, PqaError> {
        Ok(self.lock()?.diffs.clone())
    }

    fn activate_threshold(&self, threshold: Threshold) -> Result<StoredThreshold, PqaError> {
        threshold.validate().map_err(PqaError::Config)?;
        let mut state = self.lock()?;
        for stored in &mut state.thresholds {
            stored.active = false;
        }
        let stored = StoredThreshold {
            id: ThresholdId(state.next_id()),
            threshold,
            active: true,
            created_at: Utc::now(),
        };
        state.thresholds.push(stored.clone());
        log::info!("threshold '{}' ({}) is now active", stored.threshold.name, stored.id);
        Ok(stored)
    }

    fn active_threshold(&self) -> Result<StoredThreshold, PqaError> {
        let mut state = self.lock()?;
        if let Some(active) = state.thresholds.iter().find(|t| t.active) {
            return Ok(active.clone());
        }
        let stored = StoredThreshold {
            id: ThresholdId(state.next_id()),
            threshold: Threshold::default(),
            active: true,
            created_at: Utc::now(),
        };
        state.thresholds.push(stored.clone());
        Ok(stored)
    }

    fn enqueue(
        &self,
        file_id: ProfileId,
        file_type: FileType,
        priority: i32,
    ) -> Result<AnalysisQueueItem, PqaError> {
        let mut state = self.lock()?;
        if !state.has_profile(file_id) {
            return Err(PqaError::profile_not_found(file_id));
        }
        if let Some(pending) = state
            .queue
            .iter_mut()
            .find(|q| q.file_id == file_id && q.status == QueueStatus::Pending)
        {
            pending.priority = pending.priority.max(priority);
            return Ok(pending.clone());
        }
        let item = AnalysisQueueItem {
            id: QueueItemId(state.next_id()),
            file_id,
            file_type,
            status: QueueStatus::Pending,
            priority,
            error_message: None,
            enqueued_at: Utc::now(),
            started_at: None,
            finished_at: None,
        };
        state.queue.push(item.clone());
        log::debug!("queued file {} at priority {}", file_id, priority);
        Ok(item)
    }

    fn claim_next(&self) -> Result<Option<AnalysisQueueItem>, PqaError> {
        let mut state = self.lock()?;
        let running: Vec<ProfileId> = state
            .queue
            .iter()
            .filter(|q| q.status == QueueStatus::Running)
            .map(|q| q.file_id)
            .collect();
        // Highest priority first, then oldest.
        let next = state
            .queue
            .iter_mut()
            .filter(|q| q.status == QueueStatus::Pending && !running.contains(&q.file_id))
            .max_by(|a, b| a.priority.cmp(&b.priority).then(b.id.cmp(&a.id)));
        Ok(next.map(|item| {
            item.status = QueueStatus::Running;
            item.started_at = Some(Utc::now());
            item.clone()
        }))
    }

    fn complete(&self, id: QueueItemId) -> Result<(), PqaError> {
        let mut state = self.lock()?;
        let item = state.queue_item(id)?;
        item.status = QueueStatus::Completed;
        item.finished_at = Some(Utc::now());
        Ok(())
    }

    fn fail(&self, id: QueueItemId, message: &str) -> Result<(), PqaError> {
        let mut state = self.lock()?;
        let item = state.queue_item(id)?;
        item.status = QueueStatus::Failed;
        item.error_message = Some(message.to_string());
        item.finished_at = Some(Utc::now());
        Ok(())
    }

    fn queue(&self) -> Result<Vec<AnalysisQueueItem>, PqaError> {
        Ok(self.lock()?.queue.clone())
    }
}

impl IssueSink for InMemoryStore {
    fn open_issue(&self, issue: &QualityIssue) -> Result<IssueId, PqaError> {
        let mut state = self.lock()?;
        let id = IssueId(state.next_id());
        state.issues.push((id, issue.clone()));
        log::info!("opened {} quality issue {}: {}", issue.priority, id, issue.title);
        Ok(id)
    }
}

/// Latest record by timestamp; ties go to the later-stored one.
fn latest<'a>(metrics: impl Iterator<Item = &'a QualityMetrics>) -> Option<&'a QualityMetrics> {
    metrics.max_by(|a, b| a.analyzed_at.cmp(&b.analyzed_at).then(a.id.cmp(&b.id)))
}
