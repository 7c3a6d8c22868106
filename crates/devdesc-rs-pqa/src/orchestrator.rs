// crates/devdesc-rs-pqa/src/orchestrator.rs

//! Runs one file through the quality-assurance pipeline.
//!
//! `PENDING -> ARCHIVING -> RECONSTRUCTING -> ANALYZING -> SCORING ->
//! PERSISTING -> TICKETED | DONE`. An error at any stage ends the run as
//! FAILED with an [`AnalysisFailure`]; runs are never retried here.

use crate::criticality::DiffSeverity;
use crate::diff::diff_documents;
use crate::error::PqaError;
use crate::ids::{IssueId, MetricsId, ProfileId};
use crate::metrics::{DiffDetail, QualityMetrics};
use crate::repository::{AnalysisQueueItem, PqaBackend};
use crate::score::score_report;
use devdesc_rs::{FileType, Profile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Most differences quoted in an issue description.
const ISSUE_DIFF_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStage {
    Pending,
    Archiving,
    Reconstructing,
    Analyzing,
    Scoring,
    Persisting,
    Ticketed,
    Done,
    Failed,
}

impl AnalysisStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStage::Pending => "PENDING",
            AnalysisStage::Archiving => "ARCHIVING",
            AnalysisStage::Reconstructing => "RECONSTRUCTING",
            AnalysisStage::Analyzing => "ANALYZING",
            AnalysisStage::Scoring => "SCORING",
            AnalysisStage::Persisting => "PERSISTING",
            AnalysisStage::Ticketed => "TICKETED",
            AnalysisStage::Done => "DONE",
            AnalysisStage::Failed => "FAILED",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run that ended FAILED, with the stage it failed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisFailure {
    pub stage: AnalysisStage,
    pub message: String,
}

impl AnalysisFailure {
    pub fn new(stage: AnalysisStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.message)
    }
}

impl std::error::Error for AnalysisFailure {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssuePriority {
    Medium,
    High,
    Critical,
}

impl IssuePriority {
    /// CRITICAL below 80 or on critical loss, HIGH below 90, MEDIUM otherwise.
    pub fn for_run(overall_score: f64, critical_data_loss: bool) -> Self {
        if critical_data_loss || overall_score < 80.0 {
            IssuePriority::Critical
        } else if overall_score < 90.0 {
            IssuePriority::High
        } else {
            IssuePriority::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssuePriority::Medium => "MEDIUM",
            IssuePriority::High => "HIGH",
            IssuePriority::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escalation record for a run that failed its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub file_id: ProfileId,
    pub file_type: FileType,
    pub metrics_id: MetricsId,
    pub priority: IssuePriority,
    pub title: String,
    pub description: String,
    pub overall_score: f64,
    pub data_loss_percentage: f64,
    pub critical_data_loss: bool,
}

impl QualityIssue {
    pub fn for_run(metrics: &QualityMetrics, diffs: &[DiffDetail]) -> Self {
        let priority = IssuePriority::for_run(metrics.overall_score, metrics.critical_data_loss);
        let title = format!(
            "{} file {} scored {:.2}",
            metrics.file_type, metrics.file_id, metrics.overall_score
        );

        let mut worst: Vec<&DiffDetail> = diffs.iter().collect();
        worst.sort_by(|a, b| b.severity.cmp(&a.severity));
        let mut description = format!(
            "Round trip of {} file {} failed its threshold: overall {:.2}, data loss {:.2}%, critical loss {}.\n",
            metrics.file_type,
            metrics.file_id,
            metrics.overall_score,
            metrics.data_loss_percentage,
            metrics.critical_data_loss
        );
        for diff in worst.iter().take(ISSUE_DIFF_LINES) {
            description.push_str(&format!(
                "- [{}] {} {}\n",
                diff.severity, diff.diff_type, diff.path
            ));
        }
        if diffs.len() > ISSUE_DIFF_LINES {
            description.push_str(&format!(
                "... and {} more\n",
                diffs.len() - ISSUE_DIFF_LINES
            ));
        }

        Self {
            file_id: metrics.file_id,
            file_type: metrics.file_type,
            metrics_id: metrics.id,
            priority,
            title,
            description,
            overall_score: metrics.overall_score,
            data_loss_percentage: metrics.data_loss_percentage,
            critical_data_loss: metrics.critical_data_loss,
        }
    }
}

/// Receives escalations. The ticket tracker itself is external.
pub trait IssueSink: Send + Sync {
    fn open_issue(&self, issue: &QualityIssue) -> Result<IssueId, PqaError>;
}

/// Result of a run that reached a terminal success state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// `Done` or `Ticketed`.
    pub stage: AnalysisStage,
    pub metrics: QualityMetrics,
    pub diffs: Vec<DiffDetail>,
    pub issue: Option<IssueId>,
}

/// Turns a stored profile back into text of its own format.
pub fn reconstruct(profile: &Profile) -> Result<String, PqaError> {
    match profile {
        Profile::Iodd(device) => devdesc_rs_iodd::save_iodd_to_string(device)
            .map_err(|e| PqaError::Reconstruction(e.to_string())),
        Profile::Eds(eds) => Ok(devdesc_rs_eds::save_eds_to_string(eds)),
    }
}

/// Maps a stage error into a failure of that stage.
fn at<T, E: fmt::Display>(stage: AnalysisStage, result: Result<T, E>) -> Result<T, AnalysisFailure> {
    result.map_err(|e| AnalysisFailure::new(stage, e.to_string()))
}

/// Drives analysis runs against a backend.
#[derive(Clone)]
pub struct Orchestrator {
    backend: Arc<dyn PqaBackend>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn PqaBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn PqaBackend> {
        &self.backend
    }

    /// Analyzes `original` against the reconstruction of the stored profile.
    pub fn run(
        &self,
        file_id: ProfileId,
        file_type: FileType,
        original: &str,
    ) -> Result<AnalysisOutcome, AnalysisFailure> {
        let result = self.stages(file_id, file_type, original);
        match &result {
            Ok(outcome) => log::info!(
                "file {}: {} (overall {:.2}, {} diffs)",
                file_id,
                outcome.stage,
                outcome.metrics.overall_score,
                outcome.diffs.len()
            ),
            Err(failure) => log::error!("file {}: {} at {}", file_id, AnalysisStage::Failed, failure),
        }
        result
    }

    /// Analyzes the latest archived original of a file.
    pub fn run_archived(&self, file_id: ProfileId) -> Result<AnalysisOutcome, AnalysisFailure> {
        let archive = at(AnalysisStage::Archiving, self.backend.latest_archive(file_id))?
            .ok_or_else(|| {
                AnalysisFailure::new(
                    AnalysisStage::Archiving,
                    format!("no archived original for file {}", file_id),
                )
            })?;
        let profile = at(AnalysisStage::Archiving, self.backend.get(file_id))?;
        self.run(file_id, profile.file_type(), &archive.content)
    }

    /// Runs a claimed queue item and records its final status.
    pub fn process_item(&self, item: &AnalysisQueueItem) -> Result<AnalysisOutcome, AnalysisFailure> {
        let result = self.run_archived(item.file_id);
        let recorded = match &result {
            Ok(_) => self.backend.complete(item.id),
            Err(failure) => self.backend.fail(item.id, &failure.to_string()),
        };
        if let Err(e) = recorded {
            log::error!("queue item {}: could not record status: {}", item.id, e);
        }
        result
    }

    fn stages(
        &self,
        file_id: ProfileId,
        file_type: FileType,
        original: &str,
    ) -> Result<AnalysisOutcome, AnalysisFailure> {
        let enter = |stage: AnalysisStage| log::debug!("file {}: {}", file_id, stage);

        enter(AnalysisStage::Archiving);
        let archive = at(AnalysisStage::Archiving, self.backend.archive(file_id, original))?;

        enter(AnalysisStage::Reconstructing);
        let profile = at(AnalysisStage::Reconstructing, self.backend.get(file_id))?;
        if profile.file_type() != file_type {
            return Err(AnalysisFailure::new(
                AnalysisStage::Reconstructing,
                format!(
                    "file {} is stored as {} but was submitted as {}",
                    file_id,
                    profile.file_type(),
                    file_type
                ),
            ));
        }
        let reconstructed = at(AnalysisStage::Reconstructing, reconstruct(&profile))?;

        enter(AnalysisStage::Analyzing);
        let report = at(
            AnalysisStage::Analyzing,
            diff_documents(file_type, original, &reconstructed),
        )?;

        enter(AnalysisStage::Scoring);
        let threshold = at(AnalysisStage::Scoring, self.backend.active_threshold())?;
        let card = score_report(&report, &threshold.threshold);

        enter(AnalysisStage::Persisting);
        let metrics = QualityMetrics::new(file_id, Some(archive.id), threshold.id, &report, &card);
        let diffs = report.items.iter().map(DiffDetail::from).collect();
        let (metrics, diffs) = at(
            AnalysisStage::Persisting,
            self.backend.record_analysis(metrics, diffs),
        )?;

        if metrics.passed_threshold || !threshold.threshold.auto_ticket_on_fail {
            return Ok(AnalysisOutcome {
                stage: AnalysisStage::Done,
                metrics,
                diffs,
                issue: None,
            });
        }

        let issue = QualityIssue::for_run(&metrics, &diffs);
        let issue_id = at(AnalysisStage::Ticketed, self.backend.open_issue(&issue))?;
        enter(AnalysisStage::Ticketed);
        Ok(AnalysisOutcome {
            stage: AnalysisStage::Ticketed,
            metrics,
            diffs,
            issue: Some(issue_id),
        })
    }
}

/// Highest severity among stored differences.
pub fn worst_severity(diffs: &[DiffDetail]) -> Option<DiffSeverity> {
    diffs.iter().map(|d| d.severity).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryStore, PqaStore, ProfileRepository, QueueStatus};
    use crate::score::Threshold;
    use devdesc_rs_eds::parse_eds;

    const EDS: &str = "[File]\n    DescText = \"Adapter\";\n\n[Device]\n    VendCode = 1;\n    ProdCode = 2;\n";

    fn setup() -> (Arc<InMemoryStore>, Orchestrator, ProfileId) {
        let store = Arc::new(InMemoryStore::new());
        let orchestrator = Orchestrator::new(store.clone());
        let (profile, _) = parse_eds(EDS);
        let id = store.save(&Profile::Eds(profile)).unwrap();
        (store, orchestrator, id)
    }

    #[test]
    fn test_priority_rule() {
        assert_eq!(IssuePriority::for_run(79.9, false), IssuePriority::Critical);
        assert_eq!(IssuePriority::for_run(99.0, true), IssuePriority::Critical);
        assert_eq!(IssuePriority::for_run(85.0, false), IssuePriority::High);
        assert_eq!(IssuePriority::for_run(94.5, false), IssuePriority::Medium);
    }

    #[test]
    fn test_clean_run_is_done() {
        let (store, orchestrator, id) = setup();
        let outcome = orchestrator.run(id, FileType::Eds, EDS).unwrap();
        assert_eq!(outcome.stage, AnalysisStage::Done);
        assert!(outcome.diffs.is_empty());
        assert!(outcome.metrics.passed_threshold);
        assert_eq!(outcome.metrics.archive_id, Some(store.latest_archive(id).unwrap().unwrap().id));
        assert_eq!(store.metrics_for(id).unwrap().len(), 1);
    }

    #[test]
    fn test_failing_run_is_ticketed() {
        let (store, orchestrator, id) = setup();
        // The stored profile lacks the extra key, so it reads as lost.
        let original = "[File]\n    DescText = \"Adapter\";\n\n[Device]\n    VendCode = 1;\n    ProdCode = 2;\n    MajRev = 1;\n";
        let outcome = orchestrator.run(id, FileType::Eds, original).unwrap();
        assert_eq!(outcome.stage, AnalysisStage::Ticketed);
        assert!(!outcome.metrics.passed_threshold);
        assert_eq!(worst_severity(&outcome.diffs), Some(DiffSeverity::Critical));

        let issues = store.issues().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(Some(issues[0].0), outcome.issue);
        assert_eq!(issues[0].1.priority, IssuePriority::Critical);
        assert!(issues[0].1.description.contains("/EDS/Device/MajRev"));
    }

    #[test]
    fn test_no_ticket_when_disabled() {
        let (store, orchestrator, id) = setup();
        store
            .activate_threshold(Threshold {
                auto_ticket_on_fail: false,
                ..Threshold::default()
            })
            .unwrap();
        let original = "[File]\n    DescText = \"Adapter\";\n\n[Device]\n    VendCode = 1;\n    ProdCode = 3;\n";
        let outcome = orchestrator.run(id, FileType::Eds, original).unwrap();
        assert_eq!(outcome.stage, AnalysisStage::Done);
        assert!(!outcome.metrics.passed_threshold);
        assert!(store.issues().unwrap().is_empty());
    }

    #[test]
    fn test_type_mismatch_fails() {
        let (_, orchestrator, id) = setup();
        let failure = orchestrator.run(id, FileType::Iodd, "<IODevice/>").unwrap_err();
        assert_eq!(failure.stage, AnalysisStage::Reconstructing);
    }

    #[test]
    fn test_empty_original_is_all_differences() {
        let (store, orchestrator, id) = setup();
        let item = store.enqueue(id, FileType::Eds, 1).unwrap();
        store.archive(id, "").unwrap();
        let claimed = store.claim_next().unwrap().unwrap();
        assert_eq!(claimed.id, item.id);

        // An empty EDS has no sections; the diff is all loss, not an error.
        let outcome = orchestrator.process_item(&claimed).unwrap();
        assert!(!outcome.diffs.is_empty());
        let status = store.queue().unwrap()[0].status;
        assert_eq!(status, QueueStatus::Completed);
    }

    #[test]
    fn test_missing_archive_fails_item() {
        let (store, orchestrator, id) = setup();
        store.enqueue(id, FileType::Eds, 1).unwrap();
        let claimed = store.claim_next().unwrap().unwrap();
        let failure = orchestrator.process_item(&claimed).unwrap_err();
        assert_eq!(failure.stage, AnalysisStage::Archiving);

        let item = &store.queue().unwrap()[0];
        assert_eq!(item.status, QueueStatus::Failed);
        assert!(item.error_message.as_deref().unwrap().starts_with("ARCHIVING"));
    }
}
