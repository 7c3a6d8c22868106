// src/lib.rs

#![doc = "Parser quality assurance for devdesc-rs."]
#![doc = ""]
#![doc = "Compares each original IODD/EDS file with the reconstruction of its"]
#![doc = "parsed profile, scores the round trip and persists the result:"]
#![doc = "- `diff`: structural diff over generic XML/EDS trees."]
#![doc = "- `score`: weighted fidelity scores and the threshold rule."]
#![doc = "- `orchestrator`: the staged analysis pipeline."]
#![doc = "- `worker` / `scheduler`: queue consumers and periodic sweeps."]
#![doc = "- `api` / `views`: the entry points and read models for outer surfaces."]

// --- Crate Modules ---

pub mod api;
pub mod config;
pub mod criticality;
pub mod diff;
pub mod error;
pub mod ids;
pub mod metrics;
pub mod orchestrator;
pub mod repository;
pub mod scheduler;
pub mod score;
pub mod tree;
pub mod views;
pub mod worker;

// --- Public API Re-exports ---

pub use api::{PqaService, parse_eds, parse_iodd, reconstruct_profile};
pub use config::PqaConfig;
pub use criticality::{DiffSeverity, Phase};
pub use diff::{DiffError, DiffItem, DiffReport, DiffType, diff_documents};
pub use error::PqaError;
pub use ids::{ArchiveId, DiffId, IssueId, MetricsId, ProfileId, QueueItemId, ThresholdId};
pub use metrics::{DiffDetail, FidelityMetrics, FormatMetrics, PhaseScores, QualityMetrics};
pub use orchestrator::{
    AnalysisFailure, AnalysisOutcome, AnalysisStage, IssuePriority, IssueSink, Orchestrator,
    QualityIssue,
};
pub use repository::{
    AnalysisQueueItem, FileArchive, InMemoryStore, PqaBackend, PqaStore, ProfileRepository,
    QueueStatus,
};
pub use scheduler::Scheduler;
pub use score::{ScoreCard, Threshold, score, score_report};
pub use worker::{PoolHandle, WorkerPool};
