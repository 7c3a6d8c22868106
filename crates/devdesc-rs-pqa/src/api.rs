// crates/devdesc-rs-pqa/src/api.rs

//! Entry points used by the outer surfaces (HTTP API, admin console).

use crate::config::PqaConfig;
use crate::diff::{DiffReport, diff_documents};
use crate::error::PqaError;
use crate::ids::{ArchiveId, ProfileId};
use crate::metrics::{DiffDetail, QualityMetrics};
use crate::orchestrator::{self, AnalysisOutcome, Orchestrator};
use crate::repository::{AnalysisQueueItem, PqaBackend};
use crate::scheduler::MANUAL_PRIORITY;
use crate::score::{ScoreCard, score_report};
use crate::views::{self, DeviceDrillDown, ScoreBucket};
use crate::worker::PoolHandle;
use devdesc_rs::{DeviceProfile, Diagnostic, EdsProfile, FileType, Profile};
use std::sync::Arc;

/// Strict IODD parse.
pub fn parse_iodd(xml: &str) -> Result<DeviceProfile, PqaError> {
    Ok(devdesc_rs_iodd::load_iodd_from_str(xml)?)
}

/// Lenient EDS parse; never fails.
pub fn parse_eds(text: &str) -> (EdsProfile, Vec<Diagnostic>) {
    devdesc_rs_eds::load_eds_from_str(text)
}

/// Parses either format. EDS problems stay in the profile's diagnostics.
pub fn parse(file_type: FileType, text: &str) -> Result<Profile, PqaError> {
    match file_type {
        FileType::Iodd => Ok(Profile::Iodd(parse_iodd(text)?)),
        FileType::Eds => Ok(Profile::Eds(parse_eds(text).0)),
    }
}

pub fn reconstruct_profile(profile: &Profile) -> Result<String, PqaError> {
    orchestrator::reconstruct(profile)
}

/// Result of comparing two texts without persisting anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub report: DiffReport,
    pub card: ScoreCard,
}

/// Core operations over one backend.
#[derive(Clone)]
pub struct PqaService {
    orchestrator: Orchestrator,
}

impl PqaService {
    pub fn new(backend: Arc<dyn PqaBackend>) -> Self {
        Self {
            orchestrator: Orchestrator::new(backend),
        }
    }

    /// Validates `config` and makes its threshold the active one.
    pub fn with_config(backend: Arc<dyn PqaBackend>, config: &PqaConfig) -> Result<Self, PqaError> {
        config.validate()?;
        backend.activate_threshold(config.threshold.clone())?;
        Ok(Self::new(backend))
    }

    pub fn backend(&self) -> &Arc<dyn PqaBackend> {
        self.orchestrator.backend()
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn save(&self, profile: &Profile) -> Result<ProfileId, PqaError> {
        self.backend().save(profile)
    }

    /// Parses, saves and archives an uploaded file.
    pub fn import(&self, file_type: FileType, text: &str) -> Result<(ProfileId, ArchiveId), PqaError> {
        let profile = parse(file_type, text)?;
        let id = self.save(&profile)?;
        let archive = self.backend().archive(id, text)?;
        log::info!(
            "imported {} file {} ({} diagnostics)",
            file_type,
            id,
            profile.diagnostics().len()
        );
        Ok((id, archive.id))
    }

    pub fn reconstruct(&self, id: ProfileId) -> Result<String, PqaError> {
        reconstruct_profile(&self.backend().get(id)?)
    }

    /// Diffs and scores two texts against the active threshold.
    pub fn analyze(
        &self,
        file_type: FileType,
        original: &str,
        reconstructed: &str,
    ) -> Result<Analysis, PqaError> {
        let report = diff_documents(file_type, original, reconstructed)?;
        let threshold = self.backend().active_threshold()?;
        let card = score_report(&report, &threshold.threshold);
        Ok(Analysis { report, card })
    }

    /// Runs the whole pipeline for one stored file and returns what was persisted.
    pub fn run_full_analysis(
        &self,
        id: ProfileId,
        file_type: FileType,
        original: &str,
    ) -> Result<(QualityMetrics, Vec<DiffDetail>), PqaError> {
        let AnalysisOutcome { metrics, diffs, .. } = self.orchestrator.run(id, file_type, original)?;
        Ok((metrics, diffs))
    }

    /// Queues a file ahead of sweep work.
    pub fn request_analysis(&self, pool: &PoolHandle, id: ProfileId) -> Result<AnalysisQueueItem, PqaError> {
        let file_type = self.backend().get(id)?.file_type();
        pool.enqueue(id, file_type, MANUAL_PRIORITY)
    }

    pub fn latest_metrics(&self, id: ProfileId) -> Result<Option<QualityMetrics>, PqaError> {
        self.backend().latest_metrics(id)
    }

    pub fn score_distribution(&self) -> Result<Vec<ScoreBucket>, PqaError> {
        Ok(views::score_distribution(&self.backend().all_metrics()?))
    }

    pub fn drill_down(&self, id: ProfileId) -> Result<DeviceDrillDown, PqaError> {
        let metrics = self.backend().metrics_for(id)?;
        let latest = views::latest_per_file(&metrics).first().map(|m| m.id);
        let diffs = match latest {
            Some(metrics_id) => self.backend().diffs_for(metrics_id)?,
            None => Vec::new(),
        };
        Ok(views::device_drill_down(id, &metrics, &diffs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;
    use crate::score::Threshold;

    const EDS: &str = "[File]\n    DescText = \"Adapter\";\n\n[Device]\n    VendCode = 7;\n    ProdCode = 2;\n";

    #[test]
    fn test_import_reconstruct_analyze() {
        let service = PqaService::new(Arc::new(InMemoryStore::new()));
        let (id, _) = service.import(FileType::Eds, EDS).unwrap();
        let text = service.reconstruct(id).unwrap();
        let analysis = service.analyze(FileType::Eds, EDS, &text).unwrap();
        assert!(analysis.report.is_identical());
        assert!(analysis.card.passed_threshold);

        let (metrics, diffs) = service.run_full_analysis(id, FileType::Eds, EDS).unwrap();
        assert!(diffs.is_empty());
        assert_eq!(service.latest_metrics(id).unwrap(), Some(metrics));

        let view = service.drill_down(id).unwrap();
        assert_eq!(view.history.len(), 1);
        assert_eq!(service.score_distribution().unwrap()[5].count, 1);
    }

    #[test]
    fn test_bad_iodd_is_a_parse_error() {
        let service = PqaService::new(Arc::new(InMemoryStore::new()));
        let err = service.import(FileType::Iodd, "<IODevice><Broken></IODevice>").unwrap_err();
        assert!(matches!(err, PqaError::Parse(_)));
    }

    #[test]
    fn test_unknown_file_fails_analysis() {
        let service = PqaService::new(Arc::new(InMemoryStore::new()));
        let err = service
            .run_full_analysis(ProfileId(42), FileType::Eds, EDS)
            .unwrap_err();
        assert!(matches!(err, PqaError::Analysis(_)));
    }

    #[test]
    fn test_config_threshold_is_activated() {
        let store = Arc::new(InMemoryStore::new());
        let config = PqaConfig {
            threshold: Threshold {
                name: "nightly".into(),
                ..Threshold::default()
            },
            ..PqaConfig::default()
        };
        let service = PqaService::with_config(store, &config).unwrap();
        assert_eq!(service.backend().active_threshold().unwrap().threshold.name, "nightly");
    }
}
