// crates/devdesc-rs-pqa/src/metrics.rs

//! Persisted results of an analysis run.
//!
//! Both formats share one [`QualityMetrics`] record. What only one format
//! has lives in [`FormatMetrics`].

use crate::criticality::{DiffSeverity, Phase};
use crate::diff::{DiffItem, DiffReport, DiffType};
use crate::ids::{ArchiveId, DiffId, MetricsId, ProfileId, ThresholdId};
use crate::score::ScoreCard;
use chrono::{DateTime, Utc};
use devdesc_rs::FileType;
use serde::{Deserialize, Serialize};

/// Scores every quality record exposes, whatever its format.
pub trait FidelityMetrics {
    fn overall_score(&self) -> f64;
    fn data_loss_percentage(&self) -> f64;
    fn critical_data_loss(&self) -> bool;
    fn passed_threshold(&self) -> bool;
}

/// IODD feature-group scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseScores {
    pub ui_rendering: f64,
    pub variants_conditions: f64,
    pub menu_buttons: f64,
    pub wiring_test_config: f64,
    pub custom_datatypes: f64,
}

impl Default for PhaseScores {
    fn default() -> Self {
        Self {
            ui_rendering: 100.0,
            variants_conditions: 100.0,
            menu_buttons: 100.0,
            wiring_test_config: 100.0,
            custom_datatypes: 100.0,
        }
    }
}

impl PhaseScores {
    /// Phases absent from the original score 100.
    pub fn from_card(card: &ScoreCard) -> Self {
        let of = |phase: Phase| card.group(phase.as_str()).map_or(100.0, |g| g.score);
        Self {
            ui_rendering: of(Phase::UiRendering),
            variants_conditions: of(Phase::VariantsConditions),
            menu_buttons: of(Phase::MenuButtons),
            wiring_test_config: of(Phase::WiringTestConfig),
            custom_datatypes: of(Phase::CustomDatatypes),
        }
    }

    pub fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::UiRendering => self.ui_rendering,
            Phase::VariantsConditions => self.variants_conditions,
            Phase::MenuButtons => self.menu_buttons,
            Phase::WiringTestConfig => self.wiring_test_config,
            Phase::CustomDatatypes => self.custom_datatypes,
        }
    }
}

/// Fidelity of one EDS section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionFidelity {
    pub section: String,
    pub score: f64,
    pub entries: u32,
}

/// Format-specific part of a quality record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormatMetrics {
    Iodd { phases: PhaseScores },
    Eds { sections: Vec<SectionFidelity> },
}

impl FormatMetrics {
    pub fn from_card(file_type: FileType, card: &ScoreCard) -> Self {
        match file_type {
            FileType::Iodd => FormatMetrics::Iodd {
                phases: PhaseScores::from_card(card),
            },
            FileType::Eds => FormatMetrics::Eds {
                sections: card
                    .groups
                    .iter()
                    .map(|g| SectionFidelity {
                        section: g.group.clone(),
                        score: g.score,
                        entries: g.nodes,
                    })
                    .collect(),
            },
        }
    }
}

/// One analysis run. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Assigned by the store.
    pub id: MetricsId,
    pub file_id: ProfileId,
    pub file_type: FileType,
    pub archive_id: Option<ArchiveId>,
    pub threshold_id: ThresholdId,
    pub analyzed_at: DateTime<Utc>,

    pub structural_score: f64,
    pub attribute_score: f64,
    pub value_score: f64,
    pub overall_score: f64,
    pub data_loss_percentage: f64,
    pub critical_data_loss: bool,
    pub passed_threshold: bool,

    pub original_elements: u32,
    pub original_attributes: u32,
    pub original_values: u32,
    pub reconstructed_elements: u32,
    pub reconstructed_attributes: u32,
    pub reconstructed_values: u32,
    pub diff_count: u32,

    pub format: FormatMetrics,
}

impl QualityMetrics {
    /// Builds an unsaved record; the store assigns `id`.
    pub fn new(
        file_id: ProfileId,
        archive_id: Option<ArchiveId>,
        threshold_id: ThresholdId,
        report: &DiffReport,
        card: &ScoreCard,
    ) -> Self {
        Self {
            id: MetricsId::default(),
            file_id,
            file_type: report.file_type,
            archive_id,
            threshold_id,
            analyzed_at: Utc::now(),
            structural_score: card.structural_score,
            attribute_score: card.attribute_score,
            value_score: card.value_score,
            overall_score: card.overall_score,
            data_loss_percentage: card.data_loss_percentage,
            critical_data_loss: card.critical_data_loss,
            passed_threshold: card.passed_threshold,
            original_elements: report.original_counts.elements,
            original_attributes: report.original_counts.attributes,
            original_values: report.original_counts.values,
            reconstructed_elements: report.reconstructed_counts.elements,
            reconstructed_attributes: report.reconstructed_counts.attributes,
            reconstructed_values: report.reconstructed_counts.values,
            diff_count: report.items.len() as u32,
            format: FormatMetrics::from_card(report.file_type, card),
        }
    }

    pub fn phases(&self) -> Option<&PhaseScores> {
        match &self.format {
            FormatMetrics::Iodd { phases } => Some(phases),
            FormatMetrics::Eds { .. } => None,
        }
    }
}

impl FidelityMetrics for QualityMetrics {
    fn overall_score(&self) -> f64 {
        self.overall_score
    }

    fn data_loss_percentage(&self) -> f64 {
        self.data_loss_percentage
    }

    fn critical_data_loss(&self) -> bool {
        self.critical_data_loss
    }

    fn passed_threshold(&self) -> bool {
        self.passed_threshold
    }
}

impl FidelityMetrics for ScoreCard {
    fn overall_score(&self) -> f64 {
        self.overall_score
    }

    fn data_loss_percentage(&self) -> f64 {
        self.data_loss_percentage
    }

    fn critical_data_loss(&self) -> bool {
        self.critical_data_loss
    }

    fn passed_threshold(&self) -> bool {
        self.passed_threshold
    }
}

/// One difference of a run. Written together with its [`QualityMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffDetail {
    /// Assigned by the store.
    pub id: DiffId,
    /// Assigned by the store.
    pub metrics_id: MetricsId,
    pub diff_type: DiffType,
    pub severity: DiffSeverity,
    pub path: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub description: String,
    pub line: Option<u32>,
    pub group: Option<String>,
}

impl From<&DiffItem> for DiffDetail {
    fn from(item: &DiffItem) -> Self {
        Self {
            id: DiffId::default(),
            metrics_id: MetricsId::default(),
            diff_type: item.diff_type,
            severity: item.severity,
            path: item.path.clone(),
            expected: item.expected.clone(),
            actual: item.actual.clone(),
            description: item.description.clone(),
            line: item.span.map(|s| s.line),
            group: item.group.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff_documents;
    use crate::score::{Threshold, score_report};

    #[test]
    fn test_iodd_record_carries_phases() {
        let a = r#"<IODevice><UserInterface><MenuCollection><Menu id="M"><Button buttonValue="1"/><Button buttonValue="2"/></Menu></MenuCollection></UserInterface></IODevice>"#;
        let b = r#"<IODevice><UserInterface><MenuCollection><Menu id="M"><Button buttonValue="1"/></Menu></MenuCollection></UserInterface></IODevice>"#;
        let report = diff_documents(FileType::Iodd, a, b).unwrap();
        let card = score_report(&report, &Threshold::default());
        let metrics = QualityMetrics::new(ProfileId(1), None, ThresholdId(1), &report, &card);

        let phases = metrics.phases().unwrap();
        assert!((phases.menu_buttons - 50.0).abs() < 1e-9);
        assert_eq!(phases.custom_datatypes, 100.0);
        assert_eq!(metrics.diff_count, 1);
        assert_eq!(metrics.original_elements, 6);
        assert_eq!(metrics.reconstructed_elements, 5);
        assert!(!metrics.passed_threshold());
    }

    #[test]
    fn test_eds_record_carries_sections() {
        let a = "[File]\nDescText = \"x\";\n[Device]\nVendCode = 1;\nProdCode = 2;\n";
        let b = "[File]\nDescText = \"x\";\n[Device]\nVendCode = 1;\nProdCode = 3;\n";
        let report = diff_documents(FileType::Eds, a, b).unwrap();
        let card = score_report(&report, &Threshold::default());
        let metrics = QualityMetrics::new(ProfileId(1), None, ThresholdId(1), &report, &card);

        match &metrics.format {
            FormatMetrics::Eds { sections } => {
                assert_eq!(sections.len(), 2);
                assert_eq!(sections[0].score, 100.0);
                assert!(sections[1].score < 100.0);
            }
            other => panic!("expected EDS metrics, got {:?}", other),
        }
        assert!(metrics.critical_data_loss());
        let detail = DiffDetail::from(&report.items[0]);
        assert_eq!(detail.line, Some(5));
        assert_eq!(detail.severity, DiffSeverity::Critical);
    }
}
