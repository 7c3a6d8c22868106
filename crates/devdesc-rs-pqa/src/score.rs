// crates/devdesc-rs-pqa/src/score.rs

//! Weighted fidelity scores of a diff.
//!
//! Every dimension is `100 * (1 - errors / original total)`, clamped to
//! `0..=100`. Errors are counted in nodes, so a missing subtree costs as
//! much as all the elements, attributes and values it held. Adding a diff
//! item can therefore only lower a score.

use crate::criticality::DiffSeverity;
use crate::diff::{DiffItem, DiffReport, DiffType};
use crate::tree::NodeCounts;
use serde::{Deserialize, Serialize};

/// Pass/fail rule and score weights of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Threshold {
    pub name: String,
    pub min_overall_score: f64,
    pub max_data_loss_percentage: f64,
    pub allow_critical_data_loss: bool,
    /// Open a quality issue when a run fails this threshold.
    pub auto_ticket_on_fail: bool,
    pub structural_weight: f64,
    pub attribute_weight: f64,
    pub value_weight: f64,
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            min_overall_score: 95.0,
            max_data_loss_percentage: 1.0,
            allow_critical_data_loss: false,
            auto_ticket_on_fail: true,
            structural_weight: 0.40,
            attribute_weight: 0.35,
            value_weight: 0.25,
        }
    }
}

impl Threshold {
    pub fn passes(&self, overall_score: f64, data_loss_percentage: f64, critical_data_loss: bool) -> bool {
        overall_score >= self.min_overall_score
            && data_loss_percentage <= self.max_data_loss_percentage
            && (!critical_data_loss || self.allow_critical_data_loss)
    }

    /// Checks that the weights are usable.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [self.structural_weight, self.attribute_weight, self.value_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(format!("threshold '{}': weights must be non-negative", self.name));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(format!("threshold '{}': weights sum to zero", self.name));
        }
        Ok(())
    }

    fn weighted(&self, structural: f64, attribute: f64, value: f64) -> f64 {
        let total = self.structural_weight + self.attribute_weight + self.value_weight;
        if total <= 0.0 {
            return 0.0;
        }
        let overall = (structural * self.structural_weight
            + attribute * self.attribute_weight
            + value * self.value_weight)
            / total;
        // Four decimals, so equal inputs give exactly that score.
        (overall * 10_000.0).round() / 10_000.0
    }
}

/// Fidelity of one feature group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupScore {
    pub group: String,
    pub score: f64,
    /// Nodes of the group in the original.
    pub nodes: u32,
    /// Nodes of the group affected by differences.
    pub errors: u32,
}

/// Scores of one diff against one threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub structural_score: f64,
    pub attribute_score: f64,
    pub value_score: f64,
    pub overall_score: f64,
    pub data_loss_percentage: f64,
    pub critical_data_loss: bool,
    pub passed_threshold: bool,
    /// Groups of the original, in first-seen order.
    pub groups: Vec<GroupScore>,
}

impl ScoreCard {
    pub fn group(&self, name: &str) -> Option<&GroupScore> {
        self.groups.iter().find(|g| g.group == name)
    }
}

/// Scores a diff report.
pub fn score_report(report: &DiffReport, threshold: &Threshold) -> ScoreCard {
    score(
        &report.items,
        &report.original_counts,
        &report.reconstructed_counts,
        threshold,
    )
}

/// Scores a list of differences.
///
/// `reconstructed` is accepted for symmetry with the report; all ratios are
/// taken against the original.
pub fn score(
    diffs: &[DiffItem],
    original: &NodeCounts,
    _reconstructed: &NodeCounts,
    threshold: &Threshold,
) -> ScoreCard {
    let mut structural_errors = 0u32;
    let mut attribute_errors = 0u32;
    let mut value_errors = 0u32;
    let mut lost = 0u32;

    for item in diffs {
        if item.diff_type.is_structural() {
            structural_errors += item.extent.elements;
        }
        attribute_errors += item.extent.attributes;
        value_errors += item.extent.values;
        if item.diff_type.is_loss() {
            lost += item.extent.elements + item.extent.attributes;
        }
    }

    let structural_score = fidelity(structural_errors, original.elements);
    let attribute_score = fidelity(attribute_errors, original.attributes);
    let value_score = fidelity(value_errors, original.values);
    let overall_score = threshold.weighted(structural_score, attribute_score, value_score);

    let data_loss_percentage = match original.elements + original.attributes {
        0 => 0.0,
        total => (100.0 * f64::from(lost) / f64::from(total)).min(100.0),
    };
    let critical_data_loss = diffs.iter().any(|d| d.severity == DiffSeverity::Critical);
    let passed_threshold = threshold.passes(overall_score, data_loss_percentage, critical_data_loss);

    let groups = original
        .groups
        .iter()
        .map(|(group, nodes)| {
            let errors: u32 = diffs
                .iter()
                .filter(|d| d.group.as_deref() == Some(group.as_str()))
                .map(|d| d.extent.total())
                .sum();
            GroupScore {
                group: group.clone(),
                score: fidelity(errors, *nodes),
                nodes: *nodes,
                errors,
            }
        })
        .collect();

    log::debug!(
        "scored {} diffs: overall {:.2}, loss {:.2}%, critical {}, passed {}",
        diffs.len(),
        overall_score,
        data_loss_percentage,
        critical_data_loss,
        passed_threshold
    );

    ScoreCard {
        structural_score,
        attribute_score,
        value_score,
        overall_score,
        data_loss_percentage,
        critical_data_loss,
        passed_threshold,
        groups,
    }
}

/// `100 * (1 - errors / total)`, clamped. With no original nodes, any
/// error scores 0.
fn fidelity(errors: u32, total: u32) -> f64 {
    if errors == 0 {
        return 100.0;
    }
    if total == 0 {
        return 0.0;
    }
    (100.0 * (1.0 - f64::from(errors) / f64::from(total))).clamp(0.0, 100.0)
}

/// Number of items of each type, in [`DiffType::ALL`] order.
pub fn count_by_type(diffs: &[DiffItem]) -> Vec<(DiffType, usize)> {
    DiffType::ALL
        .iter()
        .map(|t| (*t, diffs.iter().filter(|d| d.diff_type == *t).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Extent;

    fn counts() -> NodeCounts {
        NodeCounts {
            elements: 100,
            attributes: 200,
            values: 10,
            groups: vec![("menu_buttons".to_string(), 10)],
        }
    }

    fn item(diff_type: DiffType, severity: DiffSeverity, extent: Extent) -> DiffItem {
        DiffItem {
            diff_type,
            severity,
            path: "/IODevice/X".to_string(),
            expected: None,
            actual: None,
            description: String::new(),
            span: None,
            extent,
            group: None,
        }
    }

    #[test]
    fn test_no_diffs_is_perfect() {
        let card = score(&[], &counts(), &counts(), &Threshold::default());
        assert!((card.overall_score - 100.0).abs() < 1e-9);
        assert_eq!(card.data_loss_percentage, 0.0);
        assert!(!card.critical_data_loss);
        assert!(card.passed_threshold);
        assert_eq!(card.groups[0].score, 100.0);
    }

    #[test]
    fn test_weights() {
        let missing = item(
            DiffType::MissingElement,
            DiffSeverity::Medium,
            Extent {
                elements: 10,
                attributes: 20,
                values: 1,
            },
        );
        let card = score(&[missing], &counts(), &counts(), &Threshold::default());
        assert!((card.structural_score - 90.0).abs() < 1e-9);
        assert!((card.attribute_score - 90.0).abs() < 1e-9);
        assert!((card.value_score - 90.0).abs() < 1e-9);
        assert!((card.overall_score - 90.0).abs() < 1e-9);
        assert!((card.data_loss_percentage - 10.0).abs() < 1e-9);
        assert!(!card.passed_threshold);
    }

    #[test]
    fn test_extra_attribute_lowers_attribute_score() {
        let extra = item(DiffType::ExtraAttribute, DiffSeverity::Medium, Extent::ATTRIBUTE);
        let card = score(&[extra], &counts(), &counts(), &Threshold::default());
        assert!(card.attribute_score < 100.0);
        assert_eq!(card.structural_score, 100.0);
        assert_eq!(card.data_loss_percentage, 0.0);
    }

    #[test]
    fn test_critical_item_never_raises_score() {
        let base = vec![item(DiffType::IncorrectValue, DiffSeverity::Low, Extent::VALUE)];
        let before = score(&base, &counts(), &counts(), &Threshold::default());

        let mut more = base.clone();
        more.push(item(DiffType::MissingAttribute, DiffSeverity::Critical, Extent::ATTRIBUTE));
        let after = score(&more, &counts(), &counts(), &Threshold::default());

        assert!(after.overall_score <= before.overall_score);
        assert!(after.critical_data_loss);
        assert!(!after.passed_threshold);
    }

    #[test]
    fn test_threshold_rule() {
        let threshold = Threshold::default();
        assert!(!threshold.passes(94.5, 0.0, false));
        assert!(threshold.passes(95.0, 1.0, false));
        assert!(!threshold.passes(99.0, 1.5, false));
        assert!(!threshold.passes(100.0, 0.0, true));

        let lenient = Threshold {
            allow_critical_data_loss: true,
            ..Threshold::default()
        };
        assert!(lenient.passes(100.0, 0.0, true));
    }

    #[test]
    fn test_group_scores() {
        let mut button = item(DiffType::MissingElement, DiffSeverity::Medium, Extent {
            elements: 1,
            attributes: 1,
            values: 0,
        });
        button.group = Some("menu_buttons".to_string());
        let card = score(&[button], &counts(), &counts(), &Threshold::default());
        let group = card.group("menu_buttons").unwrap();
        assert_eq!(group.errors, 2);
        assert!((group.score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_weights() {
        let t = Threshold {
            structural_weight: 0.0,
            attribute_weight: 0.0,
            value_weight: 0.0,
            ..Threshold::default()
        };
        assert!(t.validate().is_err());
        assert!(Threshold::default().validate().is_ok());
    }
}
