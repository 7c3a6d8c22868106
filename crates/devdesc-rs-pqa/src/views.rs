// crates/devdesc-rs-pqa/src/views.rs

//! Read-only aggregates over stored analysis runs.
//!
//! All views are pure functions of the records handed in, so they work on
//! whatever slice of history the caller loaded.

use crate::diff::DiffType;
use crate::ids::{MetricsId, ProfileId};
use crate::metrics::{DiffDetail, QualityMetrics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower bounds of the score buckets. The last bucket includes 100.
const BUCKET_BOUNDS: [f64; 7] = [0.0, 50.0, 70.0, 80.0, 90.0, 95.0, 100.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Latest run of each file, ordered by file id.
pub fn latest_per_file(metrics: &[QualityMetrics]) -> Vec<&QualityMetrics> {
    let mut latest: BTreeMap<ProfileId, &QualityMetrics> = BTreeMap::new();
    for m in metrics {
        let newer = latest
            .get(&m.file_id)
            .is_none_or(|cur| (m.analyzed_at, m.id) > (cur.analyzed_at, cur.id));
        if newer {
            latest.insert(m.file_id, m);
        }
    }
    latest.into_values().collect()
}

/// How many files fall into each overall-score bucket, using each file's
/// latest run.
pub fn score_distribution(metrics: &[QualityMetrics]) -> Vec<ScoreBucket> {
    let mut buckets: Vec<ScoreBucket> = BUCKET_BOUNDS
        .windows(2)
        .map(|w| ScoreBucket {
            label: format!("{}-{}", w[0], w[1]),
            min: w[0],
            max: w[1],
            count: 0,
        })
        .collect();
    let last = buckets.len() - 1;
    for m in latest_per_file(metrics) {
        let score = m.overall_score.clamp(0.0, 100.0);
        let index = buckets
            .iter()
            .position(|b| score < b.max)
            .unwrap_or(last);
        buckets[index].count += 1;
    }
    buckets
}

/// Number of differences of each type, in [`DiffType::ALL`] order.
pub fn diff_type_distribution(diffs: &[DiffDetail]) -> Vec<(DiffType, usize)> {
    DiffType::ALL
        .iter()
        .map(|t| (*t, diffs.iter().filter(|d| d.diff_type == *t).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPattern {
    pub pattern: String,
    pub count: usize,
}

/// A path with its positional predicates removed:
/// `/A/B[2]/@c` becomes `/A/B/@c`.
pub fn path_pattern(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for c in path.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// The `limit` most frequent path patterns; ties sort by pattern.
pub fn top_xpath_patterns(diffs: &[DiffDetail], limit: usize) -> Vec<PathPattern> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for d in diffs {
        *counts.entry(path_pattern(&d.path)).or_default() += 1;
    }
    let mut patterns: Vec<PathPattern> = counts
        .into_iter()
        .map(|(pattern, count)| PathPattern { pattern, count })
        .collect();
    // BTreeMap order is already by pattern; a stable sort keeps it for ties.
    patterns.sort_by(|a, b| b.count.cmp(&a.count));
    patterns.truncate(limit);
    patterns
}

/// History and latest differences of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDrillDown {
    pub file_id: ProfileId,
    /// Runs oldest first.
    pub history: Vec<QualityMetrics>,
    pub latest: Option<QualityMetrics>,
    pub latest_diffs: Vec<DiffDetail>,
    /// Latest overall score minus the previous one.
    pub trend: Option<f64>,
}

pub fn device_drill_down(
    file_id: ProfileId,
    metrics: &[QualityMetrics],
    diffs: &[DiffDetail],
) -> DeviceDrillDown {
    let mut history: Vec<QualityMetrics> = metrics
        .iter()
        .filter(|m| m.file_id == file_id)
        .cloned()
        .collect();
    history.sort_by(|a, b| (a.analyzed_at, a.id).cmp(&(b.analyzed_at, b.id)));

    let latest = history.last().cloned();
    let latest_id: Option<MetricsId> = latest.as_ref().map(|m| m.id);
    let latest_diffs = diffs
        .iter()
        .filter(|d| Some(d.metrics_id) == latest_id)
        .cloned()
        .collect();
    let trend = match history.as_slice() {
        [.., previous, last] => Some(last.overall_score - previous.overall_score),
        _ => None,
    };

    DeviceDrillDown {
        file_id,
        history,
        latest,
        latest_diffs,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criticality::DiffSeverity;
    use crate::diff::diff_documents;
    use crate::ids::{DiffId, ThresholdId};
    use crate::score::{Threshold, score_report};
    use chrono::{Duration, Utc};
    use devdesc_rs::FileType;

    fn run(file_id: u64, id: u64, minutes_ago: i64, overall: f64) -> QualityMetrics {
        let report = diff_documents(FileType::Iodd, "<IODevice/>", "<IODevice/>").unwrap();
        let card = score_report(&report, &Threshold::default());
        let mut m = QualityMetrics::new(ProfileId(file_id), None, ThresholdId(1), &report, &card);
        m.id = MetricsId(id);
        m.analyzed_at = Utc::now() - Duration::minutes(minutes_ago);
        m.overall_score = overall;
        m
    }

    fn detail(metrics_id: u64, diff_type: DiffType, path: &str) -> DiffDetail {
        DiffDetail {
            id: DiffId(0),
            metrics_id: MetricsId(metrics_id),
            diff_type,
            severity: DiffSeverity::Medium,
            path: path.to_string(),
            expected: None,
            actual: None,
            description: String::new(),
            line: None,
            group: None,
        }
    }

    #[test]
    fn test_latest_per_file() {
        let metrics = vec![run(1, 1, 10, 50.0), run(1, 2, 5, 99.0), run(2, 3, 1, 75.0)];
        let latest = latest_per_file(&metrics);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].id, MetricsId(2));
        assert_eq!(latest[1].id, MetricsId(3));
    }

    #[test]
    fn test_score_distribution() {
        let metrics = vec![
            run(1, 1, 10, 10.0),
            run(1, 2, 5, 100.0),
            run(2, 3, 1, 94.5),
            run(3, 4, 1, 50.0),
        ];
        let buckets = score_distribution(&metrics);
        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0].label, "0-50");
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![0, 1, 0, 0, 1, 1]);
    }

    #[test]
    fn test_patterns_strip_positions() {
        assert_eq!(
            path_pattern("/IODevice/VariableCollection/Variable[12]/@index"),
            "/IODevice/VariableCollection/Variable/@index"
        );
        let diffs = vec![
            detail(1, DiffType::MissingElement, "/A/B[1]"),
            detail(1, DiffType::MissingElement, "/A/B[2]"),
            detail(1, DiffType::ExtraAttribute, "/A/C/@x"),
            detail(2, DiffType::IncorrectValue, "/A/B[3]"),
        ];
        let top = top_xpath_patterns(&diffs, 5);
        assert_eq!(top[0], PathPattern { pattern: "/A/B".into(), count: 3 });
        assert_eq!(top[1].pattern, "/A/C/@x");
        assert_eq!(top_xpath_patterns(&diffs, 1).len(), 1);

        let by_type = diff_type_distribution(&diffs);
        assert_eq!(by_type[0], (DiffType::MissingElement, 2));
        assert_eq!(by_type.len(), 3);
    }

    #[test]
    fn test_drill_down() {
        let metrics = vec![run(1, 1, 10, 90.0), run(1, 2, 5, 95.5), run(2, 3, 1, 75.0)];
        let diffs = vec![
            detail(1, DiffType::MissingElement, "/A/B"),
            detail(2, DiffType::ExtraAttribute, "/A/@x"),
        ];
        let view = device_drill_down(ProfileId(1), &metrics, &diffs);
        assert_eq!(view.history.len(), 2);
        assert_eq!(view.latest.as_ref().map(|m| m.id), Some(MetricsId(2)));
        assert_eq!(view.latest_diffs.len(), 1);
        assert!((view.trend.unwrap() - 5.5).abs() < 1e-9);

        let empty = device_drill_down(ProfileId(9), &metrics, &diffs);
        assert!(empty.latest.is_none());
        assert!(empty.trend.is_none());
    }
}
