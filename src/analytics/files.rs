//! File-change analysis: per-file tallies, hotspots, and type breakdown.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::trends::{direction_points, TrendPoint};
use crate::classify::{classify_path, FileCategory};
use crate::types::{CommitFiles, FileStatus};
use crate::window::Period;

/// Floor for the hotspot threshold.
const HOTSPOT_MIN_THRESHOLD: f64 = 5.0;

/// Multiplier over the per-file mean for the hotspot threshold.
const HOTSPOT_MEAN_FACTOR: f64 = 1.5;

/// Days within which a file counts as recently active.
const RECENT_WITHIN_DAYS: i64 = 30;

/// Days beyond which a file counts as stale.
const STALE_AFTER_DAYS: i64 = 90;

/// Aggregated change statistics for one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChangeStat {
    /// File path
    pub filename: String,
    /// Change events across all commits
    pub count: usize,
    /// Share of total change events, in percent
    pub percentage: f64,
    /// Timestamp of the most recent change, if known
    pub last_changed: Option<DateTime<Utc>>,
    /// Whether the most recent change removed the file
    pub deleted: bool,
    /// Category from the path classifier
    pub category: FileCategory,
    /// Chart color for the category
    pub color: &'static str,
    /// Change count at or above the hotspot threshold
    pub hotspot: bool,
    /// Last changed within the trailing 30 days
    pub recently_active: bool,
    /// Last changed more than 90 days ago
    pub stale: bool,
    /// Per-period change counts at the period's granularity
    pub trend: Vec<TrendPoint>,
}

/// One category slice of the type breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdownEntry {
    /// Category bucket
    pub category: FileCategory,
    /// Change events in this category
    pub count: usize,
    /// Share of total change events, in percent
    pub percentage: f64,
    /// Chart color for the category
    pub color: &'static str,
}

/// File-change analysis over one analysis period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChangeAnalysis {
    /// Period the records were fetched for
    pub period: Period,
    /// Per-file statistics, sorted by count descending (ties keep
    /// encounter order)
    pub files: Vec<FileChangeStat>,
    /// Total change events across all files
    pub total_changes: usize,
    /// Threshold a file's count must reach to be a hotspot:
    /// `max(1.5 × mean, 5)`
    pub hotspot_threshold: f64,
    /// Category breakdown, sorted by count descending
    pub breakdown: Vec<TypeBreakdownEntry>,
}

/// Analyze file-change records against the current instant.
#[must_use]
pub fn file_change_analysis(commits: &[CommitFiles], period: Period) -> FileChangeAnalysis {
    file_change_analysis_at(commits, period, Utc::now())
}

/// [`file_change_analysis`] against an explicit "now" for the
/// recently-active and stale flags.
#[must_use]
pub fn file_change_analysis_at(
    commits: &[CommitFiles],
    period: Period,
    now: DateTime<Utc>,
) -> FileChangeAnalysis {
    let granularity = period.granularity();

    // Encounter order is preserved so ties in the final sort stay in the
    // order files were first seen.
    let mut order: Vec<String> = Vec::new();
    let mut tallies: HashMap<String, FileAccumulator> = HashMap::new();
    let mut total_changes = 0;

    for commit in commits {
        for change in &commit.files {
            if !tallies.contains_key(&change.filename) {
                order.push(change.filename.clone());
            }
            let acc = tallies.entry(change.filename.clone()).or_default();

            acc.count += 1;
            total_changes += 1;

            if let Some(at) = commit.timestamp {
                if acc.last_changed.map_or(true, |prev| at >= prev) {
                    acc.last_changed = Some(at);
                    acc.deleted = change.status == FileStatus::Removed;
                }
                *acc.buckets.entry(granularity.bucket(at.date_naive())).or_insert(0) += 1;
            }
        }
    }

    let mean = if tallies.is_empty() {
        0.0
    } else {
        total_changes as f64 / tallies.len() as f64
    };
    let hotspot_threshold = (mean * HOTSPOT_MEAN_FACTOR).max(HOTSPOT_MIN_THRESHOLD);

    let recent_floor = now - Duration::days(RECENT_WITHIN_DAYS);
    let stale_ceiling = now - Duration::days(STALE_AFTER_DAYS);

    let mut files: Vec<FileChangeStat> = order
        .into_iter()
        .map(|filename| {
            let acc = &tallies[&filename];
            let kind = classify_path(&filename);
            let recently_active = acc.last_changed.is_some_and(|at| at >= recent_floor);
            let stale = acc.last_changed.is_some_and(|at| at < stale_ceiling);

            FileChangeStat {
                count: acc.count,
                percentage: if total_changes > 0 {
                    acc.count as f64 / total_changes as f64 * 100.0
                } else {
                    0.0
                },
                last_changed: acc.last_changed,
                deleted: acc.deleted,
                category: kind.category,
                color: kind.color,
                hotspot: acc.count as f64 >= hotspot_threshold,
                recently_active,
                stale,
                trend: direction_points(&acc.buckets),
                filename,
            }
        })
        .collect();

    // Stable sort keeps encounter order among equal counts
    files.sort_by(|a, b| b.count.cmp(&a.count));

    let mut by_category: BTreeMap<&'static str, (FileCategory, usize)> = BTreeMap::new();
    for file in &files {
        by_category
            .entry(file.category.label())
            .or_insert((file.category, 0))
            .1 += file.count;
    }

    let mut breakdown: Vec<TypeBreakdownEntry> = by_category
        .into_values()
        .map(|(category, count)| TypeBreakdownEntry {
            category,
            count,
            percentage: if total_changes > 0 {
                count as f64 / total_changes as f64 * 100.0
            } else {
                0.0
            },
            color: category.color(),
        })
        .collect();
    breakdown.sort_by(|a, b| b.count.cmp(&a.count));

    FileChangeAnalysis {
        period,
        files,
        total_changes,
        hotspot_threshold,
        breakdown,
    }
}

#[derive(Default)]
struct FileAccumulator {
    count: usize,
    last_changed: Option<DateTime<Utc>>,
    deleted: bool,
    buckets: BTreeMap<NaiveDate, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileChange;
    use chrono::TimeZone;

    fn change(filename: &str, status: FileStatus) -> FileChange {
        FileChange {
            filename: filename.to_string(),
            status,
            changes: 10,
            additions: 6,
            deletions: 4,
        }
    }

    fn commit(d: u32, files: Vec<FileChange>) -> CommitFiles {
        CommitFiles {
            sha: format!("sha-{d}"),
            timestamp: Some(Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()),
            files,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_analysis() {
        let analysis = file_change_analysis_at(&[], Period::Days30, now());
        assert!(analysis.files.is_empty());
        assert!(analysis.breakdown.is_empty());
        assert_eq!(analysis.total_changes, 0);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let commits = vec![
            commit(1, vec![change("a.rs", FileStatus::Modified)]),
            commit(
                2,
                vec![
                    change("a.rs", FileStatus::Modified),
                    change("b.rs", FileStatus::Added),
                ],
            ),
            commit(3, vec![change("c.md", FileStatus::Modified)]),
        ];

        let analysis = file_change_analysis_at(&commits, Period::Days30, now());
        let sum: f64 = analysis.files.iter().map(|f| f.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);

        let breakdown_sum: f64 = analysis.breakdown.iter().map(|b| b.percentage).sum();
        assert!((breakdown_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_by_count_with_encounter_order_ties() {
        let commits = vec![
            commit(
                1,
                vec![
                    change("first.rs", FileStatus::Modified),
                    change("second.rs", FileStatus::Modified),
                ],
            ),
            commit(2, vec![change("busy.rs", FileStatus::Modified)]),
            commit(3, vec![change("busy.rs", FileStatus::Modified)]),
        ];

        let analysis = file_change_analysis_at(&commits, Period::Days30, now());
        let names: Vec<&str> = analysis.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["busy.rs", "first.rs", "second.rs"]);
    }

    #[test]
    fn test_hotspot_threshold_floor() {
        // Two files with one change each: mean 1, 1.5×mean = 1.5, floor 5
        let commits = vec![commit(
            1,
            vec![
                change("a.rs", FileStatus::Modified),
                change("b.rs", FileStatus::Modified),
            ],
        )];

        let analysis = file_change_analysis_at(&commits, Period::Days30, now());
        assert_eq!(analysis.hotspot_threshold, 5.0);
        assert!(analysis.files.iter().all(|f| !f.hotspot));
    }

    #[test]
    fn test_hotspot_above_scaled_mean() {
        // One file changed 8 times, five changed once: mean = 13/6,
        // threshold = max(3.25, 5) = 5, so only the busy file qualifies
        let mut commits: Vec<CommitFiles> = (1..=8)
            .map(|d| commit(d, vec![change("hot.rs", FileStatus::Modified)]))
            .collect();
        commits.push(commit(
            9,
            vec![
                change("a.rs", FileStatus::Modified),
                change("b.rs", FileStatus::Modified),
                change("c.rs", FileStatus::Modified),
                change("d.rs", FileStatus::Modified),
                change("e.rs", FileStatus::Modified),
            ],
        ));

        let analysis = file_change_analysis_at(&commits, Period::Days30, now());
        let hot: Vec<&str> = analysis
            .files
            .iter()
            .filter(|f| f.hotspot)
            .map(|f| f.filename.as_str())
            .collect();
        assert_eq!(hot, vec!["hot.rs"]);
    }

    #[test]
    fn test_deleted_flag_follows_latest_status() {
        let commits = vec![
            commit(1, vec![change("gone.rs", FileStatus::Modified)]),
            commit(2, vec![change("gone.rs", FileStatus::Removed)]),
        ];

        let analysis = file_change_analysis_at(&commits, Period::Days30, now());
        assert!(analysis.files[0].deleted);
    }

    #[test]
    fn test_recent_and_stale_are_disjoint() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let fresh = CommitFiles {
            sha: "fresh".to_string(),
            timestamp: Some(now - Duration::days(5)),
            files: vec![change("fresh.rs", FileStatus::Modified)],
        };
        let old = CommitFiles {
            sha: "old".to_string(),
            timestamp: Some(now - Duration::days(120)),
            files: vec![change("old.rs", FileStatus::Modified)],
        };

        let analysis = file_change_analysis_at(&[fresh, old], Period::All, now);
        for file in &analysis.files {
            assert!(!(file.recently_active && file.stale), "{}", file.filename);
        }

        let fresh_stat = analysis
            .files
            .iter()
            .find(|f| f.filename == "fresh.rs")
            .unwrap();
        assert!(fresh_stat.recently_active && !fresh_stat.stale);

        let old_stat = analysis.files.iter().find(|f| f.filename == "old.rs").unwrap();
        assert!(old_stat.stale && !old_stat.recently_active);
    }

    #[test]
    fn test_breakdown_groups_by_category() {
        let commits = vec![commit(
            1,
            vec![
                change("a.rs", FileStatus::Modified),
                change("b.rs", FileStatus::Modified),
                change("doc.md", FileStatus::Modified),
            ],
        )];

        let analysis = file_change_analysis_at(&commits, Period::Days30, now());
        assert_eq!(analysis.breakdown.len(), 2);
        assert_eq!(analysis.breakdown[0].category, FileCategory::Rust);
        assert_eq!(analysis.breakdown[0].count, 2);
    }

    #[test]
    fn test_missing_timestamps_do_not_crash() {
        let commit = CommitFiles {
            sha: "odd".to_string(),
            timestamp: None,
            files: vec![change("a.rs", FileStatus::Modified)],
        };

        let analysis = file_change_analysis_at(&[commit], Period::Days30, now());
        assert_eq!(analysis.total_changes, 1);
        assert!(analysis.files[0].last_changed.is_none());
        assert!(analysis.files[0].trend.is_empty());
    }
}
