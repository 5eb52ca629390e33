//! Traffic data structures and aggregation
//!
//! GitHub reports clone and view traffic separately. This module reshapes both
//! kinds into one detail table keyed by (day, repository) and one summary table
//! keyed by repository. Both tables are ordered maps, so iteration is already in
//! the order the CSV files are written in.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day of one traffic kind for one repository, as reported by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficPoint {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub uniques: u64,
}

impl TrafficPoint {
    pub fn new(timestamp: DateTime<Utc>, count: u64, uniques: u64) -> Self {
        TrafficPoint {
            timestamp,
            count,
            uniques,
        }
    }

    /// Calendar day the point belongs to (GitHub buckets days in UTC)
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Window totals plus the per day breakdown for one traffic kind.
///
/// GitHub names the breakdown `clones` or `views` depending on the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTraffic {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub uniques: u64,
    #[serde(default, alias = "clones", alias = "views")]
    pub points: Vec<TrafficPoint>,
}

/// Which traffic counter a point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficKind {
    Clone,
    View,
}

/// Clone and view traffic of one repository on one day.
///
/// Either side is `None` when GitHub reported no activity of that kind for the
/// day. Accessors report an absent side as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailRow {
    pub clone: Option<TrafficPoint>,
    pub view: Option<TrafficPoint>,
}

impl DetailRow {
    pub fn clone_count(&self) -> u64 {
        self.clone.map_or(0, |p| p.count)
    }

    pub fn clone_uniques(&self) -> u64 {
        self.clone.map_or(0, |p| p.uniques)
    }

    pub fn view_count(&self) -> u64 {
        self.view.map_or(0, |p| p.count)
    }

    pub fn view_uniques(&self) -> u64 {
        self.view.map_or(0, |p| p.uniques)
    }
}

/// GitHub's own totals for one repository over its retention window.
/// Defaults to all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub clone_count: u64,
    pub clone_uniques: u64,
    pub view_count: u64,
    pub view_uniques: u64,
}

impl SummaryRow {
    pub fn from_traffic(clones: &DailyTraffic, views: &DailyTraffic) -> Self {
        SummaryRow {
            clone_count: clones.count,
            clone_uniques: clones.uniques,
            view_count: views.count,
            view_uniques: views.uniques,
        }
    }
}

/// Key of the detail table
pub type DetailKey = (NaiveDate, String);

/// Detail and summary tables for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrafficTables {
    details: BTreeMap<DetailKey, DetailRow>,
    summaries: BTreeMap<String, SummaryRow>,
}

impl TrafficTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one point, creating the (day, repo) row on first touch.
    /// A second point of the same kind for the same row replaces the first.
    pub fn record_point(&mut self, repo: &str, kind: TrafficKind, point: TrafficPoint) {
        let row = self
            .details
            .entry((point.day(), repo.to_string()))
            .or_default();
        match kind {
            TrafficKind::Clone => row.clone = Some(point),
            TrafficKind::View => row.view = Some(point),
        }
    }

    pub fn record_clones(&mut self, repo: &str, points: &[TrafficPoint]) {
        for point in points {
            self.record_point(repo, TrafficKind::Clone, *point);
        }
    }

    pub fn record_views(&mut self, repo: &str, points: &[TrafficPoint]) {
        for point in points {
            self.record_point(repo, TrafficKind::View, *point);
        }
    }

    pub fn record_summary(&mut self, repo: &str, summary: SummaryRow) {
        self.summaries.insert(repo.to_string(), summary);
    }

    /// Fold everything fetched for one repository into both tables
    pub fn record_repo(&mut self, repo: &str, clones: &DailyTraffic, views: &DailyTraffic) {
        self.record_clones(repo, &clones.points);
        self.record_views(repo, &views.points);
        self.record_summary(repo, SummaryRow::from_traffic(clones, views));
    }

    /// Detail rows in ascending (day, repo) order
    pub fn details(&self) -> impl Iterator<Item = (&NaiveDate, &str, &DetailRow)> {
        self.details
            .iter()
            .map(|((day, repo), row)| (day, repo.as_str(), row))
    }

    /// Summary rows in ascending repo order
    pub fn summaries(&self) -> impl Iterator<Item = (&str, &SummaryRow)> {
        self.summaries.iter().map(|(repo, row)| (repo.as_str(), row))
    }

    pub fn detail(&self, day: NaiveDate, repo: &str) -> Option<&DetailRow> {
        self.details.get(&(day, repo.to_string()))
    }

    pub fn summary(&self, repo: &str) -> Option<&SummaryRow> {
        self.summaries.get(repo)
    }

    pub fn detail_len(&self) -> usize {
        self.details.len()
    }

    pub fn summary_len(&self) -> usize {
        self.summaries.len()
    }
}
