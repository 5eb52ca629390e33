use async_trait::async_trait;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::traffic::{DailyTraffic, TrafficTables};

/// A repository as seen by a traffic source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

/// Where traffic comes from. Implemented by `GitHubClient`.
#[async_trait]
pub trait TrafficSource: Send + Sync {
    /// Every repository owned by the authenticated identity
    async fn repositories(&self) -> Result<Vec<RepoRef>>;

    /// Daily clone traffic of one repository
    async fn clones(&self, repo: &RepoRef) -> Result<DailyTraffic>;

    /// Daily view traffic of one repository
    async fn views(&self, repo: &RepoRef) -> Result<DailyTraffic>;
}

/// Optional allow-list of repository names; empty lets everything through
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoFilter {
    names: BTreeSet<String>,
}

impl RepoFilter {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RepoFilter {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.contains(name)
    }

    pub fn is_all(&self) -> bool {
        self.names.is_empty()
    }
}

/// Pull clone and view traffic for every allowed repository into fresh tables.
///
/// Requests run one after another. The first failure aborts the whole fetch and
/// nothing collected so far is returned.
pub async fn fetch_traffic(source: &dyn TrafficSource, filter: &RepoFilter) -> Result<TrafficTables> {
    let repos = source.repositories().await?;
    info!("Found {} repositories", repos.len());

    let mut tables = TrafficTables::new();
    for repo in &repos {
        if !filter.allows(&repo.name) {
            debug!("Skipping repository not in filter: {}", repo.name);
            continue;
        }

        info!("Repo: {}", repo.name);
        let clones = source.clones(repo).await?;
        let views = source.views(repo).await?;
        debug!(
            "{}: {} clone days, {} view days",
            repo.name,
            clones.points.len(),
            views.points.len()
        );

        tables.record_repo(&repo.name, &clones, &views);
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrafficError;
    use crate::traffic::{SummaryRow, TrafficPoint};
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSource {
        repos: Vec<&'static str>,
        clones: HashMap<&'static str, DailyTraffic>,
        views: HashMap<&'static str, DailyTraffic>,
        fail_on: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TrafficSource for FakeSource {
        async fn repositories(&self) -> Result<Vec<RepoRef>> {
            Ok(self
                .repos
                .iter()
                .map(|name| RepoRef {
                    owner: "me".to_string(),
                    name: name.to_string(),
                })
                .collect())
        }

        async fn clones(&self, repo: &RepoRef) -> Result<DailyTraffic> {
            self.calls.lock().unwrap().push(format!("clones:{}", repo.name));
            if self.fail_on == Some(repo.name.as_str()) {
                return Err(TrafficError::GitHub("boom".to_string()));
            }
            Ok(self.clones.get(repo.name.as_str()).cloned().unwrap_or_default())
        }

        async fn views(&self, repo: &RepoRef) -> Result<DailyTraffic> {
            self.calls.lock().unwrap().push(format!("views:{}", repo.name));
            Ok(self.views.get(repo.name.as_str()).cloned().unwrap_or_default())
        }
    }

    fn traffic(count: u64, uniques: u64, day: u32) -> DailyTraffic {
        DailyTraffic {
            count,
            uniques,
            points: vec![TrafficPoint::new(
                Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
                count,
                uniques,
            )],
        }
    }

    #[tokio::test]
    async fn fetches_every_repository_in_order() {
        let mut source = FakeSource {
            repos: vec!["alpha", "beta"],
            ..Default::default()
        };
        source.clones.insert("alpha", traffic(3, 1, 1));
        source.views.insert("beta", traffic(8, 5, 2));

        let tables = fetch_traffic(&source, &RepoFilter::default()).await.unwrap();

        assert_eq!(
            *source.calls.lock().unwrap(),
            vec!["clones:alpha", "views:alpha", "clones:beta", "views:beta"]
        );
        assert_eq!(tables.summary_len(), 2);
        assert_eq!(tables.detail_len(), 2);
        assert_eq!(
            tables.summary("beta"),
            Some(&SummaryRow {
                clone_count: 0,
                clone_uniques: 0,
                view_count: 8,
                view_uniques: 5,
            })
        );
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(tables.detail(day, "alpha").unwrap().clone_count(), 3);
    }

    #[tokio::test]
    async fn filter_limits_which_repositories_are_queried() {
        let source = FakeSource {
            repos: vec!["arc_arena", "dotfiles", "arcade_examples"],
            ..Default::default()
        };
        let filter = RepoFilter::only(["arc_arena", "arcade_examples"]);

        let tables = fetch_traffic(&source, &filter).await.unwrap();

        let queried: Vec<String> = source.calls.lock().unwrap().clone();
        assert!(!queried.iter().any(|c| c.ends_with(":dotfiles")));
        let repos: Vec<&str> = tables.summaries().map(|(name, _)| name).collect();
        assert_eq!(repos, vec!["arc_arena", "arcade_examples"]);
    }

    #[tokio::test]
    async fn first_failure_aborts_the_fetch() {
        let source = FakeSource {
            repos: vec!["alpha", "broken", "gamma"],
            fail_on: Some("broken"),
            ..Default::default()
        };

        let err = fetch_traffic(&source, &RepoFilter::default()).await.unwrap_err();

        assert!(matches!(err, TrafficError::GitHub(_)));
        assert!(!source
            .calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.ends_with(":gamma")));
    }

    #[test]
    fn empty_filter_allows_everything() {
        let filter = RepoFilter::default();
        assert!(filter.is_all());
        assert!(filter.allows("anything"));

        let filter = RepoFilter::only(Vec::<String>::new());
        assert!(filter.is_all());

        let filter = RepoFilter::only(vec!["one".to_string()]);
        assert!(!filter.is_all());
        assert!(filter.allows("one"));
        assert!(!filter.allows("two"));
    }
}
