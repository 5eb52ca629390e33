//! GitHub REST API client
//!
//! Only the three endpoints repo-traffic needs: the authenticated user's
//! repositories and the daily clone/view traffic of one repository.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::constants;
use crate::error::{Result, TrafficError};
use crate::fetch::{RepoRef, TrafficSource};
use crate::traffic::DailyTraffic;

/// Repository record from `GET /user/repos`, trimmed to what we use
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// Error body GitHub sends with non-success responses
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client authenticated with `token` against `base_url`
    pub fn new(token: &str, base_url: impl Into<String>) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("token {}", token))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(constants::ACCEPT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(constants::REQUEST_TIMEOUT_SECS))
            .build()?;

        let base_url: String = base_url.into();
        Ok(GitHubClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All repositories of the authenticated user, following pagination
    pub async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let mut repos = Vec::new();
        let mut page = 1;

        loop {
            let url = format!(
                "{}/user/repos?per_page={}&page={}",
                self.base_url,
                constants::REPOS_PER_PAGE,
                page
            );
            let batch: Vec<Repository> = self.get_json(&url).await?;
            let last_page = batch.len() < constants::REPOS_PER_PAGE;
            debug!("Repository page {}: {} entries", page, batch.len());
            repos.extend(batch);

            if last_page {
                break;
            }
            page += 1;
        }

        Ok(repos)
    }

    pub async fn clone_traffic(&self, owner: &str, repo: &str) -> Result<DailyTraffic> {
        let url = format!(
            "{}/repos/{}/{}/traffic/clones?per={}",
            self.base_url,
            owner,
            repo,
            constants::PER_DAY
        );
        self.get_json(&url).await
    }

    pub async fn view_traffic(&self, owner: &str, repo: &str) -> Result<DailyTraffic> {
        let url = format!(
            "{}/repos/{}/{}/traffic/views?per={}",
            self.base_url,
            owner,
            repo,
            constants::PER_DAY
        );
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiMessage>(&body)
                .ok()
                .and_then(|m| m.message)
                .unwrap_or(body);

            if status == StatusCode::UNAUTHORIZED {
                return Err(TrafficError::Credential(format!(
                    "GitHub rejected the access token: {}",
                    message
                )));
            }
            return Err(TrafficError::GitHub(format!("{} from {}: {}", status, url, message)));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TrafficSource for GitHubClient {
    async fn repositories(&self) -> Result<Vec<RepoRef>> {
        Ok(self
            .list_repositories()
            .await?
            .into_iter()
            .map(|repo| RepoRef {
                owner: repo.owner.login,
                name: repo.name,
            })
            .collect())
    }

    async fn clones(&self, repo: &RepoRef) -> Result<DailyTraffic> {
        self.clone_traffic(&repo.owner, &repo.name).await
    }

    async fn views(&self, repo: &RepoRef) -> Result<DailyTraffic> {
        self.view_traffic(&repo.owner, &repo.name).await
    }
}
