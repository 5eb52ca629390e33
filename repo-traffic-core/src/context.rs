use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{Result, TrafficError};

/// Run configuration packed in structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    // From REPO_TRAFFIC_SECRET, file holding the GitHub access token, default "secret.txt"
    pub secret_file: PathBuf,

    // From REPO_TRAFFIC_DETAILS, per day detail CSV (truncated on every run)
    pub details_file: PathBuf,

    // From REPO_TRAFFIC_SUMMARY, per run summary CSV (appended on every run)
    pub summary_file: PathBuf,

    // From REPO_TRAFFIC_REPOS, comma separated repository names, empty means all repositories
    pub repo_filter: Vec<String>,

    // From REPO_TRAFFIC_API_URL, default "https://api.github.com"
    pub api_url: String,

    // From REPO_TRAFFIC_DEBUG Debug level: 0-no, 1-dump detail table before writing, default 0
    pub debug: i32,

    // From REPO_TRAFFIC_CTXOUT output all context data (this struct), default false
    pub ctx_out: bool,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            secret_file: PathBuf::from(constants::DEFAULT_SECRET_FILE),
            details_file: PathBuf::from(constants::DEFAULT_DETAILS_FILE),
            summary_file: PathBuf::from(constants::DEFAULT_SUMMARY_FILE),
            repo_filter: Vec::new(),
            api_url: constants::DEFAULT_API_URL.to_string(),
            debug: 0,
            ctx_out: false,
        }
    }
}

impl Context {
    /// Load context from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load context from an arbitrary variable lookup, unset variables keep their defaults
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ctx = Self::default();

        if let Some(secret) = lookup(constants::ENV_SECRET) {
            ctx.secret_file = PathBuf::from(secret);
        }

        if let Some(details) = lookup(constants::ENV_DETAILS) {
            ctx.details_file = PathBuf::from(details);
        }

        if let Some(summary) = lookup(constants::ENV_SUMMARY) {
            ctx.summary_file = PathBuf::from(summary);
        }

        if let Some(repos) = lookup(constants::ENV_REPOS) {
            ctx.repo_filter = parse_repo_list(&repos);
        }

        if let Some(api_url) = lookup(constants::ENV_API_URL) {
            let api_url = api_url.trim().trim_end_matches('/');
            if api_url.is_empty() {
                anyhow::bail!("{} is set but empty", constants::ENV_API_URL);
            }
            ctx.api_url = api_url.to_string();
        }

        if let Some(debug) = lookup(constants::ENV_DEBUG) {
            ctx.debug = debug.parse().unwrap_or(0);
        }

        ctx.ctx_out = lookup(constants::ENV_CTXOUT).is_some();

        Ok(ctx)
    }

    /// Read the access token from `secret_file`
    pub async fn read_credential(&self) -> Result<String> {
        read_credential(&self.secret_file).await
    }
}

/// Read an access token file.
///
/// The token is not taken verbatim: surrounding whitespace is trimmed, since a
/// trailing newline would end up in the `Authorization` header and be rejected.
pub async fn read_credential(path: &Path) -> Result<String> {
    let content = tokio::fs::read_to_string(path).await.map_err(|err| {
        TrafficError::Credential(format!("cannot read '{}': {}", path.display(), err))
    })?;

    let token = content.trim();
    if token.is_empty() {
        return Err(TrafficError::Credential(format!(
            "'{}' does not contain a token",
            path.display()
        )));
    }

    Ok(token.to_string())
}

fn parse_repo_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
