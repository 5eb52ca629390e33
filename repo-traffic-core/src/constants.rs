// Constants used throughout repo-traffic

// Default file locations, relative to the working directory
pub const DEFAULT_SECRET_FILE: &str = "secret.txt";
pub const DEFAULT_DETAILS_FILE: &str = "data/repo_traffic.csv";
pub const DEFAULT_SUMMARY_FILE: &str = "data/master_repo_traffic_summary.csv";

// GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const USER_AGENT: &str = "repo-traffic-rust/1.0";
pub const ACCEPT: &str = "application/vnd.github+json";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const REPOS_PER_PAGE: usize = 100;
pub const PER_DAY: &str = "day";

// Environment variables
pub const ENV_SECRET: &str = "REPO_TRAFFIC_SECRET";
pub const ENV_DETAILS: &str = "REPO_TRAFFIC_DETAILS";
pub const ENV_SUMMARY: &str = "REPO_TRAFFIC_SUMMARY";
pub const ENV_REPOS: &str = "REPO_TRAFFIC_REPOS";
pub const ENV_API_URL: &str = "REPO_TRAFFIC_API_URL";
pub const ENV_DEBUG: &str = "REPO_TRAFFIC_DEBUG";
pub const ENV_CTXOUT: &str = "REPO_TRAFFIC_CTXOUT";

// CSV layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DETAILS_HEADER: [&str; 6] = [
    "day",
    "repo",
    "clone_count",
    "clone_uniques",
    "view_count",
    "view_uniques",
];
