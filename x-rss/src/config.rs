use crate::types::{Result, XRssError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";
pub const DEFAULT_OUTPUT_NAME: &str = "x-rss.xml";
pub const DEFAULT_CONTAINER: &str = "x-rss";
pub const DEFAULT_INTERVAL_MINUTES: u64 = 20;

/// Everything a run needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub keyword: String,
    pub max_results: u32,
    pub source: SourceMode,
    pub capture_dir: Option<PathBuf>,
    pub fetch: FetchConfig,
    pub storage: StorageConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone)]
pub enum SourceMode {
    Live {
        bearer_token: Secret,
        api_base_url: String,
    },
    Replay {
        path: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "X-RSS-Generator/1.0".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// File path for the local sink, blob name for the blob sink.
    pub output_name: String,
    pub connection_string: Option<Secret>,
    pub container: String,
}

impl StorageConfig {
    pub fn connection_string(&self) -> Result<&str> {
        self.connection_string
            .as_ref()
            .map(Secret::expose)
            .ok_or_else(|| XRssError::Config("Azure Storage connection string is not defined".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub interval_minutes: u64,
    pub run_on_startup: bool,
}

/// A credential that never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl Config {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let keyword = get("X_SEARCH_KEYWORD")
            .ok_or_else(|| XRssError::Config("Search keyword is not defined in environment variables".to_string()))?;

        let max_results = parse_or("MAX_RESULTS", get("MAX_RESULTS"), DEFAULT_MAX_RESULTS)?;

        let use_local = get("USE_LOCAL_JSON").map(|v| v == "true").unwrap_or(false);
        let source = match (use_local, get("LOCAL_JSON_PATH")) {
            (true, Some(path)) => SourceMode::Replay { path: PathBuf::from(path) },
            _ => {
                let token = get("X_BEARER_TOKEN").ok_or_else(|| {
                    XRssError::Config("X bearer token is not defined in environment variables".to_string())
                })?;
                SourceMode::Live {
                    bearer_token: Secret::new(token),
                    api_base_url: get("X_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                }
            }
        };

        let fetch = FetchConfig {
            timeout_seconds: parse_or("HTTP_TIMEOUT_SECONDS", get("HTTP_TIMEOUT_SECONDS"), 30)?,
            ..FetchConfig::default()
        };

        let storage = StorageConfig {
            output_name: get("RSS_FILENAME").unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string()),
            connection_string: get("AZURE_STORAGE_CONNECTION_STRING").map(Secret::new),
            container: get("BLOB_CONTAINER_NAME").unwrap_or_else(|| DEFAULT_CONTAINER.to_string()),
        };

        let environment = get("APP_ENV").or_else(|| get("NODE_ENV"));
        let schedule = ScheduleConfig {
            interval_minutes: parse_or(
                "SCHEDULE_INTERVAL_MINUTES",
                get("SCHEDULE_INTERVAL_MINUTES"),
                DEFAULT_INTERVAL_MINUTES,
            )?,
            run_on_startup: environment.as_deref() == Some("development"),
        };
        if schedule.interval_minutes == 0 {
            return Err(XRssError::Config("SCHEDULE_INTERVAL_MINUTES must be positive".to_string()));
        }
        if schedule.interval_minutes.checked_mul(60).is_none() {
            return Err(XRssError::Config(format!(
                "SCHEDULE_INTERVAL_MINUTES is too large: {}",
                schedule.interval_minutes
            )));
        }

        Ok(Self {
            keyword,
            max_results,
            source,
            capture_dir: get("SAVE_JSON_PATH").map(PathBuf::from),
            fetch,
            storage,
            schedule,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| XRssError::Config(format!("{} is not a valid number: {}", key, raw))),
    }
}
