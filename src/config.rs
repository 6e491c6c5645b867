use std::path::PathBuf;
use std::time::Duration;

pub const BOOTSTRAP_URL: &str = "https://fantasy.premierleague.com/api/bootstrap-static/";
pub const FIXTURES_URL: &str = "https://fantasy.premierleague.com/api/fixtures/";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Fedora; Linux x86_64; rv:85.0) Gecko/20100101 Firefox/88.0";

const CACHE_DIR: &str = "fpl_form";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub bootstrap_url: String,
    pub fixtures_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let cache_dir = env_non_empty("FPL_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_dir);
        let request_timeout = env_non_empty("FPL_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(REQUEST_TIMEOUT_SECS)
            .max(1);
        Self {
            cache_dir,
            bootstrap_url: env_non_empty("FPL_BOOTSTRAP_URL")
                .unwrap_or_else(|| BOOTSTRAP_URL.to_string()),
            fixtures_url: env_non_empty("FPL_FIXTURES_URL")
                .unwrap_or_else(|| FIXTURES_URL.to_string()),
            user_agent: env_non_empty("FPL_USER_AGENT").unwrap_or_else(|| USER_AGENT.to_string()),
            request_timeout: Duration::from_secs(request_timeout),
        }
    }

    /// Defaults for everything except the cache location.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            bootstrap_url: BOOTSTRAP_URL.to_string(),
            fixtures_url: FIXTURES_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn default_cache_dir() -> PathBuf {
    if let Some(base) = env_non_empty("XDG_CACHE_HOME") {
        return PathBuf::from(base).join(CACHE_DIR);
    }
    if let Some(home) = env_non_empty("HOME") {
        return PathBuf::from(home).join(".cache").join(CACHE_DIR);
    }
    std::env::temp_dir().join("fpl")
}

#[cfg(test)]
mod tests {
    use super::{BOOTSTRAP_URL, Config, FIXTURES_URL};

    #[test]
    fn with_cache_dir_keeps_upstream_endpoints() {
        let config = Config::with_cache_dir("/tmp/fpl-test");
        assert_eq!(config.cache_dir.to_str(), Some("/tmp/fpl-test"));
        assert_eq!(config.bootstrap_url, BOOTSTRAP_URL);
        assert_eq!(config.fixtures_url, FIXTURES_URL);
        assert_eq!(config.request_timeout.as_secs(), 10);
    }
}
