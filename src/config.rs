use std::time::Duration;

pub(crate) const DEFAULT_API_URL: &str = "https://api.twelvedata.com";
pub(crate) const DEFAULT_SEC_ARCHIVES_URL: &str = "https://www.sec.gov/Archives/edgar/data/";
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const DEFAULT_FETCH_DELAY: Duration = Duration::from_secs(1);

/// Configuration for the Twelve Data client
#[derive(Debug, Clone)]
pub struct Config {
    /// API key sent as the `apikey` query parameter on every API call
    pub api_key: String,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Fixed pause applied after every SEC exhibit download
    pub fetch_delay: Duration,
    /// Base URLs for the API and the SEC archive host
    pub base_urls: BaseUrls,
}

/// Base URLs for the services the pipeline talks to
#[derive(Debug, Clone)]
pub struct BaseUrls {
    /// Twelve Data API root
    pub api: String,
    /// Prefix used to absolutize bare SEC exhibit paths
    pub sec_archives: String,
}

impl Config {
    /// Creates a configuration with default URLs, a 30 second timeout and a
    /// 1 second exhibit-fetch delay.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            fetch_delay: DEFAULT_FETCH_DELAY,
            base_urls: BaseUrls::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fetch_delay(mut self, fetch_delay: Duration) -> Self {
        self.fetch_delay = fetch_delay;
        self
    }

    pub fn with_base_urls(mut self, base_urls: BaseUrls) -> Self {
        self.base_urls = base_urls;
        self
    }
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self {
            api: DEFAULT_API_URL.to_string(),
            sec_archives: DEFAULT_SEC_ARCHIVES_URL.to_string(),
        }
    }
}
