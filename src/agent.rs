//! Rotating browser identities for SEC exhibit downloads.
//!
//! The SEC content host is quick to block clients that hammer it with the
//! same default user-agent. Every exhibit download therefore identifies
//! with a browser string drawn fresh from a fixed pool. Selection is
//! uniform and unseeded; the draw only affects outbound headers, never
//! which files are retained.

use super::error::{DivscanError, Result};

/// Source of user-agent strings for outbound exhibit requests.
///
/// The pipeline takes this as a seam so tests can inject a fixed identity
/// and assert on header handling without depending on the random draw.
pub trait AgentRotator {
    /// Returns the identity to use for the next request.
    fn next(&self) -> &str;
}

const BROWSER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:126.0) Gecko/20100101 Firefox/126.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36 Edg/121.0.2277.128",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 OPR/106.0.0.0",
];

/// Fixed pool of realistic browser user-agent strings.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    /// Pool of current desktop browser identities.
    pub fn new() -> Self {
        Self {
            agents: BROWSER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Pool backed by caller-supplied identities.
    ///
    /// Fails with `DivscanError::ConfigError` when the list is empty, since
    /// an empty pool would have nothing to rotate.
    pub fn with_agents(agents: Vec<String>) -> Result<Self> {
        if agents.is_empty() {
            return Err(DivscanError::ConfigError(
                "user-agent pool must not be empty".to_string(),
            ));
        }
        Ok(Self { agents })
    }
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRotator for UserAgentPool {
    fn next(&self) -> &str {
        &self.agents[fastrand::usize(..self.agents.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_draws_from_pool() {
        let pool = UserAgentPool::new();
        for _ in 0..50 {
            let agent = pool.next();
            assert!(BROWSER_AGENTS.contains(&agent));
        }
    }

    #[test]
    fn custom_pool_is_used() {
        let pool = UserAgentPool::with_agents(vec!["test-agent/1.0".to_string()]).unwrap();
        assert_eq!(pool.next(), "test-agent/1.0");
    }

    #[test]
    fn empty_pool_is_rejected() {
        let result = UserAgentPool::with_agents(Vec::new());
        assert!(matches!(result, Err(DivscanError::ConfigError(_))));
    }
}
