//! Engine configuration
//!
//! Defines all configurable parameters for the claim engine including
//! polling cadence, concurrency ceilings, claim mode and gateway connection
//! settings. Configuration faults are fatal at startup and never silently
//! clamped.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use talon_core::dto::search::GeoFilter;

/// Which openings a cycle dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimMode {
    /// Claim only openings that appeared since the previous snapshot
    NewOnly,

    /// Claim every opening in the current snapshot
    All,
}

impl FromStr for ClaimMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new-only" => Ok(Self::NewOnly),
            "all" => Ok(Self::All),
            other => Err(anyhow::anyhow!("unknown claim mode: {}", other)),
        }
    }
}

/// Engine configuration
///
/// All timeouts and ceilings are configurable to allow tuning for different
/// gateways (fast vs. slow, strict vs. lenient rate limits).
#[derive(Debug, Clone)]
pub struct Config {
    /// Candidate identifier sent with every claim
    pub claimant_id: String,

    /// Hiring gateway base URL (e.g. "https://gateway.example.com")
    pub gateway_url: String,

    /// How often to poll the gateway for openings
    pub poll_interval: Duration,

    /// Per-claim timeout inside the dispatcher
    pub claim_timeout: Duration,

    /// Max claim attempts in flight at any instant
    pub max_concurrent_claims: usize,

    /// Max slot searches in flight while building a snapshot
    pub max_concurrent_searches: usize,

    /// Which openings a cycle dispatches
    pub claim_mode: ClaimMode,

    /// Optional radius-bounded search; `None` searches globally
    pub geo: Option<GeoFilter>,

    /// Where accepted claims are recorded
    pub booking_log_path: PathBuf,

    /// Log the running stats block every N cycles
    pub stats_every: u64,
}

/// On-disk shape of the config file
///
/// Durations are plain seconds; anything optional falls back to the same
/// defaults `Config::new` uses.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    claimant_id: String,
    gateway_url: String,
    poll_interval_secs: Option<u64>,
    claim_timeout_secs: Option<u64>,
    max_concurrent_claims: Option<usize>,
    max_concurrent_searches: Option<usize>,
    claim_mode: Option<ClaimMode>,
    geo: Option<GeoFilter>,
    booking_log_path: Option<PathBuf>,
    stats_every: Option<u64>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(claimant_id: String, gateway_url: String) -> Self {
        Self {
            claimant_id,
            gateway_url,
            poll_interval: Duration::from_secs(5),
            claim_timeout: Duration::from_secs(10),
            max_concurrent_claims: 10,
            max_concurrent_searches: 4,
            claim_mode: ClaimMode::NewOnly,
            geo: None,
            booking_log_path: PathBuf::from("bookings.jsonl"),
            stats_every: 100,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - TALON_CLAIMANT_ID (required)
    /// - TALON_GATEWAY_URL (required)
    /// - TALON_POLL_INTERVAL (optional, seconds, default: 5)
    /// - TALON_CLAIM_TIMEOUT (optional, seconds, default: 10)
    /// - TALON_MAX_CONCURRENT_CLAIMS (optional, default: 10)
    /// - TALON_MAX_CONCURRENT_SEARCHES (optional, default: 4)
    /// - TALON_CLAIM_MODE (optional, "new-only" or "all", default: new-only)
    /// - TALON_GEO_LAT / TALON_GEO_LNG / TALON_GEO_RADIUS_KM (optional,
    ///   all three required for a radius-bounded search)
    /// - TALON_BOOKING_LOG (optional, default: bookings.jsonl)
    /// - TALON_STATS_EVERY (optional, default: 100)
    pub fn from_env() -> anyhow::Result<Self> {
        let claimant_id = std::env::var("TALON_CLAIMANT_ID")
            .map_err(|_| anyhow::anyhow!("TALON_CLAIMANT_ID environment variable not set"))?;

        let gateway_url = std::env::var("TALON_GATEWAY_URL")
            .map_err(|_| anyhow::anyhow!("TALON_GATEWAY_URL environment variable not set"))?;

        let mut config = Self::new(claimant_id, gateway_url);

        if let Some(secs) = env_parse::<u64>("TALON_POLL_INTERVAL") {
            config.poll_interval = Duration::from_secs(secs);
        }

        if let Some(secs) = env_parse::<u64>("TALON_CLAIM_TIMEOUT") {
            config.claim_timeout = Duration::from_secs(secs);
        }

        if let Some(n) = env_parse::<usize>("TALON_MAX_CONCURRENT_CLAIMS") {
            config.max_concurrent_claims = n;
        }

        if let Some(n) = env_parse::<usize>("TALON_MAX_CONCURRENT_SEARCHES") {
            config.max_concurrent_searches = n;
        }

        if let Ok(mode) = std::env::var("TALON_CLAIM_MODE") {
            config.claim_mode = mode.parse()?;
        }

        let lat = env_parse::<f64>("TALON_GEO_LAT");
        let lng = env_parse::<f64>("TALON_GEO_LNG");
        let radius_km = env_parse::<u32>("TALON_GEO_RADIUS_KM");
        if let (Some(lat), Some(lng), Some(radius_km)) = (lat, lng, radius_km) {
            config.geo = Some(GeoFilter {
                lat,
                lng,
                radius_km,
            });
        }

        if let Ok(path) = std::env::var("TALON_BOOKING_LOG") {
            config.booking_log_path = PathBuf::from(path);
        }

        if let Some(n) = env_parse::<u64>("TALON_STATS_EVERY") {
            config.stats_every = n;
        }

        Ok(config)
    }

    /// Creates configuration from a JSON config file
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;

        let file: ConfigFile = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("invalid JSON in config file: {}", e))?;

        let mut config = Self::new(file.claimant_id, file.gateway_url);

        if let Some(secs) = file.poll_interval_secs {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = file.claim_timeout_secs {
            config.claim_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = file.max_concurrent_claims {
            config.max_concurrent_claims = n;
        }
        if let Some(n) = file.max_concurrent_searches {
            config.max_concurrent_searches = n;
        }
        if let Some(mode) = file.claim_mode {
            config.claim_mode = mode;
        }
        config.geo = file.geo;
        if let Some(path) = file.booking_log_path {
            config.booking_log_path = path;
        }
        if let Some(n) = file.stats_every {
            config.stats_every = n;
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.claimant_id.is_empty() {
            anyhow::bail!("claimant_id cannot be empty");
        }

        if self.gateway_url.is_empty() {
            anyhow::bail!("gateway_url cannot be empty");
        }

        if !self.gateway_url.starts_with("http://") && !self.gateway_url.starts_with("https://") {
            anyhow::bail!("gateway_url must start with http:// or https://");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.claim_timeout.as_secs() == 0 {
            anyhow::bail!("claim_timeout must be greater than 0");
        }

        if self.max_concurrent_claims == 0 {
            anyhow::bail!("max_concurrent_claims must be at least 1");
        }

        if self.max_concurrent_searches == 0 {
            anyhow::bail!("max_concurrent_searches must be at least 1");
        }

        if self.stats_every == 0 {
            anyhow::bail!("stats_every must be at least 1");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            "http://localhost:8080".to_string(),
        )
    }
}

/// Reads and parses an environment variable, ignoring unset or unparsable
/// values
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.max_concurrent_claims, 10);
        assert_eq!(config.claim_mode, ClaimMode::NewOnly);
        assert!(config.geo.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Empty claimant_id should fail
        config.claimant_id = String::new();
        assert!(config.validate().is_err());

        config.claimant_id = "candidate-001".to_string();

        // Invalid URL should fail
        config.gateway_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.gateway_url = "https://gateway.example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_ceilings_are_rejected_not_clamped() {
        let mut config = Config::default();
        config.max_concurrent_claims = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.poll_interval = Duration::from_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_claim_mode_parsing() {
        assert_eq!("new-only".parse::<ClaimMode>().unwrap(), ClaimMode::NewOnly);
        assert_eq!("all".parse::<ClaimMode>().unwrap(), ClaimMode::All);
        assert!("everything".parse::<ClaimMode>().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "claimant_id": "candidate-001",
                "gateway_url": "https://gateway.example.com",
                "poll_interval_secs": 2,
                "claim_mode": "all",
                "geo": {{ "lat": 43.79, "lng": -79.26, "radius_km": 100 }}
            }}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.claimant_id, "candidate-001");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.claim_mode, ClaimMode::All);
        assert_eq!(config.geo.unwrap().radius_km, 100);
        // Unspecified fields keep their defaults
        assert_eq!(config.max_concurrent_claims, 10);
        assert!(config.validate().is_ok());
    }
}
