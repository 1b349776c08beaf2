//! Catalog configuration
//!
//! Defaults can be overridden from the environment (optionally via a `.env`
//! file loaded by the binaries) and then from command-line flags.

use std::env;
use std::time::Duration;

use shared::SharedError;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LISTING_LIMIT: u32 = 1025;
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 50;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Base URL of the remote catalog, without a trailing slash
    pub api_base: String,
    /// Number of identities requested from the listing
    pub listing_limit: u32,
    /// Detail fetches in flight at once during the initial load
    pub detail_concurrency: usize,
    /// Quiescence window of the query engine
    pub debounce: Duration,
    /// Per-request timeout; `None` keeps the transport default
    pub request_timeout: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            listing_limit: DEFAULT_LISTING_LIMIT,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: None,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by `POKEDEX_*` environment variables
    pub fn from_env() -> Result<Self, SharedError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SharedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("POKEDEX_API_BASE") {
            config = config.with_api_base(&base)?;
        }
        if let Some(limit) = lookup("POKEDEX_LISTING_LIMIT") {
            config.listing_limit = parse_positive("POKEDEX_LISTING_LIMIT", &limit)?;
        }
        if let Some(concurrency) = lookup("POKEDEX_DETAIL_CONCURRENCY") {
            config.detail_concurrency =
                parse_positive::<usize>("POKEDEX_DETAIL_CONCURRENCY", &concurrency)?;
        }
        if let Some(millis) = lookup("POKEDEX_DEBOUNCE_MS") {
            let millis: u64 = millis
                .trim()
                .parse()
                .map_err(|_| SharedError::config("POKEDEX_DEBOUNCE_MS", millis.clone()))?;
            config.debounce = Duration::from_millis(millis);
        }
        if let Some(secs) = lookup("POKEDEX_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse_positive("POKEDEX_REQUEST_TIMEOUT_SECS", &secs)?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_api_base(mut self, base: &str) -> Result<Self, SharedError> {
        let parsed = Url::parse(base.trim()).map_err(|_| SharedError::config("api_base", base))?;
        self.api_base = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_listing_limit(mut self, limit: u32) -> Self {
        self.listing_limit = limit;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Join a path below the API base (`pokemon/25` -> `{base}/pokemon/25`)
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

fn parse_positive<T>(field: &str, value: &str) -> Result<T, SharedError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(SharedError::config(field, value)),
    }
}
