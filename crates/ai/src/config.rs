use std::time::Duration;

use crate::error::{GenerationError, GenerationResult};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where the generation service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Base URL without trailing slash; capabilities live under `/generate/`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GenerationConfig {
    pub fn new(base_url: impl Into<String>) -> GenerationResult<Self> {
        Ok(Self {
            base_url: normalize(base_url.into())?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn from_env() -> GenerationResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// `BRANDHUB_GENERATION_URL` and `BRANDHUB_GENERATION_TIMEOUT_MS`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> GenerationResult<Self> {
        let mut config = match lookup("BRANDHUB_GENERATION_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url)?,
            _ => Self::default(),
        };

        if let Some(raw) = lookup("BRANDHUB_GENERATION_TIMEOUT_MS") {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                GenerationError::InvalidConfig(format!("BRANDHUB_GENERATION_TIMEOUT_MS: '{raw}'"))
            })?;
            config.timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn endpoint(&self, capability: &str) -> String {
        format!("{}/generate/{capability}", self.base_url)
    }
}

fn normalize(url: String) -> GenerationResult<String> {
    let url = url.trim().trim_end_matches('/').to_string();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(GenerationError::InvalidConfig(format!(
            "base url must be http(s): '{url}'"
        )));
    }
    Ok(url)
}
