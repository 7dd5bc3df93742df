use std::env;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Runtime settings, read once at startup. A missing API key is tolerated:
/// requests still go out and OMDb answers with `Response: "False"`, which
/// surfaces in the error banner like any other upstream failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OMDB_API_KEY").unwrap_or_default(),
            base_url: env::var("OMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_reported_missing() {
        let config = Config {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        assert!(!config.has_api_key());

        let config = Config {
            api_key: "abc123".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        assert!(config.has_api_key());
    }
}
