use crate::agents::DEFAULT_MODEL;
use crate::ai::openai::DEFAULT_ENDPOINT;
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_endpoint: String,
    pub model: String,
    pub port: u16,
    /// `None` disables the per-request agent run timeout
    pub run_timeout: Option<Duration>,
    pub static_dir: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("openai_endpoint", &self.openai_endpoint)
            .field("model", &self.model)
            .field("port", &self.port)
            .field("run_timeout", &self.run_timeout)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| "OPENAI_API_KEY environment variable is not set.".to_string())?;

        let port = match lookup("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| format!("PORT must be a valid number, got '{}'", p))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs: u64 = match lookup("AGENT_RUN_TIMEOUT_SECS") {
            Some(t) => t.parse().map_err(|_| {
                format!("AGENT_RUN_TIMEOUT_SECS must be a whole number of seconds, got '{}'", t)
            })?,
            None => DEFAULT_RUN_TIMEOUT_SECS,
        };

        Ok(Self {
            openai_api_key,
            openai_endpoint: lookup("OPENAI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port,
            run_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "./frontend/dist".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_api_key_required() {
        let err = config_with(&[]).unwrap_err();
        assert!(err.contains("OPENAI_API_KEY"));
        assert!(config_with(&[("OPENAI_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.openai_endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.run_timeout, Some(Duration::from_secs(DEFAULT_RUN_TIMEOUT_SECS)));
        assert_eq!(config.static_dir, "./frontend/dist");
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "8080"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("AGENT_RUN_TIMEOUT_SECS", "0"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.run_timeout, None);
    }

    #[test]
    fn test_invalid_port() {
        let err = config_with(&[("OPENAI_API_KEY", "sk-test"), ("PORT", "http")]).unwrap_err();
        assert!(err.contains("PORT"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = config_with(&[("OPENAI_API_KEY", "sk-secret")]).unwrap();
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }
}
