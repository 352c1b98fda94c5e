use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_ASSET_PREFIX: &str = "/assets-test";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 120;

/// Where the curation backend lives and how long to wait for it.
///
/// | Variable                        | Default                 |
/// |---------------------------------|-------------------------|
/// | `CURATOR_BASE_URL`              | `http://localhost:8000` |
/// | `CURATOR_ASSET_PREFIX`          | `/assets-test`          |
/// | `CURATOR_TIMEOUT_SECS`          | `30`                    |
/// | `CURATOR_GENERATE_TIMEOUT_SECS` | `120`                   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub asset_prefix: String,
    pub timeout: Duration,
    pub generate_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            generate_timeout: Duration::from_secs(DEFAULT_GENERATE_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let secs = |key: &str, default: u64| match text(key) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(value) if value > 0 => value,
                _ => {
                    tracing::warn!(key, value = %raw, default, "invalid timeout; using default");
                    default
                }
            },
            None => default,
        };

        let mut config = Self {
            timeout: Duration::from_secs(secs("CURATOR_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            generate_timeout: Duration::from_secs(secs(
                "CURATOR_GENERATE_TIMEOUT_SECS",
                DEFAULT_GENERATE_TIMEOUT_SECS,
            )),
            ..Self::default()
        };
        if let Some(base_url) = text("CURATOR_BASE_URL") {
            config = config.with_base_url(&base_url);
        }
        if let Some(prefix) = text("CURATOR_ASSET_PREFIX") {
            config.asset_prefix = prefix;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.base_url = trimmed.to_string();
        }
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::BackendConfig;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = BackendConfig::from_lookup(lookup(&[("CURATOR_BASE_URL", "  ")]));
        assert_eq!(config, BackendConfig::default());
        assert_eq!(config.endpoint("/api/data"), "http://localhost:8000/api/data");
    }

    #[test]
    fn env_values_override_defaults() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("CURATOR_BASE_URL", "http://curator.local:9000/"),
            ("CURATOR_ASSET_PREFIX", "/static"),
            ("CURATOR_TIMEOUT_SECS", "5"),
            ("CURATOR_GENERATE_TIMEOUT_SECS", "nope"),
        ]));
        assert_eq!(config.base_url, "http://curator.local:9000");
        assert_eq!(config.asset_prefix, "/static");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.generate_timeout, Duration::from_secs(120));
        assert_eq!(
            config.endpoint("api/select-image"),
            "http://curator.local:9000/api/select-image"
        );
    }
}
