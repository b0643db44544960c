use serde::Deserialize;

/// Front end configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Host address the view server binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the view server binds to
    #[serde(default = "default_port")]
    pub port: u16,

    /// User name to sign in at startup, if any
    #[serde(default)]
    pub default_user: Option<String>,

    /// Timeout applied to every request against the recommendation API
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the view server listens on
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_user, None);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("API_BASE_URL".to_string(), "http://recs.internal:9000".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("DEFAULT_USER".to_string(), "hjindal".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.api_base_url, "http://recs.internal:9000");
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_user.as_deref(), Some("hjindal"));
    }
}
