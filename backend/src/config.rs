use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub workout: WorkoutConfig,
    pub datasets: DatasetConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API base, without the trailing path segment
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Sent as HTTP-Referer, required by some routing providers
    pub referer: String,
    /// Sent as X-Title for provider-side request attribution
    pub app_title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkoutConfig {
    /// Endpoint of the external workout plan generator
    pub api_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DatasetConfig {
    /// Override path for the disease table, embedded copy used when unset
    pub disease_path: Option<String>,
    /// Override path for the nutrition table, embedded copy used when unset
    pub food_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from config.toml file
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load() -> Result<Self, anyhow::Error> {
        let mut config = if let Some(config_path) = Self::find_config_file() {
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load from an explicit path, still honoring env overrides.
    pub fn load_from(path: &str) -> Result<Self, anyhow::Error> {
        let mut config = Self::from_toml(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LLM_API_BASE: Completion provider base URL
    /// - APP_LLM_API_KEY: Completion provider API key
    /// - APP_LLM_MODEL: Model identifier
    /// - APP_LLM_TIMEOUT_SECS: Per-request timeout in seconds
    /// - APP_WORKOUT_API_URL: Workout plan generator endpoint
    /// - APP_DISEASE_DATASET: Path overriding the embedded disease table
    /// - APP_FOOD_DATASET: Path overriding the embedded nutrition table
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,medchat_backend=debug")
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(base) = std::env::var("APP_LLM_API_BASE") {
            self.llm.api_base = base;
            tracing::info!("Override llm.api_base from env: {}", self.llm.api_base);
        }

        if let Ok(key) = std::env::var("APP_LLM_API_KEY") {
            self.llm.api_key = key;
            tracing::info!("Override llm.api_key from env");
        }

        if let Ok(model) = std::env::var("APP_LLM_MODEL") {
            self.llm.model = model;
            tracing::info!("Override llm.model from env: {}", self.llm.model);
        }

        if let Ok(timeout) = std::env::var("APP_LLM_TIMEOUT_SECS")
            && let Ok(timeout) = timeout.parse()
        {
            self.llm.timeout_secs = timeout;
            tracing::info!("Override llm.timeout_secs from env: {}", self.llm.timeout_secs);
        }

        if let Ok(url) = std::env::var("APP_WORKOUT_API_URL") {
            self.workout.api_url = url;
            tracing::info!("Override workout.api_url from env: {}", self.workout.api_url);
        }

        if let Ok(path) = std::env::var("APP_DISEASE_DATASET") {
            self.datasets.disease_path = Some(path);
            tracing::info!("Override datasets.disease_path from env");
        }

        if let Ok(path) = std::env::var("APP_FOOD_DATASET") {
            self.datasets.food_path = Some(path);
            tracing::info!("Override datasets.food_path from env");
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.llm.api_key.is_empty() {
            tracing::warn!("⚠️  WARNING: llm.api_key is empty!");
            tracing::warn!(
                "⚠️  Set APP_LLM_API_KEY or fill in config.toml before serving traffic"
            );
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.llm.api_base.is_empty() {
            anyhow::bail!("llm.api_base cannot be empty");
        }

        if self.llm.model.is_empty() {
            anyhow::bail!("llm.model cannot be empty");
        }

        if self.llm.timeout_secs == 0 {
            anyhow::bail!("llm.timeout_secs must be > 0");
        }

        if self.workout.timeout_secs == 0 {
            anyhow::bail!("workout.timeout_secs must be > 0");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://openrouter.ai/api/v1".to_string(),
            api_key: String::new(),
            model: "deepseek/deepseek-chat-v3-0324:free".to_string(),
            timeout_secs: 60,
            temperature: None,
            max_tokens: None,
            referer: "http://localhost".to_string(),
            app_title: "MedChat Assistant".to_string(),
        }
    }
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self { api_url: "http://localhost:8001/generate".to_string(), timeout_secs: 120 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,medchat_backend=debug".to_string(),
            file: Some("logs/medchat-backend.log".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_model_rejected() {
        let mut config = Config::default();
        config.llm.model.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_apply() {
        // These env vars are only touched by this test
        // SAFETY: no other thread reads these variables concurrently
        unsafe {
            std::env::set_var("APP_SERVER_PORT", "9999");
            std::env::set_var("APP_LLM_MODEL", "override/model");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var("APP_SERVER_PORT");
            std::env::remove_var("APP_LLM_MODEL");
        }

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.llm.model, "override/model");
    }

    #[test]
    fn test_toml_sections_parse() {
        let toml_str = r#"
            [server]
            host = "127.0.0.1"
            port = 9090

            [llm]
            model = "test/model"
            timeout_secs = 30

            [datasets]
            disease_path = "data/diseases.json"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.llm.model, "test/model");
        assert_eq!(config.llm.timeout_secs, 30);
        // Untouched sections fall back to defaults
        assert_eq!(config.llm.api_base, "https://openrouter.ai/api/v1");
        assert_eq!(config.datasets.disease_path.as_deref(), Some("data/diseases.json"));
        assert!(config.datasets.food_path.is_none());
    }
}
