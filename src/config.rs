use anyhow::Context;
use std::env;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_TEMPERATURE: f64 = 0.4;
const DEFAULT_PORT: u16 = 10000;

/// Application configuration, loaded once at startup
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Value sent as `Access-Control-Allow-Origin`
    pub allow_origin: String,
    pub openai: OpenAiConfig,
}

/// Settings for the outbound text-generation call
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a valid number, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };
        let temperature = match env::var("OPENAI_TEMPERATURE") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("OPENAI_TEMPERATURE must be a number, got {raw:?}"))?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            allow_origin: env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string()),
            openai: OpenAiConfig {
                api_key: env::var(API_KEY_VAR).ok().filter(|key| !key.is_empty()),
                base_url: env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                temperature,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl OpenAiConfig {
    pub fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            allow_origin: "*".to_string(),
            openai: OpenAiConfig::default(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// Keeps the credential out of startup logs.
impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("allow_origin", &self.allow_origin)
            .field("openai", &self.openai)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 10000);
        assert_eq!(config.allow_origin, "*");
        assert_eq!(config.openai.model, "gpt-4.1-mini");
        assert_eq!(config.openai.temperature, 0.4);
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.bind_address(), "0.0.0.0:10000");
    }

    #[test]
    fn test_responses_url() {
        let mut openai = OpenAiConfig::default();
        assert_eq!(openai.responses_url(), "https://api.openai.com/v1/responses");

        openai.base_url = "http://127.0.0.1:9999/v1/".to_string();
        assert_eq!(openai.responses_url(), "http://127.0.0.1:9999/v1/responses");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let mut config = Config::default();
        config.openai.api_key = Some("sk-secret".to_string());
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("***"));
    }
}
