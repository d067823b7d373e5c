use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the email provider's API key.
pub const API_KEY_ENV: &str = "RESEND_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub email: EmailConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Resend,
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub from: String,
    pub notify_to: String,
    pub site_base_url: String,
    pub company_name: String,
    pub send_confirmation: bool,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_headers: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricingConfig {
    pub rate: f64,
    pub minimum_fee: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Resend,
            api_key: None,
            api_base_url: "https://api.resend.com".to_string(),
            from: "ReadySold <noreply@readysold.co.uk>".to_string(),
            notify_to: "hello@readysold.co.uk".to_string(),
            site_base_url: "https://readysold.vercel.app".to_string(),
            company_name: "ReadySold".to_string(),
            send_confirmation: true,
            request_timeout_seconds: 10,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "POST, OPTIONS".to_string(),
            allow_headers: "Content-Type".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_headers: false }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rate: 0.10,
            minimum_fee: 350.0,
        }
    }
}

impl AppConfig {
    /// Defaults, then `config.toml` in the working directory if present, then `APP_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let local = Path::new("config.toml");
        Self::load_with(local.exists().then_some(local))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(Some(path))
    }

    fn load_with(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        // APP_EMAIL__NOTIFY_TO -> email.notify_to
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        if app_config.email.api_key.is_none() {
            app_config.email.api_key = std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.email.from.trim().is_empty() {
            return Err(ConfigError::Message(
                "Sender address cannot be empty".to_string(),
            ));
        }

        if self.email.notify_to.trim().is_empty() {
            return Err(ConfigError::Message(
                "Notification recipient cannot be empty".to_string(),
            ));
        }

        if self.email.provider == EmailProvider::Resend {
            let has_key = self
                .email
                .api_key
                .as_deref()
                .map(|key| !key.trim().is_empty())
                .unwrap_or(false);

            if !has_key {
                return Err(ConfigError::Message(format!(
                    "Email provider 'resend' requires an API key in {} or APP_EMAIL__API_KEY",
                    API_KEY_ENV
                )));
            }

            if self.email.api_base_url.trim().is_empty() {
                return Err(ConfigError::Message(
                    "Email API base URL cannot be empty".to_string(),
                ));
            }
        }

        if self.email.request_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Email request timeout must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.pricing.rate) {
            return Err(ConfigError::Message(
                "Pricing rate must be between 0 and 1".to_string(),
            ));
        }

        if !self.pricing.minimum_fee.is_finite() || self.pricing.minimum_fee < 0.0 {
            return Err(ConfigError::Message(
                "Pricing minimum fee cannot be negative".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
