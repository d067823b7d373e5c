//! Layered application configuration

pub mod settings;

pub use settings::{
    AppConfig, CorsConfig, EmailConfig, EmailProvider, LoggingConfig, PricingConfig, ServerConfig,
    API_KEY_ENV,
};
