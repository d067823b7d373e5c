//! Core library for the ReadySold lead service: lead models, validation, fee calculation,
//! email templates, mailers and the HTTP routes that tie them together.

pub mod config;
pub mod email;
pub mod error;
pub mod extractors;
pub mod format;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod services;
pub mod templates;
pub mod validation;

pub use config::{AppConfig, EmailProvider};
pub use email::{EmailMessage, Mailer, MailerError, OutboxMailer, ResendMailer, SendReceipt};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use middleware::cors::cors_layer_from_config;
pub use middleware::logging::logging_layer;
pub use models::{FormType, LeadData, LeadEnvelope, LeadSubmission};
pub use pricing::{FeeQuote, FeeSchedule};
pub use services::LeadService;
pub use templates::{EmailDocument, TemplateContext};
pub use validation::{validate_valuation_form, ValidationResult};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub lead_service: LeadService,
    pub fee_schedule: FeeSchedule,
}

impl AppState {
    pub fn new(mailer: Arc<dyn Mailer>, config: &AppConfig) -> Self {
        Self {
            app_name: config.email.company_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            lead_service: LeadService::new(mailer, config.email.clone()),
            fee_schedule: FeeSchedule::from(config.pricing),
        }
    }

    /// Picks the mailer named by `email.provider`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mailer: Arc<dyn Mailer> = match config.email.provider {
            EmailProvider::Resend => Arc::new(
                ResendMailer::from_config(&config.email).map_err(|e| AppError::Config(e.to_string()))?,
            ),
            EmailProvider::Log => Arc::new(OutboxMailer::new()),
        };

        Ok(Self::new(mailer, config))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(middleware::logging::logging_layer(&config.logging))
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
