use std::sync::Arc;

use assistant_relay::adapters::ai::{OpenAIAssistantService, OpenAIAssistantsConfig};
use assistant_relay::adapters::document::PulldownMarkdownRenderer;
use assistant_relay::adapters::http::{app_router, AskAppState};
use assistant_relay::application::AskHandlerConfig;
use assistant_relay::config::AppConfig;
use assistant_relay::observability::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.server.json_logs());
    config.validate()?;

    let api_key = config
        .assistant
        .api_key
        .clone()
        .ok_or("assistant API key is not configured")?;
    let assistant_service = OpenAIAssistantService::new(
        OpenAIAssistantsConfig::from_secret(api_key)
            .with_base_url(&config.assistant.base_url)
            .with_timeout(config.assistant.timeout()),
    )?;

    let state = AskAppState::new(
        Arc::new(assistant_service),
        Arc::new(PulldownMarkdownRenderer::new()),
        AskHandlerConfig {
            poll_interval: config.assistant.poll_interval(),
        },
    );
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        address = %addr,
        delivery = ?config.server.delivery,
        "assistant-relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
