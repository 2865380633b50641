//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! `chat::ChatError`.

use chat::application::config::STARTUP_BANNER;
use chat::{
    ChatAppState, ChatConfig, ChatMessage, ClearingCycle, DiscordNotifier, ResetHistoryUseCase,
    chat_router,
};
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,chat=info,platform=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ChatConfig::from_env();

    let addr: SocketAddr = env::var("CHAT_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    let notifier = DiscordNotifier::from_config(&config)?;
    if notifier.is_enabled() {
        tracing::info!("Webhook mirroring enabled");
    } else {
        tracing::warn!("DISCORD_WEBHOOK_URL not set, webhook mirroring disabled");
    }

    let clear_interval = config.clear_interval;
    let drain_timeout = config.webhook_timeout;
    let (state, mirror_worker) = ChatAppState::new(config, notifier);

    // History never survives a restart
    let reset = ResetHistoryUseCase::new(state.log.clone(), state.mirror.clone());
    reset.execute(ChatMessage::banner(STARTUP_BANNER)).await;

    let shutdown = CancellationToken::new();
    let cycle = ClearingCycle::new(reset, clear_interval).spawn(shutdown.clone());
    tokio::spawn(watch_signals(shutdown.clone()));

    // Build router
    let app = chat_router(state).layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown.clone().cancelled_owned())
    .await?;

    // Server may also stop on its own; make sure the cycle follows
    shutdown.cancel();
    cycle.await?;

    // Every queue handle is gone now; give queued messages one timeout to go out
    if tokio::time::timeout(drain_timeout, mirror_worker).await.is_err() {
        tracing::warn!("Mirror queue not drained before shutdown");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM
async fn watch_signals(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
