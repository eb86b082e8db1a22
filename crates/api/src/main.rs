use std::sync::Arc;

use anyhow::Context;

use ballotgate_api::app::{AppServices, build_app};
use ballotgate_auth::SessionTokenCodec;
use ballotgate_infra::{
    AppConfig, InMemoryVoterStore, MySqlVoterStore, VoterStore, bootstrap_admin,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    ballotgate_observability::init(config.log_format);
    tracing::info!(config = ?config, "configuration loaded");

    // The MySQL handle is kept separately so the pool can be drained on exit.
    let mut mysql: Option<MySqlVoterStore> = None;
    let store: Arc<dyn VoterStore> = match config.database.mysql_options()? {
        Some((options, max_connections)) => {
            let pool = MySqlVoterStore::connect(options, max_connections)
                .await
                .context("failed to connect to MySQL")?;
            pool.ensure_schema().await.context("failed to prepare voters table")?;
            mysql = Some(pool.clone());
            Arc::new(pool)
        }
        None => {
            tracing::warn!("no database configured; using in-memory voter store");
            Arc::new(InMemoryVoterStore::new())
        }
    };

    if let Some(admin) = &config.bootstrap_admin {
        bootstrap_admin(store.as_ref(), admin.voter_id.clone(), admin.password.clone())
            .await
            .context("failed to bootstrap admin")?;
    }

    let codec = SessionTokenCodec::new(config.secret_key.as_bytes(), config.token_ttl);
    let app = build_app(AppServices::new(store, codec), &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(mysql) = mysql {
        mysql.close().await;
    }
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
