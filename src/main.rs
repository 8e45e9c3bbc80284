use anyhow::{Context, Result};
use expedientes::application::{
    ports::{
        export::{CaseDocumentRenderer, DocumentArchiver},
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
    services::{Adapters, ApplicationServices, Repositories},
};
use expedientes::config::AppConfig;
use expedientes::infrastructure::{
    database,
    export::{PrintPdfRenderer, ZipArchiver},
    repositories::{
        SqliteAuditLogRepository, SqliteCaseReadRepository, SqliteCaseWriteRepository,
        SqliteChecklistRepository, SqliteUserRepository,
    },
    security::{Argon2PasswordHasher, BiscuitTokenManager},
    time::SystemClock,
};
use expedientes::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    info!(env = %config.app_env(), data_dir = %config.data_dir().display(), "starting");

    std::fs::create_dir_all(config.data_dir())
        .with_context(|| format!("creating {}", config.data_dir().display()))?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    let shared_pool = Arc::new(pool.clone());

    let repos = Repositories {
        users: Arc::new(SqliteUserRepository::new(Arc::clone(&shared_pool))),
        case_reads: Arc::new(SqliteCaseReadRepository::new(Arc::clone(&shared_pool))),
        case_writes: Arc::new(SqliteCaseWriteRepository::new(Arc::clone(&shared_pool))),
        checklist: Arc::new(SqliteChecklistRepository::new(Arc::clone(&shared_pool))),
        audit_log: Arc::new(SqliteAuditLogRepository::new(Arc::clone(&shared_pool))),
    };

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let renderer: Arc<dyn CaseDocumentRenderer> = Arc::new(PrintPdfRenderer);
    let archiver: Arc<dyn DocumentArchiver> = Arc::new(ZipArchiver);

    let services = Arc::new(ApplicationServices::new(
        repos,
        Adapters {
            password_hasher,
            token_manager,
            clock,
            renderer,
            archiver,
        },
    ));

    match config.bootstrap_admin_password() {
        Some(password) => {
            services
                .user_commands
                .ensure_bootstrap_admin(config.bootstrap_admin_username(), password)
                .await?;
        }
        None => warn!("BOOTSTRAP_ADMIN_PASSWORD not set; skipping administrator bootstrap"),
    }

    let state = HttpState {
        services,
        db_pool: pool,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install terminate handler");
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
    info!("shutdown signal received");
}
