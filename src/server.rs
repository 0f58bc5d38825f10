//! Reusable fare service runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: metrics recorder, rule
//! storage (database or memory), mapping client, REST API and graceful
//! shutdown. The CLI binary is a thin wrapper around it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{FareQuoteService, PricingRuleStore, RouteProvider};
use crate::config::{AppConfig, LogFormat, StorageBackend};
use crate::domain::PricingRuleRepository;
use crate::infrastructure::{
    init_database, run_migrations, HttpRouteProvider, InMemoryPricingRuleRepository,
    SeaOrmPricingRuleRepository,
};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::{create_api_router, AppState};
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the fare service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running fare service.
///
/// # Examples
///
/// ```rust,no_run
/// use fare_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub rules: PricingRuleStore,
    pub quotes: FareQuoteService,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to (the real port when 0 was requested).
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the fare service.
    ///
    /// 1. Install the Prometheus metrics recorder
    /// 2. Open rule storage, running migrations for the database backend
    /// 3. Build the mapping client and services
    /// 4. Serve the REST API (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting fare service...");

        let prometheus_handle = prometheus_handle()?;
        info!("📊 Prometheus metrics recorder ready");

        // ── Rule storage ───────────────────────────────────────
        let (repo, db): (Arc<dyn PricingRuleRepository>, Option<DatabaseConnection>) =
            match app_cfg.storage.backend {
                StorageBackend::Memory => {
                    warn!("Using in-memory rule storage; rules are lost on restart");
                    (Arc::new(InMemoryPricingRuleRepository::new()), None)
                }
                StorageBackend::Database => {
                    let db = init_database(&app_cfg.database_config()).await?;
                    if opts.auto_migrate {
                        info!("Running database migrations...");
                        run_migrations(&db).await?;
                    }
                    (Arc::new(SeaOrmPricingRuleRepository::new(db.clone())), Some(db))
                }
            };

        // ── Services ───────────────────────────────────────────
        let routes: Arc<dyn RouteProvider> =
            Arc::new(HttpRouteProvider::new(app_cfg.mapping.client_config())?);
        info!(base_url = %app_cfg.mapping.base_url, "Mapping client configured");

        let rules = PricingRuleStore::new(repo);
        let quotes = FareQuoteService::new(routes, rules.clone())
            .with_retry(app_cfg.mapping.retry_config());

        let api_router = create_api_router(
            AppState {
                rules: rules.clone(),
                quotes: quotes.clone(),
            },
            HealthState::new(db.clone()),
            Some(prometheus_handle),
        );

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let listener = tokio::net::TcpListener::bind(app_cfg.api_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Fare service started.");

        Ok(Self {
            rules,
            quotes,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get the configured shutdown timeout to finish.
    pub async fn wait(self) {
        info!("⏳ Waiting for in-flight requests to complete...");

        let timeout = self.shutdown.timeout();
        let mut api_task = self.api_task;
        match tokio::time::timeout(timeout, &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!(timeout_secs = timeout.as_secs(), "Graceful shutdown timed out, aborting");
                api_task.abort();
            }
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        }

        info!("👋 Fare service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down fare service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Install the global Prometheus recorder once per process and hand out its
/// handle; a restart within the same process reuses it.
fn prometheus_handle() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("📊 Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call this once at
/// process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
