//! Server lifecycle: building shared resources, running the HTTP server, and
//! coordinating graceful shutdown.

use crate::middleware;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use bioindex_api::configure_routes;
use bioindex_configs::{ServerConfig, TableRegistry};
use bioindex_core::AppContext;
use bioindex_filestore::{ObjectReader, ObjectStoreReader};
use bioindex_store::{IndexStore, PoolConfig, SqliteIndexStore};
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Open a read-only pool over `path` and check that it answers queries.
async fn open_store(config: &ServerConfig, path: &str) -> Result<Arc<SqliteIndexStore>> {
    let pool_config = PoolConfig::new(path)
        .max_connections(config.database.pool_size)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs));

    let store = SqliteIndexStore::open(pool_config)
        .with_context(|| format!("Failed to open index database {}", path))?;
    store
        .ping()
        .await
        .with_context(|| format!("Index database {} is not readable", path))?;

    Ok(Arc::new(store))
}

/// Build every shared resource the handlers need.
///
/// Fails fast when a database cannot be opened or the object store cannot
/// be configured.
pub async fn bootstrap(config: &ServerConfig) -> Result<Arc<AppContext>> {
    let bootstrap_start = Instant::now();

    let registry = Arc::new(TableRegistry::from_config(&config.tables)?);
    info!("Loaded {} index definitions", registry.len());

    let index_store = open_store(config, &config.database.path).await?;
    info!(
        "Index database: {} (pool size {})",
        config.database.path, config.database.pool_size
    );

    let portal_path = config.portal_database_path();
    let portal_store: Arc<dyn IndexStore> = if portal_path == config.database.path {
        index_store.clone()
    } else {
        info!("Portal database: {}", portal_path);
        open_store(config, portal_path).await?
    };

    let objects: Arc<dyn ObjectReader> = Arc::new(
        ObjectStoreReader::from_settings(&config.storage)
            .context("Failed to configure object storage")?,
    );
    info!("Object storage: {}", config.storage.url);

    let app_context = Arc::new(AppContext::new(
        Arc::new(config.clone()),
        registry,
        index_store,
        portal_store,
        objects,
    ));

    debug!(
        "Bootstrap completed in {:.2}ms",
        bootstrap_start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(app_context)
}

/// Start the HTTP server and manage graceful shutdown.
pub async fn run(
    config: &ServerConfig,
    app_context: Arc<AppContext>,
    main_start: Instant,
) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);
    debug!("Endpoints: GET /api/indexes, /api/keys/{{index}}, /api/query/{{index}}, /api/portal/*, /healthz");

    let cors_config = config.clone();
    let app_context_for_handler = app_context.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .app_data(web::Data::new(app_context_for_handler.clone()))
            .configure(configure_routes)
    })
    .shutdown_timeout(config.server.shutdown_timeout_secs);

    let server = if config.server.workers > 0 {
        server.workers(config.server.workers)
    } else {
        server
    };

    // Bind with HTTP/2 support if enabled, otherwise use HTTP/1.1 only
    let server = if config.server.enable_http2 {
        info!("HTTP/2 support enabled (h2c - HTTP/2 cleartext)");
        server.bind_auto_h2c(&bind_addr)?
    } else {
        debug!("HTTP/1.1 only mode");
        server.bind(&bind_addr)?
    };

    info!("Server started in {:.2}ms", main_start.elapsed().as_secs_f64() * 1000.0);

    let server = server.disable_signals().run();
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Err(e)) => log::error!("Server failed: {}", e),
                Err(e) => log::error!("Server task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");

            // In-flight hydrations stop fetching and answer 503
            app_context.shutdown_token().cancel();

            // Stop accepting new connections and drain the rest
            server_handle.stop(true).await;
            debug!("Graceful shutdown complete");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
