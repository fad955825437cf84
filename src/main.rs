//!
//! Spare-parts inventory, sales and staff management service.
//! Reads configuration from TOML file (~/.config/spares-service/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use sparetrack::application::{IdentityService, InventoryService, SalesService, WorkforceService};
use sparetrack::config::AppConfig;
use sparetrack::domain::UserRole;
use sparetrack::infrastructure::crypto::jwt::JwtConfig;
use sparetrack::infrastructure::database::migrator::Migrator;
use sparetrack::infrastructure::database::repositories::{
    EmployeeRepository, SaleRepository, SpareRepository, UserRepository,
};
use sparetrack::infrastructure::uploads::DocumentStore;
use sparetrack::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("SPARES_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Sparetrack service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Sub-configs ────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "spares-service".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Document store ─────────────────────────────────────────
    let document_store = DocumentStore::new(&app_cfg.uploads.dir, app_cfg.uploads.max_file_size);
    document_store.init().await?;
    info!("Document store ready at {}", app_cfg.uploads.dir);

    // ── Repositories & services ────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.clone()));
    let spare_repo = Arc::new(SpareRepository::new(db.clone()));
    let sale_repo = Arc::new(SaleRepository::new(db.clone()));
    let employee_repo = Arc::new(EmployeeRepository::new(db.clone()));

    let identity = Arc::new(IdentityService::new(
        Arc::clone(&user_repo),
        jwt_config.clone(),
    ));
    let inventory = Arc::new(InventoryService::new(
        Arc::clone(&spare_repo),
        Arc::clone(&sale_repo),
    ));
    let sales = Arc::new(SalesService::new(Arc::clone(&sale_repo)));
    let workforce = Arc::new(WorkforceService::new(
        Arc::clone(&employee_repo),
        document_store,
    ));

    // Seed default accounts on an empty user table
    seed_default_users(&identity, &app_cfg).await;

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(
        identity,
        inventory,
        sales,
        workforce,
        db.clone(),
        jwt_config,
        prometheus_handle,
    );

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Perform final cleanup
    info!("Shutting down...");
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Sparetrack service shutdown complete");
    Ok(())
}

/// Seed one admin and one staff account when the user table is empty.
///
/// The default credentials come from the `[bootstrap]` config section and
/// are a deliberate carry-over from the system this replaces; the warning
/// below is the flag, not a fix.
async fn seed_default_users(
    identity: &IdentityService<UserRepository>,
    app_cfg: &AppConfig,
) {
    let existing = match identity.list_users().await {
        Ok(users) => users,
        Err(e) => {
            error!("Failed to check existing users: {}", e);
            return;
        }
    };

    if !existing.is_empty() {
        return;
    }

    info!("Empty user table, seeding default accounts...");

    let accounts = [
        (
            app_cfg.bootstrap.admin_username.as_str(),
            app_cfg.bootstrap.admin_password.as_str(),
            UserRole::Admin,
        ),
        (
            app_cfg.bootstrap.staff_username.as_str(),
            app_cfg.bootstrap.staff_password.as_str(),
            UserRole::Staff,
        ),
    ];

    for (username, password, role) in accounts {
        match identity.create_user(username, password, role).await {
            Ok(user) => info!(username = %user.username, role = %user.role, "Seeded account"),
            Err(e) => error!("Failed to seed account '{}': {}", username, e),
        }
    }

    warn!(
        "Default credentials are in use ({}/{}). Change them immediately!",
        app_cfg.bootstrap.admin_username, app_cfg.bootstrap.staff_username
    );
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
