//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{IdentityService, InventoryService, SalesService, WorkforceService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{
    EmployeeRepository, SaleRepository, SpareRepository, UserRepository,
};
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PaginationParams};
use crate::interfaces::http::middleware::{auth_middleware, require_admin, AuthState};
use crate::interfaces::http::modules::{auth, employees, health, metrics, sales, spares, staff};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_current_user,
        auth::handlers::change_password,
        // Inventory
        spares::handlers::list_spares,
        spares::handlers::get_spare,
        spares::handlers::add_spare,
        spares::handlers::update_spare,
        spares::handlers::delete_spare,
        // Sales
        sales::handlers::list_sales,
        sales::handlers::record_sale,
        // Employees
        employees::handlers::list_employees,
        employees::handlers::get_employee,
        employees::handlers::add_employee,
        employees::handlers::update_employee,
        employees::handlers::delete_employee,
        employees::handlers::get_employee_document,
        // Staff
        staff::handlers::list_users,
        staff::handlers::create_user,
        staff::handlers::delete_user,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<sales::dto::SaleDto>,
            PaginationParams,
            // Auth
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::UserInfo,
            auth::dto::ChangePasswordRequest,
            // Inventory
            spares::dto::SpareDto,
            spares::dto::SpareRequest,
            // Sales
            sales::dto::SaleDto,
            sales::dto::RecordSaleRequest,
            // Employees
            employees::dto::EmployeeDto,
            employees::dto::UpdateEmployeeRequest,
            // Staff
            staff::dto::UserDto,
            staff::dto::CreateUserRequest,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Login (JWT), session info, password change"),
        (name = "Inventory", description = "Spare-part CRUD operations"),
        (name = "Sales", description = "Record sales against stock and browse the history"),
        (name = "Employees", description = "Employee records with identity documents (admin only)"),
        (name = "Staff", description = "Login account management (admin only)"),
    ),
    info(
        title = "Sparetrack API",
        version = "1.0.0",
        description = "REST API for spare-parts inventory, sales and staff management",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    identity: Arc<IdentityService<UserRepository>>,
    inventory: Arc<InventoryService<SpareRepository, SaleRepository>>,
    sales_service: Arc<SalesService<SaleRepository>>,
    workforce: Arc<WorkforceService<EmployeeRepository>>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let auth_state = AuthState { jwt_config };

    // ── Auth routes ────────────────────────────────────────────
    let auth_handler_state = auth::AuthHandlerState {
        identity: Arc::clone(&identity),
    };

    let auth_public_routes = Router::new()
        .route("/login", post(auth::handlers::login))
        .with_state(auth_handler_state.clone());

    let auth_protected_routes = Router::new()
        .route("/logout", post(auth::handlers::logout))
        .route("/me", get(auth::handlers::get_current_user))
        .route("/change-password", put(auth::handlers::change_password))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_handler_state);

    // ── Inventory routes (any authenticated role) ──────────────
    let spare_routes = Router::new()
        .route(
            "/",
            get(spares::handlers::list_spares).post(spares::handlers::add_spare),
        )
        .route(
            "/{id}",
            get(spares::handlers::get_spare)
                .put(spares::handlers::update_spare)
                .delete(spares::handlers::delete_spare),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(spares::SpareHandlerState { inventory });

    // ── Sales routes (any authenticated role) ──────────────────
    let sale_routes = Router::new()
        .route(
            "/",
            get(sales::handlers::list_sales).post(sales::handlers::record_sale),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(sales::SaleHandlerState {
            sales: sales_service,
        });

    // ── Employee routes (admin only) ───────────────────────────
    // The admin gate is the only place the role is ever checked.
    // Body limit raised above the axum default so the document store's own
    // size check is the one that rejects oversized uploads.
    let employee_routes = Router::new()
        .route(
            "/",
            get(employees::handlers::list_employees).post(employees::handlers::add_employee),
        )
        .route(
            "/{id}",
            get(employees::handlers::get_employee)
                .put(employees::handlers::update_employee)
                .delete(employees::handlers::delete_employee),
        )
        .route(
            "/{id}/document",
            get(employees::handlers::get_employee_document),
        )
        .layer(axum::extract::DefaultBodyLimit::max(16 * 1024 * 1024))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(employees::EmployeeHandlerState { workforce });

    // ── Staff routes (admin only) ──────────────────────────────
    let staff_routes = Router::new()
        .route(
            "/",
            get(staff::handlers::list_users).post(staff::handlers::create_user),
        )
        .route("/{id}", delete(staff::handlers::delete_user))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(staff::StaffHandlerState { identity });

    // ── Operational endpoints ──────────────────────────────────
    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let metrics_state = metrics::MetricsState {
        handle: prometheus_handle,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route(
            "/health",
            get(health::handlers::health_check).with_state(health_state),
        )
        // Prometheus scrape
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics_state),
        )
        // Auth
        .nest("/api/v1/auth", auth_public_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Inventory
        .nest("/api/v1/spares", spare_routes)
        // Sales
        .nest("/api/v1/sales", sale_routes)
        // Employees
        .nest("/api/v1/employees", employee_routes)
        // Staff
        .nest("/api/v1/staff", staff_routes)
        // Middleware
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
