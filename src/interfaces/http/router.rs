//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{HeaderValue, Uri},
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{create_token_store, UserService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::SeaOrmRepositoryProvider;
use crate::interfaces::http::common::{ApiError, DeletedResponse, MessageResponse};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::auth::AuthHandlerState;
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{
    auth, health, locations, materials, roles, units, users, RepoState,
};
use crate::shared::{ErrorBody, PaginationMeta};

/// Everything the router needs, built once at startup.
#[derive(Clone)]
pub struct ApiContext {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub user_service: Arc<UserService>,
    pub auth: AuthState,
    /// `/metrics` is mounted only when a Prometheus handle is present
    pub metrics: Option<PrometheusHandle>,
    /// Allowed CORS origins; empty allows any
    pub cors_origins: Vec<String>,
    pub started_at: Arc<Instant>,
}

impl ApiContext {
    pub fn new(db: DatabaseConnection, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let tokens = create_token_store();
        let user_service = Arc::new(UserService::new(
            Arc::clone(&repos),
            tokens.clone(),
            jwt_config.clone(),
            bcrypt_cost,
        ));

        Self {
            db,
            repos,
            user_service,
            auth: AuthState { jwt_config, tokens },
            metrics: None,
            cors_origins: Vec::new(),
            started_at: Arc::new(Instant::now()),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }
}

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
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_user,
        auth::logout,
        auth::change_password,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Roles
        roles::list_roles,
        roles::get_role,
        roles::create_role,
        roles::update_role,
        roles::delete_role,
        // Locations
        locations::list_locations,
        locations::get_location,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        // Units of measure
        units::list_units,
        units::get_unit,
        units::create_unit,
        units::update_unit,
        units::delete_unit,
        // Materials
        materials::list_materials,
        materials::get_material,
        materials::create_material,
        materials::update_material,
        materials::delete_material,
    ),
    components(
        schemas(
            ErrorBody,
            PaginationMeta,
            DeletedResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service and database health"),
        (name = "Authentication", description = "Login (JWT), logout, current user, password change"),
        (name = "Users", description = "User administration (admin only)"),
        (name = "Roles", description = "Role administration (admin only)"),
        (name = "Locations", description = "Warehouses, plants and other sites"),
        (name = "Units of Measure", description = "Units materials are measured in"),
        (name = "Materials", description = "Material master data"),
    ),
    info(
        title = "ERP Service API",
        version = "1.0.0",
        description = "REST API for ERP master data. Every response is wrapped in a \
                       `{success, code, data | message}` envelope; list endpoints add `meta`."
    )
)]
pub struct ApiDoc;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let auth_layer = || middleware::from_fn_with_state(ctx.auth.clone(), auth_middleware);

    let user_state = AuthHandlerState {
        user_service: Arc::clone(&ctx.user_service),
    };
    let repo_state = RepoState {
        repos: Arc::clone(&ctx.repos),
    };

    // Login is public; everything registered before the layer is protected
    let auth_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/logout", post(auth::logout))
        .route("/change-password", put(auth::change_password))
        .route_layer(auth_layer())
        .route("/login", post(auth::login))
        .with_state(user_state.clone());

    // Admin routes
    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(auth_layer())
        .with_state(user_state);

    let role_routes = Router::new()
        .route("/", get(roles::list_roles).post(roles::create_role))
        .route(
            "/{id}",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(auth_layer())
        .with_state(repo_state.clone());

    // Master data, any authenticated user
    let location_routes = Router::new()
        .route(
            "/",
            get(locations::list_locations).post(locations::create_location),
        )
        .route(
            "/{id}",
            get(locations::get_location)
                .put(locations::update_location)
                .delete(locations::delete_location),
        )
        .route_layer(auth_layer())
        .with_state(repo_state.clone());

    let unit_routes = Router::new()
        .route("/", get(units::list_units).post(units::create_unit))
        .route(
            "/{id}",
            get(units::get_unit)
                .put(units::update_unit)
                .delete(units::delete_unit),
        )
        .route_layer(auth_layer())
        .with_state(repo_state.clone());

    let material_routes = Router::new()
        .route(
            "/",
            get(materials::list_materials).post(materials::create_material),
        )
        .route(
            "/{id}",
            get(materials::get_material)
                .put(materials::update_material)
                .delete(materials::delete_material),
        )
        .route_layer(auth_layer())
        .with_state(repo_state);

    let api_v1 = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/roles", role_routes)
        .nest("/locations", location_routes)
        .nest("/units", unit_routes)
        .nest("/materials", material_routes);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db: ctx.db.clone(),
            started_at: Arc::clone(&ctx.started_at),
        });

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/v1", api_v1);

    if let Some(handle) = ctx.metrics.clone() {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .fallback(route_not_found)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&ctx.cors_origins))
}
