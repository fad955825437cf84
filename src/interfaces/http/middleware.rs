//! Authentication middleware for Axum
//!
//! `auth_middleware` turns a Bearer token into an [`AuthenticatedUser`]
//! request extension; `require_admin` gates whole route subtrees on the
//! Admin role. Handlers never test roles themselves.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    AdminRequired,
}

/// Authentication state for the middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated user information resolved from the JWT
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Claims carry the role as a string; anything outside the closed
    /// role set fails resolution and the request is rejected.
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        let role = UserRole::parse(&claims.role)?;
        Some(Self {
            user_id: claims.sub,
            username: claims.username,
            role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let Some(user) = AuthenticatedUser::from_claims(claims) else {
                return auth_error_response(AuthError::InvalidToken);
            };
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Admin gate, layered on top of `auth_middleware`.
///
/// Centralizes every role check: routes for employee and staff management
/// nest under this layer and nothing else ever inspects the role.
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => auth_error_response(AuthError::AdminRequired),
        None => auth_error_response(AuthError::MissingToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::AdminRequired => (StatusCode::FORBIDDEN, "Admin access required"),
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::middleware;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use crate::infrastructure::crypto::jwt::create_token;

    fn protected_app(jwt_config: JwtConfig) -> Router {
        let admin_routes = Router::new()
            .route("/admin-only", get(|| async { "admin" }))
            .layer(middleware::from_fn(require_admin));

        Router::new()
            .route("/anyone", get(|| async { "ok" }))
            .merge(admin_routes)
            .layer(middleware::from_fn_with_state(
                AuthState {
                    jwt_config: jwt_config.clone(),
                },
                auth_middleware,
            ))
    }

    fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let app = protected_app(JwtConfig::default());
        let resp = app.oneshot(get_with_token("/anyone", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let app = protected_app(JwtConfig::default());
        let resp = app
            .oneshot(get_with_token("/anyone", Some("not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn staff_token_passes_auth_but_not_admin_gate() {
        let cfg = JwtConfig::default();
        let token = create_token("u-1", "bob", "staff", &cfg).unwrap();
        let app = protected_app(cfg);

        let resp = app
            .clone()
            .oneshot(get_with_token("/anyone", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(get_with_token("/admin-only", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_token_passes_admin_gate() {
        let cfg = JwtConfig::default();
        let token = create_token("u-1", "root", "admin", &cfg).unwrap();
        let app = protected_app(cfg);

        let resp = app
            .oneshot(get_with_token("/admin-only", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_role_in_token_is_rejected() {
        let cfg = JwtConfig::default();
        let token = create_token("u-1", "eve", "superuser", &cfg).unwrap();
        let app = protected_app(cfg);

        let resp = app
            .oneshot(get_with_token("/anyone", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
