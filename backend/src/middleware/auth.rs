//! Authentication middleware
//!
//! BukuToko delegates sign-in entirely to an external identity provider.
//! Requests carry a provider-issued JWT; the middleware verifies the
//! signature and trusts the `sub` claim as the tenant id. No further
//! identity checks happen in the core.

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// Authenticated tenant extracted from the identity provider's JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Opaque tenant id (the token's `sub` claim)
    pub tenant_id: String,
}

/// Authentication middleware that validates JWT tokens.
/// Requests without a valid token are rejected before the handler runs.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    match authenticate(&request) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Lenient variant for read paths that degrade for guests (the catalog
/// listing shows global items with zero stock). A valid token attaches an
/// `AuthUser`; anything else passes through unauthenticated.
pub async fn optional_auth_middleware(mut request: Request, next: Next) -> Response {
    if let Ok(user) = authenticate(&request) {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}

fn authenticate(request: &Request) -> Result<AuthUser, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => return Err(AppError::Unauthorized),
    };

    // Get the JWT secret from the environment (fallback for middleware
    // without state)
    let jwt_secret = std::env::var("BUKUTOKO__AUTH__JWT_SECRET")
        .or_else(|_| std::env::var("BUKUTOKO_JWT_SECRET"))
        .unwrap_or_else(|_| "development-secret-key".to_string());

    let claims = decode_jwt(token, &jwt_secret)?;

    if claims.sub.is_empty() {
        return Err(AppError::Unauthorized);
    }

    Ok(AuthUser {
        tenant_id: claims.sub,
    })
}

/// JWT claims structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// Decode and validate a JWT token
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {}", e);
        AppError::Unauthorized
    })
}

/// Extractor for the authenticated tenant.
/// Use this in handlers that require a signed-in user.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Extractor for handlers that serve both tenants and guests.
#[derive(Clone, Debug)]
pub struct OptionalUser(pub Option<AuthUser>);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(parts.extensions.get::<AuthUser>().cloned()))
    }
}
