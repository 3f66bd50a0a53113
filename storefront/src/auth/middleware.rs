//! Request authentication gate and route-rule enforcement.
//!
//! Two middleware layers run on every request, in order:
//!
//! 1. [`authentication_gate_middleware`] - extracts and verifies the bearer
//!    token, resolving it to a principal bound in the request extensions.
//!    This layer never rejects: a missing, malformed or expired token leaves
//!    the request anonymous, so public routes stay reachable even with a
//!    garbage `Authorization` header.
//! 2. [`route_rules_middleware`] - looks up the static rule table for the
//!    request's method and path and rejects with 401/403 before the request
//!    reaches a handler.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::policy,
    errors::Error,
};

/// Implementation of the authentication gate. Since we only annotate the
/// request, the middleware can just return it from the implementation.
pub(crate) async fn authenticate(state: &AppState, mut request: Request) -> Request {
    // Never overwrite a principal bound earlier in the pipeline
    if request.extensions().get::<CurrentUser>().is_some() {
        return request;
    }

    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return request;
    };

    let Ok(header) = header.to_str() else {
        debug!("Discarding non-UTF8 authorization header");
        return request;
    };

    // Only the Bearer scheme carries credentials here
    let Some(token) = header.strip_prefix("Bearer ") else {
        return request;
    };

    let claims = match state.token_codec.parse(token) {
        Ok(claims) => claims,
        Err(e) => {
            // Invalid credentials degrade to "no credentials". The reject
            // decision belongs to the authorization layer.
            debug!("Discarding bearer token: {e}");
            return request;
        }
    };

    match state.stores.users.get_by_email(&claims.sub).await {
        Ok(Some(user)) => {
            // Re-check subject binding and expiry against the resolved
            // identity before trusting the token.
            if state.token_codec.validate(token, &user.email) {
                debug!("Authenticated user: {}", user.email);
                request.extensions_mut().insert(CurrentUser {
                    id: user.id,
                    email: user.email,
                    roles: claims.roles,
                });
            } else {
                debug!("Bearer token failed validation for subject {}", claims.sub);
            }
        }
        Ok(None) => {
            debug!("Bearer token subject {} has no matching account", claims.sub);
        }
        Err(e) => {
            warn!("User lookup failed during authentication: {e}");
        }
    }

    request
}

/// Middleware that resolves the bearer token (if any) into a request-scoped
/// principal. Single-pass and fail-open: it never aborts the request.
pub async fn authentication_gate_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let request = authenticate(&state, request).await;
    next.run(request).await
}

/// Middleware enforcing the static route rule table (tier 1 authorization).
///
/// Runs after the gate, so the principal (when present) is already bound.
pub async fn route_rules_middleware(request: Request, next: Next) -> Result<Response, Error> {
    let access = policy::required_access(request.method(), request.uri().path());
    policy::authorize(access, request.extensions().get::<CurrentUser>(), request.method(), request.uri().path())?;
    Ok(next.run(request).await)
}
