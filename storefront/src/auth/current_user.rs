//! Extractor for the authenticated principal.
//!
//! The authentication gate binds a [`CurrentUser`] into the request
//! extensions before any handler runs. Handlers that require authentication
//! simply take `CurrentUser` as an argument; the extractor rejects with 401
//! when the gate left the request anonymous.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    AppState,
    api::models::users::CurrentUser,
    errors::{Error, Result},
};

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(Error::Unauthenticated { message: None })
    }
}
