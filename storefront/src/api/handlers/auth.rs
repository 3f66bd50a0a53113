use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    AppState,
    api::models::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        users::Role,
    },
    auth::password::{self, Argon2Params},
    errors::Error,
    store::{handlers::Repository, models::users::UserCreateRequest},
};

/// Register a new user account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    tag = "auth",
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "An account with this email already exists"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Json(request): Json<RegisterRequest>) -> Result<(StatusCode, Json<AuthResponse>), Error> {
    // Check if registration is allowed
    if !state.config.auth.allow_registration {
        return Err(Error::BadRequest {
            message: "User registration is disabled".to_string(),
        });
    }

    request.validate()?;

    // Validate password length against the configured bounds
    let password_config = &state.config.auth.password;
    if request.password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if request.password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    // Pre-check so the common case gets a clean conflict without paying for a
    // hash. The store's uniqueness guarantee remains the authoritative guard:
    // a concurrent duplicate insert still fails atomically below and maps to
    // the same 409.
    if state.stores.users.exists_by_email(&request.email).await? {
        return Err(Error::Conflict {
            message: "An account with this email address already exists".to_string(),
        });
    }

    // Hash the password on a blocking thread to avoid blocking the async runtime
    let params = Argon2Params::from(password_config);
    let plaintext = request.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string_with_params(&plaintext, Some(params)))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let created = state
        .stores
        .users
        .create(&UserCreateRequest {
            email: request.email,
            given_name: request.given_name,
            family_name: request.family_name,
            password_hash,
            roles: vec![Role::User],
        })
        .await?;

    let token = state.token_codec.issue(&created.email, &created.roles)?;

    Ok((StatusCode::CREATED, Json(AuthResponse::new(created, token))))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<AuthResponse>, Error> {
    request.validate()?;

    // Unknown email and wrong password take the same path to the same error:
    // the response must not reveal which check failed.
    let user = state
        .stores
        .users
        .get_by_email(&request.email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    // Verify password on a blocking thread to avoid blocking the async runtime
    let plaintext = request.password.clone();
    let hash = user.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_string(&plaintext, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !is_valid {
        return Err(Error::InvalidCredentials);
    }

    let token = state.token_codec.issue(&user.email, &user.roles)?;

    Ok(Json(AuthResponse::new(user, token)))
}

#[cfg(test)]
mod tests {
    use crate::{api::models::auth::AuthResponse, test_utils::create_test_app};
    use serde_json::json;

    #[tokio::test]
    async fn test_register_returns_identity_and_token() {
        let (server, state) = create_test_app();

        let response = server
            .post("/auth/register")
            .json(&json!({
                "email": "ada@example.com",
                "password": "correct horse battery",
                "givenName": "Ada",
                "familyName": "Lovelace"
            }))
            .await;

        assert_eq!(response.status_code().as_u16(), 201);
        let body: AuthResponse = response.json();
        assert_eq!(body.email, "ada@example.com");
        assert_eq!(body.given_name, "Ada");
        assert!(!body.token.is_empty());

        // The issued token names the new account as its subject
        assert!(state.token_codec.validate(&body.token, "ada@example.com"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let (server, _state) = create_test_app();

        let payload = json!({
            "email": "dup@example.com",
            "password": "correct horse battery",
            "givenName": "First",
            "familyName": "User"
        });

        let first = server.post("/auth/register").json(&payload).await;
        assert_eq!(first.status_code().as_u16(), 201);

        let second = server.post("/auth/register").json(&payload).await;
        assert_eq!(second.status_code().as_u16(), 409);
        let body: serde_json::Value = second.json();
        assert!(body["error"].as_str().unwrap().contains("already exists"));
    }

    #[tokio::test]
    async fn test_register_collects_all_field_errors() {
        let (server, _state) = create_test_app();

        let response = server
            .post("/auth/register")
            .json(&json!({
                "email": "not-an-email",
                "password": "long enough password",
                "givenName": "",
                "familyName": ""
            }))
            .await;

        assert_eq!(response.status_code().as_u16(), 400);
        let body: serde_json::Value = response.json();
        let fields = body["fields"].as_object().unwrap();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("given_name"));
        assert!(fields.contains_key("family_name"));
    }

    #[tokio::test]
    async fn test_register_enforces_configured_password_length() {
        let (server, _state) = create_test_app();

        let response = server
            .post("/auth/register")
            .json(&json!({
                "email": "short@example.com",
                "password": "tiny",
                "givenName": "A",
                "familyName": "B"
            }))
            .await;

        assert_eq!(response.status_code().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let (server, _state) = create_test_app();

        server
            .post("/auth/register")
            .json(&json!({
                "email": "login@example.com",
                "password": "correct horse battery",
                "givenName": "Log",
                "familyName": "In"
            }))
            .await;

        let response = server
            .post("/auth/login")
            .json(&json!({
                "email": "login@example.com",
                "password": "correct horse battery"
            }))
            .await;

        assert_eq!(response.status_code().as_u16(), 200);
        let body: AuthResponse = response.json();
        assert!(!body.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (server, _state) = create_test_app();

        server
            .post("/auth/register")
            .json(&json!({
                "email": "real@example.com",
                "password": "correct horse battery",
                "givenName": "Real",
                "familyName": "User"
            }))
            .await;

        let wrong_password = server
            .post("/auth/login")
            .json(&json!({ "email": "real@example.com", "password": "wrong password" }))
            .await;
        let unknown_email = server
            .post("/auth/login")
            .json(&json!({ "email": "nobody@example.com", "password": "wrong password" }))
            .await;

        assert_eq!(wrong_password.status_code().as_u16(), 401);
        assert_eq!(unknown_email.status_code().as_u16(), 401);

        // Same status, same body: no signal about which check failed
        let a: serde_json::Value = wrong_password.json();
        let b: serde_json::Value = unknown_email.json();
        assert_eq!(a, b);
    }
}
