//! Shared constructors for tests.

use axum_test::TestServer;

use crate::{
    AppState, build_router,
    api::models::users::Role,
    auth::{
        password::{self, Argon2Params},
        token::TokenCodec,
    },
    config::Config,
    store::{
        Stores,
        handlers::Repository,
        models::users::{UserCreateRequest, UserRecord},
    },
};

pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.secret_key = Some("a-test-secret-key-of-sufficient-length".to_string());
    // Cheap hashing parameters so the suite doesn't spend seconds per user
    config.auth.password.argon2_memory_kib = 1024;
    config.auth.password.argon2_iterations = 1;
    config
}

pub fn create_test_state() -> AppState {
    let config = create_test_config();
    let token_codec = TokenCodec::new(config.secret_key.as_deref().unwrap(), config.auth.security.token_ttl).unwrap();

    AppState::builder()
        .config(config)
        .stores(Stores::new())
        .token_codec(token_codec)
        .build()
}

pub fn create_test_app() -> (TestServer, AppState) {
    let state = create_test_state();
    let router = build_router(&state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, state)
}

/// Create a user directly in the store and return it with a valid bearer token.
pub async fn create_test_user(state: &AppState, email: &str, roles: Vec<Role>) -> (UserRecord, String) {
    let params = Argon2Params::from(&state.config.auth.password);
    let password_hash = password::hash_string_with_params("test-password-123", Some(params)).unwrap();

    let user = state
        .stores
        .users
        .create(&UserCreateRequest {
            email: email.to_string(),
            given_name: "Test".to_string(),
            family_name: "User".to_string(),
            password_hash,
            roles,
        })
        .await
        .expect("Failed to create test user");

    let token = state.token_codec.issue(&user.email, &user.roles).unwrap();
    (user, token)
}
