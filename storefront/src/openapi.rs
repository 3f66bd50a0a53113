//! OpenAPI document aggregation.

use axum::Json;
use utoipa::OpenApi;

use crate::api::{handlers, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "storefront",
        description = "A token-authenticated storefront backend: products, categories and orders behind a stateless bearer-token auth layer."
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::categories::list_categories,
        handlers::categories::get_category,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::create_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,
    ),
    components(schemas(
        models::auth::RegisterRequest,
        models::auth::LoginRequest,
        models::auth::AuthResponse,
        models::users::Role,
        models::products::ProductCreate,
        models::products::ProductUpdate,
        models::products::ProductResponse,
        models::categories::CategoryCreate,
        models::categories::CategoryUpdate,
        models::categories::CategoryResponse,
        models::orders::OrderCreate,
        models::orders::OrderUpdate,
        models::orders::OrderResponse,
        models::orders::OrderStatus,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "products", description = "Product catalog"),
        (name = "categories", description = "Product categories"),
        (name = "orders", description = "Customer orders"),
    )
)]
pub struct ApiDoc;

/// Serve the raw OpenAPI document as JSON
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
