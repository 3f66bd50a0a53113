use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
};
use validator::Validate;

use crate::{
    AppState,
    api::models::{
        products::{ListProductsQuery, ProductCreate, ProductResponse, ProductUpdate},
        users::CurrentUser,
    },
    auth::policy::{self, Owned},
    errors::{Error, Result},
    store::{
        handlers::{ProductFilter, Repository},
        models::products::{ProductCreateRequest, ProductRecord, ProductUpdateRequest},
    },
    types::{Operation, ProductId, abbrev_uuid},
};

impl Owned for ProductRecord {
    fn owner_user_id(&self) -> Option<crate::types::UserId> {
        Some(self.owner_user_id)
    }
}

/// Fetch the product or report 404. Runs before any ownership check so the
/// two cases stay distinguishable in a consistent order.
async fn find_product(state: &AppState, id: ProductId) -> Result<ProductRecord> {
    state.stores.products.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Product".to_string(),
        id: id.to_string(),
    })
}

/// List products, optionally filtered by category
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "List of products", body = [ProductResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(State(state): State<AppState>, Query(query): Query<ListProductsQuery>) -> Result<Json<Vec<ProductResponse>>> {
    let products = state
        .stores
        .products
        .list(&ProductFilter { category: query.category })
        .await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID (UUID)")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all, fields(product_id = %abbrev_uuid(&id)))]
pub async fn get_product(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<Json<ProductResponse>> {
    let product = find_product(&state, id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Create a product owned by the caller
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductCreate,
    tag = "products",
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 401, description = "Unauthorized"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %current_user.email))]
pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ProductCreate>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<ProductResponse>)> {
    request.validate()?;

    // The owner is always the caller; nothing in the payload can say otherwise
    let created = state
        .stores
        .products
        .create(&ProductCreateRequest {
            name: request.name,
            price: request.price,
            category: request.category,
            description: request.description,
            image: request.image,
            stock: request.stock,
            owner_user_id: current_user.id,
        })
        .await?;

    let location = format!("/products/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(ProductResponse::from(created))))
}

/// Update a product (owner or admin)
#[utoipa::path(
    put,
    path = "/products/{id}",
    request_body = ProductUpdate,
    tag = "products",
    params(("id" = String, Path, description = "Product ID (UUID)")),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all, fields(product_id = %abbrev_uuid(&id), user = %current_user.email))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    current_user: CurrentUser,
    Json(request): Json<ProductUpdate>,
) -> Result<Json<ProductResponse>> {
    request.validate()?;

    let existing = find_product(&state, id).await?;
    policy::ensure_owner_or_admin(&current_user, &existing, Operation::Update, format!("product {}", abbrev_uuid(&id)))?;

    let updated = state
        .stores
        .products
        .update(
            id,
            &ProductUpdateRequest {
                name: request.name,
                price: request.price,
                category: request.category,
                description: request.description,
                image: request.image,
                stock: request.stock,
            },
        )
        .await?;

    Ok(Json(ProductResponse::from(updated)))
}

/// Delete a product (owner or admin)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID (UUID)")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all, fields(product_id = %abbrev_uuid(&id), user = %current_user.email))]
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<ProductId>, current_user: CurrentUser) -> Result<StatusCode> {
    let existing = find_product(&state, id).await?;
    policy::ensure_owner_or_admin(&current_user, &existing, Operation::Delete, format!("product {}", abbrev_uuid(&id)))?;

    state.stores.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::{products::ProductResponse, users::Role},
        test_utils::{create_test_app, create_test_user},
    };
    use serde_json::json;

    fn product_payload() -> serde_json::Value {
        json!({
            "name": "Phone",
            "price": 59900,
            "category": "Electronics",
            "description": "Smartphone",
            "image": "/img/phone.png",
            "stock": 10
        })
    }

    #[tokio::test]
    async fn test_anonymous_can_read_but_not_write() {
        let (server, state) = create_test_app();
        let (_owner, token) = create_test_user(&state, "owner@example.com", vec![Role::User]).await;

        let created = server
            .post("/products")
            .add_header("authorization", format!("Bearer {token}"))
            .json(&product_payload())
            .await;
        assert_eq!(created.status_code().as_u16(), 201);
        let product: ProductResponse = created.json();

        // Anonymous reads succeed
        let get = server.get(&format!("/products/{}", product.id)).await;
        assert_eq!(get.status_code().as_u16(), 200);

        let list = server.get("/products").await;
        assert_eq!(list.status_code().as_u16(), 200);

        // Anonymous writes are rejected before the handler runs
        let post = server.post("/products").json(&product_payload()).await;
        assert_eq!(post.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_create_forces_owner_to_caller() {
        let (server, state) = create_test_app();
        let (owner, token) = create_test_user(&state, "owner@example.com", vec![Role::User]).await;
        let intruder_id = uuid::Uuid::new_v4();

        // A client-supplied owner value is discarded
        let mut payload = product_payload();
        payload["ownerUserId"] = json!(intruder_id.to_string());

        let response = server
            .post("/products")
            .add_header("authorization", format!("Bearer {token}"))
            .json(&payload)
            .await;

        assert_eq!(response.status_code().as_u16(), 201);
        assert!(response.headers().get("location").is_some());
        let product: ProductResponse = response.json();
        assert_eq!(product.owner_user_id, owner.id);
    }

    #[tokio::test]
    async fn test_update_cannot_change_owner() {
        let (server, state) = create_test_app();
        let (owner, token) = create_test_user(&state, "owner@example.com", vec![Role::User]).await;

        let created = server
            .post("/products")
            .add_header("authorization", format!("Bearer {token}"))
            .json(&product_payload())
            .await;
        let product: ProductResponse = created.json();

        // A forged owner field in the update payload is ignored
        let response = server
            .put(&format!("/products/{}", product.id))
            .add_header("authorization", format!("Bearer {token}"))
            .json(&json!({
                "name": "Phone X",
                "price": 64900,
                "category": "Electronics",
                "description": "Updated",
                "image": "/img/phone-x.png",
                "stock": 8,
                "ownerUserId": uuid::Uuid::new_v4().to_string()
            }))
            .await;

        assert_eq!(response.status_code().as_u16(), 200);
        let updated: ProductResponse = response.json();
        assert_eq!(updated.name, "Phone X");
        assert_eq!(updated.owner_user_id, owner.id);
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_ownership_matrix() {
        let (server, state) = create_test_app();
        let (_a, token_a) = create_test_user(&state, "a@example.com", vec![Role::User]).await;
        let (_b, token_b) = create_test_user(&state, "b@example.com", vec![Role::User]).await;
        let (_admin, token_admin) = create_test_user(&state, "admin@example.com", vec![Role::User, Role::Admin]).await;

        // A creates two products
        let first: ProductResponse = server
            .post("/products")
            .add_header("authorization", format!("Bearer {token_a}"))
            .json(&product_payload())
            .await
            .json();
        let second: ProductResponse = server
            .post("/products")
            .add_header("authorization", format!("Bearer {token_a}"))
            .json(&product_payload())
            .await
            .json();

        // B (non-admin, non-owner) is forbidden
        let forbidden = server
            .delete(&format!("/products/{}", first.id))
            .add_header("authorization", format!("Bearer {token_b}"))
            .await;
        assert_eq!(forbidden.status_code().as_u16(), 403);

        // The admin may delete regardless of owner
        let by_admin = server
            .delete(&format!("/products/{}", first.id))
            .add_header("authorization", format!("Bearer {token_admin}"))
            .await;
        assert_eq!(by_admin.status_code().as_u16(), 204);

        // The owner may delete their own
        let by_owner = server
            .delete(&format!("/products/{}", second.id))
            .add_header("authorization", format!("Bearer {token_a}"))
            .await;
        assert_eq!(by_owner.status_code().as_u16(), 204);
    }

    #[tokio::test]
    async fn test_missing_product_reports_404_before_ownership() {
        let (server, state) = create_test_app();
        let (_user, token) = create_test_user(&state, "user@example.com", vec![Role::User]).await;

        let response = server
            .delete(&format!("/products/{}", uuid::Uuid::new_v4()))
            .add_header("authorization", format!("Bearer {token}"))
            .await;
        assert_eq!(response.status_code().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_category_filter() {
        let (server, state) = create_test_app();
        let (_user, token) = create_test_user(&state, "user@example.com", vec![Role::User]).await;

        server
            .post("/products")
            .add_header("authorization", format!("Bearer {token}"))
            .json(&product_payload())
            .await;
        server
            .post("/products")
            .add_header("authorization", format!("Bearer {token}"))
            .json(&json!({
                "name": "Desk",
                "price": 12000,
                "category": "Furniture",
                "stock": 3
            }))
            .await;

        let filtered: Vec<ProductResponse> = server.get("/products?category=Furniture").await.json();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Desk");
    }

    #[tokio::test]
    async fn test_invalid_payload_collects_field_errors() {
        let (server, state) = create_test_app();
        let (_user, token) = create_test_user(&state, "user@example.com", vec![Role::User]).await;

        let response = server
            .post("/products")
            .add_header("authorization", format!("Bearer {token}"))
            .json(&json!({
                "name": "x",
                "price": -1,
                "category": "y",
                "stock": -5
            }))
            .await;

        assert_eq!(response.status_code().as_u16(), 400);
        let body: serde_json::Value = response.json();
        let fields = body["fields"].as_object().unwrap();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("category"));
        assert!(fields.contains_key("stock"));
    }
}
