use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
};
use validator::Validate;

use crate::{
    AppState,
    api::models::categories::{CategoryCreate, CategoryResponse, CategoryUpdate},
    errors::{Error, Result},
    store::{
        handlers::{CategoryFilter, Repository},
        models::categories::{CategoryCreateRequest, CategoryRecord, CategoryUpdateRequest},
    },
    types::{CategoryId, abbrev_uuid},
};

// Categories carry no owner. Write access is admin-only and enforced entirely
// by the route rule table, so the handlers here never see a non-admin caller.

async fn find_category(state: &AppState, id: CategoryId) -> Result<CategoryRecord> {
    state.stores.categories.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Category".to_string(),
        id: id.to_string(),
    })
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "List of categories", body = [CategoryResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>> {
    let categories = state.stores.categories.list(&CategoryFilter::default()).await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = String, Path, description = "Category ID (UUID)")),
    responses(
        (status = 200, description = "The category", body = CategoryResponse),
        (status = 404, description = "Category not found"),
    )
)]
#[tracing::instrument(skip_all, fields(category_id = %abbrev_uuid(&id)))]
pub async fn get_category(State(state): State<AppState>, Path(id): Path<CategoryId>) -> Result<Json<CategoryResponse>> {
    let category = find_category(&state, id).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// Create a category (admin only)
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryCreate,
    tag = "categories",
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid category data"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin role required"),
        (status = 409, description = "A category with this name already exists"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CategoryCreate>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<CategoryResponse>)> {
    request.validate()?;

    let created = state
        .stores
        .categories
        .create(&CategoryCreateRequest {
            name: request.name,
            description: request.description,
            icon: request.icon,
        })
        .await?;

    let location = format!("/categories/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(CategoryResponse::from(created))))
}

/// Update a category (admin only)
#[utoipa::path(
    put,
    path = "/categories/{id}",
    request_body = CategoryUpdate,
    tag = "categories",
    params(("id" = String, Path, description = "Category ID (UUID)")),
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin role required"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "A category with this name already exists"),
    )
)]
#[tracing::instrument(skip_all, fields(category_id = %abbrev_uuid(&id)))]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(request): Json<CategoryUpdate>,
) -> Result<Json<CategoryResponse>> {
    request.validate()?;

    // Existence first, for the same 404-then-authorization order as owned
    // resources; the role gate already ran in the middleware.
    find_category(&state, id).await?;

    let updated = state
        .stores
        .categories
        .update(
            id,
            &CategoryUpdateRequest {
                name: request.name,
                description: request.description,
                icon: request.icon,
            },
        )
        .await?;

    Ok(Json(CategoryResponse::from(updated)))
}

/// Delete a category (admin only)
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = String, Path, description = "Category ID (UUID)")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin role required"),
        (status = 404, description = "Category not found"),
    )
)]
#[tracing::instrument(skip_all, fields(category_id = %abbrev_uuid(&id)))]
pub async fn delete_category(State(state): State<AppState>, Path(id): Path<CategoryId>) -> Result<StatusCode> {
    find_category(&state, id).await?;
    state.stores.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
