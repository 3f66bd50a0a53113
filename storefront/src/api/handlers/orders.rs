use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
};
use validator::Validate;

use crate::{
    AppState,
    api::models::{
        orders::{ListOrdersQuery, OrderCreate, OrderResponse, OrderUpdate},
        users::CurrentUser,
    },
    auth::policy::{self, Owned},
    errors::{Error, Result},
    store::{
        handlers::{OrderFilter, Repository},
        models::orders::{OrderCreateRequest, OrderRecord, OrderUpdateRequest},
    },
    types::{Operation, OrderId, abbrev_uuid},
};

impl Owned for OrderRecord {
    fn owner_user_id(&self) -> Option<crate::types::UserId> {
        Some(self.owner_user_id)
    }
}

async fn find_order(state: &AppState, id: OrderId) -> Result<OrderRecord> {
    state.stores.orders.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Order".to_string(),
        id: id.to_string(),
    })
}

/// List orders, optionally filtered by the placing user
#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "List of orders", body = [OrderResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_orders(State(state): State<AppState>, Query(query): Query<ListOrdersQuery>) -> Result<Json<Vec<OrderResponse>>> {
    let orders = state
        .stores
        .orders
        .list(&OrderFilter {
            owner_user_id: query.user_id,
        })
        .await?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Get an order by ID
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = String, Path, description = "Order ID (UUID)")),
    responses(
        (status = 200, description = "The order", body = OrderResponse),
        (status = 404, description = "Order not found"),
    )
)]
#[tracing::instrument(skip_all, fields(order_id = %abbrev_uuid(&id)))]
pub async fn get_order(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<Json<OrderResponse>> {
    let order = find_order(&state, id).await?;
    Ok(Json(OrderResponse::from(order)))
}

/// Place an order owned by the caller
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderCreate,
    tag = "orders",
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Invalid order data"),
        (status = 401, description = "Unauthorized"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %current_user.email))]
pub async fn create_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<OrderCreate>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<OrderResponse>)> {
    request.validate()?;

    let created = state
        .stores
        .orders
        .create(&OrderCreateRequest {
            owner_user_id: current_user.id,
            total: request.total,
            status: request.status,
        })
        .await?;

    let location = format!("/orders/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(OrderResponse::from(created))))
}

/// Update an order's total or status (owner or admin)
#[utoipa::path(
    put,
    path = "/orders/{id}",
    request_body = OrderUpdate,
    tag = "orders",
    params(("id" = String, Path, description = "Order ID (UUID)")),
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Order not found"),
    )
)]
#[tracing::instrument(skip_all, fields(order_id = %abbrev_uuid(&id), user = %current_user.email))]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    current_user: CurrentUser,
    Json(request): Json<OrderUpdate>,
) -> Result<Json<OrderResponse>> {
    request.validate()?;

    let existing = find_order(&state, id).await?;
    policy::ensure_owner_or_admin(&current_user, &existing, Operation::Update, format!("order {}", abbrev_uuid(&id)))?;

    let updated = state
        .stores
        .orders
        .update(
            id,
            &OrderUpdateRequest {
                total: request.total,
                status: request.status,
            },
        )
        .await?;

    Ok(Json(OrderResponse::from(updated)))
}

/// Cancel an order permanently (owner or admin)
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = String, Path, description = "Order ID (UUID)")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Order not found"),
    )
)]
#[tracing::instrument(skip_all, fields(order_id = %abbrev_uuid(&id), user = %current_user.email))]
pub async fn delete_order(State(state): State<AppState>, Path(id): Path<OrderId>, current_user: CurrentUser) -> Result<StatusCode> {
    let existing = find_order(&state, id).await?;
    policy::ensure_owner_or_admin(&current_user, &existing, Operation::Delete, format!("order {}", abbrev_uuid(&id)))?;

    state.stores.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
