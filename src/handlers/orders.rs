use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::{OrderDetail, OrderStatus, UserRole};
use crate::error::AppError;
use crate::handlers::Pagination;
use crate::middleware::auth::AuthUser;
use crate::response::ServiceReturn;
use crate::services::orders::{NewOrder, NewOrderItem, OrderCharge, PaymentData};
use crate::validation;

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemPayload {
    pub product_id: Uuid,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub price: BigDecimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentPayload {
    pub method: String,
    pub transaction_ref: String,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderPayload {
    pub vendor_id: Uuid,
    pub items: Vec<OrderItemPayload>,
    pub payment_data: Option<PaymentPayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    pub status: OrderStatus,
}

fn validate_payment(payment: &PaymentPayload) -> Result<(), AppError> {
    validation::validate_required("method", &payment.method)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validation::validate_max_len(
        "method",
        &payment.method,
        validation::PAYMENT_METHOD_MAX_LEN,
    )
    .map_err(|e| AppError::Validation(e.to_string()))?;
    validation::validate_max_len(
        "transaction_ref",
        &payment.transaction_ref,
        validation::TRANSACTION_REF_MAX_LEN,
    )
    .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderPayload,
    responses(
        (status = 201, description = "Order placed", body = OrderDetail),
        (status = 400, description = "Invalid order payload"),
        (status = 401, description = "Caller is not a customer")
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PlaceOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    if user.role != UserRole::Customer {
        return Ok(ServiceReturn::failure(401, "Only customers can place orders"));
    }

    validation::validate_not_empty("items", &payload.items)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    for item in &payload.items {
        validation::validate_positive_quantity(item.quantity)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validation::validate_price("price", &item.price)
            .map_err(|e| AppError::Validation(e.to_string()))?;
    }
    if let Some(payment) = &payload.payment_data {
        validate_payment(payment)?;
    }

    let input = NewOrder {
        vendor_id: payload.vendor_id,
        items: payload
            .items
            .into_iter()
            .map(|item| NewOrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
        charge: match payload.payment_data {
            Some(payment) => OrderCharge::UpFront(PaymentData {
                method: payment.method,
                transaction_ref: payment.transaction_ref,
                amount: payment.amount,
            }),
            None => OrderCharge::PayLater,
        },
    };

    Ok(state.orders.place_order(&user, input).await?)
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Populated order", body = OrderDetail),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(state.orders.get_order(id).await?)
}

pub async fn list_my_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let limit = pagination.limit.unwrap_or(20);
    let offset = pagination.offset.unwrap_or(0);

    Ok(state.orders.list_for_buyer(&user, limit, offset).await?)
}

pub async fn list_vendor_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let limit = pagination.limit.unwrap_or(20);
    let offset = pagination.offset.unwrap_or(0);

    Ok(state.orders.list_for_vendor(&user, limit, offset).await?)
}

pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    if user.role == UserRole::Customer {
        return Ok(ServiceReturn::failure(
            401,
            "Only vendors can update order status",
        ));
    }

    Ok(state.orders.update_status(&user, id, payload.status).await?)
}

pub async fn confirm_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_payment(&payload)?;

    let payment = PaymentData {
        method: payload.method,
        transaction_ref: payload.transaction_ref,
        amount: payload.amount,
    };

    Ok(state.orders.confirm_payment(&user, id, payment).await?)
}
