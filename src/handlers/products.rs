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
use crate::db::models::{Product, UserRole};
use crate::error::AppError;
use crate::handlers::Pagination;
use crate::middleware::auth::AuthUser;
use crate::response::ServiceReturn;
use crate::services::products::NewProduct;
use crate::validation;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: BigDecimal,
}

pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    if user.role != UserRole::Vendor {
        return Ok(ServiceReturn::failure(401, "Only vendors can create products"));
    }

    validation::validate_required("name", &payload.name)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validation::validate_max_len("name", &payload.name, validation::PRODUCT_NAME_MAX_LEN)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validation::validate_price("price", &payload.price)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let input = NewProduct {
        name: payload.name,
        description: payload.description,
        price: payload.price,
    };

    Ok(state.products.create_product(&user, input).await?)
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Product listing", body = [Product])
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let limit = pagination.limit.unwrap_or(20);
    let offset = pagination.offset.unwrap_or(0);

    Ok(state.products.list_products(limit, offset).await?)
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(state.products.get_product(id).await?)
}
