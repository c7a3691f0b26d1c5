pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod services;
pub mod validation;

use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use crate::services::{OrderService, ProductService};

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub orders: OrderService,
    pub products: ProductService,
}

impl AppState {
    /// Services share the one pool handle; it is opened in `main` and owned
    /// here for the life of the process.
    pub fn new(db: sqlx::PgPool) -> Self {
        Self {
            orders: OrderService::new(db.clone()),
            products: ProductService::new(db.clone()),
            db,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::orders::place_order,
        handlers::orders::get_order,
        handlers::products::list_products,
    ),
    components(schemas(
        handlers::HealthStatus,
        handlers::DbPoolStats,
        handlers::orders::PlaceOrderPayload,
        handlers::orders::OrderItemPayload,
        handlers::orders::PaymentPayload,
        handlers::orders::UpdateStatusPayload,
        handlers::products::ProductPayload,
        db::models::Order,
        db::models::OrderItem,
        db::models::OrderItemDetail,
        db::models::OrderDetail,
        db::models::Payment,
        db::models::Product,
        db::models::ProductDetail,
        db::models::User,
        db::models::Vendor,
        db::models::OrderStatus,
        db::models::PaymentStatus,
        db::models::UserRole,
    ))
)]
pub struct ApiDoc;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route("/api/orders", post(handlers::orders::place_order))
        .route("/api/orders/my", get(handlers::orders::list_my_orders))
        .route(
            "/api/orders/vendor",
            get(handlers::orders::list_vendor_orders),
        )
        .route("/api/orders/:id", get(handlers::orders::get_order))
        .route(
            "/api/orders/:id/status",
            patch(handlers::orders::update_order_status),
        )
        .route(
            "/api/orders/:id/payment",
            post(handlers::orders::confirm_payment),
        )
        .route(
            "/api/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/api/products/:id", get(handlers::products::get_product))
        .layer(cors)
        .with_state(state)
}
