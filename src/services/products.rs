use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Product, ProductDetail};
use crate::db::queries;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::response::ServiceReturn;
use crate::validation::sanitize_string;

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
}

#[derive(Clone)]
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_product(
        &self,
        caller: &AuthUser,
        input: NewProduct,
    ) -> Result<ServiceReturn<Product>, AppError> {
        let Some(vendor) = queries::get_vendor_by_email(&self.pool, &caller.email).await? else {
            return Ok(ServiceReturn::failure(
                404,
                "Vendor not found with that token",
            ));
        };

        let product = queries::insert_product(
            &self.pool,
            &Product::new(
                vendor.id,
                sanitize_string(&input.name),
                input.description,
                input.price,
            ),
        )
        .await?;

        tracing::info!("Product {} created by vendor {}", product.id, vendor.id);

        Ok(ServiceReturn::created(
            "New product created successfully",
            product,
        ))
    }

    pub async fn get_product(&self, id: Uuid) -> Result<ServiceReturn<ProductDetail>, AppError> {
        match queries::get_product_detail(&self.pool, id).await? {
            Some(detail) => Ok(ServiceReturn::ok("Product retrieved successfully", detail)),
            None => Ok(ServiceReturn::failure(
                404,
                format!("Product {} not found", id),
            )),
        }
    }

    pub async fn list_products(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<ServiceReturn<Vec<Product>>, AppError> {
        let products = queries::list_products(&self.pool, limit, offset).await?;

        Ok(ServiceReturn::ok("Products retrieved successfully", products))
    }
}
