use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Order, OrderDetail, OrderStatus, Payment, PaymentStatus, UserRole};
use crate::db::queries;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::response::ServiceReturn;

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct PaymentData {
    pub method: String,
    pub transaction_ref: String,
    pub amount: BigDecimal,
}

/// Payment-at-placement is a tagged variant rather than a nullable field, so
/// the UNPAID and PAID creation paths are matched exhaustively.
#[derive(Debug, Clone)]
pub enum OrderCharge {
    PayLater,
    UpFront(PaymentData),
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub vendor_id: Uuid,
    pub items: Vec<NewOrderItem>,
    pub charge: OrderCharge,
}

#[derive(Clone)]
pub struct OrderService {
    pool: PgPool,
}

impl OrderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Place an order: one atomic transaction covering the order row, its
    /// items and, when payment data is supplied, the payment row plus the
    /// PAID flip. Any sub-write failure rolls the whole placement back; there
    /// is no retry and no partial order. No deduplication key exists, so
    /// identical requests create distinct orders.
    pub async fn place_order(
        &self,
        buyer: &AuthUser,
        input: NewOrder,
    ) -> Result<ServiceReturn<OrderDetail>, AppError> {
        // Total is snapshotted from the request prices before any write.
        let total_price = input
            .items
            .iter()
            .map(|item| BigDecimal::from(item.quantity) * &item.price)
            .fold(BigDecimal::from(0), |acc, x| acc + x);

        let mut tx = self.pool.begin().await?;

        let order =
            queries::insert_order(&mut tx, &Order::new(buyer.id, input.vendor_id, total_price))
                .await?;

        for item in &input.items {
            queries::insert_order_item(&mut tx, order.id, item.product_id, item.quantity).await?;
        }

        match &input.charge {
            OrderCharge::PayLater => {}
            OrderCharge::UpFront(payment) => {
                queries::insert_payment(
                    &mut tx,
                    &Payment::new(
                        order.id,
                        payment.method.clone(),
                        payment.transaction_ref.clone(),
                        payment.amount.clone(),
                    ),
                )
                .await?;
                queries::mark_order_paid(&mut tx, order.id).await?;
            }
        }

        tx.commit().await?;

        let detail = queries::get_order_detail(&self.pool, order.id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Order {} missing after commit", order.id)))?;

        tracing::info!(
            "Order {} placed by user {} ({} items, total {})",
            order.id,
            buyer.id,
            detail.items.len(),
            detail.order.total_price
        );

        Ok(ServiceReturn::created("Order placed successfully", detail))
    }

    pub async fn get_order(&self, id: Uuid) -> Result<ServiceReturn<OrderDetail>, AppError> {
        match queries::get_order_detail(&self.pool, id).await? {
            Some(detail) => Ok(ServiceReturn::ok("Order retrieved successfully", detail)),
            None => Ok(ServiceReturn::failure(404, format!("Order {} not found", id))),
        }
    }

    pub async fn list_for_buyer(
        &self,
        buyer: &AuthUser,
        limit: i64,
        offset: i64,
    ) -> Result<ServiceReturn<Vec<Order>>, AppError> {
        let orders = queries::list_orders_for_user(&self.pool, buyer.id, limit, offset).await?;

        Ok(ServiceReturn::ok("Orders retrieved successfully", orders))
    }

    pub async fn list_for_vendor(
        &self,
        caller: &AuthUser,
        limit: i64,
        offset: i64,
    ) -> Result<ServiceReturn<Vec<Order>>, AppError> {
        let Some(vendor) = queries::get_vendor_by_email(&self.pool, &caller.email).await? else {
            return Ok(ServiceReturn::failure(
                404,
                "Vendor not found with that token",
            ));
        };

        let orders = queries::list_orders_for_vendor(&self.pool, vendor.id, limit, offset).await?;

        Ok(ServiceReturn::ok("Orders retrieved successfully", orders))
    }

    /// Vendors may only move their own orders; admins may move any.
    pub async fn update_status(
        &self,
        caller: &AuthUser,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<ServiceReturn<OrderDetail>, AppError> {
        let Some(order) = queries::get_order(&self.pool, order_id).await? else {
            return Ok(ServiceReturn::failure(
                404,
                format!("Order {} not found", order_id),
            ));
        };

        if caller.role != UserRole::Admin {
            let Some(vendor) = queries::get_vendor_by_email(&self.pool, &caller.email).await?
            else {
                return Ok(ServiceReturn::failure(
                    400,
                    "Order owner not exist or black listed",
                ));
            };

            if order.vendor_id != vendor.id {
                return Ok(ServiceReturn::failure(
                    401,
                    "You cannot update another vendor's order",
                ));
            }
        }

        queries::update_order_status(&self.pool, order_id, status).await?;

        let detail = queries::get_order_detail(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Order {} missing after update", order_id)))?;

        tracing::info!("Order {} moved to {:?} by {}", order_id, status, caller.id);

        Ok(ServiceReturn::ok("Order status updated successfully", detail))
    }

    /// Deferred payment for an UNPAID order: payment insert and the PAID flip
    /// commit or roll back together, same as the placement path.
    pub async fn confirm_payment(
        &self,
        buyer: &AuthUser,
        order_id: Uuid,
        payment: PaymentData,
    ) -> Result<ServiceReturn<OrderDetail>, AppError> {
        let Some(order) = queries::get_order(&self.pool, order_id).await? else {
            return Ok(ServiceReturn::failure(
                404,
                format!("Order {} not found", order_id),
            ));
        };

        if order.user_id != buyer.id {
            return Ok(ServiceReturn::failure(
                401,
                "You cannot pay for another user's order",
            ));
        }

        if order.payment_status == PaymentStatus::Paid {
            return Ok(ServiceReturn::failure(400, "Order is already paid"));
        }

        let mut tx = self.pool.begin().await?;

        queries::insert_payment(
            &mut tx,
            &Payment::new(
                order.id,
                payment.method,
                payment.transaction_ref,
                payment.amount,
            ),
        )
        .await?;
        queries::mark_order_paid(&mut tx, order.id).await?;

        tx.commit().await?;

        let detail = queries::get_order_detail(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Order {} missing after payment", order_id)))?;

        tracing::info!("Payment recorded for order {} by user {}", order_id, buyer.id);

        Ok(ServiceReturn::ok("Payment recorded successfully", detail))
    }
}
