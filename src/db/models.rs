use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::BigDecimal;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Vendor,
    Customer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Vendor {
    pub id: Uuid,
    pub email: String,
    pub shop_name: String,
    pub is_blacklisted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        vendor_id: Uuid,
        name: String,
        description: Option<String>,
        price: BigDecimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vendor_id,
            name,
            description,
            price,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vendor_id: Uuid,
    #[schema(value_type = String)]
    pub total_price: BigDecimal,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// New orders always start PENDING and UNPAID; the total is the snapshot
    /// computed from the request items, never re-derived later.
    pub fn new(user_id: Uuid, vendor_id: Uuid, total_price: BigDecimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            vendor_id,
            total_price,
            payment_status: PaymentStatus::Unpaid,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub method: String,
    pub transaction_ref: String,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(order_id: Uuid, method: String, transaction_ref: String, amount: BigDecimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            method,
            transaction_ref,
            amount,
            created_at: Utc::now(),
        }
    }
}

/// One line of a populated order. Unit price comes from the live product row
/// at read time, not from the order item itself.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDetail {
    pub id: i64,
    pub product_id: Uuid,
    pub product_name: String,
    #[schema(value_type = String)]
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

/// Fully populated order returned after placement and on detail reads.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    pub order: Order,
    pub user: User,
    pub vendor: Vendor,
    pub items: Vec<OrderItemDetail>,
    pub payment: Option<Payment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub vendor: Vendor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn new_order_defaults_to_pending_and_unpaid() {
        let order = Order::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            BigDecimal::from_str("25.00").unwrap(),
        );

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
        assert_eq!(order.total_price, BigDecimal::from_str("25.00").unwrap());
    }

    #[test]
    fn enums_serialize_uppercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Unpaid).unwrap(),
            "\"UNPAID\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Customer).unwrap(),
            "\"CUSTOMER\""
        );
    }

    #[test]
    fn enums_deserialize_uppercase() {
        let status: OrderStatus = serde_json::from_str("\"PROCESSING\"").unwrap();
        assert_eq!(status, OrderStatus::Processing);

        let status: PaymentStatus = serde_json::from_str("\"PAID\"").unwrap();
        assert_eq!(status, PaymentStatus::Paid);
    }

    #[test]
    fn payment_references_its_order() {
        let order_id = Uuid::new_v4();
        let payment = Payment::new(
            order_id,
            "card".to_string(),
            "txn_0042".to_string(),
            BigDecimal::from_str("25.00").unwrap(),
        );

        assert_eq!(payment.order_id, order_id);
        assert_eq!(payment.amount, BigDecimal::from_str("25.00").unwrap());
    }
}
