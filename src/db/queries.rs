use sqlx::{PgPool, Postgres, Result, Transaction as SqlxTransaction};
use crate::db::models::{
    Order, OrderDetail, OrderItem, OrderItemDetail, OrderStatus, Payment, Product, ProductDetail,
    User, Vendor,
};
use uuid::Uuid;

// --- Order writes (run inside the placement transaction) ---

pub async fn insert_order(
    executor: &mut SqlxTransaction<'_, Postgres>,
    order: &Order,
) -> Result<Order> {
    sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (
            id, user_id, vendor_id, total_price, payment_status, status, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(order.id)
    .bind(order.user_id)
    .bind(order.vendor_id)
    .bind(&order.total_price)
    .bind(order.payment_status)
    .bind(order.status)
    .bind(order.created_at)
    .fetch_one(&mut **executor)
    .await
}

pub async fn insert_order_item(
    executor: &mut SqlxTransaction<'_, Postgres>,
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> Result<OrderItem> {
    sqlx::query_as::<_, OrderItem>(
        r#"
        INSERT INTO order_items (order_id, product_id, quantity)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(&mut **executor)
    .await
}

pub async fn insert_payment(
    executor: &mut SqlxTransaction<'_, Postgres>,
    payment: &Payment,
) -> Result<Payment> {
    sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (id, order_id, method, transaction_ref, amount, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(payment.id)
    .bind(payment.order_id)
    .bind(&payment.method)
    .bind(&payment.transaction_ref)
    .bind(&payment.amount)
    .bind(payment.created_at)
    .fetch_one(&mut **executor)
    .await
}

pub async fn mark_order_paid(
    executor: &mut SqlxTransaction<'_, Postgres>,
    order_id: Uuid,
) -> Result<()> {
    sqlx::query("UPDATE orders SET payment_status = 'PAID' WHERE id = $1")
        .bind(order_id)
        .execute(&mut **executor)
        .await?;

    Ok(())
}

// --- Order reads ---

pub async fn get_order(pool: &PgPool, id: Uuid) -> Result<Option<Order>> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_order_items(pool: &PgPool, order_id: Uuid) -> Result<Vec<OrderItemDetail>> {
    sqlx::query_as::<_, OrderItemDetail>(
        r#"
        SELECT oi.id, oi.product_id, p.name AS product_name, p.price AS unit_price, oi.quantity
        FROM order_items oi
        JOIN products p ON p.id = oi.product_id
        WHERE oi.order_id = $1
        ORDER BY oi.id
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
}

pub async fn get_payment_for_order(pool: &PgPool, order_id: Uuid) -> Result<Option<Payment>> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE order_id = $1")
        .bind(order_id)
        .fetch_optional(pool)
        .await
}

/// Populated read used for order responses: the order row plus its vendor,
/// items (with live product detail) and payment, when one exists.
pub async fn get_order_detail(pool: &PgPool, id: Uuid) -> Result<Option<OrderDetail>> {
    let Some(order) = get_order(pool, id).await? else {
        return Ok(None);
    };

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(order.user_id)
        .fetch_one(pool)
        .await?;
    let vendor = sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE id = $1")
        .bind(order.vendor_id)
        .fetch_one(pool)
        .await?;
    let items = get_order_items(pool, id).await?;
    let payment = get_payment_for_order(pool, id).await?;

    Ok(Some(OrderDetail {
        order,
        user,
        vendor,
        items,
        payment,
    }))
}

pub async fn list_orders_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Order>> {
    sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn list_orders_for_vendor(
    pool: &PgPool,
    vendor_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Order>> {
    sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE vendor_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(vendor_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn update_order_status(
    pool: &PgPool,
    id: Uuid,
    status: OrderStatus,
) -> Result<Option<Order>> {
    sqlx::query_as::<_, Order>("UPDATE orders SET status = $1 WHERE id = $2 RETURNING *")
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await
}

// --- Vendor queries ---

pub async fn get_vendor_by_email(pool: &PgPool, email: &str) -> Result<Option<Vendor>> {
    sqlx::query_as::<_, Vendor>(
        "SELECT * FROM vendors WHERE email = $1 AND is_blacklisted = FALSE",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

// --- Product queries ---

pub async fn insert_product(pool: &PgPool, product: &Product) -> Result<Product> {
    sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (id, vendor_id, name, description, price, is_deleted, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(product.id)
    .bind(product.vendor_id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(&product.price)
    .bind(product.is_deleted)
    .bind(product.created_at)
    .fetch_one(pool)
    .await
}

pub async fn get_product_detail(pool: &PgPool, id: Uuid) -> Result<Option<ProductDetail>> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE id = $1 AND is_deleted = FALSE",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(product) = product else {
        return Ok(None);
    };

    let vendor = sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE id = $1")
        .bind(product.vendor_id)
        .fetch_one(pool)
        .await?;

    Ok(Some(ProductDetail { product, vendor }))
}

pub async fn list_products(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Product>> {
    sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE is_deleted = FALSE ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
