use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{CustomerId, Money, Order, OrderRecord, OrderStatus, ProductId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{OrderId, Result, StoreError, Version, store::OrderStore};

const SELECT_COLUMNS: &str = "order_id, version, customer_id, product_id, quantity, \
     total_amount_cents, status, failure_reason, created_at, updated_at";

/// PostgreSQL-backed order store implementation.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let status: String = row.try_get("status")?;
        let status: OrderStatus = status
            .parse()
            .map_err(|e: domain::order::UnknownStatus| StoreError::InvalidRecord(e.to_string()))?;

        let quantity: i64 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity)
            .map_err(|_| StoreError::InvalidRecord(format!("quantity out of range: {quantity}")))?;

        let record = OrderRecord {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("order_id")?),
            version: Version::new(row.try_get("version")?),
            customer_id: CustomerId::new(row.try_get::<String, _>("customer_id")?),
            product_id: ProductId::new(row.try_get::<String, _>("product_id")?),
            quantity,
            total_amount: Money::from_cents(row.try_get("total_amount_cents")?),
            status,
            failure_reason: row.try_get("failure_reason")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        };

        Ok(record.into())
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn insert(&self, order: &Order) -> Result<Version> {
        let version = Version::first();

        sqlx::query(
            r#"
            INSERT INTO orders (order_id, version, customer_id, product_id, quantity,
                                total_amount_cents, status, failure_reason, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(version.as_i64())
        .bind(order.customer_id().as_str())
        .bind(order.product_id().as_str())
        .bind(i64::from(order.quantity()))
        .bind(order.total_amount().cents())
        .bind(order.status().as_str())
        .bind(order.failure_reason())
        .bind(order.created_at())
        .bind(order.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Primary key violation means the ID is already taken
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("orders_pkey")
            {
                return StoreError::DuplicateOrder(order.id());
            }
            StoreError::Database(e)
        })?;

        metrics::counter!("order_store_writes_total", "op" => "insert").increment(1);
        Ok(version)
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE order_id = $1"
        ))
        .bind(order_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order).transpose()
    }

    #[tracing::instrument(
        skip(self, order),
        fields(order_id = %order.id(), status = %order.status())
    )]
    async fn update(&self, order: &Order) -> Result<Version> {
        let expected = order.version();
        let next = expected.next();

        // Only the lifecycle columns change after creation
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET version = $2, status = $3, failure_reason = $4, updated_at = $5
            WHERE order_id = $1 AND version = $6
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(next.as_i64())
        .bind(order.status().as_str())
        .bind(order.failure_reason())
        .bind(order.updated_at())
        .bind(expected.as_i64())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let actual: Option<i64> =
                sqlx::query_scalar("SELECT version FROM orders WHERE order_id = $1")
                    .bind(order.id().as_uuid())
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match actual {
                Some(actual) => StoreError::ConcurrencyConflict {
                    order_id: order.id(),
                    expected,
                    actual: Version::new(actual),
                },
                None => StoreError::OrderNotFound(order.id()),
            });
        }

        metrics::counter!("order_store_writes_total", "op" => "update").increment(1);
        Ok(next)
    }

    async fn list(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders ORDER BY created_at ASC, order_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_order).collect()
    }
}
