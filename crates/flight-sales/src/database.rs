use crate::errors::AppError;
use crate::models::{FlightSale, NewFlightSale};
use sqlx::PgPool;
use time::OffsetDateTime;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts all `sales` with a single statement and returns the number of rows written.
    ///
    /// Columns are bound as arrays and expanded with `UNNEST`, so the statement
    /// carries five parameters whatever the batch size. The insert is atomic:
    /// either the whole batch lands or none of it does.
    pub async fn insert_flight_sales(&self, sales: &[NewFlightSale]) -> Result<u64, AppError> {
        if sales.is_empty() {
            return Ok(0);
        }

        let mut purchases: Vec<OffsetDateTime> = Vec::with_capacity(sales.len());
        let mut base_prices: Vec<f64> = Vec::with_capacity(sales.len());
        let mut fees: Vec<f64> = Vec::with_capacity(sales.len());
        let mut client_ids: Vec<i32> = Vec::with_capacity(sales.len());
        let mut departures: Vec<OffsetDateTime> = Vec::with_capacity(sales.len());

        for sale in sales {
            purchases.push(sale.purchase_datetime);
            base_prices.push(sale.base_price);
            fees.push(sale.fees);
            client_ids.push(sale.client_id);
            departures.push(sale.departure_datetime);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO flight_sales (
                purchase_datetime, base_price, fees, client_id, departure_datetime,
                created_at, updated_at
            )
            SELECT purchase_datetime, base_price::numeric, fees::numeric, client_id,
                   departure_datetime, NOW(), NOW()
            FROM UNNEST($1::timestamptz[], $2::float8[], $3::float8[], $4::int4[], $5::timestamptz[])
                AS t(purchase_datetime, base_price, fees, client_id, departure_datetime)
            "#,
        )
        .bind(purchases)
        .bind(base_prices)
        .bind(fees)
        .bind(client_ids)
        .bind(departures)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_flight_sales(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flight_sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Returns the most recently inserted rows, newest first.
    pub async fn recent_flight_sales(&self, limit: i64) -> Result<Vec<FlightSale>, AppError> {
        let sales: Vec<FlightSale> = sqlx::query_as(
            r#"
            SELECT id, purchase_datetime, base_price::float8 AS base_price,
                   fees::float8 AS fees, client_id, departure_datetime,
                   created_at, updated_at
            FROM flight_sales
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Deletes every flight sale. Returns the number of rows removed.
    pub async fn clear_flight_sales(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM flight_sales")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
