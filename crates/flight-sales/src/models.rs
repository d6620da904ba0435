use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// A stored row of the `flight_sales` table.
///
/// `NUMERIC` columns are read back through a `float8` cast, see
/// [`crate::database::Database::recent_flight_sales`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FlightSale {
    pub id: i64,
    pub purchase_datetime: Option<OffsetDateTime>,
    pub base_price: Option<f64>,
    pub fees: Option<f64>,
    pub client_id: Option<i32>,
    pub departure_datetime: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Business columns of a flight sale ready for insertion.
///
/// Bookkeeping timestamps are assigned by the database at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFlightSale {
    pub purchase_datetime: OffsetDateTime,
    pub base_price: f64,
    pub fees: f64,
    pub client_id: i32,
    pub departure_datetime: OffsetDateTime,
}

impl NewFlightSale {
    /// Price paid including fees.
    pub fn total_price(&self) -> f64 {
        self.base_price + self.fees
    }

    pub fn departs_after_purchase(&self) -> bool {
        self.departure_datetime >= self.purchase_datetime
    }
}
