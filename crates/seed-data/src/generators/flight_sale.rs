//! Flight sale generation.

use std::ops::RangeInclusive;

use fake::Fake;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use time::{Duration, OffsetDateTime};

use flight_sales::NewFlightSale;

/// Configuration for flight sale generation.
#[derive(Debug, Clone)]
pub struct FlightSaleGenConfig {
    /// How far back purchases may go, in calendar years before the anchor.
    pub purchase_window_years: u32,
    /// How far after purchase a departure may be, in calendar years.
    pub departure_window_years: u32,
    /// Ticket price excluding fees.
    pub base_price_range: RangeInclusive<f64>,
    /// Additional charges.
    pub fees_range: RangeInclusive<f64>,
    /// Number of decimal digits in a client id, 1 to 9 (an `i32` holds at most 9).
    pub client_id_digits: u32,
}

impl Default for FlightSaleGenConfig {
    fn default() -> Self {
        Self {
            purchase_window_years: 5,
            departure_window_years: 1,
            base_price_range: 100.0..=1000.0,
            fees_range: 10.0..=100.0,
            client_id_digits: 6,
        }
    }
}

/// Generates synthetic flight sales.
///
/// Holds no mutable state: given the same anchor and RNG state it yields
/// the same records.
pub struct FlightSaleGenerator {
    config: FlightSaleGenConfig,
    now: OffsetDateTime,
    purchase_from: OffsetDateTime,
    purchase_offsets: Uniform<i64>,
}

impl FlightSaleGenerator {
    /// Creates a generator with default configuration anchored at the current time.
    pub fn new() -> Self {
        Self::with_config(FlightSaleGenConfig::default())
    }

    /// Creates a generator with custom configuration anchored at the current time.
    pub fn with_config(config: FlightSaleGenConfig) -> Self {
        Self::build(config, OffsetDateTime::now_utc())
    }

    /// Re-anchors the purchase window so that it ends at `now`.
    pub fn anchored_at(self, now: OffsetDateTime) -> Self {
        Self::build(self.config, now)
    }

    fn build(config: FlightSaleGenConfig, now: OffsetDateTime) -> Self {
        // Postgres keeps microseconds; whole seconds keep stored rows equal to generated ones
        let now = now - Duration::nanoseconds(i64::from(now.nanosecond()));
        let purchase_from = shift_years(now, -(config.purchase_window_years as i32));
        let purchase_offsets = Uniform::new_inclusive(0, (now - purchase_from).whole_seconds());

        Self {
            config,
            now,
            purchase_from,
            purchase_offsets,
        }
    }

    /// End of the purchase window.
    pub fn now(&self) -> OffsetDateTime {
        self.now
    }

    /// Start of the purchase window.
    pub fn purchase_from(&self) -> OffsetDateTime {
        self.purchase_from
    }

    /// Generates a single flight sale.
    pub fn generate(&self, rng: &mut impl Rng) -> NewFlightSale {
        let purchase_datetime =
            self.purchase_from + Duration::seconds(self.purchase_offsets.sample(rng));

        let departure_until = shift_years(
            purchase_datetime,
            self.config.departure_window_years as i32,
        );
        let departure_span = (departure_until - purchase_datetime).whole_seconds();
        let departure_datetime =
            purchase_datetime + Duration::seconds(rng.gen_range(0..=departure_span));

        NewFlightSale {
            purchase_datetime,
            base_price: self.generate_price(&self.config.base_price_range, rng),
            fees: self.generate_price(&self.config.fees_range, rng),
            client_id: self.generate_client_id(rng),
            departure_datetime,
        }
    }

    /// Generates multiple flight sales.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<NewFlightSale> {
        (0..count).map(|_| self.generate(rng)).collect()
    }

    /// Generates a price in `range`, rounded to cents.
    fn generate_price(&self, range: &RangeInclusive<f64>, rng: &mut impl Rng) -> f64 {
        let price: f64 = range.fake_with_rng(rng);
        // Bounds are whole cents, so rounding never leaves the range
        (price * 100.0).round() / 100.0
    }

    /// Generates a number with exactly `client_id_digits` digits and no leading zero.
    /// A single digit may be zero. Digit counts outside 1..=9 are clamped into it.
    fn generate_client_id(&self, rng: &mut impl Rng) -> i32 {
        debug_assert!(
            (1..=9).contains(&self.config.client_id_digits),
            "client_id_digits must be within 1..=9, got {}",
            self.config.client_id_digits
        );
        let digits = self.config.client_id_digits.clamp(1, 9);
        let low = if digits > 1 { 10_i32.pow(digits - 1) } else { 0 };
        let high = 10_i32.pow(digits) - 1;
        (low..=high).fake_with_rng(rng)
    }
}

impl Default for FlightSaleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves `at` by whole calendar years, keeping the time of day.
///
/// Feb 29 lands on Feb 28 in non-leap years. A target year outside the range
/// `time` can represent (beyond +/-9999) leaves `at` unchanged, which collapses
/// the window to a single instant.
fn shift_years(at: OffsetDateTime, years: i32) -> OffsetDateTime {
    let date = at.date();
    let year = date.year() + years;
    date.replace_year(year)
        .or_else(|_| date.replace_day(28).and_then(|d| d.replace_year(year)))
        .map(|d| at.replace_date(d))
        .unwrap_or(at)
}
