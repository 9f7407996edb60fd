//! Rental price [`Calculator`].

use std::time::Duration;

use common::{datetime::DAY, DateTime, Money};
use derive_more::{Display, Error};
use rust_decimal::Decimal;

use crate::domain::{scooter::PricePerMinute, Ride};

/// Calculator of [`Ride`] prices.
///
/// Rides are charged per minute, but no more than the daily maximum for each
/// calendar day they touch. Rides lasting more than two calendar days are
/// split into:
/// - the first day, charged at the daily maximum if the time left until its
///   midnight costs at least that much, and not charged at all otherwise;
/// - the full days in between, each charged at the daily maximum;
/// - the last day, charged per minute since its midnight, capped at the daily
///   maximum.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Calculator {
    /// Maximum price charged for a single calendar day.
    daily_max: Money,
}

impl Calculator {
    /// Daily maximum used when none is configured.
    pub const DEFAULT_DAILY_MAX: Money =
        Money::new(Decimal::from_parts(20, 0, 0, false, 0));

    /// Creates a new [`Calculator`] capping prices at the provided
    /// `daily_max`.
    #[must_use]
    pub const fn new(daily_max: Money) -> Self {
        Self { daily_max }
    }

    /// Returns the maximum price charged for a single calendar day.
    #[must_use]
    pub const fn daily_max(&self) -> Money {
        self.daily_max
    }

    /// Calculates the price of a ride lasting from `start` till `end`.
    ///
    /// # Errors
    ///
    /// With [`InvalidTimeRange`] if the `start` is not before the `end`.
    pub fn rental_price(
        &self,
        start: DateTime,
        end: DateTime,
        price_per_minute: PricePerMinute,
    ) -> Result<Money, InvalidTimeRange> {
        if start >= end {
            return Err(InvalidTimeRange { start, end });
        }
        // Charges beyond `Decimal` range saturate, so they hit the cap.
        let rate = price_per_minute.money();

        let days = end.days_since(&start);
        if days <= 1 {
            return Ok(self.capped(rate.saturating_mul(minutes(end - start))));
        }

        let first_day_left = DAY.saturating_sub(start.since_midnight());
        let first_day = if rate.saturating_mul(minutes(first_day_left))
            >= self.daily_max
        {
            self.daily_max
        } else {
            Money::ZERO
        };
        let full_days = self.daily_max.saturating_mul(Decimal::from(days - 1));
        let last_day =
            self.capped(rate.saturating_mul(minutes(end.since_midnight())));

        Ok(first_day + full_days + last_day)
    }

    /// Sums prices of the provided completed [`Ride`]s.
    ///
    /// Active [`Ride`]s have no price yet, so are skipped.
    #[expect(clippy::unused_self, reason = "part of the calculator API")]
    #[must_use]
    pub fn income<'r>(&self, rides: impl IntoIterator<Item = &'r Ride>) -> Money {
        rides.into_iter().filter_map(|r| r.price).sum()
    }

    /// Caps the provided `price` at the daily maximum.
    fn capped(&self, price: Money) -> Money {
        price.min(self.daily_max)
    }
}

/// Converts the provided [`Duration`] into fractional minutes.
fn minutes(duration: Duration) -> Decimal {
    let secs = Decimal::from(duration.as_secs())
        + Decimal::new(i64::from(duration.subsec_micros()), 6);
    secs / Decimal::from(60)
}

/// Error of a price calculation for a ride not ending after its start.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display(
    "ride cannot end at `{}` when it starts at `{}`",
    end.to_rfc3339(),
    start.to_rfc3339()
)]
pub struct InvalidTimeRange {
    /// Start of the rejected time range.
    pub start: DateTime,

    /// End of the rejected time range.
    pub end: DateTime,
}
