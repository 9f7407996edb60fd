//! [`Scooter`] definitions.

use std::str::FromStr;

use common::Money;
use derive_more::{AsRef, Display, Into};
use rust_decimal::Decimal;

/// Scooter available for rent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scooter {
    /// ID of this [`Scooter`].
    pub id: Id,

    /// [`PricePerMinute`] of renting this [`Scooter`].
    pub price_per_minute: PricePerMinute,

    /// Indicator whether this [`Scooter`] is rented at the moment.
    pub is_rented: bool,
}

impl Scooter {
    /// Creates a new [`Scooter`] which is not rented yet.
    #[must_use]
    pub fn new(id: Id, price_per_minute: PricePerMinute) -> Self {
        Self {
            id,
            price_per_minute,
            is_rented: false,
        }
    }
}

/// ID of a [`Scooter`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        id.trim() == id && !id.is_empty()
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `scooter::Id`")
    }
}

/// Price of renting a [`Scooter`] for a single minute.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct PricePerMinute(Money);

impl PricePerMinute {
    /// Minimal allowed [`PricePerMinute`].
    pub const MIN: Self =
        Self(Money::new(Decimal::from_parts(1, 0, 0, false, 2)));

    /// Creates a new [`PricePerMinute`] if the given `price` is not less than
    /// the [`PricePerMinute::MIN`].
    #[must_use]
    pub fn new(price: Money) -> Option<Self> {
        (price >= Self::MIN.0).then_some(Self(price))
    }

    /// Returns this [`PricePerMinute`] as [`Money`].
    #[must_use]
    pub const fn money(self) -> Money {
        self.0
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Money;

    use super::{Id, PricePerMinute};

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn id_is_trimmed_and_not_empty() {
        assert!(Id::from_str("1").is_ok());
        assert!(Id::from_str("scooter-42").is_ok());

        assert!(Id::from_str("").is_err());
        assert!(Id::from_str(" 1").is_err());
        assert!(Id::from_str("1 ").is_err());
        assert!(Id::from_str(&"x".repeat(1000)).is_ok());
    }

    #[test]
    fn price_per_minute_has_lower_bound() {
        assert_eq!(PricePerMinute::MIN.money(), money("0.01"));

        assert!(PricePerMinute::new(money("0.01")).is_some());
        assert!(PricePerMinute::new(money("0.2")).is_some());

        assert!(PricePerMinute::new(money("0.009")).is_none());
        assert!(PricePerMinute::new(money("0")).is_none());
        assert!(PricePerMinute::new(money("-1")).is_none());
    }
}
