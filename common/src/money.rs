//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use derive_more::{Add, AddAssign, From, Into, Sum};
use rust_decimal::Decimal;

/// Amount of money.
#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Sum,
)]
pub struct Money(Decimal);

impl Money {
    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Money`] of the provided amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Multiplies this [`Money`] by the provided factor, clamping the result
    /// to the representable range instead of overflowing.
    #[must_use]
    pub fn saturating_mul(self, factor: Decimal) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| "invalid amount")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::Money;

    impl Serialize for Money {
        fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
            ser.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
            let s = String::deserialize(de)?;
            Self::from_str(&s).map_err(|e| {
                de::Error::custom(format!("cannot parse `Money` from `{s}`: {e}"))
            })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45").unwrap(),
            Money::new(decimal("123.45")),
        );
        assert_eq!(Money::from_str(" 20 ").unwrap(), Money::new(decimal("20")));
        assert_eq!(
            Money::from_str("-0.01").unwrap(),
            Money::new(decimal("-0.01")),
        );

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("12USD").is_err());
        assert!(Money::from_str("one").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::new(decimal("123.45")).to_string(), "123.45");
        assert_eq!(Money::new(decimal("123.00")).to_string(), "123");
        assert_eq!(Money::new(decimal("2.0")).to_string(), "2");
        assert_eq!(Money::new(decimal("0.20")).to_string(), "0.2");
    }

    #[test]
    fn arithmetic() {
        let rate = Money::new(decimal("0.2"));

        assert_eq!(
            rate.saturating_mul(decimal("10")),
            Money::new(decimal("2")),
        );
        assert_eq!(
            [rate, rate, Money::new(decimal("1.6"))].into_iter().sum::<Money>(),
            Money::new(decimal("2")),
        );
        assert_eq!(rate + Money::ZERO, rate);
        assert!(Money::new(decimal("20")) > Money::new(decimal("19.99")));
    }

    #[test]
    fn saturates_on_overflow() {
        assert_eq!(
            Money::new(Decimal::MAX).saturating_mul(decimal("10")),
            Money::new(Decimal::MAX),
        );
        assert_eq!(
            Money::new(Decimal::MAX).saturating_mul(decimal("-2")),
            Money::new(Decimal::MIN),
        );
    }
}
