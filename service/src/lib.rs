//! Service contains the business logic of the scooter rental.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use common::{Money, SystemClock};
use smart_default::SmartDefault;
// Used in `define_kind!` expansion.
use strum as _;

#[cfg(doc)]
use infra::Database;

use self::domain::rent;

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Name of the rental company.
    #[default("Scooter rental".to_owned())]
    pub name: String,

    /// Maximum price charged for a single calendar day of a ride.
    #[default(rent::Calculator::DEFAULT_DAILY_MAX)]
    pub daily_max: Money,
}

/// Domain service of a rental company.
#[derive(Clone, Debug)]
pub struct Service<Db, Clk = SystemClock> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`rent::Calculator`] of this [`Service`].
    calculator: rent::Calculator,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Clock`] of this [`Service`].
    ///
    /// [`Clock`]: common::Clock
    clock: Clk,
}

impl<Db, Clk> Service<Db, Clk> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db, clock: Clk) -> Self {
        let calculator = rent::Calculator::new(config.daily_max);
        Self {
            config,
            calculator,
            database,
            clock,
        }
    }

    /// Returns name of the rental company served by this [`Service`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns [`rent::Calculator`] of this [`Service`].
    #[must_use]
    pub fn calculator(&self) -> &rent::Calculator {
        &self.calculator
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Clock`] of this [`Service`].
    ///
    /// [`Clock`]: common::Clock
    #[must_use]
    pub fn clock(&self) -> &Clk {
        &self.clock
    }
}

#[cfg(all(test, feature = "memory"))]
mod testing {
    //! Helpers for testing [`Service`] operations.

    use common::{DateTime, ManualClock, Money};

    use crate::{
        domain::{scooter, Scooter},
        infra::Memory,
        Config, Service,
    };

    /// [`Service`] with an in-memory database and a manual clock.
    pub(crate) type TestService = Service<Memory, ManualClock>;

    pub(crate) fn at(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    pub(crate) fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    pub(crate) fn id(s: &str) -> scooter::Id {
        s.parse().unwrap()
    }

    pub(crate) fn scooter(id: &str, price: &str) -> Scooter {
        Scooter::new(
            self::id(id),
            scooter::PricePerMinute::new(money(price)).unwrap(),
        )
    }

    /// Creates a new [`TestService`] over the provided database, with the
    /// clock stopped at `now`.
    pub(crate) fn service_with(db: Memory, now: &str) -> TestService {
        Service::new(
            Config {
                daily_max: money("20"),
                ..Config::default()
            },
            db,
            ManualClock::new(at(now)),
        )
    }

    /// Creates a new [`TestService`] with an empty database.
    pub(crate) fn service(now: &str) -> TestService {
        service_with(Memory::new(), now)
    }
}
