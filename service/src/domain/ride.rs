//! [`Ride`] definitions.

use common::{datetime::Year, define_kind, unit, DateTimeOf, Money};

use crate::domain::{scooter, Scooter};

/// Single rental session of a [`Scooter`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ride {
    /// ID of the rented [`Scooter`].
    pub scooter_id: scooter::Id,

    /// [`scooter::PricePerMinute`] of the [`Scooter`] when this [`Ride`]
    /// started.
    pub price_per_minute: scooter::PricePerMinute,

    /// [`DateTime`] when this [`Ride`] started.
    ///
    /// [`DateTime`]: common::DateTime
    pub started_at: StartDateTime,

    /// [`DateTime`] when this [`Ride`] ended, if it did.
    ///
    /// [`DateTime`]: common::DateTime
    pub ended_at: Option<EndDateTime>,

    /// Final price of this [`Ride`], set once it ends.
    pub price: Option<Money>,
}

impl Ride {
    /// Starts a new [`Ride`] on the provided [`Scooter`].
    #[must_use]
    pub fn start(scooter: &Scooter, at: StartDateTime) -> Self {
        Self {
            scooter_id: scooter.id.clone(),
            price_per_minute: scooter.price_per_minute,
            started_at: at,
            ended_at: None,
            price: None,
        }
    }

    /// Ends this [`Ride`] with the provided `price`.
    #[must_use]
    pub fn finish(self, at: EndDateTime, price: Money) -> Self {
        Self {
            ended_at: Some(at),
            price: Some(price),
            ..self
        }
    }

    /// Returns [`Status`] of this [`Ride`].
    #[must_use]
    pub fn status(&self) -> Status {
        if self.ended_at.is_some() {
            Status::Completed
        } else {
            Status::Active
        }
    }

    /// Indicates whether this [`Ride`] hasn't ended yet.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status() == Status::Active
    }

    /// Indicates whether this [`Ride`] started in the provided [`Year`].
    #[must_use]
    pub fn started_in(&self, year: Year) -> bool {
        self.started_at.year() == year
    }

    /// Indicates whether this [`Ride`] ended in the provided [`Year`].
    #[must_use]
    pub fn ended_in(&self, year: Year) -> bool {
        self.ended_at.is_some_and(|at| at.year() == year)
    }
}

define_kind! {
    #[doc = "Status of a `Ride`."]
    enum Status {
        #[doc = "`Ride` is in progress."]
        Active = 1,

        #[doc = "`Ride` has ended and its price is fixed."]
        Completed = 2,
    }
}

/// [`DateTime`] when a [`Ride`] started.
///
/// [`DateTime`]: common::DateTime
pub type StartDateTime = DateTimeOf<unit::Start>;

/// [`DateTime`] when a [`Ride`] ended.
///
/// [`DateTime`]: common::DateTime
pub type EndDateTime = DateTimeOf<unit::End>;
