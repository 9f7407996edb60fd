//! [`ActiveRidesPrice`] definition.

use common::{
    datetime::Year,
    operations::{By, Select},
    Clock, Money,
};
use tracerr::Traced;

use crate::{
    domain::Ride,
    infra::{database, Database},
    read::ride::Active,
    Query, Service,
};

/// [`Query`] to calculate the price of active [`Ride`]s as if they ended
/// right now.
///
/// Nothing is persisted: the [`Ride`]s stay active.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ActiveRidesPrice {
    /// [`Year`] the [`Ride`]s should have started in.
    ///
    /// All the active [`Ride`]s are priced if [`None`].
    pub year: Option<Year>,
}

impl<Db, Clk> Query<ActiveRidesPrice> for Service<Db, Clk>
where
    Db: Database<
        Select<By<Vec<Active<Ride>>, Option<Year>>>,
        Ok = Vec<Active<Ride>>,
        Err = Traced<database::Error>,
    >,
    Clk: Clock,
{
    type Ok = Money;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        ActiveRidesPrice { year }: ActiveRidesPrice,
    ) -> Result<Self::Ok, Self::Err> {
        let rides = self
            .database()
            .execute(Select(By::<Vec<Active<Ride>>, _>::new(year)))
            .map_err(tracerr::wrap!())?;

        let now = self.clock().now();
        // Rides not lasting a moment yet cost nothing.
        Ok(rides
            .into_iter()
            .filter_map(|Active(ride)| {
                self.calculator()
                    .rental_price(
                        ride.started_at.coerce(),
                        now,
                        ride.price_per_minute,
                    )
                    .ok()
            })
            .sum())
    }
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use crate::{
        command::StartRent,
        domain::Ride,
        infra::Memory,
        read::ride::Active,
        testing::{at, id, money, scooter, service, service_with, TestService},
        Command as _, Query as _,
    };

    use super::ActiveRidesPrice;

    fn active(id: &str, start: &str) -> Active<Ride> {
        Active(Ride::start(&scooter(id, "0.2"), at(start).coerce()))
    }

    fn service_with_active_rides() -> TestService {
        service_with(
            Memory::new().with_active_rides([
                active("7", "2020-08-01T00:00:00Z"),
                active("8", "2020-08-01T00:00:00Z"),
                active("9", "2020-08-01T00:00:00Z"),
                active("10", "2018-08-01T00:00:00Z"),
            ]),
            "2020-08-01T00:10:00Z",
        )
    }

    #[test]
    fn prices_active_rides_of_year() {
        let svc = service_with_active_rides();

        for (year, expected) in [
            (Some(2020), "6"),
            // 20 + 730 x 20 + 2
            (Some(2018), "14622"),
            (Some(2019), "0"),
            (None, "14628"),
        ] {
            assert_eq!(
                svc.execute(ActiveRidesPrice { year }).unwrap(),
                money(expected),
                "year: {year:?}",
            );
        }
    }

    #[test]
    fn prices_nothing_without_active_rides() {
        let svc = service("2020-08-01T00:10:00Z");

        assert_eq!(
            svc.execute(ActiveRidesPrice::default()).unwrap(),
            money("0"),
        );
    }

    #[test]
    fn skips_rides_started_right_now() {
        let svc = service_with(
            Memory::new().with_scooters([scooter("1", "0.2")]),
            "2020-08-01T00:10:00Z",
        );
        _ = svc.execute(StartRent { scooter_id: id("1") }).unwrap();

        assert_eq!(
            svc.execute(ActiveRidesPrice::default()).unwrap(),
            money("0"),
        );
    }
}
