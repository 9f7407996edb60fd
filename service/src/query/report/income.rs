//! [`Income`] definition.

use common::{
    datetime::Year,
    operations::{By, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::Ride,
    infra::{database, Database},
    Query, Service,
};

use super::ActiveRidesPrice;

/// [`Query`] to calculate the income of the rental company.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Income {
    /// [`Year`] the [`Ride`]s should have ended in.
    ///
    /// All the completed [`Ride`]s are counted if [`None`].
    pub year: Option<Year>,

    /// Indicator whether the [`ActiveRidesPrice`] of the [`Ride`]s started in
    /// the [`Year`] should be counted too.
    pub include_active: bool,
}

impl<Db, Clk> Query<Income> for Service<Db, Clk>
where
    Db: Database<
        Select<By<Vec<Ride>, Option<Year>>>,
        Ok = Vec<Ride>,
        Err = Traced<database::Error>,
    >,
    Self: Query<
        ActiveRidesPrice,
        Ok = Money,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Money;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Income {
            year,
            include_active,
        }: Income,
    ) -> Result<Self::Ok, Self::Err> {
        let history = self
            .database()
            .execute(Select(By::<Vec<Ride>, _>::new(year)))
            .map_err(tracerr::wrap!())?;

        let mut income = self.calculator().income(&history);
        if include_active {
            income += self
                .execute(ActiveRidesPrice { year })
                .map_err(tracerr::wrap!())?;
        }
        Ok(income)
    }
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use std::time::Duration;

    use common::Money;

    use crate::{
        command::{EndRent, StartRent},
        domain::Ride,
        infra::Memory,
        read::ride::Active,
        testing::{at, id, money, scooter, service_with, TestService},
        Command as _, Query as _,
    };

    use super::Income;

    fn completed(id: &str, end: &str, price: &str) -> Ride {
        let end = at(end);
        Ride::start(&scooter(id, "0.2"), (end - Duration::from_secs(60)).coerce())
            .finish(end.coerce(), money(price))
    }

    fn service_with_rides() -> TestService {
        service_with(
            Memory::new()
                .with_ride_history([
                    completed("1", "2019-12-31T23:59:00Z", "10"),
                    completed("2", "2020-03-01T12:00:00Z", "2.5"),
                    completed("1", "2020-06-01T12:00:00Z", "7.5"),
                ])
                .with_active_rides([Active(Ride::start(
                    &scooter("3", "0.2"),
                    at("2020-08-01T00:00:00Z").coerce(),
                ))]),
            "2020-08-01T00:10:00Z",
        )
    }

    #[test]
    fn sums_completed_rides() {
        let svc = service_with_rides();

        for (year, expected) in
            [(None, "20"), (Some(2020), "10"), (Some(2019), "10")]
        {
            assert_eq!(
                svc.execute(Income {
                    year,
                    include_active: false,
                })
                .unwrap(),
                money(expected),
                "year: {year:?}",
            );
        }
    }

    #[test]
    fn includes_active_rides_on_demand() {
        let svc = service_with_rides();

        for (year, expected) in
            [(None, "22"), (Some(2020), "12"), (Some(2019), "10")]
        {
            assert_eq!(
                svc.execute(Income {
                    year,
                    include_active: true,
                })
                .unwrap(),
                money(expected),
                "year: {year:?}",
            );
        }
    }

    #[test]
    fn grows_by_ended_ride_price() {
        let svc = service_with(
            Memory::new().with_scooters([scooter("1", "0.2")]),
            "2020-01-01T12:00:00Z",
        );
        let before = svc.execute(Income::default()).unwrap();
        assert_eq!(before, Money::ZERO);

        _ = svc.execute(StartRent { scooter_id: id("1") }).unwrap();
        svc.clock().advance(Duration::from_secs(25 * 60));
        let price = svc.execute(EndRent { scooter_id: id("1") }).unwrap();

        assert_eq!(price, money("5"));
        assert_eq!(svc.execute(Income::default()).unwrap(), before + price);
    }
}
