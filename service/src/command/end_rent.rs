//! [`Command`] for ending an active [`Ride`] on a [`Scooter`].

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Clock, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{rent, scooter, Ride, Scooter},
    infra::{database, Database},
    read::ride::Active,
    Service,
};

use super::Command;

/// [`Command`] for ending an active [`Ride`] on a [`Scooter`].
///
/// Returns the final price of the ended [`Ride`].
#[derive(Clone, Debug)]
pub struct EndRent {
    /// ID of the rented [`Scooter`].
    pub scooter_id: scooter::Id,
}

impl<Db, Clk> Command<EndRent> for Service<Db, Clk>
where
    Db: Database<
            Select<By<Option<Active<Ride>>, scooter::Id>>,
            Ok = Option<Active<Ride>>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Active<Ride>, scooter::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Ride>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Scooter>, scooter::Id>>,
            Ok = Option<Scooter>,
            Err = Traced<database::Error>,
        > + Database<Update<Scooter>, Err = Traced<database::Error>>,
    Clk: Clock,
{
    type Ok = Money;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: EndRent) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EndRent { scooter_id } = cmd;

        let Active(ride) = self
            .database()
            .execute(Select(By::<Option<Active<Ride>>, _>::new(
                scooter_id.clone(),
            )))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::NotRented(scooter_id.clone()))
            .map_err(tracerr::wrap!())?;

        let now = self.clock().now();
        let price = self
            .calculator()
            .rental_price(ride.started_at.coerce(), now, ride.price_per_minute)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let ride = ride.finish(now.coerce(), price);

        self.database()
            .execute(Delete(By::<Active<Ride>, _>::new(scooter_id.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        self.database()
            .execute(Insert(ride))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        // `Scooter` may have been removed while being ridden.
        let scooter = self
            .database()
            .execute(Select(By::<Option<Scooter>, _>::new(scooter_id.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(mut scooter) = scooter {
            scooter.is_rented = false;
            self.database()
                .execute(Update(scooter))
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        log::debug!("`Scooter(id: {scooter_id})` returned, charged {price}");

        Ok(price)
    }
}

/// Error of [`EndRent`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Scooter`] has no active [`Ride`].
    #[display("`Scooter(id: {_0})` is not rented")]
    NotRented(#[error(not(source))] scooter::Id),

    /// [`Ride`] cannot be priced, because the clock hasn't moved past its
    /// start.
    #[display("`Ride` cannot be priced: {_0}")]
    #[from]
    InvalidTimeRange(rent::InvalidTimeRange),
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Select};

    use crate::{
        command::StartRent,
        domain::{ride::Status, Ride},
        infra::{Database as _, Memory},
        query::scooter::ById,
        testing::{at, id, money, scooter, service_with},
        Command as _, Query as _,
    };

    use super::{EndRent, ExecutionError};

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn ends_ride_and_frees_scooter() {
        let svc = service_with(
            Memory::new().with_scooters([scooter("1", "0.2")]),
            "2020-01-01T12:00:00Z",
        );
        _ = svc.execute(StartRent { scooter_id: id("1") }).unwrap();
        svc.clock().advance(10 * MINUTE);

        let price = svc.execute(EndRent { scooter_id: id("1") }).unwrap();

        assert_eq!(price, money("2"));
        assert!(!svc.execute(ById(id("1"))).unwrap().is_rented);

        let history = svc
            .database()
            .execute(Select(By::<Vec<Ride>, _>::new(None)))
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status(), Status::Completed);
        assert_eq!(history[0].price, Some(money("2")));
        assert_eq!(
            history[0].ended_at,
            Some(at("2020-01-01T12:10:00Z").coerce()),
        );
    }

    #[test]
    fn caps_price_at_daily_max() {
        let svc = service_with(
            Memory::new().with_scooters([scooter("1", "1")]),
            "2020-01-01T12:00:00Z",
        );
        _ = svc.execute(StartRent { scooter_id: id("1") }).unwrap();
        svc.clock().advance(60 * MINUTE);

        let price = svc.execute(EndRent { scooter_id: id("1") }).unwrap();

        assert_eq!(price, money("20"));
    }

    #[test]
    fn caps_price_of_huge_rate() {
        let svc = service_with(
            Memory::new().with_scooters([scooter(
                "1",
                "79228162514264337593543950335",
            )]),
            "2020-01-01T12:00:00Z",
        );
        _ = svc.execute(StartRent { scooter_id: id("1") }).unwrap();
        svc.clock().advance(10 * MINUTE);

        let price = svc.execute(EndRent { scooter_id: id("1") }).unwrap();

        assert_eq!(price, money("20"));
    }

    #[test]
    fn fails_on_not_rented_scooter() {
        let svc = service_with(
            Memory::new().with_scooters([scooter("1", "0.2")]),
            "2020-01-01T12:00:00Z",
        );

        let err = svc.execute(EndRent { scooter_id: id("1") }).unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::NotRented(free) if *free == id("1"),
        ));
    }

    #[test]
    fn fails_on_ride_ended_at_its_start() {
        let svc = service_with(
            Memory::new().with_scooters([scooter("1", "0.2")]),
            "2020-01-01T12:00:00Z",
        );
        _ = svc.execute(StartRent { scooter_id: id("1") }).unwrap();

        let err = svc.execute(EndRent { scooter_id: id("1") }).unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::InvalidTimeRange(_),
        ));
        assert!(svc.execute(ById(id("1"))).unwrap().is_rented);
    }

    #[test]
    fn ends_ride_of_removed_scooter() {
        let svc = service_with(
            Memory::new().with_active_rides([crate::read::ride::Active(
                Ride::start(
                    &scooter("1", "0.2"),
                    at("2020-01-01T11:50:00Z").coerce(),
                ),
            )]),
            "2020-01-01T12:00:00Z",
        );

        let price = svc.execute(EndRent { scooter_id: id("1") }).unwrap();

        assert_eq!(price, money("2"));
        assert!(svc.execute(ById(id("1"))).is_err());
    }
}
