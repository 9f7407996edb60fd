//! [`Command`] for starting a [`Ride`] on a [`Scooter`].

use common::{
    operations::{By, Insert, Select, Update},
    Clock,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{scooter, Ride, Scooter},
    infra::{database, Database},
    read::ride::Active,
    Service,
};

use super::Command;

/// [`Command`] for starting a [`Ride`] on a [`Scooter`].
#[derive(Clone, Debug)]
pub struct StartRent {
    /// ID of the [`Scooter`] to be rented.
    pub scooter_id: scooter::Id,
}

impl<Db, Clk> Command<StartRent> for Service<Db, Clk>
where
    Db: Database<
            Select<By<Option<Scooter>, scooter::Id>>,
            Ok = Option<Scooter>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Active<Ride>>, scooter::Id>>,
            Ok = Option<Active<Ride>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Active<Ride>>, Err = Traced<database::Error>>
        + Database<Update<Scooter>, Err = Traced<database::Error>>,
    Clk: Clock,
{
    type Ok = Active<Ride>;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: StartRent) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let StartRent { scooter_id } = cmd;

        let mut scooter = self
            .database()
            .execute(Select(By::<Option<Scooter>, _>::new(scooter_id.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::NotFound(scooter_id.clone()))
            .map_err(tracerr::wrap!())?;

        let active_ride = self
            .database()
            .execute(Select(By::<Option<Active<Ride>>, _>::new(
                scooter_id.clone(),
            )))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if scooter.is_rented || active_ride.is_some() {
            return Err(tracerr::new!(E::RentalInProgress(scooter_id)));
        }

        let ride = Ride::start(&scooter, self.clock().now().coerce());
        self.database()
            .execute(Insert(Active(ride.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        scooter.is_rented = true;
        self.database()
            .execute(Update(scooter))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!(
            "`Scooter(id: {scooter_id})` rented at {}",
            ride.started_at.to_rfc3339(),
        );

        Ok(Active(ride))
    }
}

/// Error of [`StartRent`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Scooter`] with the provided ID does not exist.
    #[display("`Scooter(id: {_0})` does not exist")]
    NotFound(#[error(not(source))] scooter::Id),

    /// [`Scooter`] is rented already.
    #[display("`Scooter(id: {_0})` is rented already")]
    RentalInProgress(#[error(not(source))] scooter::Id),
}
