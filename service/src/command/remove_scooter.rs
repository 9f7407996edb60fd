//! [`Command`] for removing a [`Scooter`] from the inventory.

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{scooter, Scooter},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing a [`Scooter`] from the inventory.
#[derive(Clone, Debug)]
pub struct RemoveScooter {
    /// ID of the [`Scooter`] to be removed.
    pub id: scooter::Id,
}

impl<Db, Clk> Command<RemoveScooter> for Service<Db, Clk>
where
    Db: Database<
            Select<By<Option<Scooter>, scooter::Id>>,
            Ok = Option<Scooter>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Scooter, scooter::Id>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Scooter;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: RemoveScooter) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveScooter { id } = cmd;

        let scooter = self
            .database()
            .execute(Select(By::<Option<Scooter>, _>::new(id.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::NotFound(id.clone()))
            .map_err(tracerr::wrap!())?;
        if scooter.is_rented {
            return Err(tracerr::new!(E::RentalInProgress(id)));
        }

        self.database()
            .execute(Delete(By::<Scooter, _>::new(id)))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(scooter)
    }
}

/// Error of [`RemoveScooter`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Scooter`] with the provided ID does not exist.
    #[display("`Scooter(id: {_0})` does not exist")]
    NotFound(#[error(not(source))] scooter::Id),

    /// [`Scooter`] is rented at the moment.
    #[display("`Scooter(id: {_0})` is rented and cannot be removed")]
    RentalInProgress(#[error(not(source))] scooter::Id),
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use crate::{
        command::{AddScooter, StartRent},
        infra::Memory,
        query::scooter::{ById, ExecutionError as ByIdError},
        testing::{id, money, scooter, service, service_with},
        Command as _, Query as _,
    };

    use super::{ExecutionError, RemoveScooter};

    #[test]
    fn removes_available_scooter() {
        let svc = service_with(
            Memory::new().with_scooters([scooter("1", "0.2")]),
            "2020-01-01T12:00:00Z",
        );

        let removed = svc.execute(RemoveScooter { id: id("1") }).unwrap();
        assert_eq!(removed, scooter("1", "0.2"));

        let err = svc.execute(ById(id("1"))).unwrap_err();
        assert!(matches!(err.as_ref(), ByIdError::NotFound(_)));
    }

    #[test]
    fn fails_on_unknown_scooter() {
        let svc = service("2020-01-01T12:00:00Z");

        let err = svc.execute(RemoveScooter { id: id("1") }).unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::NotFound(missing) if *missing == id("1"),
        ));
    }

    #[test]
    fn fails_on_rented_scooter() {
        let svc = service("2020-01-01T12:00:00Z");
        _ = svc
            .execute(AddScooter {
                id: id("1"),
                price_per_minute: money("0.2"),
            })
            .unwrap();
        _ = svc.execute(StartRent { scooter_id: id("1") }).unwrap();

        let err = svc.execute(RemoveScooter { id: id("1") }).unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::RentalInProgress(_),
        ));
        assert!(svc.execute(ById(id("1"))).unwrap().is_rented);
    }
}
