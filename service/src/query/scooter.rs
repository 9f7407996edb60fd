//! [`Query`] collection related to a single [`Scooter`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{scooter, Scooter},
    infra::{database, Database},
    Query, Service,
};

/// Queries an existing [`Scooter`] by its [`scooter::Id`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ById(pub scooter::Id);

impl<Db, Clk> Query<ById> for Service<Db, Clk>
where
    Db: Database<
        Select<By<Option<Scooter>, scooter::Id>>,
        Ok = Option<Scooter>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Scooter;
    type Err = Traced<ExecutionError>;

    fn execute(&self, ById(id): ById) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Select(By::<Option<Scooter>, _>::new(id.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotFound(id)))
    }
}

/// Error of [`ById`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Scooter`] with the provided ID does not exist.
    #[display("`Scooter(id: {_0})` does not exist")]
    NotFound(#[error(not(source))] scooter::Id),
}
