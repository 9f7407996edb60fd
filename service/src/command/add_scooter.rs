//! [`Command`] for adding a new [`Scooter`] to the inventory.

use common::{
    operations::{By, Insert, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{scooter, Scooter},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for adding a new [`Scooter`] to the inventory.
#[derive(Clone, Debug)]
pub struct AddScooter {
    /// ID of a new [`Scooter`].
    pub id: scooter::Id,

    /// Price of renting a new [`Scooter`] for a single minute.
    pub price_per_minute: Money,
}

impl<Db, Clk> Command<AddScooter> for Service<Db, Clk>
where
    Db: Database<
            Select<By<Option<Scooter>, scooter::Id>>,
            Ok = Option<Scooter>,
            Err = Traced<database::Error>,
        > + Database<Insert<Scooter>, Err = Traced<database::Error>>,
{
    type Ok = Scooter;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: AddScooter) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddScooter {
            id,
            price_per_minute,
        } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<Scooter>, _>::new(id.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::DuplicateIdentifier(id)));
        }

        let price_per_minute = scooter::PricePerMinute::new(price_per_minute)
            .ok_or(E::InvalidPrice(price_per_minute))
            .map_err(tracerr::wrap!())?;

        let scooter = Scooter::new(id, price_per_minute);
        self.database()
            .execute(Insert(scooter.clone()))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(scooter)
    }
}

/// Error of [`AddScooter`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Scooter`] with the provided ID already exists.
    #[display("`Scooter(id: {_0})` already exists")]
    DuplicateIdentifier(#[error(not(source))] scooter::Id),

    /// Provided price per minute is below [`scooter::PricePerMinute::MIN`].
    #[display(
        "`Scooter` price per minute should be at least {}, but {_0} provided",
        scooter::PricePerMinute::MIN
    )]
    InvalidPrice(#[error(not(source))] Money),
}
