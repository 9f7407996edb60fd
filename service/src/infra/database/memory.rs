//! In-memory [`Database`] implementation.

use std::{
    cell::{BorrowError, BorrowMutError, Ref, RefCell, RefMut},
    collections::BTreeMap,
};

use common::{
    datetime::Year,
    operations::{By, Delete, Insert, Select, Update},
};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::{
    domain::{scooter, Ride, Scooter},
    infra::{database, Database},
    read::ride::Active,
};

/// In-memory [`Database`] living as long as the process does.
///
/// Not meant to be shared between threads: every operation borrows the whole
/// state for its duration.
#[derive(Debug, Default)]
pub struct Memory(RefCell<State>);

/// State of a [`Memory`] database.
#[derive(Debug, Default)]
struct State {
    /// [`Scooter`]s inventory.
    scooters: BTreeMap<scooter::Id, Scooter>,

    /// Active [`Ride`]s keyed by their [`Scooter`]s.
    active_rides: BTreeMap<scooter::Id, Ride>,

    /// Completed [`Ride`]s in order of their completion.
    ride_history: Vec<Ride>,
}

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the provided [`Scooter`]s to this [`Memory`] database.
    #[must_use]
    pub fn with_scooters(
        mut self,
        scooters: impl IntoIterator<Item = Scooter>,
    ) -> Self {
        self.0
            .get_mut()
            .scooters
            .extend(scooters.into_iter().map(|s| (s.id.clone(), s)));
        self
    }

    /// Adds the provided active [`Ride`]s to this [`Memory`] database.
    #[must_use]
    pub fn with_active_rides(
        mut self,
        rides: impl IntoIterator<Item = Active<Ride>>,
    ) -> Self {
        self.0.get_mut().active_rides.extend(
            rides
                .into_iter()
                .map(|Active(ride)| (ride.scooter_id.clone(), ride)),
        );
        self
    }

    /// Appends the provided completed [`Ride`]s to the history of this
    /// [`Memory`] database.
    #[must_use]
    pub fn with_ride_history(
        mut self,
        rides: impl IntoIterator<Item = Ride>,
    ) -> Self {
        self.0.get_mut().ride_history.extend(rides);
        self
    }

    /// Borrows the [`State`] of this [`Memory`] database for reading.
    fn read(&self) -> Result<Ref<'_, State>, Traced<database::Error>> {
        self.0
            .try_borrow()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }

    /// Borrows the [`State`] of this [`Memory`] database for writing.
    fn write(&self) -> Result<RefMut<'_, State>, Traced<database::Error>> {
        self.0
            .try_borrow_mut()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

/// [`Memory`] database [`Error`].
///
/// [`Error`]: enum@Error
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// State is being modified by another operation.
    #[display("`Memory` state cannot be read: {_0}")]
    Borrow(BorrowError),

    /// State is being accessed by another operation.
    #[display("`Memory` state cannot be modified: {_0}")]
    BorrowMut(BorrowMutError),
}

impl Database<Select<By<Option<Scooter>, scooter::Id>>> for Memory {
    type Ok = Option<Scooter>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Option<Scooter>, scooter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .read()
            .map_err(tracerr::wrap!())?
            .scooters
            .get(&id)
            .cloned())
    }
}

impl Database<Select<By<Vec<Scooter>, ()>>> for Memory {
    type Ok = Vec<Scooter>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        _: Select<By<Vec<Scooter>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .read()
            .map_err(tracerr::wrap!())?
            .scooters
            .values()
            .cloned()
            .collect())
    }
}

impl Database<Insert<Scooter>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Insert(scooter): Insert<Scooter>,
    ) -> Result<Self::Ok, Self::Err> {
        _ = self
            .write()
            .map_err(tracerr::wrap!())?
            .scooters
            .insert(scooter.id.clone(), scooter);
        Ok(())
    }
}

impl Database<Update<Scooter>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Update(scooter): Update<Scooter>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.write().map_err(tracerr::wrap!())?;
        // Updating doesn't resurrect removed `Scooter`s.
        if let Some(existing) = state.scooters.get_mut(&scooter.id) {
            *existing = scooter;
        }
        Ok(())
    }
}

impl Database<Delete<By<Scooter, scooter::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Delete(by): Delete<By<Scooter, scooter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        _ = self
            .write()
            .map_err(tracerr::wrap!())?
            .scooters
            .remove(&id);
        Ok(())
    }
}

impl Database<Select<By<Option<Active<Ride>>, scooter::Id>>> for Memory {
    type Ok = Option<Active<Ride>>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Option<Active<Ride>>, scooter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .read()
            .map_err(tracerr::wrap!())?
            .active_rides
            .get(&id)
            .cloned()
            .map(Active))
    }
}

impl Database<Select<By<Vec<Active<Ride>>, Option<Year>>>> for Memory {
    type Ok = Vec<Active<Ride>>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Vec<Active<Ride>>, Option<Year>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let year = by.into_inner();
        Ok(self
            .read()
            .map_err(tracerr::wrap!())?
            .active_rides
            .values()
            .filter(|r| year.map_or(true, |y| r.started_in(y)))
            .cloned()
            .map(Active)
            .collect())
    }
}

impl Database<Insert<Active<Ride>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Insert(Active(ride)): Insert<Active<Ride>>,
    ) -> Result<Self::Ok, Self::Err> {
        _ = self
            .write()
            .map_err(tracerr::wrap!())?
            .active_rides
            .insert(ride.scooter_id.clone(), ride);
        Ok(())
    }
}

impl Database<Delete<By<Active<Ride>, scooter::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Delete(by): Delete<By<Active<Ride>, scooter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        _ = self
            .write()
            .map_err(tracerr::wrap!())?
            .active_rides
            .remove(&id);
        Ok(())
    }
}

impl Database<Insert<Ride>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Insert(ride): Insert<Ride>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write()
            .map_err(tracerr::wrap!())?
            .ride_history
            .push(ride);
        Ok(())
    }
}

impl Database<Select<By<Vec<Ride>, Option<Year>>>> for Memory {
    type Ok = Vec<Ride>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Vec<Ride>, Option<Year>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let year = by.into_inner();
        Ok(self
            .read()
            .map_err(tracerr::wrap!())?
            .ride_history
            .iter()
            .filter(|r| year.map_or(true, |y| r.ended_in(y)))
            .cloned()
            .collect())
    }
}
