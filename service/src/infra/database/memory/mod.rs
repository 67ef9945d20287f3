//! In-memory [`Database`] implementation.
//!
//! Keeps the transactional contract of the [`Postgres`] one: writes of a
//! [`Tx`] become visible only once committed, and are discarded if the [`Tx`]
//! is dropped before that. Transactions are serialized by a single writer
//! lock, so an explicit [`Lock`] is a no-op here.
//!
//! [`Lock`]: common::operations::Lock
//! [`Postgres`]: crate::infra::Postgres

mod impls;

use std::{collections::HashSet, future::Future, sync::Arc};

use derive_more::{Debug, Deref, Display, Error as StdError};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::Database;
use crate::{
    domain::{
        Applicant, Application, Department, Evaluation, StatusEvent, User,
        Vacancy,
    },
    infra::database,
};

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Deref)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new empty [`Memory`] client.
    #[must_use]
    pub fn new() -> Self {
        Self(NonTx {
            shared: Arc::new(Shared {
                state: RwLock::new(State::default()),
                writer: Arc::new(Mutex::new(())),
                failing: Mutex::new(HashSet::new()),
            }),
        })
    }

    /// Makes every following write into the provided [`Table`] fail.
    pub async fn fail_writes_to(&self, table: Table) {
        _ = self.shared.failing.lock().await.insert(table);
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Table of a [`Memory`] database.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Table {
    /// Table of [`User`]s.
    Users,

    /// Table of [`Department`]s.
    Departments,

    /// Table of [`Vacancy`]s.
    Vacancies,

    /// Table of [`Applicant`]s.
    Applicants,

    /// Table of [`Application`]s.
    Applications,

    /// Table of [`StatusEvent`]s.
    StatusHistory,

    /// Table of [`Evaluation`]s.
    Evaluations,
}

/// Contents of a [`Memory`] database.
///
/// Rows are kept in their insertion order.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// Rows of the [`Table::Users`].
    users: Vec<User>,

    /// Rows of the [`Table::Departments`].
    departments: Vec<Department>,

    /// Rows of the [`Table::Vacancies`].
    vacancies: Vec<Vacancy>,

    /// Rows of the [`Table::Applicants`].
    applicants: Vec<Applicant>,

    /// Rows of the [`Table::Applications`].
    applications: Vec<Application>,

    /// Rows of the [`Table::StatusHistory`].
    status_history: Vec<StatusEvent>,

    /// Rows of the [`Table::Evaluations`].
    evaluations: Vec<Evaluation>,
}

/// State shared by all the clients of the same [`Memory`] database.
#[derive(Debug)]
struct Shared {
    /// Committed [`State`].
    state: RwLock<State>,

    /// Lock serializing all the writers.
    writer: Arc<Mutex<()>>,

    /// [`Table`]s whose writes are forced to fail.
    failing: Mutex<HashSet<Table>>,
}

impl Shared {
    /// Fails if writes into the provided [`Table`] are forced to fail.
    async fn check_writable(&self, table: Table) -> Result<(), Error> {
        if self.failing.lock().await.contains(&table) {
            return Err(Error::WriteFailed(table));
        }
        Ok(())
    }
}

/// Non-transactional [`Memory`] client.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`Shared`] state of the database.
    shared: Arc<Shared>,
}

/// Transactional [`Memory`] client.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`Shared`] state of the database.
    shared: Arc<Shared>,

    /// Uncommitted [`State`] of this transaction, if not finished yet.
    working: Arc<Mutex<Option<Working>>>,
}

/// Uncommitted [`State`] of a [`Tx`].
#[derive(Debug)]
struct Working {
    /// [`State`] with the uncommitted writes applied.
    state: State,

    /// Guard of the [`Shared::writer`] lock held until the [`Tx`] finishes.
    #[debug(skip)]
    _writer: OwnedMutexGuard<()>,
}

impl Tx {
    /// Starts a new [`Tx`] over the provided [`Shared`] state.
    async fn begin(shared: Arc<Shared>) -> Self {
        let writer = Arc::clone(&shared.writer).lock_owned().await;
        let state = shared.state.read().await.clone();
        Self {
            shared,
            working: Arc::new(Mutex::new(Some(Working {
                state,
                _writer: writer,
            }))),
        }
    }

    /// Commits this [`Tx`], making its writes visible.
    ///
    /// Committing an already finished [`Tx`] does nothing.
    async fn commit(&self) {
        if let Some(Working { state, _writer }) =
            self.working.lock().await.take()
        {
            *self.shared.state.write().await = state;
        }
    }
}

/// Access to the [`State`] of a [`Memory`] database.
pub trait Access {
    /// Reads the [`State`] with the provided function.
    fn read<R>(
        &self,
        f: impl FnOnce(&State) -> R,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>;

    /// Writes into the provided [`Table`] of the [`State`] with the provided
    /// function.
    ///
    /// The function must check its constraints before changing anything.
    fn write<R>(
        &self,
        table: Table,
        f: impl FnOnce(&mut State) -> Result<R, Error>,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>;
}

impl Access for NonTx {
    async fn read<R>(
        &self,
        f: impl FnOnce(&State) -> R,
    ) -> Result<R, Traced<database::Error>> {
        Ok(f(&*self.shared.state.read().await))
    }

    async fn write<R>(
        &self,
        table: Table,
        f: impl FnOnce(&mut State) -> Result<R, Error>,
    ) -> Result<R, Traced<database::Error>> {
        let _writer = self.shared.writer.lock().await;
        self.shared
            .check_writable(table)
            .await
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;
        f(&mut *self.shared.state.write().await)
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl Access for Tx {
    async fn read<R>(
        &self,
        f: impl FnOnce(&State) -> R,
    ) -> Result<R, Traced<database::Error>> {
        let working = self.working.lock().await;
        let working = working
            .as_ref()
            .ok_or(Error::Finished)
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;
        Ok(f(&working.state))
    }

    async fn write<R>(
        &self,
        table: Table,
        f: impl FnOnce(&mut State) -> Result<R, Error>,
    ) -> Result<R, Traced<database::Error>> {
        let mut working = self.working.lock().await;
        let working = working
            .as_mut()
            .ok_or(Error::Finished)
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;
        self.shared
            .check_writable(table)
            .await
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;
        f(&mut working.state)
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

/// [`Memory`] database [`Error`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Write into the [`Table`] is forced to fail.
    #[display("Write into `{_0}` table failed")]
    WriteFailed(#[error(not(source))] Table),

    /// Unique constraint is violated.
    #[display("Unique constraint `{_0}` is violated")]
    UniqueViolation(#[error(not(source))] &'static str),

    /// Foreign key constraint is violated.
    #[display("Foreign key constraint `{_0}` is violated")]
    ForeignKeyViolation(#[error(not(source))] &'static str),

    /// Transaction is already committed.
    #[display("Transaction is already finished")]
    Finished,
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        matches!(
            self,
            Self::UniqueViolation(c) if constraint.map_or(true, |x| x == *c),
        )
    }

    /// Checks if the error is a foreign key violation of the specified
    /// constraint.
    #[must_use]
    pub fn is_foreign_key_violation(&self, constraint: Option<&str>) -> bool {
        matches!(
            self,
            Self::ForeignKeyViolation(c) if constraint.map_or(true, |x| x == *c),
        )
    }
}
