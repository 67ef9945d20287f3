//! Postgres database clients.
//!
//! Both clients take a pooled [`connection`] lazily, on their first
//! statement.

use std::{future::Future, sync::Arc};

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Lazily taken [`connection`] of a client.
type Slot<C> = RwLock<Option<C>>;

/// Returns the [`Connection`] held by the provided [`Slot`], filling it with
/// the provided `init` function if empty.
async fn occupy<C, F>(
    slot: &Slot<C>,
    init: impl FnOnce() -> F,
) -> Result<RwLockReadGuard<'_, C>, Traced<database::Error>>
where
    F: Future<Output = Result<C, Traced<database::Error>>>,
{
    let read = slot.read().await;
    let guard = if read.is_some() {
        read
    } else {
        drop(read);

        let mut write = slot.write().await;
        if write.is_none() {
            *write = Some(init().await.map_err(tracerr::wrap!())?);
        }
        write.downgrade()
    };

    Ok(RwLockReadGuard::map(guard, |conn| {
        conn.as_ref().expect("`Slot` is filled above")
    }))
}

/// Takes a new [`connection::NonTx`] from the provided [`connection::Pool`].
async fn pooled(
    pool: &connection::Pool,
) -> Result<connection::NonTx, Traced<database::Error>> {
    pool.get()
        .await
        .map_err(tracerr::from_and_wrap!(=> postgres::Error))
        .map_err(tracerr::map_from)
}

/// Non-transactional Postgres database client.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to take [`Connection`]s from.
    pub(crate) pool: connection::Pool,

    /// [`Connection`] used by this client, once taken.
    slot: Arc<Slot<connection::NonTx>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client over the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self {
            pool,
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the [`Connection`] of this [`NonTx`] client.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::NonTx>, Traced<database::Error>>
    {
        occupy(&self.slot, || pooled(&self.pool)).await
    }
}

/// Transactional Postgres database client.
///
/// Dropping it without a [`Tx::commit()`] rolls the transaction back.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`NonTx`] client this [`Tx`] was started from.
    ///
    /// Its [`Connection`] is reused for the transaction, if already taken.
    origin: NonTx,

    /// Open [`connection::Tx`], once started.
    slot: Arc<Slot<connection::Tx>>,
}

impl Tx {
    /// Creates a new [`Tx`] client from the provided [`NonTx`] client.
    ///
    /// `BEGIN` is deferred until the first statement.
    #[must_use]
    pub fn from_non_tx(origin: NonTx) -> Self {
        Self {
            origin,
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the [`Connection`] of this [`Tx`] client, starting the
    /// transaction if needed.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        occupy(&self.slot, || async {
            let conn = match self.origin.slot.write().await.take() {
                Some(conn) => conn,
                None => pooled(&self.origin.pool).await?,
            };
            connection::Tx::from_non_tx(conn)
                .await
                .map_err(tracerr::wrap!())
        })
        .await
    }

    /// Commits this [`Tx`] client.
    ///
    /// Does nothing if no statement has been run.
    ///
    /// # Errors
    ///
    /// If `COMMIT` fails.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        match self.slot.write().await.take() {
            Some(tx) => tx.commit().await.map_err(tracerr::wrap!()),
            None => Ok(()),
        }
    }
}

/// Implements [`Connection`] for a client by forwarding to its lazily taken
/// one.
macro_rules! delegate_connection {
    ($($client:ty),+) => {$(
        impl Connection for $client {
            async fn query<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Vec<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                self.connection()
                    .await
                    .map_err(tracerr::wrap!())?
                    .query(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }

            async fn query_opt<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Option<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                self.connection()
                    .await
                    .map_err(tracerr::wrap!())?
                    .query_opt(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }

            async fn exec<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<u64, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                self.connection()
                    .await
                    .map_err(tracerr::wrap!())?
                    .exec(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }
        }
    )+};
}

delegate_connection!(NonTx, Tx);
