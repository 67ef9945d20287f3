//! [`StatusEvent`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{application, StatusEvent},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Insert<StatusEvent>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(event): Insert<StatusEvent>,
    ) -> Result<Self::Ok, Self::Err> {
        let StatusEvent {
            id,
            application_id,
            status,
            remarks,
            updated_by,
            updated_at,
        } = event;

        // `seq` is assigned by the database.
        const SQL: &str = "\
            INSERT INTO status_history (\
                id, application_id, status, remarks, updated_by, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::INT2, \
                $4::TEXT, $5::VARCHAR, $6::DATE\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &application_id,
                &status,
                &remarks,
                &updated_by,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<StatusEvent>, application::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<StatusEvent>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<StatusEvent>, application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let application_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, application_id, status, \
                   remarks, updated_by, updated_at \
            FROM status_history \
            WHERE application_id = $1::UUID \
            ORDER BY updated_at, seq";
        Ok(self
            .query(SQL, &[&application_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| StatusEvent {
                id: row.get("id"),
                application_id: row.get("application_id"),
                status: row.get("status"),
                remarks: row.get("remarks"),
                updated_by: row.get("updated_by"),
                updated_at: row.get("updated_at"),
            })
            .collect())
    }
}
