//! [`Application`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{application, Application},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds an [`Application`] out of the provided [`Row`].
fn from_row(row: &Row) -> Application {
    Application {
        id: row.get("id"),
        applicant_id: row.get("applicant_id"),
        vacancy_id: row.get("vacancy_id"),
        status: row.get("status"),
        date_applied: row.get("date_applied"),
        remarks: row.get("remarks"),
    }
}

impl<C> Database<Insert<Application>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(app): Insert<Application>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO applications (\
                id, applicant_id, vacancy_id, status, date_applied, remarks\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::INT2, $5::DATE, $6::TEXT\
            )";
        self.exec(
            SQL,
            &[
                &app.id,
                &app.applicant_id,
                &app.vacancy_id,
                &app.status,
                &app.date_applied,
                &app.remarks,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Application>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(app): Update<Application>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE applications \
            SET applicant_id = $2::UUID, \
                vacancy_id = $3::UUID, \
                status = $4::INT2, \
                date_applied = $5::DATE, \
                remarks = $6::TEXT \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &app.id,
                &app.applicant_id,
                &app.vacancy_id,
                &app.status,
                &app.date_applied,
                &app.remarks,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Application, application::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Application, application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        // Missing row locks nothing, so the following read sees it missing.
        const SQL: &str = "\
            SELECT 1 \
            FROM applications \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<Application>, application::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Application>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Application>, application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, applicant_id, vacancy_id, \
                   status, date_applied, remarks \
            FROM applications \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Application>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Application>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Application>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, applicant_id, vacancy_id, \
                   status, date_applied, remarks \
            FROM applications \
            ORDER BY date_applied DESC, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Delete<By<Application, application::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Application, application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        // `status_history` and `evaluations` rows go by `ON DELETE CASCADE`.
        const SQL: &str = "\
            DELETE FROM applications \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|deleted| deleted > 0)
    }
}
