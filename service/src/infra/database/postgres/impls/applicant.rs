//! [`Applicant`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{applicant, Applicant},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds an [`Applicant`] out of the provided [`Row`].
fn from_row(row: &Row) -> Applicant {
    Applicant {
        id: row.get("id"),
        full_name: row.get("full_name"),
        contact_number: row.get("contact_number"),
        email: row.get("email"),
        address: row.get("address"),
        educational_background: row.get("educational_background"),
        work_experience: row.get("work_experience"),
    }
}

impl<C> Database<Insert<Applicant>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(applicant): Insert<Applicant>,
    ) -> Result<Self::Ok, Self::Err> {
        let Applicant {
            id,
            full_name,
            contact_number,
            email,
            address,
            educational_background,
            work_experience,
        } = applicant;

        const SQL: &str = "\
            INSERT INTO applicants (\
                id, full_name, contact_number, email, address, \
                educational_background, work_experience\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::TEXT, $7::TEXT\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &full_name,
                &contact_number,
                &email,
                &address,
                &educational_background,
                &work_experience,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Applicant>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(applicant): Update<Applicant>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE applicants \
            SET full_name = $2::VARCHAR, \
                contact_number = $3::VARCHAR, \
                email = $4::VARCHAR, \
                address = $5::VARCHAR, \
                educational_background = $6::TEXT, \
                work_experience = $7::TEXT \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &applicant.id,
                &applicant.full_name,
                &applicant.contact_number,
                &applicant.email,
                &applicant.address,
                &applicant.educational_background,
                &applicant.work_experience,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Applicant, applicant::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Applicant, applicant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT 1 \
            FROM applicants \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Applicant, applicant::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Applicant, applicant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        // `applications` rows, and theirs in turn, go by `ON DELETE CASCADE`.
        const SQL: &str = "DELETE FROM applicants WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|deleted| deleted > 0)
    }
}

impl<C> Database<Select<By<Option<Applicant>, applicant::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Applicant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Applicant>, applicant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, full_name, contact_number, email, address, \
                   educational_background, work_experience \
            FROM applicants \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Applicant>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Applicant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Applicant>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, full_name, contact_number, email, address, \
                   educational_background, work_experience \
            FROM applicants \
            ORDER BY full_name, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}
