//! [`Vacancy`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{vacancy, Vacancy},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `vacancies` table, in [`from_row()`] order.
const COLUMNS: &str = "\
    id, position_title, department_id, salary_grade, qualifications, \
    posting_date, closing_date, status";

/// Builds a [`Vacancy`] out of the provided [`Row`].
fn from_row(row: &Row) -> Vacancy {
    Vacancy {
        id: row.get("id"),
        position_title: row.get("position_title"),
        department_id: row.get("department_id"),
        salary_grade: row.get("salary_grade"),
        qualifications: row.get("qualifications"),
        posting_date: row.get("posting_date"),
        closing_date: row.get("closing_date"),
        status: row.get("status"),
    }
}

impl<C> Database<Insert<Vacancy>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(vacancy): Insert<Vacancy>,
    ) -> Result<Self::Ok, Self::Err> {
        let Vacancy {
            id,
            position_title,
            department_id,
            salary_grade,
            qualifications,
            posting_date,
            closing_date,
            status,
        } = vacancy;

        const SQL: &str = "\
            INSERT INTO vacancies (\
                id, position_title, department_id, salary_grade, \
                qualifications, posting_date, closing_date, status\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::UUID, $4::INT2, \
                $5::TEXT, $6::DATE, $7::DATE, $8::INT2\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &position_title,
                &department_id,
                &salary_grade,
                &qualifications,
                &posting_date,
                &closing_date,
                &status,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Vacancy>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(vacancy): Update<Vacancy>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE vacancies \
            SET position_title = $2::VARCHAR, \
                department_id = $3::UUID, \
                salary_grade = $4::INT2, \
                qualifications = $5::TEXT, \
                posting_date = $6::DATE, \
                closing_date = $7::DATE, \
                status = $8::INT2 \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &vacancy.id,
                &vacancy.position_title,
                &vacancy.department_id,
                &vacancy.salary_grade,
                &vacancy.qualifications,
                &vacancy.posting_date,
                &vacancy.closing_date,
                &vacancy.status,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Vacancy, vacancy::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Vacancy, vacancy::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT 1 \
            FROM vacancies \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Vacancy, vacancy::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vacancy, vacancy::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        // `applications` rows, and theirs in turn, go by `ON DELETE CASCADE`.
        const SQL: &str = "DELETE FROM vacancies WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|deleted| deleted > 0)
    }
}

impl<C> Database<Select<By<Option<Vacancy>, vacancy::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Vacancy>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Vacancy>, vacancy::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!("SELECT {COLUMNS} FROM vacancies WHERE id = $1::UUID");
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Vacancy>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Vacancy>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Vacancy>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} FROM vacancies ORDER BY posting_date DESC, id",
        );
        Ok(self
            .query(&sql, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}
