//! [`Evaluation`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{evaluation, Evaluation},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds an [`Evaluation`] out of the provided [`Row`].
fn from_row(row: &Row) -> Evaluation {
    Evaluation {
        id: row.get("id"),
        application_id: row.get("application_id"),
        exam_score: row.get("exam_score"),
        interview_score: row.get("interview_score"),
        total_score: row.get("total_score"),
        remarks: row.get("remarks"),
        evaluated_by: row.get("evaluated_by"),
        evaluated_at: row.get("evaluated_at"),
    }
}

impl<C> Database<Insert<Evaluation>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(eval): Insert<Evaluation>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO evaluations (\
                id, application_id, \
                exam_score, interview_score, total_score, \
                remarks, evaluated_by, evaluated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::FLOAT8, $4::FLOAT8, $5::FLOAT8, \
                $6::TEXT, $7::VARCHAR, $8::DATE\
            )";
        self.exec(
            SQL,
            &[
                &eval.id,
                &eval.application_id,
                &eval.exam_score,
                &eval.interview_score,
                &eval.total_score,
                &eval.remarks,
                &eval.evaluated_by,
                &eval.evaluated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Evaluation>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(eval): Update<Evaluation>,
    ) -> Result<Self::Ok, Self::Err> {
        // Evaluator and evaluation date are never rewritten.
        const SQL: &str = "\
            UPDATE evaluations \
            SET exam_score = $2::FLOAT8, \
                interview_score = $3::FLOAT8, \
                total_score = $4::FLOAT8, \
                remarks = $5::TEXT \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &eval.id,
                &eval.exam_score,
                &eval.interview_score,
                &eval.total_score,
                &eval.remarks,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Evaluation, evaluation::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Evaluation, evaluation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT 1 \
            FROM evaluations \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<Evaluation>, evaluation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Evaluation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Evaluation>, evaluation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, application_id, \
                   exam_score, interview_score, total_score, \
                   remarks, evaluated_by, evaluated_at \
            FROM evaluations \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Evaluation>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Evaluation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Evaluation>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, application_id, \
                   exam_score, interview_score, total_score, \
                   remarks, evaluated_by, evaluated_at \
            FROM evaluations \
            ORDER BY seq";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Delete<By<Evaluation, evaluation::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Evaluation, evaluation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM evaluations \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|deleted| deleted > 0)
    }
}
