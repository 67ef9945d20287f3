//! [`read::ranking`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::vacancy,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Vec<read::ranking::Entry>, vacancy::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::ranking::Entry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::ranking::Entry>, vacancy::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let vacancy_id = by.into_inner();

        // Ordering is done by `read::Ranking`, so rows come in any order.
        const SQL: &str = "\
            SELECT app.id AS application_id, \
                   ev.id AS evaluation_id, \
                   person.full_name AS applicant_name, \
                   ev.exam_score, ev.interview_score, ev.total_score, \
                   ev.remarks, ev.evaluated_at \
            FROM applications AS app \
            INNER JOIN evaluations AS ev \
                    ON ev.application_id = app.id \
            INNER JOIN applicants AS person \
                    ON person.id = app.applicant_id \
            WHERE app.vacancy_id = $1::UUID";
        Ok(self
            .query(SQL, &[&vacancy_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::ranking::Entry {
                application_id: row.get("application_id"),
                evaluation_id: row.get("evaluation_id"),
                applicant_name: row.get("applicant_name"),
                exam_score: row.get("exam_score"),
                interview_score: row.get("interview_score"),
                total_score: row.get("total_score"),
                remarks: row.get("remarks"),
                evaluated_at: row.get("evaluated_at"),
            })
            .collect())
    }
}
