//! [`read::Summary`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<read::Summary, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::Summary;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::Summary, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const TOTALS_SQL: &str = "\
            SELECT (SELECT COUNT(*) FROM vacancies) AS jobs, \
                   (SELECT COUNT(*) FROM applicants) AS applicants, \
                   (SELECT COUNT(*) FROM applications) AS applications";
        const APPLICATIONS_SQL: &str = "\
            SELECT status, COUNT(*) AS count \
            FROM applications \
            GROUP BY status \
            ORDER BY status";
        const VACANCIES_SQL: &str = "\
            SELECT status, COUNT(*) AS count \
            FROM vacancies \
            GROUP BY status \
            ORDER BY status";

        let count = |n: i64| u64::try_from(n).unwrap_or_default();

        let totals = self
            .query_opt(TOTALS_SQL, &[])
            .await
            .map_err(tracerr::wrap!())?;
        let (total_jobs, total_applicants, total_applications) = totals
            .map(|row| {
                (
                    count(row.get("jobs")),
                    count(row.get("applicants")),
                    count(row.get("applications")),
                )
            })
            .unwrap_or_default();

        let applications_by_status = self
            .query(APPLICATIONS_SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| (row.get("status"), count(row.get("count"))))
            .collect();
        let vacancies_by_status = self
            .query(VACANCIES_SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| (row.get("status"), count(row.get("count"))))
            .collect();

        Ok(read::Summary {
            total_jobs,
            total_applicants,
            total_applications,
            applications_by_status,
            vacancies_by_status,
        })
    }
}
