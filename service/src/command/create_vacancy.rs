//! [`Command`] for creating a new [`Vacancy`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    vacancy::{
        ClosingDate, PositionTitle, PostingDate, Qualifications, SalaryGrade,
        Status,
    },
    Department,
};
use crate::{
    domain::{department, vacancy, Vacancy},
    infra::{database, database::constraint, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Vacancy`].
#[derive(Clone, Debug)]
pub struct CreateVacancy {
    /// [`PositionTitle`] of a new [`Vacancy`].
    pub position_title: vacancy::PositionTitle,

    /// ID of the [`Department`] offering a new [`Vacancy`].
    pub department_id: department::Id,

    /// [`SalaryGrade`] of a new [`Vacancy`].
    pub salary_grade: vacancy::SalaryGrade,

    /// [`Qualifications`] of a new [`Vacancy`].
    pub qualifications: vacancy::Qualifications,

    /// [`PostingDate`] of a new [`Vacancy`].
    ///
    /// Today, if [`None`].
    pub posting_date: Option<vacancy::PostingDate>,

    /// [`ClosingDate`] of a new [`Vacancy`].
    pub closing_date: vacancy::ClosingDate,

    /// [`Status`] of a new [`Vacancy`].
    ///
    /// [`Status::Open`], if [`None`].
    pub status: Option<vacancy::Status>,
}

impl<Db> Command<CreateVacancy> for Service<Db>
where
    Db: Database<Insert<Vacancy>, Err = Traced<database::Error>>,
{
    type Ok = Vacancy;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateVacancy) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateVacancy {
            position_title,
            department_id,
            salary_grade,
            qualifications,
            posting_date,
            closing_date,
            status,
        } = cmd;

        let vacancy = Vacancy {
            id: vacancy::Id::new(),
            position_title,
            department_id,
            salary_grade,
            qualifications,
            posting_date: posting_date
                .unwrap_or_else(vacancy::PostingDate::today),
            closing_date,
            status: status.unwrap_or(vacancy::Status::Open),
        };

        self.database()
            .execute(Insert(vacancy.clone()))
            .await
            .map_err(|e| {
                let e = e.into_inner();
                let err = if e.is_foreign_key_violation(Some(
                    constraint::VACANCY_DEPARTMENT_FK,
                )) {
                    E::DepartmentNotExists(department_id)
                } else {
                    E::Db(e)
                };
                tracerr::new!(err)
            })
            .map(drop)?;

        Ok(vacancy)
    }
}

/// Error of [`CreateVacancy`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Department`] with the provided ID does not exist.
    #[display("`Department(id: {_0})` does not exist")]
    #[from(ignore)]
    DepartmentNotExists(#[error(not(source))] department::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{department, vacancy},
        test_util::{fixture, service},
    };

    use super::{CreateVacancy, ExecutionError};

    fn instructor(department_id: department::Id) -> CreateVacancy {
        CreateVacancy {
            position_title: "Instructor I".parse().unwrap(),
            department_id,
            salary_grade: vacancy::SalaryGrade::new(12).unwrap(),
            qualifications: "Master's degree".parse().unwrap(),
            posting_date: None,
            closing_date: "2026-02-05".parse().unwrap(),
            status: None,
        }
    }

    #[tokio::test]
    async fn opens_vacancy_posted_today() {
        let svc = service();
        let dept = fixture::department(&svc).await;

        let created = svc.execute(instructor(dept.id)).await.unwrap();

        assert_eq!(created.status, vacancy::Status::Open);
        assert_eq!(created.department_id, dept.id);
        assert_eq!(created.posting_date, vacancy::PostingDate::today());
    }

    #[tokio::test]
    async fn rejects_unknown_department() {
        let svc = service();
        let id = department::Id::new();

        let err = svc.execute(instructor(id)).await.unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::DepartmentNotExists(d) if d == id,
        ));
    }
}
