//! [`Command`] for updating an existing [`Vacancy`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Department;
use crate::{
    domain::{department, vacancy, Vacancy},
    infra::{database, database::constraint, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing the details of a [`Vacancy`].
#[derive(Clone, Debug)]
pub struct UpdateVacancy {
    /// ID of the [`Vacancy`] to update.
    pub id: vacancy::Id,

    /// New [`vacancy::PositionTitle`].
    pub position_title: vacancy::PositionTitle,

    /// ID of the new [`Department`].
    pub department_id: department::Id,

    /// New [`vacancy::SalaryGrade`].
    pub salary_grade: vacancy::SalaryGrade,

    /// New [`vacancy::Qualifications`].
    pub qualifications: vacancy::Qualifications,

    /// New [`vacancy::PostingDate`].
    ///
    /// Kept as it is, if [`None`].
    pub posting_date: Option<vacancy::PostingDate>,

    /// New [`vacancy::ClosingDate`].
    pub closing_date: vacancy::ClosingDate,

    /// New [`vacancy::Status`].
    ///
    /// Kept as it is, if [`None`].
    pub status: Option<vacancy::Status>,
}

impl<Db> Command<UpdateVacancy> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Vacancy, vacancy::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Vacancy>, vacancy::Id>>,
            Ok = Option<Vacancy>,
            Err = Traced<database::Error>,
        > + Database<Update<Vacancy>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Vacancy;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateVacancy) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateVacancy {
            id,
            position_title,
            department_id,
            salary_grade,
            qualifications,
            posting_date,
            closing_date,
            status,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut vacancy = tx
            .execute(Select(By::<Option<Vacancy>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VacancyNotExists(id))
            .map_err(tracerr::wrap!())?;

        vacancy.position_title = position_title;
        vacancy.department_id = department_id;
        vacancy.salary_grade = salary_grade;
        vacancy.qualifications = qualifications;
        if let Some(date) = posting_date {
            vacancy.posting_date = date;
        }
        vacancy.closing_date = closing_date;
        if let Some(status) = status {
            vacancy.status = status;
        }

        tx.execute(Update(vacancy.clone()))
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

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(vacancy)
    }
}

/// Error of [`UpdateVacancy`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Department`] with the provided ID does not exist.
    #[display("`Department(id: {_0})` does not exist")]
    #[from(ignore)]
    DepartmentNotExists(#[error(not(source))] department::Id),

    /// [`Vacancy`] with the provided ID does not exist.
    #[display("`Vacancy(id: {_0})` does not exist")]
    #[from(ignore)]
    VacancyNotExists(#[error(not(source))] vacancy::Id),
}
