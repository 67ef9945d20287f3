//! [`Command`] for creating a new [`Application`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{application::Status, Applicant, StatusEvent, Vacancy};
use crate::{
    domain::{applicant, application, vacancy, Application},
    infra::{database, database::constraint, Database},
    Service,
};

use super::Command;

/// [`Command`] for linking an [`Applicant`] to a [`Vacancy`].
///
/// No [`StatusEvent`] is recorded for the initial [`Status`].
#[derive(Clone, Debug)]
pub struct CreateApplication {
    /// ID of the applying [`Applicant`].
    pub applicant_id: applicant::Id,

    /// ID of the [`Vacancy`] applied for.
    pub vacancy_id: vacancy::Id,

    /// Initial [`Status`] of a new [`Application`].
    ///
    /// [`Status::Received`], if [`None`].
    pub status: Option<application::Status>,

    /// Date when a new [`Application`] was filed.
    ///
    /// Today, if [`None`].
    pub date_applied: Option<application::DateApplied>,

    /// [`application::Remarks`] of a new [`Application`].
    pub remarks: Option<application::Remarks>,
}

impl<Db> Command<CreateApplication> for Service<Db>
where
    Db: Database<Insert<Application>, Err = Traced<database::Error>>,
{
    type Ok = Application;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateApplication,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateApplication {
            applicant_id,
            vacancy_id,
            status,
            date_applied,
            remarks,
        } = cmd;

        let application = Application {
            id: application::Id::new(),
            applicant_id,
            vacancy_id,
            status: status.unwrap_or_default(),
            date_applied: date_applied
                .unwrap_or_else(application::DateApplied::today),
            remarks,
        };

        self.database()
            .execute(Insert(application.clone()))
            .await
            .map_err(|e| {
                let e = e.into_inner();
                let fk_violated = |c| e.is_foreign_key_violation(Some(c));
                let err = if fk_violated(constraint::APPLICATION_APPLICANT_FK) {
                    E::ApplicantNotExists(applicant_id)
                } else if fk_violated(constraint::APPLICATION_VACANCY_FK) {
                    E::VacancyNotExists(vacancy_id)
                } else {
                    E::Db(e)
                };
                tracerr::new!(err)
            })
            .map(drop)?;

        Ok(application)
    }
}

/// Error of [`CreateApplication`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Applicant`] with the provided ID does not exist.
    #[display("`Applicant(id: {_0})` does not exist")]
    #[from(ignore)]
    ApplicantNotExists(#[error(not(source))] applicant::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Vacancy`] with the provided ID does not exist.
    #[display("`Vacancy(id: {_0})` does not exist")]
    #[from(ignore)]
    VacancyNotExists(#[error(not(source))] vacancy::Id),
}
