//! [`Command`] for updating an existing [`Application`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{application::Status, Applicant, Vacancy};
use crate::{
    domain::{applicant, application, vacancy, Application},
    infra::{database, database::constraint, Database},
    Service,
};

use super::Command;

/// [`Command`] for overwriting the non-[`Status`] fields of an
/// [`Application`].
///
/// [`None`] fields are left as they are.
#[derive(Clone, Debug)]
pub struct UpdateApplication {
    /// ID of the [`Application`] to update.
    pub id: application::Id,

    /// ID of the new [`Applicant`].
    pub applicant_id: Option<applicant::Id>,

    /// ID of the new [`Vacancy`].
    pub vacancy_id: Option<vacancy::Id>,

    /// New date when the [`Application`] was filed.
    pub date_applied: Option<application::DateApplied>,

    /// New [`application::Remarks`].
    ///
    /// `Some(None)` clears them.
    pub remarks: Option<Option<application::Remarks>>,
}

impl<Db> Command<UpdateApplication> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Application, application::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Application>, application::Id>>,
            Ok = Option<Application>,
            Err = Traced<database::Error>,
        > + Database<Update<Application>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Application;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateApplication,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateApplication {
            id,
            applicant_id,
            vacancy_id,
            date_applied,
            remarks,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid racing with a concurrent status transition.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut application = tx
            .execute(Select(By::<Option<Application>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ApplicationNotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(applicant_id) = applicant_id {
            application.applicant_id = applicant_id;
        }
        if let Some(vacancy_id) = vacancy_id {
            application.vacancy_id = vacancy_id;
        }
        if let Some(date) = date_applied {
            application.date_applied = date;
        }
        if let Some(remarks) = remarks {
            application.remarks = remarks;
        }

        let (applicant_id, vacancy_id) =
            (application.applicant_id, application.vacancy_id);
        tx.execute(Update(application.clone()))
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

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(application)
    }
}

/// Error of [`UpdateApplication`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Applicant`] with the provided ID does not exist.
    #[display("`Applicant(id: {_0})` does not exist")]
    #[from(ignore)]
    ApplicantNotExists(#[error(not(source))] applicant::Id),

    /// [`Application`] with the provided ID does not exist.
    #[display("`Application(id: {_0})` does not exist")]
    #[from(ignore)]
    ApplicationNotExists(#[error(not(source))] application::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Vacancy`] with the provided ID does not exist.
    #[display("`Vacancy(id: {_0})` does not exist")]
    #[from(ignore)]
    VacancyNotExists(#[error(not(source))] vacancy::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{Command as _, TransitionApplicationStatus},
        domain::{application, Actor},
        test_util::{fixture, service},
    };

    use super::{ExecutionError, UpdateApplication};

    #[tokio::test]
    async fn overwrites_fields_but_keeps_status() {
        let svc = service();
        let app = fixture::application(&svc).await;
        _ = svc
            .execute(TransitionApplicationStatus {
                application_id: app.id,
                status: application::Status::ForInterview,
                remarks: None,
                actor: Actor::system(),
            })
            .await
            .unwrap();

        let updated = svc
            .execute(UpdateApplication {
                id: app.id,
                applicant_id: None,
                vacancy_id: None,
                date_applied: Some("2026-03-01".parse().unwrap()),
                remarks: Some(Some("Complete documents".parse().unwrap())),
            })
            .await
            .unwrap();

        assert_eq!(updated.status, application::Status::ForInterview);
        assert_eq!(updated.date_applied.to_string(), "2026-03-01");
        assert_eq!(
            updated.remarks.unwrap().to_string(),
            "Complete documents",
        );
        assert_eq!(updated.applicant_id, app.applicant_id);
    }

    #[tokio::test]
    async fn clears_remarks_only_when_asked() {
        let svc = service();
        let app = fixture::application(&svc).await;
        let update = |remarks| UpdateApplication {
            id: app.id,
            applicant_id: None,
            vacancy_id: None,
            date_applied: None,
            remarks,
        };
        _ = svc
            .execute(update(Some(Some("Walk-in".parse().unwrap()))))
            .await
            .unwrap();

        let kept = svc.execute(update(None)).await.unwrap();
        assert_eq!(kept.remarks.unwrap().to_string(), "Walk-in");

        let cleared = svc.execute(update(Some(None))).await.unwrap();
        assert!(cleared.remarks.is_none());
        assert!(fixture::find_application(&svc, app.id)
            .await
            .unwrap()
            .remarks
            .is_none());
    }

    #[tokio::test]
    async fn rejects_unknown_application() {
        let svc = service();
        let id = application::Id::new();

        let err = svc
            .execute(UpdateApplication {
                id,
                applicant_id: None,
                vacancy_id: None,
                date_applied: None,
                remarks: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_inner(),
            ExecutionError::ApplicationNotExists(i) if i == id,
        ));
    }

    #[tokio::test]
    async fn rejects_unknown_vacancy() {
        let svc = service();
        let app = fixture::application(&svc).await;

        let err = svc
            .execute(UpdateApplication {
                id: app.id,
                applicant_id: None,
                vacancy_id: Some(Default::default()),
                date_applied: None,
                remarks: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_inner(),
            ExecutionError::VacancyNotExists(_),
        ));
    }
}
