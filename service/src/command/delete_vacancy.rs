//! [`Command`] for deleting a [`Vacancy`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Application;
use crate::{
    domain::{vacancy, Vacancy},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Vacancy`] permanently, along with all the
/// [`Application`]s filed to it.
#[derive(Clone, Copy, Debug)]
pub struct DeleteVacancy {
    /// ID of the [`Vacancy`] to delete.
    pub id: vacancy::Id,
}

impl<Db> Command<DeleteVacancy> for Service<Db>
where
    Db: Database<
        Delete<By<Vacancy, vacancy::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteVacancy) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteVacancy { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::VacancyNotExists(id)));
        }

        Ok(())
    }
}

/// Error of [`DeleteVacancy`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
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
        command::{Command as _, CreateEvaluation},
        domain::{evaluation, vacancy, Actor},
        query,
        test_util::{fixture, service},
        Query as _,
    };

    use super::{DeleteVacancy, ExecutionError};

    #[tokio::test]
    async fn cascades_to_applications() {
        let svc = service();
        let v = fixture::vacancy(&svc).await;
        let app = fixture::apply(&svc, &v, "Ana Reyes").await;
        let other = fixture::application(&svc).await;
        _ = svc
            .execute(CreateEvaluation {
                application_id: app.id,
                exam_score: evaluation::Score::new(80.0).unwrap(),
                interview_score: evaluation::Score::new(90.0).unwrap(),
                remarks: None,
                evaluator: Actor::system(),
            })
            .await
            .unwrap();

        svc.execute(DeleteVacancy { id: v.id }).await.unwrap();

        assert!(svc
            .execute(query::vacancy::ById::by(v.id))
            .await
            .unwrap()
            .is_none());
        assert!(fixture::find_application(&svc, app.id).await.is_none());
        assert!(fixture::history(&svc, app.id).await.is_empty());
        assert!(fixture::evaluations(&svc).await.is_empty());
        assert!(fixture::find_application(&svc, other.id).await.is_some());
        // Applicant outlives the application.
        assert!(svc
            .execute(query::applicant::ById::by(app.applicant_id))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn rejects_unknown_vacancy() {
        let err = service()
            .execute(DeleteVacancy {
                id: vacancy::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::VacancyNotExists(_),
        ));
    }
}
