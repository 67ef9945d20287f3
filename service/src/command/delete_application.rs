//! [`Command`] for deleting an [`Application`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Evaluation, StatusEvent};
use crate::{
    domain::{application, Application},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Application`] permanently, along with its
/// [`StatusEvent`]s and [`Evaluation`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteApplication {
    /// ID of the [`Application`] to delete.
    pub id: application::Id,
}

impl<Db> Command<DeleteApplication> for Service<Db>
where
    Db: Database<
        Delete<By<Application, application::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteApplication,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteApplication { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::ApplicationNotExists(id)));
        }

        Ok(())
    }
}

/// Error of [`DeleteApplication`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Application`] with the provided ID does not exist.
    #[display("`Application(id: {_0})` does not exist")]
    #[from(ignore)]
    ApplicationNotExists(#[error(not(source))] application::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        command::{
            Command as _, CreateEvaluation, TransitionApplicationStatus,
        },
        domain::{
            application, evaluation, Actor, Application, Evaluation,
            StatusEvent,
        },
        infra::Database as _,
        test_util::{fixture, service},
    };

    use super::{DeleteApplication, ExecutionError};

    #[tokio::test]
    async fn cascades_to_history_and_evaluation() {
        let svc = service();
        let app = fixture::application(&svc).await;
        _ = svc
            .execute(TransitionApplicationStatus {
                application_id: app.id,
                status: application::Status::ForExamination,
                remarks: None,
                actor: Actor::system(),
            })
            .await
            .unwrap();
        let eval = svc
            .execute(CreateEvaluation {
                application_id: app.id,
                exam_score: evaluation::Score::new(80.0).unwrap(),
                interview_score: evaluation::Score::new(70.0).unwrap(),
                remarks: None,
                evaluator: Actor::system(),
            })
            .await
            .unwrap();

        svc.execute(DeleteApplication { id: app.id }).await.unwrap();

        let db = svc.database();
        assert!(db
            .execute(Select(By::<Option<Application>, _>::new(app.id)))
            .await
            .unwrap()
            .is_none());
        assert!(db
            .execute(Select(By::<Vec<StatusEvent>, _>::new(app.id)))
            .await
            .unwrap()
            .is_empty());
        assert!(db
            .execute(Select(By::<Option<Evaluation>, _>::new(eval.id)))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn rejects_unknown_application() {
        let err = service()
            .execute(DeleteApplication {
                id: application::Id::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_inner(),
            ExecutionError::ApplicationNotExists(_),
        ));
    }
}
