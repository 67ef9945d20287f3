//! [`Command`] for deleting an [`Applicant`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Application;
use crate::{
    domain::{applicant, Applicant},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Applicant`] permanently, along with all
/// their [`Application`]s.
#[derive(Clone, Copy, Debug)]
pub struct DeleteApplicant {
    /// ID of the [`Applicant`] to delete.
    pub id: applicant::Id,
}

impl<Db> Command<DeleteApplicant> for Service<Db>
where
    Db: Database<
        Delete<By<Applicant, applicant::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteApplicant,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteApplicant { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::ApplicantNotExists(id)));
        }

        Ok(())
    }
}

/// Error of [`DeleteApplicant`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Applicant`] with the provided ID does not exist.
    #[display("`Applicant(id: {_0})` does not exist")]
    #[from(ignore)]
    ApplicantNotExists(#[error(not(source))] applicant::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{Command as _, TransitionApplicationStatus},
        domain::{applicant, application, Actor},
        query,
        test_util::{fixture, service},
        Query as _,
    };

    use super::{DeleteApplicant, ExecutionError};

    #[tokio::test]
    async fn cascades_to_applications() {
        let svc = service();
        let app = fixture::application(&svc).await;
        _ = svc
            .execute(TransitionApplicationStatus {
                application_id: app.id,
                status: application::Status::Hired,
                remarks: None,
                actor: Actor::system(),
            })
            .await
            .unwrap();

        svc.execute(DeleteApplicant {
            id: app.applicant_id,
        })
        .await
        .unwrap();

        assert!(svc
            .execute(query::applicant::ById::by(app.applicant_id))
            .await
            .unwrap()
            .is_none());
        assert!(fixture::find_application(&svc, app.id).await.is_none());
        assert!(fixture::history(&svc, app.id).await.is_empty());
        assert!(svc
            .execute(query::vacancy::ById::by(app.vacancy_id))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn rejects_unknown_applicant() {
        let err = service()
            .execute(DeleteApplicant {
                id: applicant::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::ApplicantNotExists(_),
        ));
    }
}
