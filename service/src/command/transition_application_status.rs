//! [`Command`] for moving an [`Application`] to another [`Status`].

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::application::Status;
use crate::{
    domain::{
        application::{self, status_event},
        Actor, Application, StatusEvent,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for moving an [`Application`] to another [`Status`].
///
/// Any [`Status`] may follow any other one, including the same one.
#[derive(Clone, Debug)]
pub struct TransitionApplicationStatus {
    /// ID of the [`Application`] to move.
    pub application_id: application::Id,

    /// [`Status`] to move the [`Application`] to.
    pub status: application::Status,

    /// [`application::Remarks`] replacing the current ones.
    pub remarks: Option<application::Remarks>,

    /// [`Actor`] performing the transition.
    pub actor: Actor,
}

/// Output of [`TransitionApplicationStatus`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Application`] after the transition.
    pub application: Application,

    /// [`StatusEvent`] recording the transition.
    pub event: StatusEvent,
}

impl<Db> Command<TransitionApplicationStatus> for Service<Db>
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
        + Database<Insert<StatusEvent>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: TransitionApplicationStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let TransitionApplicationStatus {
            application_id,
            status,
            remarks,
            actor,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Concurrent transitions of the same `Application` go one by one.
        tx.execute(Lock(By::new(application_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut application = tx
            .execute(Select(By::<Option<Application>, _>::new(
                application_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ApplicationNotExists(application_id))
            .map_err(tracerr::wrap!())?;

        let previous = application.status;
        application.status = status;
        application.remarks.clone_from(&remarks);

        let event = StatusEvent {
            id: status_event::Id::new(),
            application_id,
            status,
            remarks: remarks.unwrap_or_default(),
            updated_by: actor,
            updated_at: status_event::UpdateDate::today(),
        };

        tx.execute(Update(application.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Insert(event.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Application(id: {application_id})` moved from `{previous}` to \
             `{status}` by `{}`",
            event.updated_by,
        );

        Ok(Output { application, event })
    }
}

/// Error of [`TransitionApplicationStatus`] [`Command`] execution.
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
    use futures::future;

    use crate::{
        command::Command as _,
        domain::{application, Actor, Application, StatusEvent},
        infra::{database::memory::Table, Database as _},
        test_util::{fixture, service},
    };

    use super::{ExecutionError, TransitionApplicationStatus};

    fn transition(
        application_id: application::Id,
        status: application::Status,
        remarks: Option<&str>,
    ) -> TransitionApplicationStatus {
        TransitionApplicationStatus {
            application_id,
            status,
            remarks: remarks.map(|r| r.parse().unwrap()),
            actor: "Maria Santos".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn overwrites_status_and_appends_event() {
        let svc = service();
        let app = fixture::application(&svc).await;

        let out = svc
            .execute(transition(
                app.id,
                application::Status::ForInterview,
                Some("Passed the exam"),
            ))
            .await
            .unwrap();

        assert_eq!(out.application.status, application::Status::ForInterview);
        assert_eq!(
            out.application.remarks.as_ref().map(ToString::to_string),
            Some("Passed the exam".into()),
        );
        assert_eq!(out.event.status, application::Status::ForInterview);
        assert_eq!(out.event.remarks.to_string(), "Passed the exam");
        assert_eq!(out.event.updated_by.to_string(), "Maria Santos");

        let history = fixture::history(&svc, app.id).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, out.event.id);

        let stored = svc
            .database()
            .execute(Select(By::<Option<Application>, _>::new(app.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, application::Status::ForInterview);
    }

    #[tokio::test]
    async fn records_empty_remarks_when_omitted() {
        let svc = service();
        let app = fixture::application(&svc).await;

        let out = svc
            .execute(TransitionApplicationStatus {
                application_id: app.id,
                status: application::Status::Rejected,
                remarks: None,
                actor: Actor::default(),
            })
            .await
            .unwrap();

        assert!(out.application.remarks.is_none());
        assert!(out.event.remarks.is_empty());
        assert_eq!(out.event.updated_by.to_string(), "System");
    }

    #[tokio::test]
    async fn repeated_transition_appends_twice() {
        let svc = service();
        let app = fixture::application(&svc).await;

        for _ in 0..2 {
            _ = svc
                .execute(transition(
                    app.id,
                    application::Status::Approved,
                    Some("Same"),
                ))
                .await
                .unwrap();
        }

        let history = fixture::history(&svc, app.id).await;
        assert_eq!(history.len(), 2);
        assert!(history
            .iter()
            .all(|e| e.status == application::Status::Approved));
    }

    #[tokio::test]
    async fn allows_any_to_any() {
        let svc = service();
        let app = fixture::application(&svc).await;

        for status in [
            application::Status::Hired,
            application::Status::Received,
            application::Status::Rejected,
            application::Status::UnderInitialScreening,
        ] {
            let out = svc
                .execute(transition(app.id, status, None))
                .await
                .unwrap();
            assert_eq!(out.application.status, status);
        }
    }

    #[tokio::test]
    async fn rejects_unknown_application_without_writes() {
        let svc = service();
        let id = application::Id::new();

        let err = svc
            .execute(transition(id, application::Status::Hired, None))
            .await
            .unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::ApplicationNotExists(i) if i == id,
        ));
        assert!(fixture::history(&svc, id).await.is_empty());
    }

    #[tokio::test]
    async fn failed_history_append_leaves_application_untouched() {
        let svc = service();
        let app = fixture::application(&svc).await;
        svc.database().fail_writes_to(Table::StatusHistory).await;

        let err = svc
            .execute(transition(
                app.id,
                application::Status::Hired,
                Some("Never stored"),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err.into_inner(), ExecutionError::Db(_)));

        let stored = svc
            .database()
            .execute(Select(By::<Option<Application>, _>::new(app.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, app.status);
        assert_eq!(stored.remarks, app.remarks);
        assert!(svc
            .database()
            .execute(Select(By::<Vec<StatusEvent>, _>::new(app.id)))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn concurrent_transitions_keep_status_equal_to_last_event() {
        let svc = service();
        let app = fixture::application(&svc).await;

        let statuses = [
            application::Status::ForExamination,
            application::Status::ForInterview,
            application::Status::Rejected,
            application::Status::Approved,
            application::Status::Hired,
        ];
        let results = future::join_all(
            statuses
                .iter()
                .map(|s| svc.execute(transition(app.id, *s, None))),
        )
        .await;
        assert!(results.iter().all(Result::is_ok));

        let history = fixture::history(&svc, app.id).await;
        assert_eq!(history.len(), statuses.len());

        let stored = svc
            .database()
            .execute(Select(By::<Option<Application>, _>::new(app.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(Some(stored.status), history.last().map(|e| e.status));
    }
}
