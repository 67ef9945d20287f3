//! [`Query`] collection related to [`StatusEvent`]s.

use common::operations::By;

use crate::domain::{application, StatusEvent};
#[cfg(doc)]
use crate::{domain::Application, Query};

use super::DatabaseQuery;

/// Queries the [`StatusEvent`]s of an [`Application`], the oldest first.
///
/// Events of the same day keep the order they were recorded in.
pub type ByApplication = DatabaseQuery<By<Vec<StatusEvent>, application::Id>>;

#[cfg(test)]
mod spec {
    use common::operations::Insert;

    use crate::{
        domain::{
            application::{self, status_event},
            Actor, StatusEvent,
        },
        infra::Database as _,
        test_util::{fixture, service},
        Query as _,
    };

    use super::ByApplication;

    #[tokio::test]
    async fn lists_oldest_first() {
        let svc = service();
        let app = fixture::application(&svc).await;
        let other = fixture::application(&svc).await;

        let recorded = [
            ("2026-01-28", application::Status::ForInterview),
            ("2026-01-20", application::Status::UnderInitialScreening),
            ("2026-02-02", application::Status::ForFinalEvaluation),
            ("2026-01-25", application::Status::ForExamination),
        ];
        for (date, status) in recorded {
            svc.database()
                .execute(Insert(StatusEvent {
                    id: status_event::Id::new(),
                    application_id: app.id,
                    status,
                    remarks: application::Remarks::default(),
                    updated_by: Actor::system(),
                    updated_at: date.parse().unwrap(),
                }))
                .await
                .unwrap();
        }

        let history = svc.execute(ByApplication::by(app.id)).await.unwrap();

        let dates = history
            .iter()
            .map(|e| e.updated_at.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            dates,
            ["2026-01-20", "2026-01-25", "2026-01-28", "2026-02-02"],
        );
        assert!(history.iter().all(|e| e.application_id == app.id));
        assert!(svc
            .execute(ByApplication::by(other.id))
            .await
            .unwrap()
            .is_empty());
    }
}
