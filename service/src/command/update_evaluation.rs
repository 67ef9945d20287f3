//! [`Command`] for rescoring an existing [`Evaluation`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::evaluation::TotalScore;
use crate::{
    domain::{evaluation, Evaluation},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing both sub-scores of an [`Evaluation`].
///
/// Its [`TotalScore`] is recomputed, while the evaluator and the evaluation
/// date stay untouched.
#[derive(Clone, Debug)]
pub struct UpdateEvaluation {
    /// ID of the [`Evaluation`] to update.
    pub id: evaluation::Id,

    /// New exam [`evaluation::Score`].
    pub exam_score: evaluation::Score,

    /// New interview [`evaluation::Score`].
    pub interview_score: evaluation::Score,

    /// New [`evaluation::Remarks`].
    ///
    /// Empty, if [`None`].
    pub remarks: Option<evaluation::Remarks>,
}

impl<Db> Command<UpdateEvaluation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Evaluation, evaluation::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Evaluation>, evaluation::Id>>,
            Ok = Option<Evaluation>,
            Err = Traced<database::Error>,
        > + Database<Update<Evaluation>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Evaluation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateEvaluation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateEvaluation {
            id,
            exam_score,
            interview_score,
            remarks,
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

        let mut evaluation = tx
            .execute(Select(By::<Option<Evaluation>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EvaluationNotExists(id))
            .map_err(tracerr::wrap!())?;

        evaluation.rescore(exam_score, interview_score);
        evaluation.remarks = remarks.unwrap_or_default();

        tx.execute(Update(evaluation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(evaluation)
    }
}

/// Error of [`UpdateEvaluation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Evaluation`] with the provided ID does not exist.
    #[display("`Evaluation(id: {_0})` does not exist")]
    #[from(ignore)]
    EvaluationNotExists(#[error(not(source))] evaluation::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{Command as _, CreateEvaluation},
        domain::{evaluation, Actor},
        test_util::{fixture, service},
    };

    use super::{ExecutionError, UpdateEvaluation};

    fn score(value: f64) -> evaluation::Score {
        evaluation::Score::new(value).unwrap()
    }

    #[tokio::test]
    async fn recomputes_total_and_keeps_evaluator() {
        let svc = service();
        let app = fixture::application(&svc).await;
        let created = svc
            .execute(CreateEvaluation {
                application_id: app.id,
                exam_score: score(60.0),
                interview_score: score(70.0),
                remarks: Some("Initial".parse().unwrap()),
                evaluator: "Juan Dela Cruz".parse().unwrap(),
            })
            .await
            .unwrap();

        let updated = svc
            .execute(UpdateEvaluation {
                id: created.id,
                exam_score: score(77.5),
                interview_score: score(80.25),
                remarks: Some("Rechecked".parse().unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(f64::from(updated.total_score), 78.875);
        assert_eq!(updated.remarks.to_string(), "Rechecked");
        assert_eq!(updated.evaluated_by, created.evaluated_by);
        assert_eq!(updated.evaluated_at, created.evaluated_at);

        let stored = fixture::evaluations(&svc).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(f64::from(stored[0].total_score), 78.875);
    }

    #[tokio::test]
    async fn rejects_unknown_evaluation() {
        let id = evaluation::Id::new();

        let err = service()
            .execute(UpdateEvaluation {
                id,
                exam_score: score(1.0),
                interview_score: score(2.0),
                remarks: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_inner(),
            ExecutionError::EvaluationNotExists(i) if i == id,
        ));
    }

    #[tokio::test]
    async fn keeps_evaluator_when_system() {
        let svc = service();
        let app = fixture::application(&svc).await;
        let created = svc
            .execute(CreateEvaluation {
                application_id: app.id,
                exam_score: score(1.0),
                interview_score: score(1.0),
                remarks: None,
                evaluator: Actor::system(),
            })
            .await
            .unwrap();

        let updated = svc
            .execute(UpdateEvaluation {
                id: created.id,
                exam_score: score(0.0),
                interview_score: score(0.0),
                remarks: None,
            })
            .await
            .unwrap();
        assert_eq!(f64::from(updated.total_score), 0.0);
        assert_eq!(updated.evaluated_by, Actor::system());
    }
}
