//! [`Command`] for recording an [`Evaluation`] of an [`Application`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{evaluation::TotalScore, Application};
use crate::{
    domain::{application, evaluation, Actor, Evaluation},
    infra::{database, database::constraint, Database},
    Service,
};

use super::Command;

/// [`Command`] for recording an [`Evaluation`] of an [`Application`].
///
/// Its [`TotalScore`] is computed out of the provided sub-scores.
#[derive(Clone, Debug)]
pub struct CreateEvaluation {
    /// ID of the evaluated [`Application`].
    pub application_id: application::Id,

    /// Exam [`evaluation::Score`].
    pub exam_score: evaluation::Score,

    /// Interview [`evaluation::Score`].
    pub interview_score: evaluation::Score,

    /// [`evaluation::Remarks`] of the evaluator.
    pub remarks: Option<evaluation::Remarks>,

    /// [`Actor`] evaluating the [`Application`].
    pub evaluator: Actor,
}

impl<Db> Command<CreateEvaluation> for Service<Db>
where
    Db: Database<Insert<Evaluation>, Err = Traced<database::Error>>,
{
    type Ok = Evaluation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateEvaluation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateEvaluation {
            application_id,
            exam_score,
            interview_score,
            remarks,
            evaluator,
        } = cmd;

        let evaluation = Evaluation {
            id: evaluation::Id::new(),
            application_id,
            exam_score,
            interview_score,
            total_score: evaluation::TotalScore::weighted(
                exam_score,
                interview_score,
            ),
            remarks: remarks.unwrap_or_default(),
            evaluated_by: evaluator,
            evaluated_at: evaluation::EvaluationDate::today(),
        };

        // Missing `Application` and duplicates are caught by constraints.
        self.database()
            .execute(Insert(evaluation.clone()))
            .await
            .map_err(|e| {
                let e = e.into_inner();
                let err = if e.is_foreign_key_violation(Some(
                    constraint::EVALUATION_APPLICATION_FK,
                )) {
                    E::ApplicationNotExists(application_id)
                } else if e.is_unique_violation(Some(
                    constraint::EVALUATION_APPLICATION_UNIQUE,
                )) {
                    E::EvaluationExists(application_id)
                } else {
                    E::Db(e)
                };
                tracerr::new!(err)
            })
            .map(drop)?;

        log::info!(
            "`Application(id: {application_id})` evaluated with total score \
             {} by `{}`",
            evaluation.total_score,
            evaluation.evaluated_by,
        );

        Ok(evaluation)
    }
}

/// Error of [`CreateEvaluation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Application`] with the provided ID does not exist.
    #[display("`Application(id: {_0})` does not exist")]
    #[from(ignore)]
    ApplicationNotExists(#[error(not(source))] application::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Application`] is evaluated already.
    #[display("`Application(id: {_0})` is evaluated already")]
    #[from(ignore)]
    EvaluationExists(#[error(not(source))] application::Id),
}
