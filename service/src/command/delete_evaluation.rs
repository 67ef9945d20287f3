//! [`Command`] for deleting an [`Evaluation`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{evaluation, Evaluation},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Evaluation`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteEvaluation {
    /// ID of the [`Evaluation`] to delete.
    pub id: evaluation::Id,
}

impl<Db> Command<DeleteEvaluation> for Service<Db>
where
    Db: Database<
        Delete<By<Evaluation, evaluation::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteEvaluation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteEvaluation { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::EvaluationNotExists(id)));
        }

        Ok(())
    }
}

/// Error of [`DeleteEvaluation`] [`Command`] execution.
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
