//! [`Query`] for ranking the [`Application`]s of a [`Vacancy`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Application, Evaluation};
use crate::{
    domain::{vacancy, Vacancy},
    infra::{database, Database},
    read::{self, Ranking},
    Query, Service,
};

/// [`Query`] ranking the evaluated [`Application`]s of a [`Vacancy`].
///
/// [`Application`]s without an [`Evaluation`] are left out. Computed anew on
/// every execution.
#[derive(Clone, Copy, Debug)]
pub struct ForVacancy {
    /// ID of the [`Vacancy`] to rank the [`Application`]s of.
    pub vacancy_id: vacancy::Id,
}

impl<Db> Query<ForVacancy> for Service<Db>
where
    Db: Database<
            Select<By<Option<Vacancy>, vacancy::Id>>,
            Ok = Option<Vacancy>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<read::ranking::Entry>, vacancy::Id>>,
            Ok = Vec<read::ranking::Entry>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Ranking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ForVacancy { vacancy_id }: ForVacancy,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Select(By::<Option<Vacancy>, _>::new(vacancy_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VacancyNotExists(vacancy_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let entries = self
            .database()
            .execute(Select(By::<Vec<read::ranking::Entry>, _>::new(
                vacancy_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Ranking::new(entries))
    }
}

/// Error of [`ForVacancy`] [`Query`] execution.
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
        domain::{evaluation, vacancy, Actor, Application},
        test_util::{fixture, service},
        Query as _,
    };

    use super::{ExecutionError, ForVacancy};

    async fn evaluate(
        svc: &fixture::Svc,
        app: &Application,
        exam: f64,
        interview: f64,
    ) {
        _ = svc
            .execute(CreateEvaluation {
                application_id: app.id,
                exam_score: evaluation::Score::new(exam).unwrap(),
                interview_score: evaluation::Score::new(interview).unwrap(),
                remarks: None,
                evaluator: Actor::system(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ranks_by_total_score_and_skips_unevaluated() {
        let svc = service();
        let vacancy = fixture::vacancy(&svc).await;
        let a = fixture::apply(&svc, &vacancy, "Ana Reyes").await;
        let b = fixture::apply(&svc, &vacancy, "Ben Cruz").await;
        let c = fixture::apply(&svc, &vacancy, "Carla Lim").await;
        let _unevaluated = fixture::apply(&svc, &vacancy, "Dan Tan").await;
        evaluate(&svc, &a, 88.0, 92.0).await;
        evaluate(&svc, &b, 95.0, 97.0).await;
        evaluate(&svc, &c, 90.0, 88.0).await;

        let ranking = svc
            .execute(ForVacancy {
                vacancy_id: vacancy.id,
            })
            .await
            .unwrap();

        let ranked = ranking
            .iter()
            .map(|e| (e.application_id, f64::from(e.total_score)))
            .collect::<Vec<_>>();
        assert_eq!(ranked, [(b.id, 96.0), (a.id, 90.0), (c.id, 89.0)]);
        assert_eq!(ranking[0].applicant_name.to_string(), "Ben Cruz");
    }

    #[tokio::test]
    async fn ignores_other_vacancies() {
        let svc = service();
        let mine = fixture::vacancy(&svc).await;
        let other = fixture::vacancy(&svc).await;
        let app = fixture::apply(&svc, &other, "Ana Reyes").await;
        evaluate(&svc, &app, 50.0, 50.0).await;

        let ranking = svc
            .execute(ForVacancy { vacancy_id: mine.id })
            .await
            .unwrap();
        assert!(ranking.is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_vacancy() {
        let id = vacancy::Id::new();

        let err = service()
            .execute(ForVacancy { vacancy_id: id })
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_inner(),
            ExecutionError::VacancyNotExists(i) if i == id,
        ));
    }
}
