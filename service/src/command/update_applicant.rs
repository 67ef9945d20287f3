//! [`Command`] for updating an existing [`Applicant`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{applicant, Applicant},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing the details of an [`Applicant`].
#[derive(Clone, Debug)]
pub struct UpdateApplicant {
    /// ID of the [`Applicant`] to update.
    pub id: applicant::Id,

    /// New full name.
    pub full_name: applicant::FullName,

    /// New contact number.
    pub contact_number: applicant::ContactNumber,

    /// New email.
    pub email: applicant::Email,

    /// New address.
    pub address: applicant::Address,

    /// New educational background.
    pub educational_background: applicant::EducationalBackground,

    /// New work experience.
    pub work_experience: applicant::WorkExperience,
}

impl<Db> Command<UpdateApplicant> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Applicant, applicant::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Applicant>, applicant::Id>>,
            Ok = Option<Applicant>,
            Err = Traced<database::Error>,
        > + Database<Update<Applicant>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Applicant;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateApplicant,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateApplicant {
            id,
            full_name,
            contact_number,
            email,
            address,
            educational_background,
            work_experience,
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

        let exists = tx
            .execute(Select(By::<Option<Applicant>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_some();
        if !exists {
            return Err(tracerr::new!(E::ApplicantNotExists(id)));
        }

        let applicant = Applicant {
            id,
            full_name,
            contact_number,
            email,
            address,
            educational_background,
            work_experience,
        };
        tx.execute(Update(applicant.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(applicant)
    }
}

/// Error of [`UpdateApplicant`] [`Command`] execution.
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
        command::Command as _,
        domain::applicant,
        query,
        test_util::{fixture, service},
        Query as _,
    };

    use super::{ExecutionError, UpdateApplicant};

    fn renamed(id: applicant::Id) -> UpdateApplicant {
        UpdateApplicant {
            id,
            full_name: "Ana Reyes-Cruz".parse().unwrap(),
            contact_number: "09181234567".parse().unwrap(),
            email: "ana.cruz@example.com".parse().unwrap(),
            address: "Tetuan, Zamboanga City".parse().unwrap(),
            educational_background: "MS Computer Science".parse().unwrap(),
            work_experience: "5 years as a developer".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn replaces_details() {
        let svc = service();
        let app = fixture::application(&svc).await;

        _ = svc.execute(renamed(app.applicant_id)).await.unwrap();

        let stored = svc
            .execute(query::applicant::ById::by(app.applicant_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.full_name.to_string(), "Ana Reyes-Cruz");
        assert_eq!(stored.email.to_string(), "ana.cruz@example.com");
        assert!(fixture::find_application(&svc, app.id).await.is_some());
    }

    #[tokio::test]
    async fn rejects_unknown_applicant() {
        let id = applicant::Id::new();

        let err = service().execute(renamed(id)).await.unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::ApplicantNotExists(a) if a == id,
        ));
    }
}
