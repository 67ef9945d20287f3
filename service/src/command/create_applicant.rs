//! [`Command`] for creating a new [`Applicant`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{applicant, Applicant},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Applicant`].
#[derive(Clone, Debug)]
pub struct CreateApplicant {
    /// Full name of a new [`Applicant`].
    pub full_name: applicant::FullName,

    /// Contact number of a new [`Applicant`].
    pub contact_number: applicant::ContactNumber,

    /// Email of a new [`Applicant`].
    pub email: applicant::Email,

    /// Address of a new [`Applicant`].
    pub address: applicant::Address,

    /// Educational background of a new [`Applicant`].
    pub educational_background: applicant::EducationalBackground,

    /// Work experience of a new [`Applicant`].
    pub work_experience: applicant::WorkExperience,
}

impl<Db> Command<CreateApplicant> for Service<Db>
where
    Db: Database<Insert<Applicant>, Err = Traced<database::Error>>,
{
    type Ok = Applicant;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateApplicant,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateApplicant {
            full_name,
            contact_number,
            email,
            address,
            educational_background,
            work_experience,
        } = cmd;

        let applicant = Applicant {
            id: applicant::Id::new(),
            full_name,
            contact_number,
            email,
            address,
            educational_background,
            work_experience,
        };

        self.database()
            .execute(Insert(applicant.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(applicant)
    }
}

/// Error of [`CreateApplicant`] [`Command`] execution.
pub type ExecutionError = database::Error;
