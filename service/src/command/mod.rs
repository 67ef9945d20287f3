//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_applicant;
pub mod create_application;
pub mod create_evaluation;
pub mod create_user_session;
pub mod create_vacancy;
pub mod delete_applicant;
pub mod delete_application;
pub mod delete_evaluation;
pub mod delete_vacancy;
pub mod transition_application_status;
pub mod update_applicant;
pub mod update_application;
pub mod update_evaluation;
pub mod update_vacancy;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_applicant::CreateApplicant, create_application::CreateApplication,
    create_evaluation::CreateEvaluation,
    create_user_session::CreateUserSession, create_vacancy::CreateVacancy,
    delete_applicant::DeleteApplicant, delete_application::DeleteApplication,
    delete_evaluation::DeleteEvaluation, delete_vacancy::DeleteVacancy,
    transition_application_status::TransitionApplicationStatus,
    update_applicant::UpdateApplicant, update_application::UpdateApplication,
    update_evaluation::UpdateEvaluation, update_vacancy::UpdateVacancy,
};
