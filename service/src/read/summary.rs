//! [`Summary`] read model definitions.

#[cfg(doc)]
use crate::domain::{Applicant, Application, Vacancy};
use crate::domain::{application, vacancy};

/// Counts of the [`Vacancy`]s, [`Applicant`]s and [`Application`]s stored.
///
/// Only the statuses having at least one entity are counted by status.
#[derive(Clone, Debug, Default)]
pub struct Summary {
    /// Number of all the [`Vacancy`]s.
    pub total_jobs: u64,

    /// Number of all the [`Applicant`]s.
    pub total_applicants: u64,

    /// Number of all the [`Application`]s.
    pub total_applications: u64,

    /// Number of [`Application`]s per [`application::Status`].
    pub applications_by_status: Vec<(application::Status, u64)>,

    /// Number of [`Vacancy`]s per [`vacancy::Status`].
    pub vacancies_by_status: Vec<(vacancy::Status, u64)>,
}
