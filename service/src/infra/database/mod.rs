//! [`Database`]-related implementations.

#[cfg(any(test, feature = "memory"))]
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(any(test, feature = "memory"))]
pub use self::memory::Memory;
#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(any(test, feature = "memory"))]
    /// [`Memory`] error.
    Memory(memory::Error),

    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            #[cfg(any(test, feature = "memory"))]
            Self::Memory(e) => e.is_unique_violation(constraint),
            #[cfg(feature = "postgres")]
            Self::Postgres(e) => e.is_unique_violation(constraint),
        }
    }

    /// Checks if the error is a foreign key violation of the specified
    /// constraint.
    #[must_use]
    pub fn is_foreign_key_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            #[cfg(any(test, feature = "memory"))]
            Self::Memory(e) => e.is_foreign_key_violation(constraint),
            #[cfg(feature = "postgres")]
            Self::Postgres(e) => e.is_foreign_key_violation(constraint),
        }
    }
}

/// Names of the constraints the [`Database`] enforces.
pub mod constraint {
    /// Evaluation must reference an existing application.
    pub const EVALUATION_APPLICATION_FK: &str =
        "evaluations_application_id_fkey";

    /// Only one evaluation per application.
    pub const EVALUATION_APPLICATION_UNIQUE: &str =
        "evaluations_application_id_key";

    /// Application must reference an existing applicant.
    pub const APPLICATION_APPLICANT_FK: &str =
        "applications_applicant_id_fkey";

    /// Application must reference an existing vacancy.
    pub const APPLICATION_VACANCY_FK: &str = "applications_vacancy_id_fkey";

    /// Status event must reference an existing application.
    pub const STATUS_HISTORY_APPLICATION_FK: &str =
        "status_history_application_id_fkey";

    /// Vacancy must reference an existing department.
    pub const VACANCY_DEPARTMENT_FK: &str = "vacancies_department_id_fkey";
}
