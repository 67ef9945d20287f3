//! [`Query`] collection related to [`Applicant`]s.

use common::operations::By;

use crate::domain::{applicant, Applicant};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Applicant`] by its [`applicant::Id`].
pub type ById = DatabaseQuery<By<Option<Applicant>, applicant::Id>>;

/// Queries all the [`Applicant`]s, ordered by their full names.
pub type List = DatabaseQuery<By<Vec<Applicant>, ()>>;
