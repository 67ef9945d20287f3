//! [`Query`] collection related to [`Vacancy`]s.

use common::operations::By;

use crate::domain::{vacancy, Vacancy};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Vacancy`] by its [`vacancy::Id`].
pub type ById = DatabaseQuery<By<Option<Vacancy>, vacancy::Id>>;

/// Queries all the [`Vacancy`]s, the most recently posted first.
pub type List = DatabaseQuery<By<Vec<Vacancy>, ()>>;
