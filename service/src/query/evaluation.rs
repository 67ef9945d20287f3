//! [`Query`] collection related to [`Evaluation`]s.

use common::operations::By;

use crate::domain::{evaluation, Evaluation};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Evaluation`] by its [`evaluation::Id`].
pub type ById = DatabaseQuery<By<Option<Evaluation>, evaluation::Id>>;

/// Queries all the [`Evaluation`]s in their creation order.
pub type List = DatabaseQuery<By<Vec<Evaluation>, ()>>;
