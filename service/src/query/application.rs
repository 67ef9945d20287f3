//! [`Query`] collection related to [`Application`]s.

use common::operations::By;

use crate::domain::{application, Application};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Application`] by its [`application::Id`].
pub type ById = DatabaseQuery<By<Option<Application>, application::Id>>;

/// Queries all the [`Application`]s, the most recently filed first.
pub type List = DatabaseQuery<By<Vec<Application>, ()>>;
