//! [`Query`] collection related to [`Department`]s.

use common::operations::By;

use crate::domain::Department;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Department`]s ordered by their names.
pub type List = DatabaseQuery<By<Vec<Department>, ()>>;
