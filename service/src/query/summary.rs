//! [`Query`] for the [`Summary`] of the hiring pipeline.

use common::operations::By;

use crate::read::Summary;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Counts the stored entities into a [`Summary`].
pub type Get = DatabaseQuery<By<Summary, ()>>;
