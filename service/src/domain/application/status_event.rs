//! [`StatusEvent`] definitions.

#[cfg(doc)]
use common::Date;
use common::{unit, DateOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Application;
use crate::domain::{application, Actor};

/// Immutable entry in the status timeline of an [`Application`].
///
/// Appended exactly once per status transition and never changed afterwards.
#[derive(Clone, Debug)]
pub struct StatusEvent {
    /// ID of this [`StatusEvent`].
    pub id: Id,

    /// ID of the [`Application`] this [`StatusEvent`] belongs to.
    pub application_id: application::Id,

    /// [`application::Status`] set by this [`StatusEvent`].
    pub status: application::Status,

    /// [`application::Remarks`] left with this [`StatusEvent`].
    pub remarks: application::Remarks,

    /// [`Actor`] who performed the transition.
    pub updated_by: Actor,

    /// [`Date`] of the transition.
    pub updated_at: UpdateDate,
}

/// ID of a [`StatusEvent`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// [`Date`] of a [`StatusEvent`].
pub type UpdateDate = DateOf<(StatusEvent, unit::Creation)>;
