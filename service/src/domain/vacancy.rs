//! [`Vacancy`] definitions.

#[cfg(doc)]
use common::Date;
use common::{define_kind, unit, DateOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Department;
use crate::domain::department;

/// Open position posted by the HR office.
#[derive(Clone, Debug)]
pub struct Vacancy {
    /// ID of this [`Vacancy`].
    pub id: Id,

    /// [`PositionTitle`] of this [`Vacancy`].
    pub position_title: PositionTitle,

    /// ID of the [`Department`] offering this [`Vacancy`].
    pub department_id: department::Id,

    /// [`SalaryGrade`] of this [`Vacancy`].
    pub salary_grade: SalaryGrade,

    /// [`Qualifications`] required by this [`Vacancy`].
    pub qualifications: Qualifications,

    /// [`Date`] when this [`Vacancy`] was posted.
    pub posting_date: PostingDate,

    /// [`Date`] when this [`Vacancy`] stops accepting applications.
    pub closing_date: ClosingDate,

    /// [`Status`] of this [`Vacancy`].
    pub status: Status,
}

/// ID of a [`Vacancy`].
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
    Ord,
    PartialEq,
    PartialOrd,
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

define_text! {
    /// Title of the position offered by a [`Vacancy`].
    PositionTitle(max_len = 256)
}

define_text! {
    /// Qualifications required by a [`Vacancy`].
    Qualifications(max_len = 4096)
}

/// Salary grade of a [`Vacancy`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct SalaryGrade(i16);

impl SalaryGrade {
    /// Creates a new [`SalaryGrade`] if the given `grade` is positive.
    #[must_use]
    pub fn new(grade: impl TryInto<i16>) -> Option<Self> {
        grade.try_into().ok().filter(|g| *g > 0).map(Self)
    }
}

define_kind! {
    #[doc = "Status of a [`Vacancy`]."]
    enum Status {
        #[doc = "[`Vacancy`] accepts applications."]
        #[label = "Open"]
        Open = 1,

        #[doc = "[`Vacancy`] no longer accepts applications."]
        #[label = "Closed"]
        Closed = 2,

        #[doc = "[`Vacancy`] position has been filled."]
        #[label = "Filled"]
        Filled = 3,
    }
}

/// [`Date`] when a [`Vacancy`] was posted.
pub type PostingDate = DateOf<(Vacancy, unit::Creation)>;

/// [`Date`] when a [`Vacancy`] stops accepting applications.
pub type ClosingDate = DateOf<(Vacancy, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use super::{SalaryGrade, Status};

    #[test]
    fn requires_positive_salary_grade() {
        assert!(SalaryGrade::new(11).is_some());
        assert!(SalaryGrade::new(0).is_none());
        assert!(SalaryGrade::new(-3).is_none());
        assert!(SalaryGrade::new(100_000).is_none());
    }

    #[test]
    fn parses_status_label() {
        assert_eq!("Filled".parse::<Status>().unwrap(), Status::Filled);
        assert!("open".parse::<Status>().is_err());
    }
}
