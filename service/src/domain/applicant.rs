//! [`Applicant`] definitions.

use std::sync::LazyLock;

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Application, Vacancy};

pub use crate::domain::user::Email;

/// Person applying for one or more [`Vacancy`]s through [`Application`]s.
#[derive(Clone, Debug)]
pub struct Applicant {
    /// ID of this [`Applicant`].
    pub id: Id,

    /// [`FullName`] of this [`Applicant`].
    pub full_name: FullName,

    /// [`ContactNumber`] of this [`Applicant`].
    pub contact_number: ContactNumber,

    /// [`Email`] of this [`Applicant`].
    pub email: Email,

    /// [`Address`] of this [`Applicant`].
    pub address: Address,

    /// [`EducationalBackground`] of this [`Applicant`].
    pub educational_background: EducationalBackground,

    /// [`WorkExperience`] of this [`Applicant`].
    pub work_experience: WorkExperience,
}

/// ID of an [`Applicant`].
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

define_text! {
    /// Full name of an [`Applicant`].
    FullName(max_len = 512)
}

define_text! {
    /// Postal address of an [`Applicant`].
    Address(max_len = 1024)
}

define_text! {
    /// Educational background of an [`Applicant`].
    EducationalBackground(max_len = 4096)
}

define_text! {
    /// Work experience of an [`Applicant`].
    WorkExperience(max_len = 4096)
}

/// Phone number of an [`Applicant`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Creates a new [`ContactNumber`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`ContactNumber`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`ContactNumber`] format:
        /// an optional leading `+`, then digits with optional spaces, dashes
        /// or parentheses between them.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?[\d(][\d\s()-]{5,18}\d$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for ContactNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ContactNumber`")
    }
}

#[cfg(test)]
mod spec {
    use super::ContactNumber;

    #[test]
    fn accepts_local_and_international_numbers() {
        for n in ["09171234567", "+63 917 123 4567", "(062) 991-1771"] {
            assert!(ContactNumber::new(n).is_some(), "`{n}` must be accepted");
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for n in ["", "12", "call me", "0917 123 4567 ext"] {
            assert!(ContactNumber::new(n).is_none(), "`{n}` must be rejected");
        }
    }
}
