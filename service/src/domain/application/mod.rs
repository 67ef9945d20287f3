//! [`Application`] definitions.

pub mod status_event;

#[cfg(doc)]
use common::Date;
use common::{define_kind, unit, DateOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Applicant, Vacancy};
use crate::domain::{applicant, vacancy};

pub use self::status_event::StatusEvent;

/// Link between an [`Applicant`] and a [`Vacancy`], carrying the current
/// hiring [`Status`].
#[derive(Clone, Debug)]
pub struct Application {
    /// ID of this [`Application`].
    pub id: Id,

    /// ID of the [`Applicant`] who applied.
    pub applicant_id: applicant::Id,

    /// ID of the [`Vacancy`] applied for.
    pub vacancy_id: vacancy::Id,

    /// Current [`Status`] of this [`Application`].
    ///
    /// Always equals the [`Status`] of the latest [`StatusEvent`] of this
    /// [`Application`], if there is any.
    pub status: Status,

    /// [`Date`] when this [`Application`] was filed.
    pub date_applied: DateApplied,

    /// [`Remarks`] left on the latest change of this [`Application`].
    pub remarks: Option<Remarks>,
}

/// ID of an [`Application`].
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

define_kind! {
    #[doc = "Stage of an [`Application`] in the hiring pipeline.\n\n\
             Any [`Status`] may be followed by any other one."]
    enum Status {
        #[doc = "Documents have been received."]
        #[label = "Application Received"]
        Received = 1,

        #[doc = "Qualifications are being screened."]
        #[label = "Under Initial Screening"]
        UnderInitialScreening = 2,

        #[doc = "[`Applicant`] is scheduled for an exam."]
        #[label = "For Examination"]
        ForExamination = 3,

        #[doc = "[`Applicant`] is scheduled for an interview."]
        #[label = "For Interview"]
        ForInterview = 4,

        #[doc = "Results are under final deliberation."]
        #[label = "For Final Evaluation"]
        ForFinalEvaluation = 5,

        #[doc = "[`Applicant`] has been approved for the position."]
        #[label = "Approved"]
        Approved = 6,

        #[doc = "[`Applicant`] has been hired."]
        #[label = "Hired"]
        Hired = 7,

        #[doc = "[`Application`] has been rejected."]
        #[label = "Rejected"]
        Rejected = 8,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Received
    }
}

/// Free-text remarks left on a change.
///
/// May be empty.
#[derive(AsRef, Clone, Debug, Default, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Remarks(String);

impl Remarks {
    /// Maximum length of [`Remarks`] in characters.
    const MAX_LEN: usize = 4096;

    /// Creates new [`Remarks`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (text.chars().count() <= Self::MAX_LEN).then_some(Self(text))
    }

    /// Indicates whether these [`Remarks`] are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Remarks {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Remarks`")
    }
}

/// [`Date`] when an [`Application`] was filed.
pub type DateApplied = DateOf<(Application, unit::Creation)>;
