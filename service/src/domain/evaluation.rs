//! [`Evaluation`] definitions.

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

pub use crate::domain::application::Remarks;

/// Exam and interview scoring of an [`Application`].
///
/// There is at most one [`Evaluation`] per [`Application`].
#[derive(Clone, Debug)]
pub struct Evaluation {
    /// ID of this [`Evaluation`].
    pub id: Id,

    /// ID of the evaluated [`Application`].
    pub application_id: application::Id,

    /// Exam [`Score`].
    pub exam_score: Score,

    /// Interview [`Score`].
    pub interview_score: Score,

    /// [`TotalScore`] derived from the exam and interview ones.
    pub total_score: TotalScore,

    /// [`Remarks`] of the evaluator.
    pub remarks: Remarks,

    /// [`Actor`] who evaluated.
    pub evaluated_by: Actor,

    /// [`Date`] of the evaluation.
    pub evaluated_at: EvaluationDate,
}

impl Evaluation {
    /// Replaces both sub-scores of this [`Evaluation`] and recomputes its
    /// [`TotalScore`].
    pub fn rescore(&mut self, exam: Score, interview: Score) {
        self.exam_score = exam;
        self.interview_score = interview;
        self.total_score = TotalScore::weighted(exam, interview);
    }
}

/// ID of an [`Evaluation`].
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

/// Exam or interview score.
///
/// Any finite number, no range is imposed.
#[derive(Clone, Copy, Debug, Display, Into, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Score(f64);

impl Score {
    /// Creates a new [`Score`] if the given `value` is finite.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }
}

/// Total score of an [`Evaluation`].
#[derive(Clone, Copy, Debug, Display, Into, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct TotalScore(f64);

impl TotalScore {
    /// Weight of each sub-score in a [`TotalScore`].
    const WEIGHT: f64 = 0.5;

    /// Computes the [`TotalScore`] out of the exam and interview [`Score`]s.
    ///
    /// No rounding is applied.
    #[must_use]
    pub fn weighted(exam: Score, interview: Score) -> Self {
        Self(exam.0 * Self::WEIGHT + interview.0 * Self::WEIGHT)
    }

    /// Compares two [`TotalScore`]s as a total order.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// [`Date`] of an [`Evaluation`].
pub type EvaluationDate = DateOf<(Evaluation, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Score, TotalScore};

    fn total(exam: f64, interview: f64) -> f64 {
        let exam = Score::new(exam).unwrap();
        let interview = Score::new(interview).unwrap();
        TotalScore::weighted(exam, interview).into()
    }

    #[test]
    fn weighs_sub_scores_equally() {
        assert_eq!(total(88.0, 92.0), 90.0);
        assert_eq!(total(95.0, 97.0), 96.0);
        assert_eq!(total(90.0, 88.0), 89.0);
    }

    #[test]
    fn does_not_round() {
        assert_eq!(total(85.0, 0.0), 42.5);
        assert_eq!(total(0.0, 0.0), 0.0);
        assert_eq!(total(77.5, 80.25), 78.875);
    }

    #[test]
    fn rejects_non_finite_scores() {
        assert!(Score::new(f64::NAN).is_none());
        assert!(Score::new(f64::INFINITY).is_none());
        assert!(Score::new(-12.0).is_some());
    }
}
