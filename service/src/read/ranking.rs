//! [`Ranking`] read model definitions.

use std::cmp::Ordering;

use derive_more::{Deref, Into};
use itertools::Itertools as _;

#[cfg(doc)]
use crate::domain::{Application, Evaluation, Vacancy};
use crate::domain::{applicant, application, evaluation};

/// Evaluated [`Application`]s of a [`Vacancy`], best first.
///
/// Derived on every read and never persisted.
#[derive(Clone, Debug, Default, Deref, Into)]
pub struct Ranking(Vec<Entry>);

impl Ranking {
    /// Ranks the provided [`Entry`]s.
    ///
    /// Higher [`evaluation::TotalScore`] goes first. Ties are broken by the
    /// earlier [`evaluation::EvaluationDate`], then by the lower
    /// [`evaluation::Id`].
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = Entry>) -> Self {
        Self(entries.into_iter().sorted_by(Entry::rank_cmp).collect())
    }
}

impl IntoIterator for Ranking {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Single evaluated [`Application`] in a [`Ranking`].
#[derive(Clone, Debug)]
pub struct Entry {
    /// ID of the ranked [`Application`].
    pub application_id: application::Id,

    /// ID of the [`Evaluation`] of the ranked [`Application`].
    pub evaluation_id: evaluation::Id,

    /// Full name of the [`Application`]'s applicant.
    pub applicant_name: applicant::FullName,

    /// Exam [`evaluation::Score`].
    pub exam_score: evaluation::Score,

    /// Interview [`evaluation::Score`].
    pub interview_score: evaluation::Score,

    /// [`evaluation::TotalScore`] the [`Ranking`] is ordered by.
    pub total_score: evaluation::TotalScore,

    /// [`evaluation::Remarks`] of the evaluator.
    pub remarks: evaluation::Remarks,

    /// [`evaluation::EvaluationDate`] used to break ties.
    pub evaluated_at: evaluation::EvaluationDate,
}

impl Entry {
    /// Compares two [`Entry`]s by their position in a [`Ranking`].
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .total_score
            .total_cmp(&self.total_score)
            .then_with(|| self.evaluated_at.cmp(&other.evaluated_at))
            .then_with(|| self.evaluation_id.cmp(&other.evaluation_id))
    }
}
