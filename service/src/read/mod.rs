//! Read entities definitions.

pub mod ranking;
pub mod summary;

pub use self::{ranking::Ranking, summary::Summary};
