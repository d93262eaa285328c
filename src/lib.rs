pub mod compare;
pub mod criteria;
pub mod dataset;
pub mod error;
pub mod matrix;
pub mod method;
pub mod num;
pub mod rank;
pub mod sensitivity;

use ordered_float::NotNan;

pub use crate::compare::{compare, Agreement, Comparison};
pub use crate::criteria::{CriteriaTypes, CriterionKind, Weights};
pub use crate::error::{Error, Result};
pub use crate::matrix::DecisionMatrix;
pub use crate::method::saw::{score_saw, SawResult, SawRow};
pub use crate::method::wp::{score_wp, WpResult, WpRow};
pub use crate::method::Method;
pub use crate::num::{Normalized, Weight};
pub use crate::rank::Ranking;

/// A ranked row produced by one of the scoring methods.
pub trait Scored {
    /// Name of the alternative this row scores.
    fn alternative(&self) -> &str;
    /// Position of the alternative in the scored [`DecisionMatrix`].
    fn index(&self) -> usize;
    /// Aggregate score the ranking is ordered by, higher is better.
    fn score(&self) -> NotNan<f64>;
    /// 1-based competition rank of [`Scored::score`].
    fn rank(&self) -> usize;
}
