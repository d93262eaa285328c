pub mod saw;
pub mod wp;

use serde::{Deserialize, Serialize};

use crate::{CriteriaTypes, DecisionMatrix, Result, Scored, Weights};

/// The available scoring methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Simple additive weighting
    Saw,
    /// Weighted product
    Wp,
}

impl Method {
    /// Score `matrix` with this method and return the matrix index of the top-ranked alternative.
    pub fn winner(
        self,
        matrix: &DecisionMatrix,
        weights: &Weights,
        types: &CriteriaTypes,
    ) -> Result<usize> {
        Ok(match self {
            Self::Saw => saw::score_saw(matrix, weights, types)?.ranking.winner().index(),
            Self::Wp => wp::score_wp(matrix, weights, types)?.ranking.winner().index(),
        })
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Saw => "SAW",
            Self::Wp => "WP",
        })
    }
}
