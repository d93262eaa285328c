use serde::Serialize;
use tracing::debug;

use crate::{
    score_saw, score_wp, CriteriaTypes, DecisionMatrix, Result, SawResult, Scored, Weights,
    WpResult,
};

/// Whether both methods picked the same winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Agreement {
    Same,
    Different,
}

/// Ranks of one alternative under both methods.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankPair {
    pub alternative: String,
    pub saw_rank: usize,
    pub wp_rank: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub saw: SawResult,
    pub wp: WpResult,
    pub saw_winner: String,
    pub wp_winner: String,
    pub agreement: Agreement,
    /// One entry per alternative, in matrix order.
    pub ranks: Vec<RankPair>,
}

impl Comparison {
    /// Number of alternatives placed at the same rank by both methods.
    pub fn matching_ranks(&self) -> usize {
        self.ranks
            .iter()
            .filter(|pair| pair.saw_rank == pair.wp_rank)
            .count()
    }
}

/// Score `matrix` with both methods, each using its own weights since SAW takes weights as given
/// while WP rescales them.
pub fn compare(
    matrix: &DecisionMatrix,
    saw_weights: &Weights,
    wp_weights: &Weights,
    types: &CriteriaTypes,
) -> Result<Comparison> {
    let saw = score_saw(matrix, saw_weights, types)?;
    let wp = score_wp(matrix, wp_weights, types)?;

    let saw_winner = saw.winner().alternative().to_owned();
    let wp_winner = wp.winner().alternative().to_owned();
    let agreement = if saw_winner == wp_winner {
        Agreement::Same
    } else {
        Agreement::Different
    };
    let ranks = matrix
        .alternatives()
        .iter()
        .zip(saw.ranking.ranks_by_index())
        .zip(wp.ranking.ranks_by_index())
        .map(|((alternative, saw_rank), wp_rank)| RankPair {
            alternative: alternative.clone(),
            saw_rank,
            wp_rank,
        })
        .collect();
    debug!(
        saw_winner = saw_winner.as_str(),
        wp_winner = wp_winner.as_str(),
        ?agreement,
        "compared SAW and WP"
    );

    Ok(Comparison {
        saw,
        wp,
        saw_winner,
        wp_winner,
        agreement,
        ranks,
    })
}
