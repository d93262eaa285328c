use ordered_float::NotNan;
use serde::Serialize;
use tracing::debug;

use crate::{
    criteria::{weighted_product, Factor},
    rank::{min_ranks, Ranking},
    CriteriaTypes, DecisionMatrix, Error, Normalized, Result, Scored, Weight, Weights,
};

/// One alternative's weighted product outcome.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WpRow {
    pub alternative: String,
    #[serde(skip)]
    pub index: usize,
    /// Product of the raw values raised to their signed weights.
    pub s_value: NotNan<f64>,
    /// Share of this alternative's `s_value` in the sum over all alternatives.
    pub v_value: Normalized,
    pub rank: usize,
}

impl Scored for WpRow {
    fn alternative(&self) -> &str {
        &self.alternative
    }
    fn index(&self) -> usize {
        self.index
    }
    fn score(&self) -> NotNan<f64> {
        self.v_value.as_inner()
    }
    fn rank(&self) -> usize {
        self.rank
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WpResult {
    /// Weights rescaled to sum to 1, in the criterion order of the matrix.
    pub weights: Vec<(String, Normalized)>,
    pub ranking: Ranking<WpRow>,
}

impl WpResult {
    pub fn winner(&self) -> &WpRow {
        self.ranking.winner()
    }
}

/// Rescale `weights` to sum to 1. Fails with [`Error::ZeroTotalWeight`] when every weight is
/// zero.
pub fn normalize_weights(weights: &[Weight]) -> Result<Vec<Normalized>> {
    // Scaled by the largest weight the sum stays finite.
    let largest = weights.iter().copied().max().unwrap_or(Weight::ZERO);
    if largest.is_zero() {
        return Err(Error::ZeroTotalWeight);
    }
    let scaled: Vec<f64> = weights
        .iter()
        .map(|w| w.as_f64() / largest.as_f64())
        .collect();
    let total: f64 = scaled.iter().sum();
    scaled
        .iter()
        .map(|w| Normalized::new(w / total).ok_or(Error::NonFinite("WP weight")))
        .collect()
}

/// Rank the alternatives of `matrix` by the weighted product model. Weights are rescaled to sum
/// to 1 whatever their original scale, negated on cost criteria, and used as exponents on the
/// raw values. The resulting products (S) are then divided by their sum to give each
/// alternative's preference (V).
///
/// Every raw value must be strictly positive, including values on zero-weight criteria.
pub fn score_wp(
    matrix: &DecisionMatrix,
    weights: &Weights,
    types: &CriteriaTypes,
) -> Result<WpResult> {
    let kinds = types.resolve(matrix)?;
    let weights = weights.resolve(matrix)?;
    for (alternative, row) in matrix.alternatives().iter().zip(matrix.rows()) {
        if let Some(j) = row.iter().position(|value| *value <= 0.0) {
            return Err(Error::NonPositiveValue {
                alternative: alternative.clone(),
                criterion: matrix.criteria()[j].clone(),
                value: row[j],
            });
        }
    }
    let normalized = normalize_weights(&weights)?;
    debug!(
        alternatives = matrix.alternative_count(),
        criteria = matrix.criterion_count(),
        weights = ?normalized,
        "scoring with WP"
    );

    let exponents: Vec<f64> = kinds
        .iter()
        .zip(&normalized)
        .map(|(kind, weight)| kind.exponent(*weight))
        .collect();
    let s_values = matrix
        .rows()
        .iter()
        .map(|row| {
            let factors = row
                .iter()
                .zip(&exponents)
                .map(|(&value, &exponent)| Factor { value, exponent });
            NotNan::new(weighted_product(factors))
                .ok()
                .filter(|s| s.is_finite())
                .ok_or(Error::NonFinite("WP S value"))
        })
        .collect::<Result<Vec<NotNan<f64>>>>()?;
    let s_total: f64 = s_values.iter().map(|s| s.into_inner()).sum();
    if !(s_total.is_finite() && s_total > 0.0) {
        return Err(Error::NonFinite("WP S value sum"));
    }
    let v_values = s_values
        .iter()
        .map(|s| Normalized::new(**s / s_total).ok_or(Error::NonFinite("WP V value")))
        .collect::<Result<Vec<Normalized>>>()?;
    let scores: Vec<NotNan<f64>> = v_values.iter().map(Normalized::as_inner).collect();
    let ranks = min_ranks(&scores);

    let rows: Vec<WpRow> = matrix
        .alternatives()
        .iter()
        .zip(s_values.iter().zip(&v_values))
        .zip(ranks)
        .enumerate()
        .map(|(index, ((alternative, (s_value, v_value)), rank))| WpRow {
            alternative: alternative.clone(),
            index,
            s_value: *s_value,
            v_value: *v_value,
            rank,
        })
        .collect();
    let ranking = Ranking::sorted(rows);
    debug!(
        winner = ranking.winner().alternative.as_str(),
        "WP ranking complete"
    );

    Ok(WpResult {
        weights: matrix.criteria().iter().cloned().zip(normalized).collect(),
        ranking,
    })
}
