use ordered_float::NotNan;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    rank::{min_ranks, Ranking},
    CriteriaTypes, CriterionKind, DecisionMatrix, Error, Result, Scored, Weights,
};

/// One alternative's simple additive weighting outcome.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SawRow {
    pub alternative: String,
    #[serde(skip)]
    pub index: usize,
    /// Normalized value times weight, in the criterion order of the matrix.
    pub contributions: Vec<f64>,
    pub total_score: NotNan<f64>,
    pub rank: usize,
}

impl Scored for SawRow {
    fn alternative(&self) -> &str {
        &self.alternative
    }
    fn index(&self) -> usize {
        self.index
    }
    fn score(&self) -> NotNan<f64> {
        self.total_score
    }
    fn rank(&self) -> usize {
        self.rank
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SawResult {
    /// Column labels for [`SawRow::contributions`].
    pub criteria: Vec<String>,
    pub ranking: Ranking<SawRow>,
}

impl SawResult {
    pub fn winner(&self) -> &SawRow {
        self.ranking.winner()
    }
}

/// Rank the alternatives of `matrix` by simple additive weighting. Each column is normalized
/// against its best value (see [`normalize`]), multiplied by the criterion's weight as given,
/// and summed per alternative.
pub fn score_saw(
    matrix: &DecisionMatrix,
    weights: &Weights,
    types: &CriteriaTypes,
) -> Result<SawResult> {
    let weights = weights.resolve(matrix)?;
    let normalized = normalize(matrix, types)?;
    debug!(
        alternatives = matrix.alternative_count(),
        criteria = matrix.criterion_count(),
        "scoring with SAW"
    );

    let contributions: Vec<Vec<f64>> = normalized
        .iter()
        .map(|row| {
            row.iter()
                .zip(&weights)
                .map(|(value, weight)| value * weight.as_f64())
                .collect()
        })
        .collect();
    let totals = contributions
        .iter()
        .map(|row| {
            NotNan::new(row.iter().sum::<f64>())
                .ok()
                .filter(|total| total.is_finite())
                .ok_or(Error::NonFinite("SAW total score"))
        })
        .collect::<Result<Vec<NotNan<f64>>>>()?;
    let ranks = min_ranks(&totals);

    let rows: Vec<SawRow> = matrix
        .alternatives()
        .iter()
        .zip(contributions)
        .zip(totals.iter().zip(ranks))
        .enumerate()
        .map(
            |(index, ((alternative, contributions), (total_score, rank)))| SawRow {
                alternative: alternative.clone(),
                index,
                contributions,
                total_score: *total_score,
                rank,
            },
        )
        .collect();
    let ranking = Ranking::sorted(rows);
    debug!(
        winner = ranking.winner().alternative.as_str(),
        "SAW ranking complete"
    );

    Ok(SawResult {
        criteria: matrix.criteria().to_vec(),
        ranking,
    })
}

/// Normalized decision matrix, row-major like [`DecisionMatrix::rows`]. Benefit columns are
/// divided by their maximum and cost columns divide their minimum by each value, so the best
/// alternative on every criterion receives exactly 1.
///
/// A column whose divisor is zero or negative (the maximum of a benefit column, or any value of
/// a cost column) is rejected with [`Error::NonPositiveDivisor`].
pub fn normalize(matrix: &DecisionMatrix, types: &CriteriaTypes) -> Result<Vec<Vec<f64>>> {
    let kinds = types.resolve(matrix)?;
    let columns = kinds
        .iter()
        .enumerate()
        .map(|(j, kind)| normalize_column(*kind, &matrix.criteria()[j], &matrix.column(j)))
        .collect::<Result<Vec<Vec<f64>>>>()?;
    Ok((0..matrix.alternative_count())
        .map(|i| columns.iter().map(|column| column[i]).collect())
        .collect())
}

fn normalize_column(kind: CriterionKind, criterion: &str, column: &[f64]) -> Result<Vec<f64>> {
    let non_positive = |divisor: f64| Error::NonPositiveDivisor {
        criterion: criterion.to_owned(),
        divisor,
    };
    let normalized: Vec<f64> = match kind {
        CriterionKind::Benefit => {
            let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if max <= 0.0 {
                return Err(non_positive(max));
            }
            column.iter().map(|value| value / max).collect()
        }
        CriterionKind::Cost => {
            if let Some(divisor) = column.iter().copied().find(|value| *value <= 0.0) {
                return Err(non_positive(divisor));
            }
            let min = column.iter().copied().fold(f64::INFINITY, f64::min);
            column.iter().map(|value| min / value).collect()
        }
    };
    if normalized.iter().any(|value| !value.is_finite()) {
        return Err(Error::NonFinite("SAW normalized value"));
    }
    trace!(criterion, %kind, ?normalized, "normalized column");
    Ok(normalized)
}

#[cfg(test)]
mod test {
    use super::{normalize, score_saw};
    use crate::{
        test::assert_within, CriteriaTypes, CriterionKind, DecisionMatrix, Error, Scored,
        Weights,
    };

    fn single(values: [f64; 2], kind: CriterionKind) -> (DecisionMatrix, CriteriaTypes) {
        let matrix =
            DecisionMatrix::new(["c"], vec![("A", vec![values[0]]), ("B", vec![values[1]])])
                .unwrap();
        let types = CriteriaTypes::uniform(&matrix, kind);
        (matrix, types)
    }

    fn ranks_by_alternative(
        matrix: &DecisionMatrix,
        weights: &Weights,
        types: &CriteriaTypes,
    ) -> Vec<usize> {
        score_saw(matrix, weights, types)
            .unwrap()
            .ranking
            .ranks_by_index()
    }

    #[test]
    fn benefit_column_divides_by_max() {
        let (matrix, types) = single([10.0, 20.0], CriterionKind::Benefit);
        let weights = Weights::from_raw([("c", 1.0)]).unwrap();
        assert_eq!(normalize(&matrix, &types).unwrap(), vec![vec![0.5], vec![1.0]]);

        let result = score_saw(&matrix, &weights, &types).unwrap();
        let totals: Vec<f64> = result.ranking.iter().map(|r| *r.total_score).collect();
        assert_eq!(totals, vec![1.0, 0.5]);
        assert_eq!(result.winner().alternative, "B");
        assert_eq!(result.ranking.ranks_by_index(), vec![2, 1]);
    }

    #[test]
    fn cost_column_divides_min() {
        let (matrix, types) = single([10.0, 20.0], CriterionKind::Cost);
        let weights = Weights::from_raw([("c", 1.0)]).unwrap();
        assert_eq!(normalize(&matrix, &types).unwrap(), vec![vec![1.0], vec![0.5]]);
        assert_eq!(ranks_by_alternative(&matrix, &weights, &types), vec![1, 2]);
    }

    #[test]
    fn tie_skips_next_rank() {
        let matrix = DecisionMatrix::new(
            ["x", "y"],
            vec![
                ("A", vec![2.0, 4.0]),
                ("B", vec![4.0, 2.0]),
                ("C", vec![1.0, 1.0]),
            ],
        )
        .unwrap();
        let types = CriteriaTypes::uniform(&matrix, CriterionKind::Benefit);
        let weights = Weights::from_raw([("x", 1.0), ("y", 1.0)]).unwrap();
        let result = score_saw(&matrix, &weights, &types).unwrap();
        assert_eq!(result.ranking.ranks_by_index(), vec![1, 1, 3]);
        // Tied rows keep matrix order.
        let order: Vec<&str> = result.ranking.iter().map(|r| r.alternative()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn contributions_are_weighted() {
        let matrix = DecisionMatrix::new(
            ["price", "storage"],
            vec![("A", vec![100.0, 50.0]), ("B", vec![200.0, 100.0])],
        )
        .unwrap();
        let types: CriteriaTypes = [
            ("price", CriterionKind::Cost),
            ("storage", CriterionKind::Benefit),
        ]
        .into_iter()
        .collect();
        let weights = Weights::from_raw([("price", 0.6), ("storage", 0.4)]).unwrap();
        let result = score_saw(&matrix, &weights, &types).unwrap();

        assert_eq!(result.criteria, vec!["price", "storage"]);
        let a = result.ranking.get("A").unwrap();
        assert_within(a.contributions[0], 0.6, 1e-12);
        assert_within(a.contributions[1], 0.2, 1e-12);
        assert_within(*a.total_score, 0.8, 1e-12);
        let b = result.ranking.get("B").unwrap();
        assert_within(*b.total_score, 0.7, 1e-12);
        assert_eq!(result.winner().alternative, "A");
    }

    #[test]
    fn missing_weight_contributes_nothing() {
        let matrix = DecisionMatrix::new(
            ["x", "y"],
            vec![("A", vec![1.0, 9.0]), ("B", vec![2.0, 1.0])],
        )
        .unwrap();
        let types = CriteriaTypes::uniform(&matrix, CriterionKind::Benefit);
        let weights = Weights::from_raw([("x", 1.0)]).unwrap();
        let result = score_saw(&matrix, &weights, &types).unwrap();
        assert_eq!(result.winner().alternative, "B");
        assert_eq!(result.ranking.get("A").unwrap().contributions[1], 0.0);
    }

    #[test]
    fn zero_divisors_are_rejected() {
        let (matrix, types) = single([0.0, 0.0], CriterionKind::Benefit);
        let weights = Weights::from_raw([("c", 1.0)]).unwrap();
        assert_eq!(
            score_saw(&matrix, &weights, &types),
            Err(Error::NonPositiveDivisor {
                criterion: "c".into(),
                divisor: 0.0,
            })
        );

        let (matrix, types) = single([5.0, 0.0], CriterionKind::Cost);
        let err = score_saw(&matrix, &weights, &types).unwrap_err();
        assert!(err.is_arithmetic());
    }

    #[test]
    fn benefit_zero_below_positive_max_is_fine() {
        let (matrix, types) = single([0.0, 5.0], CriterionKind::Benefit);
        assert_eq!(normalize(&matrix, &types).unwrap(), vec![vec![0.0], vec![1.0]]);
    }

    #[test]
    fn missing_type_is_a_validation_error() {
        let (matrix, _) = single([1.0, 2.0], CriterionKind::Benefit);
        let err = score_saw(&matrix, &Weights::new(), &CriteriaTypes::new()).unwrap_err();
        assert_eq!(err, Error::MissingCriterionType("c".into()));
        assert!(err.is_validation());
    }
}
