use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::{CriteriaTypes, DecisionMatrix, Error, Method, Normalized, Result, Weight, Weights};

/// How often the winner of `method` survives random perturbation of the weights.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stability {
    pub method: Method,
    /// Winner under the unperturbed weights.
    pub baseline_winner: String,
    pub trials: usize,
    /// Trials in which the baseline winner still ranked first.
    pub retained: usize,
    /// Trials whose perturbed weights could not be scored.
    pub failed: usize,
    /// `retained / trials`
    pub retention: Normalized,
    /// Number of trials won per alternative.
    pub winners: BTreeMap<String, usize>,
}

/// Rescore `matrix` `trials` times, each time multiplying every weight by an independent factor
/// drawn uniformly from `[1 - jitter, 1 + jitter]`, and count how often the winner under the
/// original weights stays on top.
///
/// Errors scoring the original weights are returned. Errors in individual trials (e.g. every
/// WP weight jittered to zero, or a weight overflowing) are counted in [`Stability::failed`].
pub fn winner_stability<Rng>(
    rng: &mut Rng,
    method: Method,
    matrix: &DecisionMatrix,
    weights: &Weights,
    types: &CriteriaTypes,
    trials: usize,
    jitter: Normalized,
) -> Result<Stability>
where
    Rng: rand::Rng,
{
    let baseline = method.winner(matrix, weights, types)?;
    let (low, high) = (1.0 - jitter.as_f64(), 1.0 + jitter.as_f64());

    let mut winners: BTreeMap<String, usize> = BTreeMap::new();
    let mut retained = 0;
    let mut failed = 0;
    for _ in 0..trials {
        let perturbed: Option<Weights> = weights
            .iter()
            .map(|(criterion, weight)| {
                let factor = rng.gen_range(low..=high);
                Weight::new(weight.as_f64() * factor).map(|weight| (criterion, weight))
            })
            .collect();
        let outcome = match perturbed {
            Some(perturbed) => method.winner(matrix, &perturbed, types),
            None => Err(Error::NonFinite("perturbed weight")),
        };
        match outcome {
            Ok(winner) => {
                *winners
                    .entry(matrix.alternatives()[winner].clone())
                    .or_default() += 1;
                if winner == baseline {
                    retained += 1;
                }
            }
            Err(err) => {
                debug!(%err, "perturbed weights could not be scored");
                failed += 1;
            }
        }
    }

    let baseline_winner = matrix.alternatives()[baseline].clone();
    debug!(
        %method,
        baseline_winner = baseline_winner.as_str(),
        trials,
        retained,
        failed,
        "weight sensitivity complete"
    );
    Ok(Stability {
        method,
        baseline_winner,
        trials,
        retained,
        failed,
        retention: Normalized::ratio(retained, trials),
        winners,
    })
}
