use std::cmp::Reverse;

use ordered_float::NotNan;
use permutation::Permutation;
use serde::Serialize;

use crate::Scored;

/// Competition ("min") ranks for `scores`, highest score first. Tied scores share the best rank
/// of their group and the following rank skips the size of the group, so `[5, 5, 3]` ranks as
/// `[1, 1, 3]`.
pub fn min_ranks(scores: &[NotNan<f64>]) -> Vec<usize> {
    scores
        .iter()
        .map(|score| 1 + scores.iter().filter(|other| *other > score).count())
        .collect()
}

/// Permutation that orders `scores` from highest to lowest. Equal scores keep their input order.
pub fn descending(scores: &[NotNan<f64>]) -> Permutation {
    permutation::sort_by_key(scores, |score| Reverse(*score))
}

/// Rows of one scoring method, sorted by descending score.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking<R> {
    rows: Vec<R>,
}

impl<R: Scored> Ranking<R> {
    pub(crate) fn sorted(mut rows: Vec<R>) -> Self {
        let scores: Vec<NotNan<f64>> = rows.iter().map(Scored::score).collect();
        let mut order = descending(&scores);
        order.apply_slice_in_place(&mut rows);
        Self { rows }
    }

    /// The top-ranked row. When several alternatives share rank 1, the one declared first in the
    /// matrix wins.
    pub fn winner(&self) -> &R {
        &self.rows[0]
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, alternative: &str) -> Option<&R> {
        self.rows.iter().find(|row| row.alternative() == alternative)
    }

    /// Ranks in the alternative order of the scored matrix.
    pub fn ranks_by_index(&self) -> Vec<usize> {
        let mut ranks = vec![0; self.rows.len()];
        for row in &self.rows {
            ranks[row.index()] = row.rank();
        }
        ranks
    }
}

impl<'r, R> IntoIterator for &'r Ranking<R> {
    type Item = &'r R;
    type IntoIter = std::slice::Iter<'r, R>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
