use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    matrix::DecisionMatrix,
    num::{Normalized, Weight},
};

/// Whether higher or lower raw values are preferred on a criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionKind {
    /// Higher is better.
    Benefit,
    /// Lower is better.
    Cost,
}

impl CriterionKind {
    /// Exponent applied to a raw value in the weighted product model. Cost criteria use the
    /// negated weight so that larger values shrink the product.
    pub fn exponent(self, weight: Normalized) -> f64 {
        match self {
            Self::Benefit => weight.as_f64(),
            Self::Cost => -weight.as_f64(),
        }
    }
}

impl FromStr for CriterionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("benefit") => Ok(Self::Benefit),
            s if s.eq_ignore_ascii_case("cost") => Ok(Self::Cost),
            other => Err(Error::UnrecognizedCriterionKind(other.to_owned())),
        }
    }
}

impl std::fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Benefit => "Benefit",
            Self::Cost => "Cost",
        })
    }
}

/// Benefit/Cost assignment per criterion name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CriteriaTypes(BTreeMap<String, CriterionKind>);

impl CriteriaTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `kind` to every criterion of `matrix`.
    pub fn uniform(matrix: &DecisionMatrix, kind: CriterionKind) -> Self {
        matrix.criteria().iter().map(|c| (c.clone(), kind)).collect()
    }

    pub fn insert(&mut self, criterion: impl Into<String>, kind: CriterionKind) {
        self.0.insert(criterion.into(), kind);
    }

    pub fn get(&self, criterion: &str) -> Option<CriterionKind> {
        self.0.get(criterion).copied()
    }

    /// Kinds in the criterion order of `matrix`. Every declared criterion needs an entry, and
    /// entries for undeclared criteria are rejected.
    pub fn resolve(&self, matrix: &DecisionMatrix) -> Result<Vec<CriterionKind>> {
        reject_unknown(self.0.keys(), matrix)?;
        matrix
            .criteria()
            .iter()
            .map(|c| {
                self.get(c)
                    .ok_or_else(|| Error::MissingCriterionType(c.clone()))
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, CriterionKind)> for CriteriaTypes {
    fn from_iter<I: IntoIterator<Item = (K, CriterionKind)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Weight per criterion name. Criteria without an entry weigh zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Weights(BTreeMap<String, Weight>);

impl Weights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw weights, rejecting negative, NaN or infinite values.
    pub fn from_raw<I, K>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        raw.into_iter()
            .map(|(criterion, value)| {
                let criterion = criterion.into();
                match Weight::new(value) {
                    Some(weight) => Ok((criterion, weight)),
                    None => Err(Error::InvalidWeight { criterion, value }),
                }
            })
            .collect()
    }

    /// Give every criterion of `matrix` the same weight.
    pub fn uniform(matrix: &DecisionMatrix, weight: Weight) -> Self {
        matrix.criteria().iter().map(|c| (c.clone(), weight)).collect()
    }

    pub fn insert(&mut self, criterion: impl Into<String>, weight: Weight) {
        self.0.insert(criterion.into(), weight);
    }

    pub fn get(&self, criterion: &str) -> Weight {
        self.0.get(criterion).copied().unwrap_or(Weight::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Weight)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Weights in the criterion order of `matrix`, zero where absent. Entries for undeclared
    /// criteria are rejected.
    pub fn resolve(&self, matrix: &DecisionMatrix) -> Result<Vec<Weight>> {
        reject_unknown(self.0.keys(), matrix)?;
        Ok(matrix.criteria().iter().map(|c| self.get(c)).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Weight)> for Weights {
    fn from_iter<I: IntoIterator<Item = (K, Weight)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn reject_unknown<'a>(
    names: impl IntoIterator<Item = &'a String>,
    matrix: &DecisionMatrix,
) -> Result<()> {
    match names
        .into_iter()
        .find(|name| matrix.criterion_index(name).is_none())
    {
        Some(name) => Err(Error::UnknownCriterion(name.clone())),
        None => Ok(()),
    }
}

/// One raw value of an alternative together with the signed exponent of its criterion.
#[derive(Clone, Copy, Debug)]
pub struct Factor {
    pub value: f64,
    pub exponent: f64,
}

/// We use the [weighted product model (WPM)](https://en.wikipedia.org/wiki/Weighted_product_model)
/// to aggregate an alternative's raw values. WPM has the following properties:
/// - Raw values need no prior normalization, since the units cancel out once the products are
///   compared against each other.
/// - One factor approaching 0 on a benefit criterion seriously disadvantages an alternative.
/// - Raising one benefit value (or lowering one cost value) always raises the outcome when
///   holding the others constant.
pub fn weighted_product<Factors>(factors: Factors) -> f64
where
    Factors: IntoIterator<Item = Factor>,
{
    factors
        .into_iter()
        .map(|Factor { value, exponent }| value.powf(exponent))
        .product()
}
