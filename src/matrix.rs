use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{Error, Result};

/// Raw values of every alternative on every criterion, stored row-major: `values[i][j]` is the
/// value of alternative `i` on criterion `j`. Construction guarantees at least
/// [`DecisionMatrix::MIN_ALTERNATIVES`] uniquely named alternatives, at least one uniquely named
/// criterion, and a finite value in every cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DecisionMatrix {
    alternatives: Vec<String>,
    criteria: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl DecisionMatrix {
    pub const MIN_ALTERNATIVES: usize = 2;

    pub fn new<Criteria, Rows, C, A>(criteria: Criteria, rows: Rows) -> Result<Self>
    where
        Criteria: IntoIterator<Item = C>,
        Rows: IntoIterator<Item = (A, Vec<f64>)>,
        C: Into<String>,
        A: Into<String>,
    {
        let criteria: Vec<String> = criteria.into_iter().map(Into::into).collect();
        let (alternatives, values): (Vec<String>, Vec<Vec<f64>>) = rows
            .into_iter()
            .map(|(alternative, values)| (alternative.into(), values))
            .unzip();

        if criteria.is_empty() {
            return Err(Error::NoCriteria);
        }
        if alternatives.len() < Self::MIN_ALTERNATIVES {
            return Err(Error::TooFewAlternatives {
                min: Self::MIN_ALTERNATIVES,
                found: alternatives.len(),
            });
        }
        if let Some(name) = first_duplicate(&criteria) {
            return Err(Error::DuplicateCriterion(name.to_owned()));
        }
        if let Some(name) = first_duplicate(&alternatives) {
            return Err(Error::DuplicateAlternative(name.to_owned()));
        }
        for (alternative, row) in alternatives.iter().zip(&values) {
            if row.len() != criteria.len() {
                return Err(Error::RowLength {
                    alternative: alternative.clone(),
                    expected: criteria.len(),
                    found: row.len(),
                });
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(Error::NonFiniteValue {
                    alternative: alternative.clone(),
                    criterion: criteria[j].clone(),
                });
            }
        }

        Ok(Self {
            alternatives,
            criteria,
            values,
        })
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn value(&self, alternative: usize, criterion: usize) -> f64 {
        self.values[alternative][criterion]
    }

    pub fn column(&self, criterion: usize) -> Vec<f64> {
        self.values.iter().map(|row| row[criterion]).collect()
    }

    pub fn criterion_index(&self, name: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c == name)
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = BTreeSet::new();
    names
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
}

#[cfg(test)]
mod test {
    use super::DecisionMatrix;
    use crate::Error;

    fn two_by_two(rows: Vec<(&str, Vec<f64>)>) -> Result<DecisionMatrix, Error> {
        DecisionMatrix::new(["price", "capacity"], rows)
    }

    #[test]
    fn accessors_follow_declaration_order() {
        let matrix = two_by_two(vec![("a", vec![1.0, 2.0]), ("b", vec![3.0, 4.0])]).unwrap();
        assert_eq!(matrix.alternatives(), ["a", "b"]);
        assert_eq!(matrix.criteria(), ["price", "capacity"]);
        assert_eq!(matrix.column(1), vec![2.0, 4.0]);
        assert_eq!(matrix.value(1, 0), 3.0);
        assert_eq!(matrix.criterion_index("capacity"), Some(1));
        assert_eq!(matrix.criterion_index("speed"), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            two_by_two(vec![("a", vec![1.0, 2.0])]),
            Err(Error::TooFewAlternatives { min: 2, found: 1 })
        );
        assert_eq!(
            DecisionMatrix::new(Vec::<String>::new(), vec![("a", vec![]), ("b", vec![])]),
            Err(Error::NoCriteria)
        );
        assert_eq!(
            two_by_two(vec![("a", vec![1.0, 2.0]), ("a", vec![3.0, 4.0])]),
            Err(Error::DuplicateAlternative("a".into()))
        );
        assert_eq!(
            DecisionMatrix::new(["x", "x"], vec![("a", vec![1.0, 2.0]), ("b", vec![3.0, 4.0])]),
            Err(Error::DuplicateCriterion("x".into()))
        );
        assert_eq!(
            two_by_two(vec![("a", vec![1.0, 2.0]), ("b", vec![3.0])]),
            Err(Error::RowLength {
                alternative: "b".into(),
                expected: 2,
                found: 1,
            })
        );
        assert_eq!(
            two_by_two(vec![("a", vec![1.0, f64::NAN]), ("b", vec![3.0, 4.0])]),
            Err(Error::NonFiniteValue {
                alternative: "a".into(),
                criterion: "capacity".into(),
            })
        );
    }
}
