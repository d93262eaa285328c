use std::{fs, path::Path};

use anyhow::Context as _;
use decision_ranking::{dataset::Dataset, CriteriaTypes, CriterionKind, DecisionMatrix, Weights};
use serde::Deserialize;
use tracing::debug;

/// A decision problem as written in a TOML file.
///
/// ```toml
/// [[criteria]]
/// name = "C1 Harga"
/// kind = "cost"
/// saw_weight = 0.2
/// wp_weight = 5
///
/// [[alternatives]]
/// name = "Hostinger"
/// values = [25000]
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Problem {
    pub criteria: Vec<CriterionConfig>,
    pub alternatives: Vec<AlternativeConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriterionConfig {
    pub name: String,
    /// "benefit" or "cost", in any case
    pub kind: String,
    #[serde(default)]
    pub saw_weight: f64,
    #[serde(default)]
    pub wp_weight: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlternativeConfig {
    pub name: String,
    pub values: Vec<f64>,
}

impl Problem {
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("failed to parse problem file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let problem = Self::parse(&contents)?;
        debug!(
            path = %path.display(),
            criteria = problem.criteria.len(),
            alternatives = problem.alternatives.len(),
            "loaded problem"
        );
        Ok(problem)
    }

    pub fn into_dataset(self) -> anyhow::Result<Dataset> {
        let types = self
            .criteria
            .iter()
            .map(|c| {
                let kind: CriterionKind = c
                    .kind
                    .parse()
                    .with_context(|| format!("criterion {}", c.name))?;
                Ok((c.name.as_str(), kind))
            })
            .collect::<anyhow::Result<CriteriaTypes>>()?;
        let saw_weights =
            Weights::from_raw(self.criteria.iter().map(|c| (c.name.as_str(), c.saw_weight)))?;
        let wp_weights =
            Weights::from_raw(self.criteria.iter().map(|c| (c.name.as_str(), c.wp_weight)))?;
        let matrix = DecisionMatrix::new(
            self.criteria.into_iter().map(|c| c.name),
            self.alternatives.into_iter().map(|a| (a.name, a.values)),
        )?;
        Ok(Dataset {
            matrix,
            types,
            saw_weights,
            wp_weights,
        })
    }
}

#[cfg(test)]
mod test {
    use decision_ranking::{score_saw, CriterionKind, Error};

    use super::Problem;

    const HOSTING: &str = include_str!("../problems/hosting.toml");

    #[test]
    fn sample_problem_loads() {
        let data = Problem::parse(HOSTING).unwrap().into_dataset().unwrap();
        assert_eq!(data.matrix.alternative_count(), 5);
        assert_eq!(data.matrix.criterion_count(), 5);
        assert_eq!(data.types.get("C1 Harga"), Some(CriterionKind::Cost));
        assert_eq!(data.wp_weights.get("C1 Harga").as_f64(), 5.0);
        let result = score_saw(&data.matrix, &data.saw_weights, &data.types).unwrap();
        assert_eq!(result.winner().alternative, "Qwords");
    }

    #[test]
    fn weights_default_to_zero_and_kind_ignores_case() {
        let problem = Problem::parse(
            r#"
            [[criteria]]
            name = "speed"
            kind = "BENEFIT"

            [[alternatives]]
            name = "a"
            values = [1]

            [[alternatives]]
            name = "b"
            values = [2.5]
            "#,
        )
        .unwrap();
        let data = problem.into_dataset().unwrap();
        assert_eq!(data.types.get("speed"), Some(CriterionKind::Benefit));
        assert!(data.saw_weights.get("speed").is_zero());
        assert_eq!(data.matrix.value(0, 0), 1.0);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let problem = Problem::parse(
            r#"
            [[criteria]]
            name = "speed"
            kind = "neutral"

            [[alternatives]]
            name = "a"
            values = [1]
            "#,
        )
        .unwrap();
        let err = problem.into_dataset().unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::UnrecognizedCriterionKind("neutral".into()))
        );
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let problem = Problem::parse(
            r#"
            [[criteria]]
            name = "speed"
            kind = "cost"

            [[alternatives]]
            name = "a"
            values = [1, 2]

            [[alternatives]]
            name = "b"
            values = [3]
            "#,
        )
        .unwrap();
        let err = problem.into_dataset().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::RowLength { .. })
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Problem::parse("criteria = []\nalternatives = []\nsheet = 'Metode SAW'").is_err());
    }
}
