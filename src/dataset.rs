//! Sample decisions with the default settings a caller starts from: every SAW weight at 0.2 and
//! every WP weight at 5 on a 1–10 scale.

use crate::{CriteriaTypes, CriterionKind, DecisionMatrix, Result, Weights};

pub const DEFAULT_SAW_WEIGHT: f64 = 0.2;
pub const DEFAULT_WP_WEIGHT: f64 = 5.0;

/// A decision matrix bundled with criterion types and one weight mapping per method.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub matrix: DecisionMatrix,
    pub types: CriteriaTypes,
    pub saw_weights: Weights,
    pub wp_weights: Weights,
}

impl Dataset {
    /// Bundle `matrix` and `types` with the default weights on every criterion.
    pub fn with_default_weights(matrix: DecisionMatrix, types: CriteriaTypes) -> Result<Self> {
        let criteria = matrix.criteria();
        let saw_weights =
            Weights::from_raw(criteria.iter().map(|c| (c.as_str(), DEFAULT_SAW_WEIGHT)))?;
        let wp_weights =
            Weights::from_raw(criteria.iter().map(|c| (c.as_str(), DEFAULT_WP_WEIGHT)))?;
        Ok(Self {
            matrix,
            types,
            saw_weights,
            wp_weights,
        })
    }
}

/// Cloud storage plans, with every criterion treated as a benefit.
///
/// "C3 Upload" is zero for several plans, so the weighted product method rejects this dataset.
pub fn cloud_storage() -> Result<Dataset> {
    let matrix = DecisionMatrix::new(
        ["C1 Harga", "C2 Kapasitas", "C3 Upload", "C4 Device", "C5 Keamanan"],
        vec![
            ("Google One", vec![26900.0, 100.0, 0.0, 5.0, 4.0]),
            ("Dropbox Plus", vec![145000.0, 2000.0, 2.0, 1.0, 5.0]),
            ("OneDrive", vec![35000.0, 1000.0, 0.0, 1.0, 4.0]),
            ("Mega Pro", vec![80000.0, 2000.0, 0.0, 1.0, 5.0]),
            ("Box Business", vec![225000.0, 1000.0, 5.0, 99.0, 5.0]),
        ],
    )?;
    let types = CriteriaTypes::uniform(&matrix, CriterionKind::Benefit);
    Dataset::with_default_weights(matrix, types)
}

/// Web hosting plans. Price ("C1 Harga") is a cost, everything else a benefit.
pub fn hosting() -> Result<Dataset> {
    let matrix = DecisionMatrix::new(
        ["C1 Harga", "C2 Storage", "C3 Bandwidth", "C4 Uptime", "C5 Support"],
        vec![
            ("Hostinger", vec![25000.0, 10.0, 100.0, 99.5, 4.0]),
            ("Niagahoster", vec![45000.0, 20.0, 200.0, 99.9, 5.0]),
            ("Dewaweb", vec![40000.0, 15.0, 150.0, 99.7, 4.0]),
            ("IDCloudHost", vec![35000.0, 12.0, 120.0, 99.6, 3.0]),
            ("Qwords", vec![30000.0, 18.0, 180.0, 99.8, 5.0]),
        ],
    )?;
    let mut types = CriteriaTypes::uniform(&matrix, CriterionKind::Benefit);
    types.insert("C1 Harga", CriterionKind::Cost);
    Dataset::with_default_weights(matrix, types)
}
