use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons a ranking could not be computed. Variants fall into two families: malformed input
/// (see [`Error::is_validation`]) and inputs that leave a scoring step undefined (see
/// [`Error::is_arithmetic`]).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Fewer alternatives than a ranking needs
    #[error("at least {min} alternatives are required, got {found}")]
    TooFewAlternatives { min: usize, found: usize },

    /// The matrix declares no criteria
    #[error("at least one criterion is required")]
    NoCriteria,

    #[error("duplicate alternative: {0}")]
    DuplicateAlternative(String),

    #[error("duplicate criterion: {0}")]
    DuplicateCriterion(String),

    /// A row does not hold exactly one value per criterion
    #[error("alternative {alternative} has {found} values, expected {expected}")]
    RowLength {
        alternative: String,
        expected: usize,
        found: usize,
    },

    #[error("value for {alternative} on {criterion} is not finite")]
    NonFiniteValue {
        alternative: String,
        criterion: String,
    },

    #[error("no Benefit/Cost type given for criterion {0}")]
    MissingCriterionType(String),

    /// A mapping names a criterion the matrix does not declare
    #[error("unknown criterion: {0}")]
    UnknownCriterion(String),

    #[error("invalid weight {value} for criterion {criterion}")]
    InvalidWeight { criterion: String, value: f64 },

    #[error("unrecognized criterion type {0:?}, expected Benefit or Cost")]
    UnrecognizedCriterionKind(String),

    /// Normalizing a column would divide by zero or a negative number
    #[error("cannot normalize criterion {criterion}: divisor {divisor} is not positive")]
    NonPositiveDivisor { criterion: String, divisor: f64 },

    #[error("weights sum to zero")]
    ZeroTotalWeight,

    /// Weighted product needs strictly positive raw values
    #[error("value {value} for {alternative} on {criterion} must be positive")]
    NonPositiveValue {
        alternative: String,
        criterion: String,
        value: f64,
    },

    #[error("{0} is not finite")]
    NonFinite(&'static str),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        !self.is_arithmetic()
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::NonPositiveDivisor { .. }
                | Self::ZeroTotalWeight
                | Self::NonPositiveValue { .. }
                | Self::NonFinite(_)
        )
    }
}
