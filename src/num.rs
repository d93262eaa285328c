use ordered_float::NotNan;
use serde::{Serialize, Serializer};

/// A non-NaN f64 value in the range [0, 1].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Normalized(NotNan<f64>);

impl Normalized {
    pub const ZERO: Self = Self(unsafe { NotNan::new_unchecked(0.0) });
    pub const ONE: Self = Self(unsafe { NotNan::new_unchecked(1.0) });

    pub fn new(value: f64) -> Option<Self> {
        let value = NotNan::new(value).ok()?;
        if value.is_sign_negative() || *value > 1.0 {
            return None;
        }
        Some(Self(value))
    }

    /// `part / whole`, clamped to [0, 1]. An empty whole yields zero.
    pub fn ratio(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        Self::new((part as f64 / whole as f64).clamp(0.0, 1.0)).unwrap_or(Self::ZERO)
    }

    pub fn as_inner(&self) -> NotNan<f64> {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0.into_inner()
    }

    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

impl std::ops::Mul for Normalized {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl std::cmp::PartialOrd for Normalized {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for Normalized {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::fmt::Debug for Normalized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for Normalized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Normalized {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// A finite, non-negative, non-NaN f64 value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Weight(NotNan<f64>);

impl Weight {
    pub const ZERO: Self = Self(unsafe { NotNan::new_unchecked(0.0) });

    pub fn new(value: f64) -> Option<Self> {
        let value = NotNan::new(value).ok()?;
        if *value < 0.0 || value.is_infinite() {
            return None;
        }
        Some(Self(value))
    }

    pub fn as_inner(&self) -> NotNan<f64> {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0.into_inner()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Debug for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}
