use std::convert::TryFrom;

use crate::{
    error::{Error, Result},
    types::Support,
};

/// Minimum support, either as a transaction count or as a fraction of all
/// transactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinSupport {
    Absolute(i64),
    Relative(f64),
}

impl Default for MinSupport {
    fn default() -> Self {
        MinSupport::Relative(0.2)
    }
}

impl MinSupport {
    pub fn validate(self) -> Result<Self> {
        match self {
            MinSupport::Absolute(count) if count < 1 => Err(Error::InvalidParameter(format!(
                "minimum support must be strictly positive, got {}",
                count
            ))),
            MinSupport::Relative(fraction) if !(0.0..=1.0).contains(&fraction) => {
                Err(Error::InvalidParameter(format!(
                    "minimum support must be between 0 and 1, got {}",
                    fraction
                )))
            }
            valid => Ok(valid),
        }
    }

    /// Absolute threshold for a database of `n_transactions`.
    ///
    /// A relative support is scaled and rounded up, which keeps exactly the
    /// integer supports `s` with `s >= fraction * n_transactions`. The result
    /// is never below 1.
    pub fn resolve(self, n_transactions: usize) -> Support {
        let count = match self {
            MinSupport::Absolute(count) => Support::try_from(count).unwrap_or(0),
            MinSupport::Relative(fraction) => (fraction * n_transactions as f64).ceil() as Support,
        };
        count.max(1)
    }
}

impl From<i32> for MinSupport {
    fn from(count: i32) -> Self {
        MinSupport::Absolute(count.into())
    }
}

impl From<i64> for MinSupport {
    fn from(count: i64) -> Self {
        MinSupport::Absolute(count)
    }
}

impl From<u32> for MinSupport {
    fn from(count: u32) -> Self {
        MinSupport::Absolute(count.into())
    }
}

impl From<usize> for MinSupport {
    fn from(count: usize) -> Self {
        MinSupport::Absolute(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MinSupport {
    fn from(fraction: f64) -> Self {
        MinSupport::Relative(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_counts() {
        assert!(matches!(
            MinSupport::from(-1).validate(),
            Err(Error::InvalidParameter(_))
        ));
        assert!(MinSupport::from(0).validate().is_err());
        assert!(MinSupport::from(1).validate().is_ok());
    }

    #[test]
    fn rejects_fractions_outside_unit_interval() {
        assert!(MinSupport::from(1.5).validate().is_err());
        assert!(MinSupport::from(-0.1).validate().is_err());
        assert!(MinSupport::from(f64::NAN).validate().is_err());
        assert!(MinSupport::from(0.0).validate().is_ok());
        assert!(MinSupport::from(1.0).validate().is_ok());
    }

    #[test]
    fn resolves_relative_support_upwards() {
        assert_eq!(MinSupport::from(1.0).resolve(3), 3);
        assert_eq!(MinSupport::from(0.5).resolve(3), 2);
        assert_eq!(MinSupport::from(0.2).resolve(10), 2);
        assert_eq!(MinSupport::from(0.25).resolve(10), 3);
    }

    #[test]
    fn resolved_support_is_at_least_one() {
        assert_eq!(MinSupport::from(0.0).resolve(10), 1);
        assert_eq!(MinSupport::from(0.2).resolve(0), 1);
        assert_eq!(MinSupport::from(4).resolve(0), 4);
    }

    #[test]
    fn default_is_twenty_percent() {
        assert_eq!(MinSupport::default(), MinSupport::Relative(0.2));
    }
}
