//! Filter configuration and parameter validation
//!
//! # Example
//!
//! ```
//! use gcs_filters::domain::{GcsBuilder, GcsConfig};
//!
//! let config = GcsConfig::default().with_p(19);
//! config.validate().expect("Valid config");
//!
//! let builder = GcsBuilder::from_config(&config);
//! assert_eq!(builder.p(), 19);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GcsError, Result};

/// Default Rice parameter (~2^-20 false positive rate)
pub const DEFAULT_P: u8 = 20;

/// Smallest usable Rice parameter
pub const MIN_P: u8 = 1;

/// Largest Rice parameter; keeps `n << p` inside a `u64` for any `u32` count
pub const MAX_P: u8 = 32;

/// Check that a Rice parameter lies in `[MIN_P, MAX_P]`
pub fn validate_p(p: u8) -> Result<()> {
    if p > MAX_P {
        return Err(GcsError::ParameterTooLarge { p });
    }
    if p < MIN_P {
        return Err(GcsError::ParameterTooSmall { p });
    }
    Ok(())
}

/// GCS filter configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcsConfig {
    /// Rice parameter: remainder width in bits, controls the FP rate
    pub p: u8,
}

impl Default for GcsConfig {
    fn default() -> Self {
        Self { p: DEFAULT_P }
    }
}

impl GcsConfig {
    /// Create a new configuration with validation
    pub fn new(p: u8) -> Result<Self> {
        let config = Self { p };
        config.validate()?;
        Ok(config)
    }

    /// Validate the Rice parameter
    pub fn validate(&self) -> Result<()> {
        validate_p(self.p)
    }

    /// Builder-style method to set the Rice parameter
    pub fn with_p(mut self, p: u8) -> Self {
        self.p = p;
        self
    }

    /// Expected false positive rate per probe (`2^-p`)
    pub fn false_positive_rate(&self) -> f64 {
        (-(self.p as f64)).exp2()
    }
}
