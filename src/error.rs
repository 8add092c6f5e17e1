//! Error type for the ballistics core.

use std::error::Error;
use std::fmt;

/// Errors raised while admitting projectiles into the simulation.
///
/// Stepping never fails; every error is a construction-time validation
/// failure and the offending spawn request is simply not admitted.
#[derive(Debug, Clone, PartialEq)]
pub enum BallisticsError {
    /// A spawn request carried a value outside its valid domain.
    InvalidProjectileSpec {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f32,
    },
}

impl BallisticsError {
    pub(crate) fn invalid(field: &'static str, value: f32) -> Self {
        Self::InvalidProjectileSpec { field, value }
    }
}

impl fmt::Display for BallisticsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidProjectileSpec { field, value } => {
                write!(f, "invalid projectile spec: {field} = {value}")
            }
        }
    }
}

impl Error for BallisticsError {}
