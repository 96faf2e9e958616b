// Application-level error taxonomy for register operations.
//
// Validation failures abort before any network call and carry the full
// batch of violations; gateway failures wrap the port error.

use thiserror::Error;

use crate::core::ports::GatewayError;
use crate::core::validate::Violation;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("validation failed with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ApplicationError {
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            Self::Validation(v) => Some(v),
            Self::Gateway(_) => None,
        }
    }
}
