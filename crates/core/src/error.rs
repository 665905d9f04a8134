//! Error types for the cutting-stock optimizer.

use std::fmt;

use thiserror::Error;

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies the part that made a spec group fail during allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PartFault {
    /// Spec key of the failing part.
    pub spec_key: String,
    /// Source part id.
    pub part_id: String,
    /// Nominal part length in inches (tolerance not included).
    pub length_in: f64,
}

impl PartFault {
    /// Creates a new part fault.
    pub fn new(spec_key: impl Into<String>, part_id: impl Into<String>, length_in: f64) -> Self {
        Self {
            spec_key: spec_key.into(),
            part_id: part_id.into(),
            length_in,
        }
    }
}

impl fmt::Display for PartFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "part {} ({} in) for spec {}",
            self.part_id, self.length_in, self.spec_key
        )
    }
}

/// Who is responsible for a failure, as seen from a service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request was malformed or cannot be satisfied with the given stock.
    Client,
    /// The optimizer broke one of its own invariants.
    Server,
}

impl ErrorClass {
    /// Returns the lowercase wire name of the class.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Client => "client",
            ErrorClass::Server => "server",
        }
    }
}

/// Errors that abort an optimization call.
///
/// Every variant aborts the whole call; no partial plan is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed input: bad kerf, tolerance, quantity or length.
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description, safe to echo to the caller.
        message: String,
        /// Spec key of the offending item, when known.
        spec_key: Option<String>,
        /// Offending part id, when the error concerns a requirement.
        part_id: Option<String>,
        /// Offending stock id, when the error concerns a stock item.
        stock_id: Option<String>,
        /// Offending length, when the error concerns a length.
        length_in: Option<f64>,
    },

    /// A part cannot fit on any stock unit of its spec, even on an empty one.
    #[error("Infeasible part: {0} cannot fit within available stock")]
    InfeasiblePart(PartFault),

    /// A part would fit on some stock unit, but all suitable units are used up.
    #[error("Insufficient stock: no remaining stock unit can hold {0}")]
    InsufficientStock(PartFault),

    /// The optimizer produced output that violates one of its invariants.
    #[error("Internal consistency fault: {message} ({context})")]
    Internal {
        /// Which invariant was broken.
        message: String,
        /// Diagnostic context: spec, stock identity, expected and actual values.
        context: String,
    },
}

impl Error {
    /// Creates a validation error with no attached identifiers.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
            spec_key: None,
            part_id: None,
            stock_id: None,
            length_in: None,
        }
    }

    /// Creates a validation error for a part requirement.
    pub fn invalid_part(
        message: impl Into<String>,
        spec_key: &str,
        part_id: &str,
        length_in: f64,
    ) -> Self {
        Error::Validation {
            message: message.into(),
            spec_key: Some(spec_key.to_string()),
            part_id: Some(part_id.to_string()),
            stock_id: None,
            length_in: Some(length_in),
        }
    }

    /// Creates a validation error for a stock item.
    pub fn invalid_stock(
        message: impl Into<String>,
        spec_key: &str,
        stock_id: &str,
        length_in: f64,
    ) -> Self {
        Error::Validation {
            message: message.into(),
            spec_key: Some(spec_key.to_string()),
            part_id: None,
            stock_id: Some(stock_id.to_string()),
            length_in: Some(length_in),
        }
    }

    /// Creates an internal consistency fault.
    pub fn internal(message: impl Into<String>, context: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
            context: context.into(),
        }
    }

    /// Returns the responsibility class of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Internal { .. } => ErrorClass::Server,
            _ => ErrorClass::Client,
        }
    }

    /// Returns true if the caller caused this error.
    pub fn is_client_error(&self) -> bool {
        self.class() == ErrorClass::Client
    }

    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "VALIDATION",
            Error::InfeasiblePart(_) => "INFEASIBLE_PART",
            Error::InsufficientStock(_) => "INSUFFICIENT_STOCK",
            Error::Internal { .. } => "INTERNAL",
        }
    }

    /// Returns the failing part for allocation errors.
    pub fn part_fault(&self) -> Option<&PartFault> {
        match self {
            Error::InfeasiblePart(fault) | Error::InsufficientStock(fault) => Some(fault),
            _ => None,
        }
    }
}
