//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Domain-specific errors
///
/// These errors represent business rule violations on customers and credits.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Customer with the given id does not exist
    #[error("Id {0} not found")]
    CustomerNotFound(i64),

    /// Credit with the given code does not exist
    #[error("Creditcode {0} not found")]
    CreditNotFound(uuid::Uuid),

    /// Credit exists but belongs to another customer
    #[error("Contact admin")]
    CreditOwnershipMismatch,

    /// First installment falls outside the allowed window
    #[error("Invalid Date")]
    InvalidFirstInstallment(chrono::NaiveDate),

    /// Installment count outside 1..=48
    #[error("Invalid number of installments: {0}")]
    InvalidInstallments(i32),
}

impl DomainError {
    /// Stable machine-readable code for the error body
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CustomerNotFound(_) => "customer_not_found",
            Self::CreditNotFound(_) => "credit_not_found",
            Self::CreditOwnershipMismatch => "credit_ownership_mismatch",
            Self::InvalidFirstInstallment(_) => "invalid_first_installment",
            Self::InvalidInstallments(_) => "invalid_installments",
        }
    }
}
