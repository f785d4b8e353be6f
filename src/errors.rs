//! Unified error type for the ledger.
//!
//! Every failure the engine can report is a variant of [`Error`]. Each variant maps onto one
//! of four user-facing categories through [`Error::kind`], so a caller can decide how to present
//! it without matching on every variant.

use crate::money::Money;
use sea_orm::DbErr;
use thiserror::Error;

/// Broad category of an [`Error`], used by callers to decide how to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data fails a business rule. Show verbatim, never retry.
    Validation,
    /// A referenced person or debt does not exist.
    NotFound,
    /// The operation violates a lifecycle rule; the message names the alternative action.
    Conflict,
    /// Durable storage or environment failure. Logged and shown as a generic failure.
    Storage,
}

/// All errors produced by the ledger engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// File system failure (export, config)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input could not be parsed as a decimal amount
    #[error("Invalid amount: '{input}' is not a valid decimal number")]
    InvalidAmount {
        /// The rejected input
        input: String,
    },

    /// Division by a zero amount
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Result does not fit the supported money range
    #[error("Amount is out of the supported range")]
    ArithmeticOverflow,

    /// A business rule rejected the supplied data
    #[error("{message}")]
    Validation {
        /// User-facing explanation
        message: String,
    },

    /// No person with this id
    #[error("Person not found: {id}")]
    PersonNotFound {
        /// The missing person id
        id: String,
    },

    /// No debt with this id
    #[error("Debt not found: {id}")]
    DebtNotFound {
        /// The missing debt id
        id: String,
    },

    /// The person still owns debts and cannot be deleted
    #[error("Cannot delete person with {count} existing debt(s). Delete their debts first.")]
    HasExistingDebts {
        /// The person that was targeted
        person_id: String,
        /// Number of debts still referencing the person
        count: u64,
    },

    /// The debt has payment history and cannot be deleted
    #[error("Cannot delete debt that has payments. Mark as settled instead.")]
    DebtHasPayments {
        /// The debt that was targeted
        debt_id: String,
        /// Number of recorded payments
        count: u64,
    },

    /// Manual settle on a debt that is already settled
    #[error("Debt is already settled")]
    AlreadySettled {
        /// The settled debt
        debt_id: String,
    },

    /// Payment or edit targeting a settled debt
    #[error("Cannot modify or add payment to settled debt")]
    DebtAlreadySettled {
        /// The settled debt
        debt_id: String,
    },

    /// Payment larger than what is still owed
    #[error("Payment amount (${amount}) cannot exceed remaining balance (${balance})")]
    PaymentExceedsBalance {
        /// The rejected payment amount
        amount: Money,
        /// The balance at the time of the attempt
        balance: Money,
    },
}

impl Error {
    /// Builds a [`Error::Validation`] from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns the category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount { .. }
            | Self::DivisionByZero
            | Self::ArithmeticOverflow
            | Self::Validation { .. }
            | Self::PaymentExceedsBalance { .. } => ErrorKind::Validation,
            Self::PersonNotFound { .. } | Self::DebtNotFound { .. } => ErrorKind::NotFound,
            Self::HasExistingDebts { .. }
            | Self::DebtHasPayments { .. }
            | Self::AlreadySettled { .. }
            | Self::DebtAlreadySettled { .. } => ErrorKind::Conflict,
            Self::Config { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::Serialization(_) => ErrorKind::Storage,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
