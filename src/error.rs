use std::fmt;

use rust_decimal::Decimal;

/// Validation failures raised by the loan calculations.
///
/// Empty schedules are not errors: operations over them return `None`,
/// an empty history or a progress of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanError {
    /// The requested principal was zero or negative.
    InvalidPrincipal(Decimal),
    /// The repayment duration was zero months.
    InvalidDuration(u32),
    /// A repayment amount was zero or negative.
    InvalidRepaymentAmount(Decimal),
    /// The schedule has no pending installment left to settle.
    NoPendingRepayment,
    /// The wallet cannot cover the requested repayment.
    InsufficientBalance { required: Decimal, available: Decimal },
    /// A record received from the backend could not be understood.
    MalformedRecord(String),
    /// A required application form field was left blank.
    IncompleteForm(&'static str),
    /// An intermediate value exceeded the range of `Decimal`.
    CalculationOverflow,
}

impl fmt::Display for LoanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrincipal(amount) => {
                write!(f, "Principal must be greater than zero, got {}", amount)
            }
            Self::InvalidDuration(months) => {
                write!(f, "Duration must be at least one month, got {}", months)
            }
            Self::InvalidRepaymentAmount(amount) => {
                write!(f, "Repayment amount must be greater than zero, got {}", amount)
            }
            Self::NoPendingRepayment => write!(f, "There are no pending repayments to process"),
            Self::InsufficientBalance {
                required,
                available,
            } => write!(
                f,
                "Wallet balance {} is insufficient for a repayment of {}",
                available, required
            ),
            Self::MalformedRecord(message) => write!(f, "Malformed record: {}", message),
            Self::IncompleteForm(field) => write!(f, "The {} field is required", field),
            Self::CalculationOverflow => write!(f, "Calculation overflowed the decimal range"),
        }
    }
}

impl std::error::Error for LoanError {}
