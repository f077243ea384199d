use log::debug;
use rust_decimal::Decimal;

use crate::error::LoanError;
use crate::schedule::{RepaymentScheduleEntry, next_due};

/// Checks a repayment the borrower is about to make from their wallet and
/// returns the installment it will settle.
///
/// # Errors
///
/// Checked in order: `InvalidRepaymentAmount` for a non-positive amount,
/// `NoPendingRepayment` when nothing is left to pay and
/// `InsufficientBalance` when the wallet cannot cover the amount.
pub fn prepare_repayment(
    schedule: &[RepaymentScheduleEntry],
    amount: Decimal,
    wallet_balance: Decimal,
) -> Result<&RepaymentScheduleEntry, LoanError> {
    if amount <= Decimal::ZERO {
        return Err(LoanError::InvalidRepaymentAmount(amount));
    }

    let installment = next_due(schedule).ok_or(LoanError::NoPendingRepayment)?;

    if amount > wallet_balance {
        return Err(LoanError::InsufficientBalance {
            required: amount,
            available: wallet_balance,
        });
    }

    debug!(
        "repayment of {} will settle installment {} of loan {}",
        amount, installment.id, installment.loan_id
    );
    Ok(installment)
}
