use log::{debug, trace};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::rates::RateTable;

/// The economics shown to a borrower for a principal and duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    /// Annual interest rate as a fraction (e.g. `0.10` for 10%).
    pub annual_rate: Decimal,
    /// Simple interest over the term. Informational only: it is not
    /// `total_repayment - principal`, which follows from amortization.
    pub total_interest: Decimal,
    /// Amortized monthly installment, rounded to cents.
    pub monthly_payment: Decimal,
    /// `monthly_payment * duration_months`.
    ///
    /// Usually at least the principal, but a principal so small that the
    /// installment rounds to 0.00 gives a total of zero.
    pub total_repayment: Decimal,
}

/// Rounds a currency amount to cents, half away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn validate(principal: Decimal, duration_months: u32) -> Result<(), LoanError> {
    if principal <= Decimal::ZERO {
        return Err(LoanError::InvalidPrincipal(principal));
    }
    if duration_months == 0 {
        return Err(LoanError::InvalidDuration(duration_months));
    }
    Ok(())
}

/// Quotes loans against a duration-tiered rate table.
#[derive(Debug, Clone, Default)]
pub struct LoanCalculator {
    rates: RateTable,
}

impl LoanCalculator {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn rate_for_duration(&self, duration_months: u32) -> Decimal {
        self.rates.rate_for(duration_months)
    }

    /// Simple interest over the monthly rate: `principal * (rate / 12) * months`.
    ///
    /// Evaluated as `principal * rate * months / 12` so the repeating
    /// decimal of `rate / 12` is never carried. Not rounded.
    ///
    /// # Errors
    ///
    /// `InvalidPrincipal`, `InvalidDuration`, or `CalculationOverflow` when
    /// the product leaves the decimal range.
    pub fn compute_interest(
        &self,
        principal: Decimal,
        duration_months: u32,
    ) -> Result<Decimal, LoanError> {
        validate(principal, duration_months)?;
        let annual_rate = self.rate_for_duration(duration_months);
        principal
            .checked_mul(annual_rate)
            .and_then(|v| v.checked_mul(Decimal::from(duration_months)))
            .and_then(|v| v.checked_div(dec!(12)))
            .ok_or(LoanError::CalculationOverflow)
    }

    /// Amortized monthly installment.
    ///
    /// The payment formula is: PMT = P * [i(1 + i)^n] / [(1 + i)^n – 1]
    ///
    /// A 0% tier degenerates to the straight-line `principal / months`,
    /// returned unrounded. Otherwise the installment is rounded to cents.
    ///
    /// # Errors
    ///
    /// `InvalidPrincipal` for a non-positive principal, `InvalidDuration`
    /// for a zero duration and `CalculationOverflow` if the compound factor
    /// or the installment leaves the decimal range.
    pub fn compute_monthly_payment(
        &self,
        principal: Decimal,
        duration_months: u32,
    ) -> Result<Decimal, LoanError> {
        validate(principal, duration_months)?;

        let monthly_rate = self.rate_for_duration(duration_months) / dec!(12);
        if monthly_rate.is_zero() {
            return Ok(principal / Decimal::from(duration_months));
        }

        let factor = (dec!(1) + monthly_rate)
            .checked_powu(duration_months.into())
            .ok_or(LoanError::CalculationOverflow)?;
        trace!(
            "monthly rate {}, compound factor {} over {} months",
            monthly_rate, factor, duration_months
        );

        // the annuity factor stays near the monthly rate, so scale it before
        // touching the principal
        let payment = monthly_rate
            .checked_mul(factor)
            .and_then(|v| v.checked_div(factor - dec!(1)))
            .and_then(|v| v.checked_mul(principal))
            .ok_or(LoanError::CalculationOverflow)?;
        Ok(round_currency(payment))
    }

    pub fn compute_total_repayment(
        &self,
        monthly_payment: Decimal,
        duration_months: u32,
    ) -> Decimal {
        compute_total_repayment(monthly_payment, duration_months)
    }

    /// Full quote for a loan request.
    pub fn quote(&self, principal: Decimal, duration_months: u32) -> Result<LoanQuote, LoanError> {
        let monthly_payment = self.compute_monthly_payment(principal, duration_months)?;
        let total_interest = self.compute_interest(principal, duration_months)?;
        let total_repayment = monthly_payment
            .checked_mul(Decimal::from(duration_months))
            .ok_or(LoanError::CalculationOverflow)?;
        let quote = LoanQuote {
            annual_rate: self.rate_for_duration(duration_months),
            total_interest,
            monthly_payment,
            total_repayment,
        };
        debug!(
            "quoted {} over {} months: {:?}",
            principal, duration_months, quote
        );
        Ok(quote)
    }
}

/// Annual rate for `duration_months` on the standard ladder.
pub fn rate_for_duration(duration_months: u32) -> Decimal {
    RateTable::standard().rate_for(duration_months)
}

/// See [`LoanCalculator::compute_interest`]; uses the standard ladder.
pub fn compute_interest(principal: Decimal, duration_months: u32) -> Result<Decimal, LoanError> {
    LoanCalculator::default().compute_interest(principal, duration_months)
}

/// See [`LoanCalculator::compute_monthly_payment`]; uses the standard ladder.
pub fn compute_monthly_payment(
    principal: Decimal,
    duration_months: u32,
) -> Result<Decimal, LoanError> {
    LoanCalculator::default().compute_monthly_payment(principal, duration_months)
}

pub fn compute_total_repayment(monthly_payment: Decimal, duration_months: u32) -> Decimal {
    monthly_payment * Decimal::from(duration_months)
}

/// See [`LoanCalculator::quote`]; uses the standard ladder.
pub fn quote(principal: Decimal, duration_months: u32) -> Result<LoanQuote, LoanError> {
    LoanCalculator::default().quote(principal, duration_months)
}
