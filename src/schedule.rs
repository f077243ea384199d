use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;

/// How many settled installments a borrower sees by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepaymentStatus {
    Pending,
    Paid,
}

/// One installment of a loan's repayment schedule, as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentScheduleEntry {
    pub id: u64,
    #[serde(rename = "loan")]
    pub loan_id: u64,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    pub status: RepaymentStatus,
}

impl RepaymentScheduleEntry {
    pub fn is_paid(&self) -> bool {
        self.status == RepaymentStatus::Paid
    }

    pub fn is_pending(&self) -> bool {
        self.status == RepaymentStatus::Pending
    }
}

/// Parses a schedule payload (a JSON array of installments).
pub fn parse_schedule(input: &str) -> Result<Vec<RepaymentScheduleEntry>, LoanError> {
    serde_json::from_str(input)
        .map_err(|e| LoanError::MalformedRecord(format!("repayment schedule: {}", e)))
}

#[derive(Debug, Deserialize)]
struct RemainingBalance {
    remaining_balance: Decimal,
}

/// Extracts `remaining_balance` from a balance payload.
pub fn parse_remaining_balance(input: &str) -> Result<Decimal, LoanError> {
    serde_json::from_str::<RemainingBalance>(input)
        .map(|b| b.remaining_balance)
        .map_err(|e| LoanError::MalformedRecord(format!("remaining balance: {}", e)))
}

/// The earliest pending installment by due date.
///
/// Installments due on the same day keep their input order, so the first
/// one listed wins.
pub fn next_due(schedule: &[RepaymentScheduleEntry]) -> Option<&RepaymentScheduleEntry> {
    // min_by_key returns the first of several equal minima
    let next = schedule
        .iter()
        .filter(|entry| entry.is_pending())
        .min_by_key(|entry| entry.due_date);
    if let Some(entry) = next {
        debug!("next installment {} due {}", entry.id, entry.due_date);
    }
    next
}

/// The `limit` most recently settled installments, newest first.
///
/// Paid installments missing a payment date sort after all dated ones.
pub fn repayment_history(
    schedule: &[RepaymentScheduleEntry],
    limit: usize,
) -> Vec<&RepaymentScheduleEntry> {
    let mut paid: Vec<&RepaymentScheduleEntry> =
        schedule.iter().filter(|entry| entry.is_paid()).collect();

    if paid.iter().any(|entry| entry.payment_date.is_none()) {
        warn!("paid installments without a payment date in schedule");
    }

    // Option orders None first, so the reversed comparison puts it last
    paid.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
    paid.truncate(limit);
    paid
}

fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentage of `total_amount` already repaid, as a whole number.
///
/// Returns 0 when there is no balance to compare against or the total is
/// not positive.
pub fn compute_progress(total_amount: Decimal, remaining_balance: Option<Decimal>) -> Decimal {
    let Some(remaining) = remaining_balance else {
        return Decimal::ZERO;
    };
    if total_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if remaining > total_amount {
        warn!(
            "remaining balance {} exceeds loan total {}",
            remaining, total_amount
        );
    }

    let amount_paid = total_amount - remaining;
    round_percent(amount_paid / total_amount * dec!(100))
}

/// Percentage of installments settled, as a whole number. Used when no
/// live balance is available.
pub fn schedule_progress(schedule: &[RepaymentScheduleEntry]) -> Decimal {
    if schedule.is_empty() {
        return Decimal::ZERO;
    }
    let paid = schedule.iter().filter(|entry| entry.is_paid()).count();
    round_percent(Decimal::from(paid) / Decimal::from(schedule.len()) * dec!(100))
}

/// A loan's principal against what is still owed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub total_principal: Decimal,
    pub remaining: Decimal,
}

impl Balance {
    pub fn new(total_principal: Decimal, remaining: Decimal) -> Self {
        Self {
            total_principal,
            remaining,
        }
    }

    pub fn amount_paid(&self) -> Decimal {
        self.total_principal - self.remaining
    }

    pub fn progress(&self) -> Decimal {
        compute_progress(self.total_principal, Some(self.remaining))
    }
}
