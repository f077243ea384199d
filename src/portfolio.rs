use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::schedule::RepaymentScheduleEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Paid,
    Defaulted,
}

/// A loan as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: u64,
    pub amount: Decimal,
    pub status: LoanStatus,
}

/// The loan a borrower's dashboard follows: the first active one.
pub fn active_loan(loans: &[LoanRecord]) -> Option<&LoanRecord> {
    loans.iter().find(|loan| loan.status == LoanStatus::Active)
}

pub fn repayments_for_loan(
    entries: &[RepaymentScheduleEntry],
    loan_id: u64,
) -> Vec<RepaymentScheduleEntry> {
    entries
        .iter()
        .filter(|entry| entry.loan_id == loan_id)
        .cloned()
        .collect()
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioStats {
    pub total_loans: usize,
    pub active_loans: usize,
    /// Sum of the principal of active loans.
    pub active_amount: Decimal,
    pub paid_loans: usize,
    pub defaulted_loans: usize,
    /// Paid loans as a percentage of all loans, one decimal place.
    pub repayment_rate: Decimal,
    /// Defaulted loans as a percentage of all loans, one decimal place.
    pub default_rate: Decimal,
}

fn rate(count: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(count) / Decimal::from(total) * dec!(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

impl PortfolioStats {
    pub fn from_loans(loans: &[LoanRecord]) -> Self {
        let count = |status: LoanStatus| loans.iter().filter(|l| l.status == status).count();

        let total_loans = loans.len();
        let paid_loans = count(LoanStatus::Paid);
        let defaulted_loans = count(LoanStatus::Defaulted);

        Self {
            total_loans,
            active_loans: count(LoanStatus::Active),
            active_amount: loans
                .iter()
                .filter(|l| l.status == LoanStatus::Active)
                .map(|l| l.amount)
                .sum(),
            paid_loans,
            defaulted_loans,
            repayment_rate: rate(paid_loans, total_loans),
            default_rate: rate(defaulted_loans, total_loans),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(id: u64, amount: Decimal, status: LoanStatus) -> LoanRecord {
        LoanRecord { id, amount, status }
    }

    #[test]
    fn test_portfolio_stats() {
        let loans = vec![
            loan(1, dec!(5000), LoanStatus::Active),
            loan(2, dec!(12000), LoanStatus::Active),
            loan(3, dec!(3000), LoanStatus::Paid),
            loan(4, dec!(8000), LoanStatus::Defaulted),
            loan(5, dec!(1000), LoanStatus::Paid),
            loan(6, dec!(2000), LoanStatus::Rejected),
        ];

        let stats = PortfolioStats::from_loans(&loans);
        assert_eq!(stats.total_loans, 6);
        assert_eq!(stats.active_loans, 2);
        assert_eq!(stats.active_amount, dec!(17000));
        assert_eq!(stats.paid_loans, 2);
        assert_eq!(stats.defaulted_loans, 1);
        assert_eq!(stats.repayment_rate, dec!(33.3));
        assert_eq!(stats.default_rate, dec!(16.7));
    }

    #[test]
    fn test_empty_portfolio() {
        let stats = PortfolioStats::from_loans(&[]);
        assert_eq!(stats.total_loans, 0);
        assert_eq!(stats.active_amount, dec!(0));
        assert_eq!(stats.repayment_rate, dec!(0));
        assert_eq!(stats.default_rate, dec!(0));
    }

    #[test]
    fn test_active_loan_and_its_repayments() {
        let loans: Vec<LoanRecord> = serde_json::from_str(
            r#"[
                {"id": 1, "amount": "5000.00", "status": "paid"},
                {"id": 2, "amount": "12000.00", "status": "active"},
                {"id": 3, "amount": "3000.00", "status": "active"}
            ]"#,
        )
        .unwrap();
        assert_eq!(active_loan(&loans).map(|l| l.id), Some(2));
        assert!(active_loan(&loans[..1]).is_none());

        let entries = crate::schedule::parse_schedule(
            r#"[
                {"id": 1, "loan": 1, "amount": "10", "due_date": "2025-01-01", "status": "paid"},
                {"id": 2, "loan": 2, "amount": "10", "due_date": "2025-02-01", "status": "pending"},
                {"id": 3, "loan": 2, "amount": "10", "due_date": "2025-03-01", "status": "pending"}
            ]"#,
        )
        .unwrap();
        let ids: Vec<u64> = repayments_for_loan(&entries, 2).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
