//! `student_loan` holds the loan economics of a student loan platform.
//!
//! It covers the numbers a borrower sees and the checks made before money moves:
//! - **Quotes**: a duration-tiered annual rate (3 months at 5%, 6 at 7.5%, 12 at 10%,
//!   anything longer at 12.5%), simple interest over the term, an amortized monthly
//!   installment rounded to cents and the resulting total repayment.
//! - **Repayment tracking**: progress against a remaining balance or a schedule,
//!   the next installment due and the recent repayment history.
//! - **Submissions**: the loan application payload and the pre-flight check for a
//!   wallet-funded repayment.
//! - **Portfolio**: active-loan selection and admin dashboard figures.
//!
//! Everything here is pure and synchronous. Persistence, authentication and payment
//! gateways belong to the backend the platform talks to.
//!
//! ## Usage
//!
//! ```rust
//! use student_loan::{quote, compute_progress};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     match quote(dec!(50_000), 12) {
//!         Ok(quote) => {
//!             println!("Rate:            {}", quote.annual_rate);
//!             println!("Interest:        {:.2}", quote.total_interest);
//!             println!("Monthly payment: {:.2}", quote.monthly_payment);
//!             println!("Total repayment: {:.2}", quote.total_repayment);
//!             assert_eq!(quote.monthly_payment, dec!(4395.79));
//!         }
//!         Err(e) => {
//!             eprintln!("Error quoting loan: {}", e);
//!         }
//!     }
//!
//!     assert_eq!(compute_progress(dec!(1000), Some(dec!(250))), dec!(75));
//! }
//! ```
//!
//! Rates can be loaded from configuration instead of the built-in ladder:
//!
//! ```rust
//! use student_loan::{LoanCalculator, RateTable};
//! use rust_decimal_macros::dec;
//!
//! # fn main() -> anyhow::Result<()> {
//! let rates = RateTable::from_json(
//!     r#"{"tiers": [{"max_months": 6, "annual_rate": "0"}, {"max_months": 12, "annual_rate": "0.08"}]}"#,
//! )?;
//! let calculator = LoanCalculator::new(rates);
//! assert_eq!(calculator.compute_monthly_payment(dec!(1200), 6)?, dec!(200));
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod calculator;
pub mod error;
pub mod portfolio;
pub mod rates;
pub mod repayment;
pub mod schedule;

pub use application::{LoanApplication, LoanApplicationForm};
pub use calculator::{
    LoanCalculator, LoanQuote, compute_interest, compute_monthly_payment,
    compute_total_repayment, quote, rate_for_duration,
};
pub use error::LoanError;
pub use portfolio::{LoanRecord, LoanStatus, PortfolioStats};
pub use rates::{RateTable, RateTier};
pub use repayment::prepare_repayment;
pub use schedule::{
    Balance, DEFAULT_HISTORY_LIMIT, RepaymentScheduleEntry, RepaymentStatus, compute_progress,
    next_due, repayment_history, schedule_progress,
};
