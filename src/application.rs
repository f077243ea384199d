use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculator::{LoanCalculator, LoanQuote};
use crate::error::LoanError;

/// Bounds of the amount slider on the application form.
pub const MIN_AMOUNT: Decimal = dec!(1000);
pub const MAX_AMOUNT: Decimal = dec!(50000);
pub const AMOUNT_STEP: Decimal = dec!(1000);

/// Durations offered in the repayment menu.
pub const OFFERED_DURATIONS: [u32; 4] = [3, 6, 12, 24];

/// What the borrower filled in on the application form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoanApplicationForm {
    pub amount: Decimal,
    pub duration_months: u32,
    pub purpose: String,
    pub reason_details: String,
    pub bank_name: String,
    pub account_number: String,
    pub bvn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationMetadata {
    pub bank_name: String,
    pub account_number: String,
    pub bvn_last_four: String,
}

/// Body submitted to the backend to open a loan application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanApplication {
    pub amount: Decimal,
    pub reason: String,
    pub reason_details: String,
    pub metadata: ApplicationMetadata,
}

impl LoanApplicationForm {
    /// The quote displayed next to the form.
    pub fn quote(&self, calculator: &LoanCalculator) -> Result<LoanQuote, LoanError> {
        calculator.quote(self.amount, self.duration_months)
    }

    /// Validates the form and builds the submission body.
    pub fn to_application(&self) -> Result<LoanApplication, LoanError> {
        if self.amount <= Decimal::ZERO {
            return Err(LoanError::InvalidPrincipal(self.amount));
        }
        if self.duration_months == 0 {
            return Err(LoanError::InvalidDuration(self.duration_months));
        }
        let purpose = self.purpose.trim();
        if purpose.is_empty() {
            return Err(LoanError::IncompleteForm("purpose"));
        }

        let reason_details = if self.reason_details.trim().is_empty() {
            format!(
                "Loan for {} purposes. Duration: {} months.",
                purpose, self.duration_months
            )
        } else {
            self.reason_details.clone()
        };

        Ok(LoanApplication {
            amount: self.amount,
            reason: purpose.to_string(),
            reason_details,
            metadata: ApplicationMetadata {
                bank_name: self.bank_name.clone(),
                account_number: self.account_number.clone(),
                bvn_last_four: last_four(&self.bvn),
            },
        })
    }
}

fn last_four(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    chars[chars.len().saturating_sub(4)..].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> LoanApplicationForm {
        LoanApplicationForm {
            amount: dec!(5000),
            duration_months: 6,
            purpose: "tuition".to_string(),
            bank_name: "First Bank".to_string(),
            account_number: "0123456789".to_string(),
            bvn: "22123456789".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_reason_details() {
        let application = form().to_application().unwrap();
        assert_eq!(
            application.reason_details,
            "Loan for tuition purposes. Duration: 6 months."
        );
        assert_eq!(application.metadata.bvn_last_four, "6789");
    }

    #[test]
    fn test_payload_shape() {
        let mut form = form();
        form.reason_details = "Final year fees".to_string();
        let body = serde_json::to_value(form.to_application().unwrap()).unwrap();

        assert_eq!(
            body,
            json!({
                "amount": "5000",
                "reason": "tuition",
                "reason_details": "Final year fees",
                "metadata": {
                    "bank_name": "First Bank",
                    "account_number": "0123456789",
                    "bvn_last_four": "6789"
                }
            })
        );
    }

    #[test]
    fn test_rejects_incomplete_forms() {
        let mut no_purpose = form();
        no_purpose.purpose = "   ".to_string();
        assert_eq!(
            no_purpose.to_application(),
            Err(LoanError::IncompleteForm("purpose"))
        );

        let mut no_amount = form();
        no_amount.amount = dec!(0);
        assert_eq!(
            no_amount.to_application(),
            Err(LoanError::InvalidPrincipal(dec!(0)))
        );

        let mut no_duration = form();
        no_duration.duration_months = 0;
        assert_eq!(
            no_duration.to_application(),
            Err(LoanError::InvalidDuration(0))
        );
    }

    #[test]
    fn test_partial_form_body() {
        let form: LoanApplicationForm = serde_json::from_str(
            r#"{"amount": "12000", "duration_months": 12, "purpose": "books"}"#,
        )
        .unwrap();

        assert_eq!(form.amount, dec!(12000));
        assert_eq!(form.bvn, "");
        assert_eq!(form.reason_details, "");

        let application = form.to_application().unwrap();
        assert_eq!(
            application.reason_details,
            "Loan for books purposes. Duration: 12 months."
        );
        assert_eq!(application.metadata.bvn_last_four, "");
    }

    #[test]
    fn test_empty_form_body_is_rejected() {
        let form: LoanApplicationForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.duration_months, 0);
        assert_eq!(form.to_application(), Err(LoanError::InvalidPrincipal(dec!(0))));
    }

    #[test]
    fn test_short_bvn_kept_whole() {
        assert_eq!(last_four("12"), "12");
        assert_eq!(last_four(""), "");
    }

    #[test]
    fn test_form_quote() {
        let quote = form().quote(&LoanCalculator::default()).unwrap();
        assert_eq!(quote.annual_rate, dec!(0.075));
        assert_eq!(quote.monthly_payment, dec!(851.66));
    }

    #[test]
    fn test_slider_bounds() {
        assert_eq!(MIN_AMOUNT, dec!(1000));
        assert_eq!(MAX_AMOUNT, dec!(50000));
        assert!(OFFERED_DURATIONS.iter().all(|&months| months > 0));
    }
}
