//! Closed-form amortization for the listing page payment estimate.

use serde::Serialize;

use crate::error::MortgageError;

/// Monthly payment on `principal` at `annual_rate_percent` over `years`.
///
/// Uses `P * r / (1 - (1 + r)^-n)` with the monthly rate `r` and `n` monthly
/// payments; a zero rate spreads the principal evenly.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: u32) -> Result<f64, MortgageError> {
    if years == 0 {
        return Err(MortgageError::ZeroTerm);
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(MortgageError::InvalidRate(annual_rate_percent));
    }

    let payments = f64::from(years * 12);
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return Ok(principal / payments);
    }

    Ok(principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-payments)))
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MortgageBreakdown {
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

impl MortgageBreakdown {
    pub fn calculate(
        price: f64,
        down_payment: f64,
        annual_rate_percent: f64,
        years: u32,
    ) -> Result<Self, MortgageError> {
        if down_payment > price {
            return Err(MortgageError::DownPaymentTooLarge {
                price,
                down_payment,
            });
        }

        let loan_amount = price - down_payment;
        let monthly_payment = monthly_payment(loan_amount, annual_rate_percent, years)?;
        let total_paid = monthly_payment * f64::from(years * 12);

        Ok(Self {
            loan_amount,
            monthly_payment,
            total_paid,
            total_interest: total_paid - loan_amount,
        })
    }
}
