//! Conventional financing: asset value less down payment, amortised under
//! Price or SAC, summarised into installments, totals and an effective cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinsimError;
use crate::financing::amortization::{
    schedule_at_rate, summarize, AmortizationRow, AmortizationSystem, MAX_TERM,
};
use crate::time_value::{periodic_rate, RateConvention};
use crate::types::{
    non_negative, pct_to_rate, with_metadata, ComputationOutput, Money, Percent, Periods, Rate,
};
use crate::FinsimResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// What "effective rate" means for a loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanCostConvention {
    /// total paid / principal - 1
    #[default]
    TotalOverPrincipal,
    /// nominal annual rate as a ratio
    NominalRate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Price of the asset being financed.
    pub asset_value: Money,
    /// Cash paid upfront. Anything above the asset value finances nothing.
    #[serde(default)]
    pub down_payment: Money,
    /// Nominal annual interest rate in percent (12 = 12% a.a.).
    pub annual_rate_pct: Percent,
    /// Number of monthly installments.
    pub term: Periods,
    #[serde(default)]
    pub system: AmortizationSystem,
    #[serde(default)]
    pub rate_convention: RateConvention,
    #[serde(default)]
    pub cost_convention: LoanCostConvention,
}

impl LoanInput {
    /// Amount actually financed, floored at zero.
    pub fn principal(&self) -> Money {
        non_negative(self.asset_value - self.down_payment)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOutput {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub first_installment: Money,
    pub last_installment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub effective_cost_ratio: Rate,
    pub cost_convention: LoanCostConvention,
    pub term: Periods,
    pub system: AmortizationSystem,
    pub rate_convention: RateConvention,
    pub schedule: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortise the financed amount and summarise the loan.
pub fn calculate_loan(input: &LoanInput) -> FinsimResult<ComputationOutput<LoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    validate_loan(input)?;

    if input.down_payment > input.asset_value {
        warnings.push(format!(
            "Down payment {} exceeds asset value {}; nothing left to finance",
            input.down_payment, input.asset_value
        ));
    }
    if input.term == 0 {
        warnings.push("Term of zero periods; returning an empty schedule".into());
    }

    let principal = input.principal();
    let monthly_rate = periodic_rate(input.annual_rate_pct, input.rate_convention);
    let schedule = schedule_at_rate(principal, monthly_rate, input.term, input.system)?;
    let summary = summarize(&schedule);

    let effective_cost_ratio = match input.cost_convention {
        LoanCostConvention::TotalOverPrincipal => {
            if principal > Decimal::ZERO && !schedule.is_empty() {
                summary.total_paid / principal - Decimal::ONE
            } else {
                Decimal::ZERO
            }
        }
        LoanCostConvention::NominalRate => pct_to_rate(input.annual_rate_pct),
    };

    let output = LoanOutput {
        principal,
        monthly_rate,
        first_installment: summary.first_installment,
        last_installment: summary.last_installment,
        total_paid: summary.total_paid,
        total_interest: non_negative(summary.total_paid - principal),
        effective_cost_ratio,
        cost_convention: input.cost_convention,
        term: input.term,
        system: input.system,
        rate_convention: input.rate_convention,
        schedule,
    };

    let methodology = format!(
        "Loan amortisation, {}, {} monthly rate",
        input.system.label(),
        input.rate_convention.label()
    );
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(&methodology, input, warnings, elapsed, output))
}

fn validate_loan(input: &LoanInput) -> FinsimResult<()> {
    if input.asset_value < Decimal::ZERO {
        return Err(FinsimError::invalid(
            "asset_value",
            "Asset value cannot be negative",
        ));
    }
    if input.down_payment < Decimal::ZERO {
        return Err(FinsimError::invalid(
            "down_payment",
            "Down payment cannot be negative",
        ));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(FinsimError::invalid(
            "annual_rate_pct",
            "Annual rate cannot be negative",
        ));
    }
    if input.term > MAX_TERM {
        return Err(FinsimError::invalid(
            "term",
            format!("Term cannot exceed {MAX_TERM} months"),
        ));
    }
    Ok(())
}
