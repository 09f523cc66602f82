//! Amortisation schedules for the two repayment systems offered by Brazilian
//! lenders: Price (level installment, annuity method) and SAC (constant
//! amortisation, decreasing installment).
//!
//! All math in `rust_decimal::Decimal`. Degenerate inputs (no principal, no
//! periods) produce an empty schedule rather than an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinsimError;
use crate::time_value::{annuity_payment, periodic_rate, RateConvention};
use crate::types::{non_negative, Money, Percent, Periods, Rate};
use crate::FinsimResult;

/// Longest schedule accepted, in months (100 years).
pub const MAX_TERM: Periods = 1_200;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Repayment system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationSystem {
    /// Constant installment (Tabela Price).
    #[default]
    #[serde(alias = "constant_installment")]
    Price,
    /// Constant amortisation (Sistema de Amortização Constante).
    #[serde(alias = "constant_amortization")]
    Sac,
}

impl AmortizationSystem {
    pub fn label(&self) -> &'static str {
        match self {
            AmortizationSystem::Price => "Price (constant installment)",
            AmortizationSystem::Sac => "SAC (constant amortisation)",
        }
    }
}

/// One period of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based period index.
    pub period: Periods,
    /// Total paid in the period (interest + amortisation).
    pub installment: Money,
    pub interest: Money,
    pub amortization: Money,
    /// Outstanding balance after the payment, never negative.
    pub balance: Money,
}

/// Headline figures of a schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub first_installment: Money,
    pub last_installment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_amortization: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full schedule for a nominal annual rate, converting it to a
/// monthly rate with `convention`.
pub fn generate_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    term: Periods,
    system: AmortizationSystem,
    convention: RateConvention,
) -> FinsimResult<Vec<AmortizationRow>> {
    if annual_rate_pct < Decimal::ZERO {
        return Err(FinsimError::invalid(
            "annual_rate_pct",
            "Annual rate cannot be negative",
        ));
    }
    let rate = periodic_rate(annual_rate_pct, convention);
    schedule_at_rate(principal, rate, term, system)
}

/// Build the full schedule for an already-periodic rate.
pub fn schedule_at_rate(
    principal: Money,
    rate: Rate,
    term: Periods,
    system: AmortizationSystem,
) -> FinsimResult<Vec<AmortizationRow>> {
    if principal <= Decimal::ZERO || term == 0 {
        return Ok(Vec::new());
    }
    if rate < Decimal::ZERO {
        return Err(FinsimError::invalid("rate", "Periodic rate cannot be negative"));
    }
    if term > MAX_TERM {
        return Err(FinsimError::invalid(
            "term",
            format!("Term cannot exceed {MAX_TERM} periods"),
        ));
    }
    // Bounds every interest amount and the schedule totals.
    if principal
        .checked_mul(rate)
        .and_then(|i| i.checked_mul(Decimal::from(term)))
        .is_none()
    {
        return Err(FinsimError::invalid(
            "rate",
            "Interest over the term exceeds the representable range",
        ));
    }

    match system {
        AmortizationSystem::Price => price_schedule(principal, rate, term),
        AmortizationSystem::Sac => Ok(sac_schedule(principal, rate, term)),
    }
}

/// First/last installment, totals. An empty schedule summarises to zeros.
pub fn summarize(rows: &[AmortizationRow]) -> ScheduleSummary {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return ScheduleSummary::default();
    };

    let mut summary = ScheduleSummary {
        first_installment: first.installment,
        last_installment: last.installment,
        ..ScheduleSummary::default()
    };
    for row in rows {
        summary.total_paid += row.installment;
        summary.total_interest += row.interest;
        summary.total_amortization += row.amortization;
    }
    summary
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

fn price_schedule(
    principal: Money,
    rate: Rate,
    term: Periods,
) -> FinsimResult<Vec<AmortizationRow>> {
    // Zero rate: annuity_payment degenerates to principal / term.
    let installment = annuity_payment(rate, term, principal)?;

    let mut rows = Vec::with_capacity(term as usize);
    let mut balance = principal;

    for period in 1..=term {
        let interest = balance * rate;
        // The last period settles whatever is left.
        let (installment, amortization) = if period == term {
            (balance + interest, balance)
        } else {
            (installment, installment - interest)
        };
        balance = non_negative(balance - amortization);
        rows.push(AmortizationRow {
            period,
            installment,
            interest,
            amortization,
            balance,
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// SAC
// ---------------------------------------------------------------------------

fn sac_schedule(principal: Money, rate: Rate, term: Periods) -> Vec<AmortizationRow> {
    let amortization = principal / Decimal::from(term);

    let mut rows = Vec::with_capacity(term as usize);
    let mut balance = principal;

    for period in 1..=term {
        let interest = balance * rate;
        let amortization = if period == term { balance } else { amortization };
        balance = non_negative(balance - amortization);
        rows.push(AmortizationRow {
            period,
            installment: amortization + interest,
            interest,
            amortization,
            balance,
        });
    }

    rows
}
