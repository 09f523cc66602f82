//! Consortium letter pricing: category, installments before and after
//! contemplation, outstanding balance and the three lance components.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::consortium::contemplation::{self, ContemplationEstimate, ContemplationPolicy};
use crate::consortium::lance_base::{
    representativeness_base, select_bases, Administrator, LanceBases,
};
use crate::error::FinsimError;
use crate::time_value::MONTHS_PER_YEAR;
use crate::types::{
    non_negative, pct_to_rate, with_metadata, ComputationOutput, Money, Percent, Periods, Rate,
};
use crate::FinsimResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// What "effective rate" means for a consortium letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsortiumCostConvention {
    /// (admin fee + reserve fund) over the whole term.
    #[default]
    TotalFee,
    /// (admin fee + reserve fund) spread per month and annualised.
    AnnualizedPerPeriod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsortiumInput {
    /// Credit letter value.
    pub credit: Money,
    /// Number of monthly installments in the group.
    pub term: Periods,
    /// Administration fee over the whole term, in percent.
    pub admin_fee_pct: Percent,
    #[serde(default)]
    pub reserve_fund_pct: Percent,
    /// Installments paid before contemplation.
    #[serde(default)]
    pub elapsed_periods: Periods,
    /// Discount on installments paid before contemplation ("redutor").
    #[serde(default)]
    pub reductor_pct: Percent,
    /// Share of the credit offered as lance and deducted from it.
    #[serde(default)]
    pub embedded_bid_pct: Percent,
    #[serde(default)]
    pub fixed_bid_pct: Percent,
    #[serde(default)]
    pub free_bid_pct: Percent,
    /// Cash added to the lance on top of the percentage components.
    #[serde(default)]
    pub own_resources: Money,
    pub administrator: Administrator,
    /// Group code; only CNP distinguishes between groups.
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub cost_convention: ConsortiumCostConvention,
    #[serde(default)]
    pub contemplation_policy: ContemplationPolicy,
    /// Group size for the rank estimate.
    #[serde(default)]
    pub pool_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsortiumOutput {
    pub credit: Money,
    pub term: Periods,
    /// Credit inflated by admin fee and reserve fund.
    pub category: Money,
    pub base_installment: Money,
    pub pre_installment: Money,
    pub post_installment: Money,
    /// Category still owed after the elapsed installments.
    pub current_balance: Money,
    pub lance_bases: LanceBases,
    pub embedded_bid: Money,
    pub fixed_bid: Money,
    pub free_bid: Money,
    pub own_resources: Money,
    pub total_bid: Money,
    /// Credit actually released after the embedded lance.
    pub net_credit: Money,
    /// Total lance as a percentage of the administrator's reference base.
    pub representativeness_pct: Percent,
    pub effective_cost_ratio: Rate,
    pub cost_convention: ConsortiumCostConvention,
    pub total_cost: Money,
    pub contemplation: ContemplationEstimate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a consortium letter.
pub fn price_consortium(
    input: &ConsortiumInput,
) -> FinsimResult<ComputationOutput<ConsortiumOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    validate_consortium(input)?;

    if !input.administrator.is_listed() {
        log::warn!(
            "unlisted administrator '{}', applying credit-based lance bases",
            input.administrator
        );
        warnings.push(format!(
            "Administrator '{}' not recognised; fixed and free lances quoted on raw credit",
            input.administrator
        ));
    }

    let elapsed = if input.elapsed_periods > input.term {
        warnings.push(format!(
            "Elapsed periods {} exceed the term {}; clamped to the term",
            input.elapsed_periods, input.term
        ));
        input.term
    } else {
        input.elapsed_periods
    };

    let fee_pct = input.admin_fee_pct + input.reserve_fund_pct;
    let credit = input.credit;
    let category = credit * (Decimal::ONE + pct_to_rate(fee_pct));

    // Installments
    let base_installment = if input.term == 0 {
        warnings.push("Term of zero periods; installments set to zero".into());
        Decimal::ZERO
    } else {
        category / Decimal::from(input.term)
    };
    let pre_installment = base_installment * (Decimal::ONE - pct_to_rate(input.reductor_pct));
    let post_installment = base_installment;
    let current_balance = non_negative(category - Decimal::from(elapsed) * pre_installment);

    // Lances
    let lance_bases = select_bases(&input.administrator, input.group.as_deref());
    let embedded_bid = credit * pct_to_rate(input.embedded_bid_pct);
    let fixed_bid =
        lance_bases.fixed_bid.resolve(credit, category) * pct_to_rate(input.fixed_bid_pct);
    let free_bid = lance_bases.free_bid.resolve(credit, category) * pct_to_rate(input.free_bid_pct);
    let total_bid = embedded_bid + fixed_bid + free_bid + input.own_resources;
    let net_credit = credit - embedded_bid;

    let rep_base = representativeness_base(&input.administrator).resolve(credit, category);
    let representativeness_pct = if rep_base > Decimal::ZERO {
        total_bid / rep_base * dec!(100)
    } else {
        Decimal::ZERO
    };

    let effective_cost_ratio = match input.cost_convention {
        ConsortiumCostConvention::TotalFee => pct_to_rate(fee_pct),
        ConsortiumCostConvention::AnnualizedPerPeriod => {
            if input.term == 0 {
                Decimal::ZERO
            } else {
                pct_to_rate(fee_pct / Decimal::from(input.term) * MONTHS_PER_YEAR)
            }
        }
    };

    let contemplation = contemplation::estimate(
        total_bid,
        rep_base,
        elapsed,
        input.term,
        input.contemplation_policy,
        input.pool_size,
    );

    let output = ConsortiumOutput {
        credit,
        term: input.term,
        category,
        base_installment,
        pre_installment,
        post_installment,
        current_balance,
        lance_bases,
        embedded_bid,
        fixed_bid,
        free_bid,
        own_resources: input.own_resources,
        total_bid,
        net_credit,
        representativeness_pct,
        effective_cost_ratio,
        cost_convention: input.cost_convention,
        total_cost: category,
        contemplation,
    };

    let elapsed_us = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Consortium pricing (category, lance bases by administrator)",
        input,
        warnings,
        elapsed_us,
        output,
    ))
}

fn validate_consortium(input: &ConsortiumInput) -> FinsimResult<()> {
    if input.credit < Decimal::ZERO {
        return Err(FinsimError::invalid("credit", "Credit cannot be negative"));
    }
    if input.own_resources < Decimal::ZERO {
        return Err(FinsimError::invalid(
            "own_resources",
            "Own resources cannot be negative",
        ));
    }
    let percentages = [
        ("admin_fee_pct", input.admin_fee_pct),
        ("reserve_fund_pct", input.reserve_fund_pct),
        ("reductor_pct", input.reductor_pct),
        ("embedded_bid_pct", input.embedded_bid_pct),
        ("fixed_bid_pct", input.fixed_bid_pct),
        ("free_bid_pct", input.free_bid_pct),
    ];
    for (field, value) in percentages {
        if value < Decimal::ZERO {
            return Err(FinsimError::invalid(field, "Percentage cannot be negative"));
        }
    }
    if input.reductor_pct > dec!(100) {
        return Err(FinsimError::invalid(
            "reductor_pct",
            "Reductor cannot exceed 100%",
        ));
    }
    if input.embedded_bid_pct > dec!(100) {
        return Err(FinsimError::invalid(
            "embedded_bid_pct",
            "Embedded lance cannot exceed the credit",
        ));
    }
    Ok(())
}
