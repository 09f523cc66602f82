//! Side-by-side verdicts between a priced consortium letter and a loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::consortium::pricing::{ConsortiumCostConvention, ConsortiumOutput};
use crate::financing::loan::{LoanCostConvention, LoanOutput};
use crate::types::{non_negative, with_metadata, ComputationOutput, Money, Periods};

/// Divisors of the secondary weighted score.
pub const SCORE_COST_DIVISOR: Decimal = dec!(20_000);
pub const SCORE_INSTALLMENT_DIVISOR: Decimal = dec!(1_000);
pub const SCORE_TERM_DIVISOR: Decimal = dec!(12);

const SCORE_CEILING: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Consortium,
    Loan,
    Tie,
}

impl Winner {
    /// Lower is better; equal values tie.
    pub fn lower_of(consortium: Decimal, loan: Decimal) -> Self {
        if consortium < loan {
            Winner::Consortium
        } else if loan < consortium {
            Winner::Loan
        } else {
            Winner::Tie
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricVerdict {
    pub consortium: Decimal,
    pub loan: Decimal,
    pub winner: Winner,
}

impl MetricVerdict {
    fn lower_wins(consortium: Decimal, loan: Decimal) -> Self {
        MetricVerdict {
            consortium,
            loan,
            winner: Winner::lower_of(consortium, loan),
        }
    }
}

/// Heuristic score, higher is better. Not a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedScore {
    pub consortium: Decimal,
    pub loan: Decimal,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    /// Effective cost ratio of each side.
    pub best_by_rate: MetricVerdict,
    /// Post-contemplation installment vs. first loan installment.
    pub best_by_installment: MetricVerdict,
    /// Category vs. total paid on the loan.
    pub best_by_total_cost: MetricVerdict,
    pub weighted_score: WeightedScore,
}

#[derive(Serialize)]
struct ScoreConstants {
    cost_divisor: Decimal,
    installment_divisor: Decimal,
    term_divisor: Decimal,
}

/// Compare both strategies metric by metric.
pub fn compare(
    consortium: &ConsortiumOutput,
    loan: &LoanOutput,
) -> ComputationOutput<ComparisonOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if consortium.term == 0 || consortium.credit.is_zero() {
        warnings.push("Consortium result is a zero sentinel; verdicts favour it trivially".into());
    }
    if loan.schedule.is_empty() {
        warnings.push("Loan result has an empty schedule; verdicts favour it trivially".into());
    }
    if !same_cost_basis(consortium, loan) {
        warnings.push(
            "Effective cost ratios use different conventions on each side; the rate verdict mixes definitions"
                .into(),
        );
    }

    let output = ComparisonOutput {
        best_by_rate: MetricVerdict::lower_wins(
            consortium.effective_cost_ratio,
            loan.effective_cost_ratio,
        ),
        best_by_installment: MetricVerdict::lower_wins(
            consortium.post_installment,
            loan.first_installment,
        ),
        best_by_total_cost: MetricVerdict::lower_wins(consortium.total_cost, loan.total_paid),
        weighted_score: WeightedScore {
            consortium: weighted_score(
                consortium.total_cost,
                consortium.post_installment,
                consortium.term,
            ),
            loan: weighted_score(loan.total_paid, loan.first_installment, loan.term),
            label: "heuristic: 100 - cost/K1 - installment/K2 - term/K3, floored at 0".into(),
        },
    };

    let constants = ScoreConstants {
        cost_divisor: SCORE_COST_DIVISOR,
        installment_divisor: SCORE_INSTALLMENT_DIVISOR,
        term_divisor: SCORE_TERM_DIVISOR,
    };
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Consortium vs. loan, lower value wins per metric",
        &constants,
        warnings,
        elapsed,
        output,
    )
}

/// `100 - total_cost/K1 - installment/K2 - term/K3`, floored at zero.
pub fn weighted_score(total_cost: Money, installment: Money, term: Periods) -> Decimal {
    non_negative(
        SCORE_CEILING
            - total_cost / SCORE_COST_DIVISOR
            - installment / SCORE_INSTALLMENT_DIVISOR
            - Decimal::from(term) / SCORE_TERM_DIVISOR,
    )
}

/// Whether both ratios are expressed on the same basis (whole contract, or
/// per year).
fn same_cost_basis(consortium: &ConsortiumOutput, loan: &LoanOutput) -> bool {
    matches!(
        (consortium.cost_convention, loan.cost_convention),
        (
            ConsortiumCostConvention::TotalFee,
            LoanCostConvention::TotalOverPrincipal
        ) | (
            ConsortiumCostConvention::AnnualizedPerPeriod,
            LoanCostConvention::NominalRate
        )
    )
}
