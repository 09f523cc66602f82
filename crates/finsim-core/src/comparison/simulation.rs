use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::comparison::verdict::{compare, ComparisonOutput};
use crate::consortium::pricing::{price_consortium, ConsortiumInput, ConsortiumOutput};
use crate::financing::loan::{calculate_loan, LoanInput, LoanOutput};
use crate::types::{with_metadata, ComputationOutput};
use crate::FinsimResult;

/// Both strategies for the same acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub consortium: ConsortiumInput,
    pub loan: LoanInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub consortium: ConsortiumOutput,
    pub loan: LoanOutput,
    pub comparison: ComparisonOutput,
}

/// Price the consortium, amortise the loan and compare them.
pub fn simulate(input: &SimulationInput) -> FinsimResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();

    let consortium = price_consortium(&input.consortium)?;
    let loan = calculate_loan(&input.loan)?;
    let comparison = compare(&consortium.result, &loan.result);

    let warnings = prefixed("consortium", consortium.warnings)
        .chain(prefixed("loan", loan.warnings))
        .chain(prefixed("comparison", comparison.warnings))
        .collect();

    let output = SimulationOutput {
        consortium: consortium.result,
        loan: loan.result,
        comparison: comparison.result,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Consortium vs. loan simulation",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn prefixed(section: &'static str, warnings: Vec<String>) -> impl Iterator<Item = String> {
    warnings.into_iter().map(move |w| format!("{section}: {w}"))
}
