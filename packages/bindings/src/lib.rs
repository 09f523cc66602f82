use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use finsim_core::comparison::{simulation, verdict};
use finsim_core::consortium::lance_base::{self, Administrator};
use finsim_core::consortium::pricing::{self, ConsortiumOutput};
use finsim_core::financing::loan::{self, LoanOutput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Consortium
// ---------------------------------------------------------------------------

#[napi]
pub fn price_consortium(input_json: String) -> NapiResult<String> {
    let input: pricing::ConsortiumInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = pricing::price_consortium(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct LanceBasesQuery {
    administrator: Administrator,
    #[serde(default)]
    group: Option<String>,
}

#[napi]
pub fn lance_bases(input_json: String) -> NapiResult<String> {
    let query: LanceBasesQuery = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let bases = lance_base::select_bases(&query.administrator, query.group.as_deref());
    serde_json::to_string(&bases).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Financing
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: loan::LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: loan::LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output.result.schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PricedStrategies {
    consortium: ConsortiumOutput,
    loan: LoanOutput,
}

/// Compare two already-priced strategies.
#[napi]
pub fn compare_strategies(input_json: String) -> NapiResult<String> {
    let priced: PricedStrategies = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = verdict::compare(&priced.consortium, &priced.loan);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate(input_json: String) -> NapiResult<String> {
    let input: simulation::SimulationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulation::simulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
