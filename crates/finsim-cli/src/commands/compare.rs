use clap::Args;
use serde_json::Value;

use finsim_core::comparison::simulation::{self, SimulationInput};

use crate::commands::{consortium, loan};
use crate::input;

/// Arguments for a full consortium vs. loan comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML file with `consortium` and `loan` sections
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = match input::read_optional(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            log::info!("no input supplied, comparing the default scenario");
            SimulationInput {
                consortium: consortium::default_input(),
                loan: loan::default_input(),
            }
        }
    };
    let result = simulation::simulate(&sim_input)?;
    Ok(serde_json::to_value(result)?)
}
