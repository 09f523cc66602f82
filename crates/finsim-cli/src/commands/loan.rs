use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use finsim_core::financing::amortization::AmortizationSystem;
use finsim_core::financing::loan::{self, LoanCostConvention, LoanInput};
use finsim_core::time_value::RateConvention;

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SystemArg {
    /// Constant installment
    Price,
    /// Constant amortisation
    Sac,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RateConventionArg {
    /// annual / 12
    Simple,
    /// (1 + annual)^(1/12) - 1
    Compound,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LoanCostArg {
    /// total paid / principal - 1
    TotalOverPrincipal,
    /// nominal annual rate
    Nominal,
}

/// Arguments for loan amortisation
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Asset value
    #[arg(long)]
    pub asset_value: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Nominal annual rate (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Amortisation system
    #[arg(long, value_enum, default_value = "price")]
    pub system: SystemArg,

    /// Annual to monthly rate conversion
    #[arg(long, value_enum, default_value = "simple")]
    pub rate_convention: RateConventionArg,

    /// Effective cost convention
    #[arg(long, value_enum, default_value = "total-over-principal")]
    pub cost_convention: LoanCostArg,
}

/// A R$ 500k asset with R$ 100k down at 12% a.a. over 240 months, Price.
pub fn default_input() -> LoanInput {
    LoanInput {
        asset_value: dec!(500_000),
        down_payment: dec!(100_000),
        annual_rate_pct: dec!(12),
        term: 240,
        system: AmortizationSystem::Price,
        rate_convention: RateConvention::Simple,
        cost_convention: LoanCostConvention::TotalOverPrincipal,
    }
}

impl LoanArgs {
    /// Build the input from flags over [`default_input`].
    pub fn to_input(&self) -> LoanInput {
        let d = default_input();
        LoanInput {
            asset_value: self.asset_value.unwrap_or(d.asset_value),
            down_payment: self.down_payment.unwrap_or(d.down_payment),
            annual_rate_pct: self.rate.unwrap_or(d.annual_rate_pct),
            term: self.term.unwrap_or(d.term),
            system: match self.system {
                SystemArg::Price => AmortizationSystem::Price,
                SystemArg::Sac => AmortizationSystem::Sac,
            },
            rate_convention: match self.rate_convention {
                RateConventionArg::Simple => RateConvention::Simple,
                RateConventionArg::Compound => RateConvention::Compound,
            },
            cost_convention: match self.cost_convention {
                LoanCostArg::TotalOverPrincipal => LoanCostConvention::TotalOverPrincipal,
                LoanCostArg::Nominal => LoanCostConvention::NominalRate,
            },
        }
    }

    fn resolve(&self) -> Result<LoanInput, Box<dyn std::error::Error>> {
        Ok(match input::read_optional(self.input.as_deref())? {
            Some(parsed) => parsed,
            None => self.to_input(),
        })
    }
}

/// Loan summary without the per-period rows.
pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = args.resolve()?;
    let mut result = serde_json::to_value(loan::calculate_loan(&loan_input)?)?;
    if let Some(res) = result.get_mut("result").and_then(Value::as_object_mut) {
        res.remove("schedule");
    }
    Ok(result)
}

/// Per-period rows only, as an array.
pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = args.resolve()?;
    let output = loan::calculate_loan(&loan_input)?;
    for w in &output.warnings {
        log::warn!("{w}");
    }
    Ok(serde_json::to_value(output.result.schedule)?)
}
