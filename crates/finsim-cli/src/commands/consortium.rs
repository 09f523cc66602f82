use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use finsim_core::consortium::contemplation::ContemplationPolicy;
use finsim_core::consortium::lance_base::{self, Administrator};
use finsim_core::consortium::pricing::{self, ConsortiumCostConvention, ConsortiumInput};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CostConventionArg {
    /// Admin fee + reserve fund over the whole term
    TotalFee,
    /// Admin fee + reserve fund per month, annualised
    Annualized,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Five fixed bid-share brackets
    Bracket,
    /// 70% bid share + 30% elapsed share
    Weighted,
}

/// Arguments for consortium pricing
#[derive(Args)]
pub struct ConsortiumArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Credit letter value
    #[arg(long)]
    pub credit: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Administration fee (%)
    #[arg(long)]
    pub admin_fee: Option<Decimal>,

    /// Reserve fund (%)
    #[arg(long)]
    pub reserve_fund: Option<Decimal>,

    /// Installments paid before contemplation
    #[arg(long)]
    pub elapsed: Option<u32>,

    /// Pre-contemplation installment discount (%)
    #[arg(long)]
    pub reductor: Option<Decimal>,

    /// Embedded lance (% of credit)
    #[arg(long)]
    pub embedded_bid: Option<Decimal>,

    /// Fixed lance (%)
    #[arg(long)]
    pub fixed_bid: Option<Decimal>,

    /// Free lance (%)
    #[arg(long)]
    pub free_bid: Option<Decimal>,

    /// Own resources added to the lance
    #[arg(long)]
    pub own_resources: Option<Decimal>,

    /// Administrator (CNP, Porto, Itaú; others use the fallback bases)
    #[arg(long, default_value = "CNP")]
    pub administrator: String,

    /// Group code (CNP only)
    #[arg(long)]
    pub group: Option<String>,

    /// Effective cost convention
    #[arg(long, value_enum, default_value = "total-fee")]
    pub cost_convention: CostConventionArg,

    /// Contemplation heuristic
    #[arg(long, value_enum, default_value = "bracket")]
    pub policy: PolicyArg,

    /// Group size for the rank estimate
    #[arg(long)]
    pub pool_size: Option<u32>,
}

/// Arguments for the lance base lookup
#[derive(Args)]
pub struct LanceBasesArgs {
    /// Administrator
    #[arg(long)]
    pub administrator: String,

    /// Group code
    #[arg(long)]
    pub group: Option<String>,
}

/// A R$ 300k, 180-month CNP letter with a 20% embedded lance.
pub fn default_input() -> ConsortiumInput {
    ConsortiumInput {
        credit: dec!(300_000),
        term: 180,
        admin_fee_pct: dec!(15),
        reserve_fund_pct: dec!(2),
        elapsed_periods: 12,
        reductor_pct: Decimal::ZERO,
        embedded_bid_pct: dec!(20),
        fixed_bid_pct: Decimal::ZERO,
        free_bid_pct: Decimal::ZERO,
        own_resources: Decimal::ZERO,
        administrator: Administrator::Cnp,
        group: None,
        cost_convention: ConsortiumCostConvention::TotalFee,
        contemplation_policy: ContemplationPolicy::Bracket,
        pool_size: None,
    }
}

impl ConsortiumArgs {
    /// Build the input from flags over [`default_input`].
    pub fn to_input(&self) -> ConsortiumInput {
        let d = default_input();
        ConsortiumInput {
            credit: self.credit.unwrap_or(d.credit),
            term: self.term.unwrap_or(d.term),
            admin_fee_pct: self.admin_fee.unwrap_or(d.admin_fee_pct),
            reserve_fund_pct: self.reserve_fund.unwrap_or(d.reserve_fund_pct),
            elapsed_periods: self.elapsed.unwrap_or(d.elapsed_periods),
            reductor_pct: self.reductor.unwrap_or(d.reductor_pct),
            embedded_bid_pct: self.embedded_bid.unwrap_or(d.embedded_bid_pct),
            fixed_bid_pct: self.fixed_bid.unwrap_or(d.fixed_bid_pct),
            free_bid_pct: self.free_bid.unwrap_or(d.free_bid_pct),
            own_resources: self.own_resources.unwrap_or(d.own_resources),
            administrator: Administrator::from(self.administrator.as_str()),
            group: self.group.clone(),
            cost_convention: match self.cost_convention {
                CostConventionArg::TotalFee => ConsortiumCostConvention::TotalFee,
                CostConventionArg::Annualized => ConsortiumCostConvention::AnnualizedPerPeriod,
            },
            contemplation_policy: match self.policy {
                PolicyArg::Bracket => ContemplationPolicy::Bracket,
                PolicyArg::Weighted => ContemplationPolicy::weighted(),
            },
            pool_size: self.pool_size,
        }
    }
}

pub fn run_consortium(args: ConsortiumArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let consortium_input: ConsortiumInput = match input::read_optional(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => args.to_input(),
    };
    let result = pricing::price_consortium(&consortium_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_lance_bases(args: LanceBasesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let administrator = Administrator::from(args.administrator.as_str());
    let bases = lance_base::select_bases(&administrator, args.group.as_deref());
    Ok(json!({
        "result": {
            "administrator": administrator,
            "group": args.group,
            "fixed_bid": bases.fixed_bid,
            "free_bid": bases.free_bid,
            "embedded_bid": "credit",
            "listed": administrator.is_listed(),
        }
    }))
}
