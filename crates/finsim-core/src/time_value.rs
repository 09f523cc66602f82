use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinsimError;
use crate::types::{pct_to_rate, Money, Percent, Periods, Rate};
use crate::FinsimResult;

pub(crate) const MONTHS_PER_YEAR: Decimal = dec!(12);

/// How a nominal annual rate is turned into a monthly rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateConvention {
    /// annual / 100 / 12
    #[default]
    Simple,
    /// (1 + annual / 100)^(1/12) - 1
    Compound,
}

impl RateConvention {
    pub fn label(&self) -> &'static str {
        match self {
            RateConvention::Simple => "simple (annual / 12)",
            RateConvention::Compound => "compound ((1 + annual)^(1/12) - 1)",
        }
    }
}

/// Monthly rate for an annual percentage under the given convention.
pub fn periodic_rate(annual_rate_pct: Percent, convention: RateConvention) -> Rate {
    let annual = pct_to_rate(annual_rate_pct);
    if annual.is_zero() {
        return Decimal::ZERO;
    }
    match convention {
        RateConvention::Simple => annual / MONTHS_PER_YEAR,
        RateConvention::Compound => {
            (Decimal::ONE + annual).powd(Decimal::ONE / MONTHS_PER_YEAR) - Decimal::ONE
        }
    }
}

/// Level payment that amortises `principal` over `nper` periods.
///
/// Returned as a positive amount. A zero rate degenerates to straight
/// division of the principal. Computed as `P * i / (1 - (1 + i)^-n)`; when
/// `(1 + i)^n` exceeds the Decimal range the discount term is nil and the
/// payment is the interest-only limit `P * i`.
pub fn annuity_payment(rate: Rate, nper: Periods, principal: Money) -> FinsimResult<Money> {
    if nper == 0 {
        return Err(FinsimError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let interest_only = principal.checked_mul(rate).ok_or_else(|| {
        FinsimError::invalid("rate", "Periodic interest exceeds the representable range")
    })?;

    let factor = match (Decimal::ONE + rate).checked_powi(i64::from(nper)) {
        Some(factor) => factor,
        None => {
            log::debug!("annuity factor overflow at rate {rate} over {nper} periods");
            return Ok(interest_only);
        }
    };

    let denominator = Decimal::ONE - Decimal::ONE / factor;
    if denominator.is_zero() {
        return Err(FinsimError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    Ok(interest_only / denominator)
}
