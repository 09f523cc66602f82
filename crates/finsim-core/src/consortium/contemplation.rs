//! Contemplation likelihood heuristics.
//!
//! Neither heuristic is calibrated against real assemblies; both are
//! deterministic scores in [0, 100] derived from the weight of the lance in the
//! group and, for the weighted policy, from how far into the term the member is.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Periods};

const HUNDRED: Decimal = dec!(100);

/// Default weights of the weighted policy (bid share, elapsed share).
pub const DEFAULT_BID_WEIGHT: Decimal = dec!(0.7);
pub const DEFAULT_TIME_WEIGHT: Decimal = dec!(0.3);

fn default_bid_weight() -> Decimal {
    DEFAULT_BID_WEIGHT
}

fn default_time_weight() -> Decimal {
    DEFAULT_TIME_WEIGHT
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ContemplationPolicy {
    /// Five bid-share brackets mapped to fixed probabilities.
    #[default]
    Bracket,
    /// Linear blend of bid share and elapsed share of the term.
    Weighted {
        #[serde(default = "default_bid_weight")]
        bid_weight: Decimal,
        #[serde(default = "default_time_weight")]
        time_weight: Decimal,
    },
}

impl ContemplationPolicy {
    pub fn weighted() -> Self {
        ContemplationPolicy::Weighted {
            bid_weight: DEFAULT_BID_WEIGHT,
            time_weight: DEFAULT_TIME_WEIGHT,
        }
    }
}

/// Bid-share bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContemplationBand {
    /// below 10%
    VeryLow,
    /// 10% to 20%
    Low,
    /// 20% to 30%
    Moderate,
    /// 30% to 40%
    High,
    /// 40% and above
    VeryHigh,
}

impl ContemplationBand {
    pub fn from_bid_pct(bid_pct: Percent) -> Self {
        if bid_pct < dec!(10) {
            ContemplationBand::VeryLow
        } else if bid_pct < dec!(20) {
            ContemplationBand::Low
        } else if bid_pct < dec!(30) {
            ContemplationBand::Moderate
        } else if bid_pct < dec!(40) {
            ContemplationBand::High
        } else {
            ContemplationBand::VeryHigh
        }
    }

    /// Probability score attached to the bracket.
    pub fn score(&self) -> Decimal {
        match self {
            ContemplationBand::VeryLow => dec!(10),
            ContemplationBand::Low => dec!(25),
            ContemplationBand::Moderate => dec!(45),
            ContemplationBand::High => dec!(65),
            ContemplationBand::VeryHigh => dec!(85),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContemplationEstimate {
    pub policy: ContemplationPolicy,
    /// Total lance as a percentage of its base.
    pub bid_pct: Percent,
    /// Elapsed installments as a percentage of the term.
    pub elapsed_pct: Percent,
    pub band: ContemplationBand,
    /// Likelihood score in [0, 100].
    pub score: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<u32>,
    /// Estimated rank among `pool_size` participants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_position: Option<u32>,
}

/// Score a lance. `base` of zero yields a zero bid share, `term` of zero a
/// zero elapsed share.
pub fn estimate(
    total_bid: Money,
    base: Money,
    elapsed: Periods,
    term: Periods,
    policy: ContemplationPolicy,
    pool_size: Option<u32>,
) -> ContemplationEstimate {
    let bid_pct = share_pct(total_bid, base);
    let elapsed_pct = share_pct(Decimal::from(elapsed), Decimal::from(term));
    let band = ContemplationBand::from_bid_pct(bid_pct);

    let score = match policy {
        ContemplationPolicy::Bracket => band.score(),
        ContemplationPolicy::Weighted {
            bid_weight,
            time_weight,
        } => clamp_score(bid_weight * bid_pct + time_weight * elapsed_pct),
    };

    ContemplationEstimate {
        policy,
        bid_pct,
        elapsed_pct,
        band,
        score,
        pool_size,
        estimated_position: pool_size.map(|n| estimated_position(score, n)),
    }
}

/// `max(1, round(pool_size * (1 - score / 100)))`
pub fn estimated_position(score: Decimal, pool_size: u32) -> u32 {
    let raw = Decimal::from(pool_size) * (Decimal::ONE - clamp_score(score) / HUNDRED);
    raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(pool_size)
        .max(1)
}

fn share_pct(part: Decimal, whole: Decimal) -> Percent {
    if whole <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        part / whole * HUNDRED
    }
}

fn clamp_score(score: Decimal) -> Decimal {
    score.max(Decimal::ZERO).min(HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_boundaries() {
        assert_eq!(ContemplationBand::from_bid_pct(dec!(9.99)), ContemplationBand::VeryLow);
        assert_eq!(ContemplationBand::from_bid_pct(dec!(10)), ContemplationBand::Low);
        assert_eq!(ContemplationBand::from_bid_pct(dec!(20)), ContemplationBand::Moderate);
        assert_eq!(ContemplationBand::from_bid_pct(dec!(30)), ContemplationBand::High);
        assert_eq!(ContemplationBand::from_bid_pct(dec!(40)), ContemplationBand::VeryHigh);
        assert_eq!(ContemplationBand::from_bid_pct(dec!(95)), ContemplationBand::VeryHigh);
    }

    #[test]
    fn test_bracket_policy_score() {
        // 60k over 300k = 20%
        let e = estimate(dec!(60_000), dec!(300_000), 12, 180, ContemplationPolicy::Bracket, None);
        assert_eq!(e.bid_pct, dec!(20));
        assert_eq!(e.band, ContemplationBand::Moderate);
        assert_eq!(e.score, dec!(45));
        assert_eq!(e.estimated_position, None);
    }

    #[test]
    fn test_weighted_policy_score() {
        // 0.7 * 20 + 0.3 * 50 = 29
        let e = estimate(
            dec!(60_000),
            dec!(300_000),
            90,
            180,
            ContemplationPolicy::weighted(),
            None,
        );
        assert_eq!(e.elapsed_pct, dec!(50));
        assert_eq!(e.score, dec!(29));
    }

    #[test]
    fn test_weighted_policy_caps_at_100() {
        let e = estimate(
            dec!(300_000),
            dec!(300_000),
            180,
            180,
            ContemplationPolicy::weighted(),
            None,
        );
        assert_eq!(e.score, dec!(100));
    }

    #[test]
    fn test_zero_base_and_term() {
        let e = estimate(dec!(1000), dec!(0), 5, 0, ContemplationPolicy::weighted(), Some(100));
        assert_eq!(e.bid_pct, Decimal::ZERO);
        assert_eq!(e.elapsed_pct, Decimal::ZERO);
        assert_eq!(e.score, Decimal::ZERO);
        assert_eq!(e.estimated_position, Some(100));
    }

    #[test]
    fn test_estimated_position() {
        assert_eq!(estimated_position(dec!(45), 200), 110);
        assert_eq!(estimated_position(dec!(100), 200), 1);
        assert_eq!(estimated_position(dec!(0), 200), 200);
        // 0.5 rounds away from zero
        assert_eq!(estimated_position(dec!(50), 3), 2);
    }

    #[test]
    fn test_policy_json_shapes() {
        let p: ContemplationPolicy = serde_json::from_str(r#"{"policy": "bracket"}"#).unwrap();
        assert_eq!(p, ContemplationPolicy::Bracket);
        let w: ContemplationPolicy = serde_json::from_str(r#"{"policy": "weighted"}"#).unwrap();
        assert_eq!(w, ContemplationPolicy::weighted());
        let c: ContemplationPolicy =
            serde_json::from_str(r#"{"policy": "weighted", "bid_weight": "0.5", "time_weight": "0.5"}"#)
                .unwrap();
        assert_eq!(
            c,
            ContemplationPolicy::Weighted {
                bid_weight: dec!(0.5),
                time_weight: dec!(0.5)
            }
        );
    }
}
