use finsim_core::consortium::contemplation::{ContemplationBand, ContemplationPolicy};
use finsim_core::consortium::lance_base::{self, Administrator, BidBase, LanceBases};
use finsim_core::consortium::pricing::{self, ConsortiumCostConvention, ConsortiumInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Pricing
// ===========================================================================

fn sample_letter(administrator: Administrator) -> ConsortiumInput {
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
        administrator,
        group: None,
        cost_convention: ConsortiumCostConvention::TotalFee,
        contemplation_policy: ContemplationPolicy::Bracket,
        pool_size: None,
    }
}

#[test]
fn test_category_and_base_installment_known_answer() {
    let out = pricing::price_consortium(&sample_letter(Administrator::Itau))
        .unwrap()
        .result;
    assert_eq!(out.category, dec!(351_000.00));
    assert_eq!(out.base_installment, dec!(1950.00));
    assert!(out.category >= out.credit);
}

#[test]
fn test_porto_any_group_bids_on_category() {
    for group in [None, Some("1021".to_string()), Some("Demais Grupos".to_string())] {
        let mut input = sample_letter(Administrator::Porto);
        input.group = group;
        input.fixed_bid_pct = dec!(10);
        input.free_bid_pct = dec!(10);
        let out = pricing::price_consortium(&input).unwrap().result;
        assert_eq!(
            out.lance_bases,
            LanceBases {
                fixed_bid: BidBase::Category,
                free_bid: BidBase::Category,
            }
        );
        assert_eq!(out.fixed_bid, dec!(35_100));
        assert_eq!(out.free_bid, dec!(35_100));
    }
}

#[test]
fn test_embedded_bid_ignores_administrator() {
    for admin in [
        Administrator::Cnp,
        Administrator::Porto,
        Administrator::Itau,
        Administrator::from("Rodobens"),
    ] {
        let out = pricing::price_consortium(&sample_letter(admin)).unwrap().result;
        assert_eq!(out.embedded_bid, dec!(60_000));
        assert_eq!(out.net_credit, dec!(240_000));
    }
}

#[test]
fn test_current_balance_non_increasing_in_elapsed() {
    let mut previous = None;
    for elapsed in [0u32, 1, 12, 60, 120, 179, 180] {
        let mut input = sample_letter(Administrator::Cnp);
        input.elapsed_periods = elapsed;
        let balance = pricing::price_consortium(&input)
            .unwrap()
            .result
            .current_balance;
        if let Some(prev) = previous {
            assert!(balance <= prev, "balance rose at {elapsed}");
        }
        assert!(balance >= Decimal::ZERO);
        previous = Some(balance);
    }
    assert_eq!(previous, Some(Decimal::ZERO));
}

#[test]
fn test_json_input_with_defaults() {
    let input: ConsortiumInput = serde_json::from_str(
        r#"{
            "credit": "200000",
            "term": 200,
            "admin_fee_pct": "18",
            "administrator": "Itaú",
            "contemplation_policy": {"policy": "weighted"},
            "pool_size": 300
        }"#,
    )
    .unwrap();
    assert_eq!(input.administrator, Administrator::Itau);
    assert_eq!(input.reserve_fund_pct, Decimal::ZERO);
    assert_eq!(input.contemplation_policy, ContemplationPolicy::weighted());

    let out = pricing::price_consortium(&input).unwrap().result;
    assert_eq!(out.category, dec!(236_000));
    assert_eq!(out.base_installment, dec!(1180));
    // No lance, nothing elapsed
    assert_eq!(out.contemplation.score, Decimal::ZERO);
    assert_eq!(out.contemplation.band, ContemplationBand::VeryLow);
    assert_eq!(out.contemplation.estimated_position, Some(300));
}

#[test]
fn test_output_serialises_decimals_as_strings() {
    let out = pricing::price_consortium(&sample_letter(Administrator::Cnp)).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    let category = value["result"]["category"].as_str().unwrap();
    assert_eq!(category.parse::<Decimal>().unwrap(), dec!(351_000));
    assert_eq!(value["result"]["lance_bases"]["fixed_bid"], "credit");
}

// ===========================================================================
// Lance base table
// ===========================================================================

#[test]
fn test_select_bases_is_deterministic() {
    let admins = [
        Administrator::Cnp,
        Administrator::Porto,
        Administrator::Itau,
        Administrator::from("Embracon"),
    ];
    let groups = [None, Some("1021"), Some("1053"), Some("Demais Grupos")];
    for admin in &admins {
        for group in groups {
            assert_eq!(
                lance_base::select_bases(admin, group),
                lance_base::select_bases(admin, group)
            );
        }
    }
}
