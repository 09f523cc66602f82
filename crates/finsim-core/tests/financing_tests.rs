use finsim_core::financing::amortization::{self, AmortizationSystem};
use finsim_core::financing::loan::{self, LoanCostConvention, LoanInput};
use finsim_core::time_value::RateConvention;
use finsim_core::FinsimError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortisation schedules
// ===========================================================================

#[test]
fn test_price_400k_twelve_percent_twenty_years() {
    // i = 1% a.m., n = 240 => PMT = 400000 * 0.01 * 1.01^240 / (1.01^240 - 1)
    let rows = amortization::generate_schedule(
        dec!(400_000),
        dec!(12),
        240,
        AmortizationSystem::Price,
        RateConvention::Simple,
    )
    .unwrap();

    let summary = amortization::summarize(&rows);
    assert!(
        (summary.first_installment - dec!(4404.34)).abs() < dec!(0.01),
        "Expected ~4404.34, got {}",
        summary.first_installment
    );
    assert!((summary.first_installment - summary.last_installment).abs() < dec!(0.000001));
    assert!(summary.total_paid > dec!(400_000));
    assert!((summary.total_amortization - dec!(400_000)).abs() < dec!(0.000001));
}

#[test]
fn test_price_zero_rate_hundred_periods() {
    let rows = amortization::generate_schedule(
        dec!(100_000),
        Decimal::ZERO,
        100,
        AmortizationSystem::Price,
        RateConvention::Compound,
    )
    .unwrap();

    assert_eq!(rows.len(), 100);
    assert!(rows.iter().all(|r| r.installment == dec!(1000)));
    assert!(rows.iter().all(|r| r.interest.is_zero()));
    assert_eq!(rows.last().map(|r| r.balance), Some(Decimal::ZERO));
}

#[test]
fn test_sac_balance_steps_are_constant() {
    let rows = amortization::generate_schedule(
        dec!(360_000),
        dec!(9.6),
        360,
        AmortizationSystem::Sac,
        RateConvention::Simple,
    )
    .unwrap();

    let mut previous = dec!(360_000);
    for row in &rows {
        assert_eq!(previous - row.balance, dec!(1000), "period {}", row.period);
        previous = row.balance;
    }
    assert_eq!(previous, Decimal::ZERO);
}

#[test]
fn test_periods_are_one_based_and_contiguous() {
    let rows = amortization::generate_schedule(
        dec!(50_000),
        dec!(8),
        36,
        AmortizationSystem::Sac,
        RateConvention::Simple,
    )
    .unwrap();
    let periods: Vec<u32> = rows.iter().map(|r| r.period).collect();
    assert_eq!(periods, (1..=36).collect::<Vec<u32>>());
}

// ===========================================================================
// Loan summary
// ===========================================================================

fn loan_input(system: AmortizationSystem) -> LoanInput {
    LoanInput {
        asset_value: dec!(500_000),
        down_payment: dec!(100_000),
        annual_rate_pct: dec!(12),
        term: 240,
        system,
        rate_convention: RateConvention::Simple,
        cost_convention: LoanCostConvention::TotalOverPrincipal,
    }
}

#[test]
fn test_loan_envelope_metadata() {
    let out = loan::calculate_loan(&loan_input(AmortizationSystem::Price)).unwrap();
    assert!(out.methodology.contains("Price"));
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    assert!(out.warnings.is_empty());
    assert_eq!(out.assumptions["term"], 240);
}

#[test]
fn test_loan_sac_first_installment() {
    let out = loan::calculate_loan(&loan_input(AmortizationSystem::Sac))
        .unwrap()
        .result;
    // 400000 / 240 + 400000 * 0.01
    let expected = dec!(400_000) / dec!(240) + dec!(4000);
    assert_eq!(out.first_installment, expected);
    assert!(out.last_installment < out.first_installment);
}

#[test]
fn test_loan_total_interest_consistency() {
    for system in [AmortizationSystem::Price, AmortizationSystem::Sac] {
        let out = loan::calculate_loan(&loan_input(system)).unwrap().result;
        let interest: Decimal = out.schedule.iter().map(|r| r.interest).sum();
        assert!((out.total_interest - interest).abs() < dec!(0.000001));
    }
}

#[test]
fn test_loan_rejects_negative_asset() {
    let mut input = loan_input(AmortizationSystem::Price);
    input.asset_value = dec!(-1);
    match loan::calculate_loan(&input) {
        Err(FinsimError::InvalidInput { field, .. }) => assert_eq!(field, "asset_value"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}
