//! Batch shape and value-range properties of the record generator.

use chrono::NaiveDate;
use stage_fixture_core::{
    generator::RecordGenerator,
    rng::FixtureRng,
    stage::StageCode,
};

fn month_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
}

fn batch(seed: u64, n: usize) -> Vec<stage_fixture_core::record::CustomerRecord> {
    let mut rng = FixtureRng::new(seed);
    RecordGenerator::default()
        .generate(n, month_end(), &mut rng)
        .unwrap()
}

#[test]
fn batch_has_requested_length_and_one_date() {
    for n in [1, 7, 100, 2_500] {
        let records = batch(42, n);
        assert_eq!(records.len(), n);
        assert!(
            records.iter().all(|r| r.month_end_date == month_end()),
            "month_end_date must be constant across the batch"
        );
    }
}

#[test]
fn every_amount_is_in_range() {
    for r in batch(7, 5_000) {
        assert!((0..=10_000_000).contains(&r.total_balance), "{r:?}");
        assert!(
            r.housing_loan_balance == 0
                || (1_000_000..=50_000_000).contains(&r.housing_loan_balance),
            "{r:?}"
        );
        for v in [
            r.foreign_currency_balance,
            r.investment_trust_balance,
            r.monthly_foreign_currency_purchase,
            r.monthly_investment_trust_purchase,
            r.monthly_fx_trading_volume,
        ] {
            assert!(v >= 0, "{r:?}");
        }
        assert!(r.monthly_foreign_currency_purchase <= 100_000);
        assert!(r.monthly_investment_trust_purchase <= 100_000);
        assert!(r.monthly_fx_trading_volume <= 5_000);
    }
}

#[test]
fn gold_and_platinum_hold_investment_balances() {
    let records = batch(11, 5_000);
    let upper: Vec<_> = records
        .iter()
        .filter(|r| matches!(r.current_stage_code, StageCode::Gold | StageCode::Platinum))
        .collect();
    assert!(!upper.is_empty());
    for r in upper {
        assert!((1_000_000..=8_000_000).contains(&r.foreign_currency_balance), "{r:?}");
        assert!((1_000_000..=8_000_000).contains(&r.investment_trust_balance), "{r:?}");
    }
}

#[test]
fn stage_specific_ranges_hold() {
    for r in batch(12, 5_000) {
        match r.current_stage_code {
            StageCode::Silver => {
                assert!((0..=5_000_000).contains(&r.foreign_currency_balance), "{r:?}");
                assert!((0..=5_000_000).contains(&r.investment_trust_balance), "{r:?}");
            }
            StageCode::None => {
                assert!((0..=3_000_000).contains(&r.foreign_currency_balance), "{r:?}");
                assert!((0..=3_000_000).contains(&r.investment_trust_balance), "{r:?}");
            }
            StageCode::Gold | StageCode::Platinum => {}
        }
        // Purchases never land between the two sub-ranges.
        for v in [r.monthly_foreign_currency_purchase, r.monthly_investment_trust_purchase] {
            assert!(!(20_000..30_000).contains(&v), "{r:?}");
        }
        assert!(!(501..1_000).contains(&r.monthly_fx_trading_volume), "{r:?}");
    }
}

#[test]
fn none_is_the_most_common_stage() {
    let records = batch(2024, 12_000);
    let count = |s| records.iter().filter(|r| r.current_stage_code == s).count();
    // Weights 6:3:2:1 over 12_000 → 6000 / 3000 / 2000 / 1000.
    let none = count(StageCode::None);
    let silver = count(StageCode::Silver);
    let gold = count(StageCode::Gold);
    let platinum = count(StageCode::Platinum);
    assert!((5_600..=6_400).contains(&none), "NONE: {none}");
    assert!((2_700..=3_300).contains(&silver), "SILVER: {silver}");
    assert!((1_750..=2_250).contains(&gold), "GOLD: {gold}");
    assert!((850..=1_150).contains(&platinum), "PLATINUM: {platinum}");
}

#[test]
fn roughly_two_thirds_have_no_housing_loan() {
    let records = batch(77, 9_000);
    let no_loan = records.iter().filter(|r| r.housing_loan_balance == 0).count();
    assert!((5_700..=6_300).contains(&no_loan), "no loan: {no_loan}");
}
