//! Distribution of a generated batch against the stage thresholds.
//!
//! Eligibility is computed from balances and activity alone. The stored
//! stage only feeds the current-stage histogram, so a report shows both
//! "what tier customers hold" and "what tier their activity earns".
//!
//! The four eligibility counts always use the fixed promotion thresholds.
//! The condition catalogue only drives the recalculated-stage histogram
//! and the transition count.

use crate::{
    condition::{
        ConditionCatalogue, FX_TRADING_VOLUME_MIN, GOLD_COMBINED_BALANCE_MIN,
        PLATINUM_COMBINED_BALANCE_MIN, SILVER_MONTHLY_PURCHASE_MIN, SILVER_TOTAL_BALANCE_MIN,
    },
    record::CustomerRecord,
    stage::StageCode,
    stage_calculator::StageCalculator,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub total: usize,
    /// Stored stage histogram. Every stage is present, zero or not.
    pub stage_counts: BTreeMap<StageCode, usize>,
    pub silver_eligible: usize,
    pub gold_eligible: usize,
    pub platinum_eligible: usize,
    pub rank_up_eligible: usize,
    /// Histogram of recalculated stages.
    pub final_stage_counts: BTreeMap<StageCode, usize>,
    /// Records whose recalculated stage differs from the stored one.
    pub transitions: usize,
}

fn silver_eligible(r: &CustomerRecord) -> bool {
    r.total_balance >= SILVER_TOTAL_BALANCE_MIN
        || r.monthly_foreign_currency_purchase >= SILVER_MONTHLY_PURCHASE_MIN
        || r.monthly_investment_trust_purchase >= SILVER_MONTHLY_PURCHASE_MIN
}

fn gold_eligible(r: &CustomerRecord) -> bool {
    (GOLD_COMBINED_BALANCE_MIN..PLATINUM_COMBINED_BALANCE_MIN)
        .contains(&r.combined_investment_balance())
}

fn platinum_eligible(r: &CustomerRecord) -> bool {
    r.combined_investment_balance() >= PLATINUM_COMBINED_BALANCE_MIN
}

fn rank_up_eligible(r: &CustomerRecord) -> bool {
    r.housing_loan_balance > 0 || r.monthly_fx_trading_volume >= FX_TRADING_VOLUME_MIN
}

fn empty_histogram() -> BTreeMap<StageCode, usize> {
    StageCode::ALL.into_iter().map(|s| (s, 0)).collect()
}

impl DistributionReport {
    /// Eligibility counts use the fixed thresholds; `catalogue` feeds the
    /// stage recalculation only.
    pub fn analyze(records: &[CustomerRecord], catalogue: &ConditionCatalogue) -> Self {
        let calculator = StageCalculator::new(catalogue);
        let mut report = Self {
            total: records.len(),
            stage_counts: empty_histogram(),
            silver_eligible: 0,
            gold_eligible: 0,
            platinum_eligible: 0,
            rank_up_eligible: 0,
            final_stage_counts: empty_histogram(),
            transitions: 0,
        };

        for record in records {
            *report.stage_counts.entry(record.current_stage_code).or_default() += 1;

            report.silver_eligible += usize::from(silver_eligible(record));
            report.gold_eligible += usize::from(gold_eligible(record));
            report.platinum_eligible += usize::from(platinum_eligible(record));
            report.rank_up_eligible += usize::from(rank_up_eligible(record));

            let calculation = calculator.calculate(record);
            *report.final_stage_counts.entry(calculation.final_stage_code).or_default() += 1;
            if calculation.transition().is_some() {
                report.transitions += 1;
            }
        }

        log::debug!(
            "analyzer: {} records, silver={} gold={} platinum={} rank_up={}",
            report.total,
            report.silver_eligible,
            report.gold_eligible,
            report.platinum_eligible,
            report.rank_up_eligible
        );
        report
    }

    pub fn stage_count(&self, stage: StageCode) -> usize {
        self.stage_counts.get(&stage).copied().unwrap_or(0)
    }

    /// `count` as a percentage of the batch. An empty batch reports 0%.
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}
