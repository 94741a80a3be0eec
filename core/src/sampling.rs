//! Conditional range sampling.
//!
//! Every generated amount is drawn in two steps: pick a sub-range from the
//! table for (stage, field) by relative weight, then draw uniformly inside
//! it. A point mass such as "exactly zero" is a sub-range with min == max.

use crate::{
    error::{FixtureError, FixtureResult},
    rng::FixtureRng,
    stage::StageCode,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampledField {
    TotalBalance,
    ForeignCurrencyBalance,
    InvestmentTrustBalance,
    MonthlyForeignCurrencyPurchase,
    MonthlyInvestmentTrustPurchase,
    HousingLoanBalance,
    MonthlyFxTradingVolume,
}

impl SampledField {
    pub const ALL: [SampledField; 7] = [
        Self::TotalBalance,
        Self::ForeignCurrencyBalance,
        Self::InvestmentTrustBalance,
        Self::MonthlyForeignCurrencyPurchase,
        Self::MonthlyInvestmentTrustPurchase,
        Self::HousingLoanBalance,
        Self::MonthlyFxTradingVolume,
    ];
}

/// Inclusive sub-range with a relative weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedRange {
    pub min:    i64,
    pub max:    i64,
    pub weight: u32,
}

impl WeightedRange {
    pub const fn new(min: i64, max: i64, weight: u32) -> Self {
        Self { min, max, weight }
    }

    pub const fn zero(weight: u32) -> Self {
        Self::new(0, 0, weight)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Sub-range table for one field, shared by a set of stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingRule {
    pub field:  SampledField,
    pub stages: Vec<StageCode>,
    pub ranges: Vec<WeightedRange>,
}

impl SamplingRule {
    fn new(field: SampledField, stages: &[StageCode], ranges: Vec<WeightedRange>) -> Self {
        Self { field, stages: stages.to_vec(), ranges }
    }

    fn applies_to(&self, stage: StageCode, field: SampledField) -> bool {
        self.field == field && self.stages.contains(&stage)
    }
}

/// (stage, field) → weighted sub-ranges. The first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SamplingPlan {
    rules: Vec<SamplingRule>,
}

// Sub-ranges either side of the eligibility thresholds.
const PURCHASE_BELOW: WeightedRange = WeightedRange::new(0, 19_999, 1);
const PURCHASE_ABOVE: WeightedRange = WeightedRange::new(30_000, 100_000, 1);
const FX_BELOW: WeightedRange = WeightedRange::new(0, 500, 1);
const FX_ABOVE: WeightedRange = WeightedRange::new(1_000, 5_000, 1);

impl Default for SamplingPlan {
    fn default() -> Self {
        use SampledField::*;
        use StageCode::{Gold, None as NoStage, Platinum, Silver};

        let all = StageCode::ALL;
        let ranked = [Silver, Gold, Platinum];
        let upper = [Gold, Platinum];
        let lower = [NoStage, Silver];

        let mut rules = vec![SamplingRule::new(
            TotalBalance,
            &all,
            vec![WeightedRange::new(0, 10_000_000, 1)],
        )];

        for field in [MonthlyForeignCurrencyPurchase, MonthlyInvestmentTrustPurchase] {
            rules.push(SamplingRule::new(field, &ranked, vec![PURCHASE_BELOW, PURCHASE_ABOVE]));
            rules.push(SamplingRule::new(
                field,
                &[NoStage],
                vec![PURCHASE_BELOW, PURCHASE_ABOVE, WeightedRange::zero(3)],
            ));
        }

        for field in [ForeignCurrencyBalance, InvestmentTrustBalance] {
            rules.push(SamplingRule::new(
                field,
                &upper,
                vec![WeightedRange::new(1_000_000, 8_000_000, 1)],
            ));
            rules.push(SamplingRule::new(
                field,
                &[Silver],
                vec![
                    WeightedRange::new(0, 2_000_000, 1),
                    WeightedRange::new(2_000_000, 5_000_000, 1),
                ],
            ));
            rules.push(SamplingRule::new(
                field,
                &[NoStage],
                vec![WeightedRange::new(0, 3_000_000, 1), WeightedRange::zero(3)],
            ));
        }

        rules.push(SamplingRule::new(
            HousingLoanBalance,
            &all,
            vec![WeightedRange::zero(2), WeightedRange::new(1_000_000, 50_000_000, 1)],
        ));

        rules.push(SamplingRule::new(MonthlyFxTradingVolume, &upper, vec![FX_BELOW, FX_ABOVE]));
        rules.push(SamplingRule::new(
            MonthlyFxTradingVolume,
            &lower,
            vec![FX_BELOW, FX_ABOVE, WeightedRange::zero(3)],
        ));

        Self { rules }
    }
}

impl SamplingPlan {
    pub fn new(rules: Vec<SamplingRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SamplingRule] {
        &self.rules
    }

    pub fn ranges(&self, stage: StageCode, field: SampledField) -> Option<&[WeightedRange]> {
        self.rules
            .iter()
            .find(|r| r.applies_to(stage, field))
            .map(|r| r.ranges.as_slice())
    }

    /// Draw one value for `field` of a customer currently at `stage`.
    pub fn sample(
        &self,
        stage: StageCode,
        field: SampledField,
        rng: &mut FixtureRng,
    ) -> FixtureResult<i64> {
        let ranges = self.ranges(stage, field).ok_or_else(|| FixtureError::Config {
            reason: format!("no sampling rule for {field:?} at stage {stage}"),
        })?;
        let range = rng.pick_weighted_by(ranges, |r| r.weight).ok_or_else(|| {
            FixtureError::Config {
                reason: format!("all weights are zero for {field:?} at stage {stage}"),
            }
        })?;
        if range.min > range.max {
            return Err(FixtureError::Config {
                reason: format!(
                    "empty sub-range {}..={} for {field:?} at stage {stage}",
                    range.min, range.max
                ),
            });
        }
        Ok(rng.next_in_range(range.min, range.max))
    }

    /// Share of the total weight held by sub-ranges matching `pred`.
    pub fn probability_where(
        &self,
        stage: StageCode,
        field: SampledField,
        pred: impl Fn(&WeightedRange) -> bool,
    ) -> f64 {
        let Some(ranges) = self.ranges(stage, field) else {
            return 0.0;
        };
        let total: u64 = ranges.iter().map(|r| u64::from(r.weight)).sum();
        if total == 0 {
            return 0.0;
        }
        let hit: u64 = ranges.iter().filter(|r| pred(r)).map(|r| u64::from(r.weight)).sum();
        hit as f64 / total as f64
    }

    /// Every (stage, field) pair must resolve to a non-empty table of
    /// non-negative, well-formed, positively weighted sub-ranges.
    pub fn validate(&self) -> FixtureResult<()> {
        for stage in StageCode::ALL {
            for field in SampledField::ALL {
                let ranges = self.ranges(stage, field).ok_or_else(|| FixtureError::Config {
                    reason: format!("no sampling rule for {field:?} at stage {stage}"),
                })?;
                if ranges.is_empty() {
                    return Err(FixtureError::Config {
                        reason: format!("empty range table for {field:?} at stage {stage}"),
                    });
                }
                for r in ranges {
                    if r.weight == 0 || r.min < 0 || r.min > r.max {
                        return Err(FixtureError::Config {
                            reason: format!(
                                "bad sub-range {}..={} (weight {}) for {field:?} at stage {stage}",
                                r.min, r.max, r.weight
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
