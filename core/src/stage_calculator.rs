//! Monthly stage recalculation for a single customer.
//!
//! The base stage is the best stage whose conditions the record meets.
//! Every met rank-change condition then lifts it by its level count.
//! The result is valid for the calendar month after the snapshot date.

use crate::{
    calendar::{first_of_next_month, month_end_of},
    condition::{Condition, ConditionCatalogue},
    record::CustomerRecord,
    stage::StageCode,
    types::CustomerId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionEvaluation {
    pub condition_id:    u32,
    pub evaluated_value: i64,
    pub is_met:          bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTransition {
    pub customer_id:         CustomerId,
    pub previous_stage_code: StageCode,
    pub current_stage_code:  StageCode,
    pub transition_date:     NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCalculation {
    pub customer_id:        CustomerId,
    pub calculation_date:   NaiveDate,
    pub valid_from:         NaiveDate,
    pub valid_to:           NaiveDate,
    pub current_stage_code: StageCode,
    pub base_stage_code:    StageCode,
    pub rank_up_levels:     i32,
    pub final_stage_code:   StageCode,
    pub evaluations:        Vec<ConditionEvaluation>,
}

impl StageCalculation {
    /// A transition exists only when the stage actually changes.
    pub fn transition(&self) -> Option<StageTransition> {
        (self.final_stage_code != self.current_stage_code).then(|| StageTransition {
            customer_id:         self.customer_id.clone(),
            previous_stage_code: self.current_stage_code,
            current_stage_code:  self.final_stage_code,
            transition_date:     self.valid_from,
        })
    }
}

pub struct StageCalculator<'a> {
    catalogue: &'a ConditionCatalogue,
}

impl<'a> StageCalculator<'a> {
    pub fn new(catalogue: &'a ConditionCatalogue) -> Self {
        Self { catalogue }
    }

    pub fn calculate(&self, record: &CustomerRecord) -> StageCalculation {
        let calculation_date = record.month_end_date;
        let mut base = StageCode::None;
        let mut levels: i32 = 0;
        let mut evaluations = Vec::new();

        for condition in self.catalogue.effective_at(calculation_date) {
            let value = condition.evaluate(record);
            let is_met = condition.is_met(value);
            evaluations.push(ConditionEvaluation {
                condition_id: condition.id(),
                evaluated_value: value,
                is_met,
            });
            if !is_met {
                continue;
            }
            match condition {
                Condition::Stage { stage, .. } => base = base.max(*stage),
                Condition::RankChange { rank_change_levels, .. } => {
                    levels = levels.saturating_add(*rank_change_levels)
                }
            }
        }

        let valid_from = first_of_next_month(calculation_date);
        StageCalculation {
            customer_id: record.customer_id.clone(),
            calculation_date,
            valid_from,
            valid_to: month_end_of(valid_from),
            current_stage_code: record.current_stage_code,
            base_stage_code: base,
            rank_up_levels: levels,
            final_stage_code: base.rank_up(levels),
            evaluations,
        }
    }

    pub fn calculate_all(&self, records: &[CustomerRecord]) -> Vec<StageCalculation> {
        records.iter().map(|r| self.calculate(r)).collect()
    }
}
