//! Stage and rank-change conditions evaluated against a customer record.

use crate::{
    error::{FixtureError, FixtureResult},
    record::CustomerRecord,
    stage::StageCode,
    types::Yen,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const SILVER_TOTAL_BALANCE_MIN: Yen = 3_000_000;
pub const SILVER_MONTHLY_PURCHASE_MIN: Yen = 30_000;
pub const GOLD_COMBINED_BALANCE_MIN: Yen = 5_000_000;
pub const PLATINUM_COMBINED_BALANCE_MIN: Yen = 10_000_000;
pub const FX_TRADING_VOLUME_MIN: i64 = 1_000;

/// Which record value a condition looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionType {
    TotalBalance,
    MonthlyForeignCurrencyPurchase,
    MonthlyInvestmentTrustPurchase,
    CombinedBalanceGold,
    CombinedBalancePlatinum,
    HousingLoan,
    FxTrading,
}

impl ConditionType {
    pub fn evaluate(&self, record: &CustomerRecord) -> i64 {
        match self {
            Self::TotalBalance                   => record.total_balance,
            Self::MonthlyForeignCurrencyPurchase => record.monthly_foreign_currency_purchase,
            Self::MonthlyInvestmentTrustPurchase => record.monthly_investment_trust_purchase,
            Self::CombinedBalanceGold
            | Self::CombinedBalancePlatinum      => record.combined_investment_balance(),
            Self::HousingLoan                    => record.housing_loan_balance,
            Self::FxTrading                      => record.monthly_fx_trading_volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Condition {
    /// Qualifies for `stage` when `min <= value < max`. No `max` means
    /// unbounded above.
    Stage {
        id:             u32,
        condition_type: ConditionType,
        name:           String,
        stage:          StageCode,
        min:            i64,
        #[serde(default)]
        max:            Option<i64>,
        valid_from:     NaiveDate,
        valid_to:       NaiveDate,
    },
    /// Adds `rank_change_levels` when `value >= threshold`.
    RankChange {
        id:                 u32,
        condition_type:     ConditionType,
        name:               String,
        threshold:          i64,
        rank_change_levels: i32,
        valid_from:         NaiveDate,
        valid_to:           NaiveDate,
    },
}

impl Condition {
    pub fn id(&self) -> u32 {
        match self {
            Self::Stage { id, .. } | Self::RankChange { id, .. } => *id,
        }
    }

    pub fn condition_type(&self) -> ConditionType {
        match self {
            Self::Stage { condition_type, .. } | Self::RankChange { condition_type, .. } => {
                *condition_type
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Stage { name, .. } | Self::RankChange { name, .. } => name,
        }
    }

    fn window(&self) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Stage { valid_from, valid_to, .. }
            | Self::RankChange { valid_from, valid_to, .. } => (*valid_from, *valid_to),
        }
    }

    /// Validity window check, both ends inclusive.
    pub fn is_effective(&self, date: NaiveDate) -> bool {
        let (from, to) = self.window();
        from <= date && date <= to
    }

    pub fn is_met(&self, value: i64) -> bool {
        match self {
            Self::Stage { min, max, .. } => value >= *min && max.map_or(true, |m| value < m),
            Self::RankChange { threshold, .. } => value >= *threshold,
        }
    }

    pub fn evaluate(&self, record: &CustomerRecord) -> i64 {
        self.condition_type().evaluate(record)
    }
}

/// The set of conditions a stage calculation runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCatalogue {
    conditions: Vec<Condition>,
}

impl Default for ConditionCatalogue {
    fn default() -> Self {
        let from = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
        let to = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX);
        let stage_condition = |id, condition_type, name: &str, stage, min, max| Condition::Stage {
            id,
            condition_type,
            name: name.to_string(),
            stage,
            min,
            max,
            valid_from: from,
            valid_to: to,
        };
        let rank_change = |id, condition_type, name: &str, threshold| Condition::RankChange {
            id,
            condition_type,
            name: name.to_string(),
            threshold,
            rank_change_levels: 1,
            valid_from: from,
            valid_to: to,
        };
        Self {
            conditions: vec![
                stage_condition(1, ConditionType::TotalBalance, "Silver: total balance",
                      StageCode::Silver, SILVER_TOTAL_BALANCE_MIN, None),
                stage_condition(2, ConditionType::MonthlyForeignCurrencyPurchase, "Silver: foreign currency purchase",
                      StageCode::Silver, SILVER_MONTHLY_PURCHASE_MIN, None),
                stage_condition(3, ConditionType::MonthlyInvestmentTrustPurchase, "Silver: investment trust purchase",
                      StageCode::Silver, SILVER_MONTHLY_PURCHASE_MIN, None),
                stage_condition(4, ConditionType::CombinedBalanceGold, "Gold: combined investment balance",
                      StageCode::Gold, GOLD_COMBINED_BALANCE_MIN, Some(PLATINUM_COMBINED_BALANCE_MIN)),
                stage_condition(5, ConditionType::CombinedBalancePlatinum, "Platinum: combined investment balance",
                      StageCode::Platinum, PLATINUM_COMBINED_BALANCE_MIN, None),
                rank_change(6, ConditionType::HousingLoan, "Rank up: housing loan", 1),
                rank_change(7, ConditionType::FxTrading, "Rank up: FX trading volume", FX_TRADING_VOLUME_MIN),
            ],
        }
    }
}

impl ConditionCatalogue {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn effective_at(&self, date: NaiveDate) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter(move |c| c.is_effective(date))
    }

    pub fn validate(&self) -> FixtureResult<()> {
        let mut seen = std::collections::HashSet::new();
        for c in &self.conditions {
            if !seen.insert(c.id()) {
                return Err(FixtureError::Config {
                    reason: format!("duplicate condition id {}", c.id()),
                });
            }
            let (from, to) = c.window();
            if from > to {
                return Err(FixtureError::Config {
                    reason: format!("condition {} is valid from {from} to {to}", c.id()),
                });
            }
            if let Condition::Stage { min, max: Some(max), .. } = c {
                if max <= min {
                    return Err(FixtureError::Config {
                        reason: format!("condition {} has empty range {min}..{max}", c.id()),
                    });
                }
            }
        }
        Ok(())
    }
}
