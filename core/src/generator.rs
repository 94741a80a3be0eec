use crate::{
    config::FixtureConfig,
    error::{FixtureError, FixtureResult},
    record::CustomerRecord,
    rng::FixtureRng,
    sampling::SampledField,
    stage::StageCode,
};
use chrono::NaiveDate;

pub const CUSTOMER_ID_PREFIX: &str = "C";
pub const CUSTOMER_ID_MIN: i64 = 10_000_000;
pub const CUSTOMER_ID_MAX: i64 = 99_999_999;

/// Builds batches of synthetic customer records.
///
/// Fields are drawn independently per record; nothing correlates one
/// record with another. Customer ids are random and may repeat.
pub struct RecordGenerator {
    config: FixtureConfig,
}

impl RecordGenerator {
    pub fn new(config: FixtureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Generate exactly `count` records stamped with `month_end_date`.
    /// A zero count is an input error, not an empty batch.
    pub fn generate(
        &self,
        count: usize,
        month_end_date: NaiveDate,
        rng: &mut FixtureRng,
    ) -> FixtureResult<Vec<CustomerRecord>> {
        if count == 0 {
            return Err(FixtureError::InvalidRecordCount { count });
        }
        let stage_table = self.config.stage_table();
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.generate_one(&stage_table, month_end_date, rng)?);
        }
        log::info!(
            "generator: built {count} records for {month_end_date} (seed={})",
            rng.seed()
        );
        Ok(records)
    }

    fn generate_one(
        &self,
        stage_table: &[(StageCode, u32)],
        month_end_date: NaiveDate,
        rng: &mut FixtureRng,
    ) -> FixtureResult<CustomerRecord> {
        let customer_id = format!(
            "{CUSTOMER_ID_PREFIX}{}",
            rng.next_in_range(CUSTOMER_ID_MIN, CUSTOMER_ID_MAX)
        );
        let stage = *rng.pick_weighted(stage_table).ok_or_else(|| FixtureError::Config {
            reason: "stage weight table is empty".into(),
        })?;

        let plan = &self.config.sampling;
        let mut draw = |field| plan.sample(stage, field, rng);

        Ok(CustomerRecord {
            customer_id,
            current_stage_code: stage,
            month_end_date,
            total_balance: draw(SampledField::TotalBalance)?,
            monthly_foreign_currency_purchase: draw(SampledField::MonthlyForeignCurrencyPurchase)?,
            monthly_investment_trust_purchase: draw(SampledField::MonthlyInvestmentTrustPurchase)?,
            foreign_currency_balance: draw(SampledField::ForeignCurrencyBalance)?,
            investment_trust_balance: draw(SampledField::InvestmentTrustBalance)?,
            housing_loan_balance: draw(SampledField::HousingLoanBalance)?,
            monthly_fx_trading_volume: draw(SampledField::MonthlyFxTradingVolume)?,
        })
    }
}

impl Default for RecordGenerator {
    fn default() -> Self {
        Self::new(FixtureConfig::default())
    }
}
