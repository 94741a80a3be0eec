use crate::{
    stage::StageCode,
    types::{ContractCount, CustomerId, Yen},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One synthetic customer snapshot at month end.
///
/// Field order is the CSV column order. `current_stage_code` is the stage
/// on file, drawn independently of the balances: it models customers whose
/// stage has not been recalculated yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub current_stage_code: StageCode,
    pub month_end_date: NaiveDate,
    pub total_balance: Yen,
    pub foreign_currency_balance: Yen,
    pub investment_trust_balance: Yen,
    pub monthly_foreign_currency_purchase: Yen,
    pub monthly_investment_trust_purchase: Yen,
    pub housing_loan_balance: Yen,
    pub monthly_fx_trading_volume: ContractCount,
}

impl CustomerRecord {
    pub const COLUMNS: [&'static str; 10] = [
        "customer_id",
        "current_stage_code",
        "month_end_date",
        "total_balance",
        "foreign_currency_balance",
        "investment_trust_balance",
        "monthly_foreign_currency_purchase",
        "monthly_investment_trust_purchase",
        "housing_loan_balance",
        "monthly_fx_trading_volume",
    ];

    /// Foreign currency plus investment trust balance.
    pub fn combined_investment_balance(&self) -> Yen {
        self.foreign_currency_balance + self.investment_trust_balance
    }
}
