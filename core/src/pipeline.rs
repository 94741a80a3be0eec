//! One fixture run, end to end.
//!
//! EXECUTION ORDER (fixed):
//!   1. Resolve the month-end date
//!   2. Generate the batch
//!   3. Analyze the batch (read-only)
//!   4. Write the batch to CSV (read-only)
//!
//! RULES:
//!   - Date validation happens before anything is generated or written.
//!   - Analysis and writing never mutate the batch.
//!   - All randomness flows through the run's FixtureRng.

use crate::{
    analyzer::DistributionReport,
    calendar::resolve_month_end,
    config::FixtureConfig,
    csv_io::write_records,
    error::FixtureResult,
    generator::RecordGenerator,
    record::CustomerRecord,
    rng::FixtureRng,
};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub count:         usize,
    pub output:        PathBuf,
    pub date_override: Option<String>,
    pub today:         NaiveDate,
    pub seed:          u64,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub month_end_date: NaiveDate,
    pub seed:           u64,
    pub records:        Vec<CustomerRecord>,
    pub report:         DistributionReport,
}

pub struct FixtureRun {
    generator: RecordGenerator,
}

impl FixtureRun {
    pub fn new(config: FixtureConfig) -> Self {
        Self { generator: RecordGenerator::new(config) }
    }

    /// Steps 1–3. Nothing touches the filesystem.
    pub fn generate_and_analyze(&self, request: &RunRequest) -> FixtureResult<RunOutcome> {
        let month_end_date = resolve_month_end(request.date_override.as_deref(), request.today)?;
        let mut rng = FixtureRng::new(request.seed);
        let records = self.generator.generate(request.count, month_end_date, &mut rng)?;
        let report = DistributionReport::analyze(&records, &self.generator.config().conditions);
        Ok(RunOutcome {
            month_end_date,
            seed: request.seed,
            records,
            report,
        })
    }

    /// Step 4.
    pub fn write(&self, request: &RunRequest, outcome: &RunOutcome) -> FixtureResult<()> {
        write_records(&request.output, &outcome.records)
    }

    /// The full run, steps 1–4.
    pub fn execute(&self, request: &RunRequest) -> FixtureResult<RunOutcome> {
        let outcome = self.generate_and_analyze(request)?;
        self.write(request, &outcome)?;
        Ok(outcome)
    }
}

impl Default for FixtureRun {
    fn default() -> Self {
        Self::new(FixtureConfig::default())
    }
}
