//! stage-fixture: synthetic test data for the bank account stage batch.
//!
//! Usage:
//!   stage-fixture -n 1000 -o fixtures.csv
//!   stage-fixture -n 50 -d 2025-04-30 --seed 42
//!   stage-fixture --analyze fixtures.csv

use anyhow::Result;
use clap::Parser;
use stage_fixture_core::{
    analyzer::DistributionReport,
    calendar,
    config::FixtureConfig,
    csv_io,
    error::FixtureError,
    pipeline::{FixtureRun, RunRequest},
    stage::StageCode,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate test data for bank account stage classification.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of records to generate
    #[arg(short = 'n', long = "num-records", default_value_t = 100)]
    num_records: usize,

    /// Output CSV path
    #[arg(short, long, default_value = "bank_account_stage_test_data.csv")]
    output: PathBuf,

    /// Month-end date (YYYY-MM-DD); defaults to the last day of the current month
    #[arg(short, long)]
    date: Option<String>,

    /// Seed for a reproducible batch; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration (stage weights, sampling plan, conditions)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report on an existing CSV batch instead of generating one
    #[arg(long, value_name = "CSV")]
    analyze: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FixtureConfig::load(path)?,
        None => FixtureConfig::default(),
    };

    if let Some(input) = &args.analyze {
        let records = csv_io::read_records(input)?;
        let report = DistributionReport::analyze(&records, &config.conditions);
        print_report(&report);
        return Ok(ExitCode::SUCCESS);
    }

    let seed = args.seed.unwrap_or_else(rand_seed);
    log::info!("seed={seed}");

    let request = RunRequest {
        count: args.num_records,
        output: args.output.clone(),
        date_override: args.date.clone(),
        today: calendar::today(),
        seed,
    };

    let run = FixtureRun::new(config);
    let outcome = match run.generate_and_analyze(&request) {
        Ok(outcome) => outcome,
        Err(e @ (FixtureError::InvalidDate { .. } | FixtureError::InvalidRecordCount { .. })) => {
            eprintln!("{e}");
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "Generated {} test records for {} (seed {}).",
        outcome.records.len(),
        outcome.month_end_date,
        outcome.seed
    );
    print_report(&outcome.report);

    run.write(&request, &outcome)?;
    println!(
        "Saved {} records to {}.",
        outcome.records.len(),
        request.output.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &DistributionReport) {
    println!();
    println!("===== GENERATED DATA ANALYSIS =====");
    println!("  total records: {}", report.total);

    println!();
    println!("  current stage distribution:");
    for stage in StageCode::ALL {
        let count = report.stage_count(stage);
        println!("    - {stage:<9} {count:>6} ({:.1}%)", report.percentage(count));
    }

    println!();
    println!("  conditions met:");
    for (label, count) in [
        ("silver", report.silver_eligible),
        ("gold", report.gold_eligible),
        ("platinum", report.platinum_eligible),
        ("rank up", report.rank_up_eligible),
    ] {
        println!("    - {label:<9} {count:>6} ({:.1}%)", report.percentage(count));
    }

    println!();
    println!("  recalculated stage distribution:");
    for stage in StageCode::ALL {
        let count = report.final_stage_counts.get(&stage).copied().unwrap_or(0);
        println!("    - {stage:<9} {count:>6} ({:.1}%)", report.percentage(count));
    }
    println!(
        "  stage changes:   {} ({:.1}%)",
        report.transitions,
        report.percentage(report.transitions)
    );
    println!();
}

fn rand_seed() -> u64 {
    stage_fixture_core::rng::FixtureRng::from_entropy().seed()
}
