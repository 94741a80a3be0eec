//! Synthetic customer records for exercising a bank account stage
//! (tier) calculation, with a distribution report over each batch.

pub mod analyzer;
pub mod calendar;
pub mod condition;
pub mod config;
pub mod csv_io;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod record;
pub mod rng;
pub mod sampling;
pub mod stage;
pub mod stage_calculator;
pub mod types;
