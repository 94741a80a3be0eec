use crate::{
    condition::ConditionCatalogue,
    error::{FixtureError, FixtureResult},
    sampling::SamplingPlan,
    stage::StageCode,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageWeight {
    pub stage:  StageCode,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Relative odds of each stored stage. New customers dominate.
    pub stage_weights: Vec<StageWeight>,
    pub sampling:      SamplingPlan,
    pub conditions:    ConditionCatalogue,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        let stage_weights = [
            (StageCode::None, 6),
            (StageCode::Silver, 3),
            (StageCode::Gold, 2),
            (StageCode::Platinum, 1),
        ]
        .into_iter()
        .map(|(stage, weight)| StageWeight { stage, weight })
        .collect();
        Self {
            stage_weights,
            sampling: SamplingPlan::default(),
            conditions: ConditionCatalogue::default(),
        }
    }
}

impl FixtureConfig {
    /// Load from a JSON file, e.g. data/stage_fixture.json.
    /// Without a file, use FixtureConfig::default().
    pub fn load(path: impl AsRef<Path>) -> FixtureResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: FixtureConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!(
            "config: loaded {} sampling rules and {} conditions from {}",
            config.sampling.rules().len(),
            config.conditions.conditions().len(),
            path.display()
        );
        Ok(config)
    }

    pub fn validate(&self) -> FixtureResult<()> {
        let total: u64 = self.stage_weights.iter().map(|w| u64::from(w.weight)).sum();
        if total == 0 {
            return Err(FixtureError::Config {
                reason: "stage weights must not all be zero".into(),
            });
        }
        for stage in StageCode::ALL {
            let entries = self.stage_weights.iter().filter(|w| w.stage == stage).count();
            if entries > 1 {
                return Err(FixtureError::Config {
                    reason: format!("stage {stage} has {entries} weight entries"),
                });
            }
        }
        self.sampling.validate()?;
        self.conditions.validate()
    }

    /// The stage weight table in the shape the sampler takes.
    pub fn stage_table(&self) -> Vec<(StageCode, u32)> {
        self.stage_weights.iter().map(|w| (w.stage, w.weight)).collect()
    }
}
