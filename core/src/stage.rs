//! Account stages (tiers) and their ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer's account classification. Declaration order is rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageCode {
    None,
    Silver,
    Gold,
    Platinum,
}

impl StageCode {
    pub const ALL: [StageCode; 4] = [Self::None, Self::Silver, Self::Gold, Self::Platinum];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None     => "NONE",
            Self::Silver   => "SILVER",
            Self::Gold     => "GOLD",
            Self::Platinum => "PLATINUM",
        }
    }

    /// Position in the rank order, NONE = 0.
    pub fn order(&self) -> u32 {
        *self as u32
    }

    /// Move up `levels` stages. Saturates at PLATINUM; zero or negative
    /// levels leave the stage unchanged.
    pub fn rank_up(self, levels: i32) -> StageCode {
        if levels <= 0 {
            return self;
        }
        let target = (self.order() as usize).saturating_add(levels as usize);
        Self::ALL[target.min(Self::ALL.len() - 1)]
    }

    pub fn is_better_than(&self, other: StageCode) -> bool {
        *self > other
    }
}

impl fmt::Display for StageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A stage with its display name, ordered by `order` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub code:  StageCode,
    pub name:  String,
    pub order: u32,
}

impl Stage {
    pub fn new(code: StageCode, name: impl Into<String>, order: u32) -> Self {
        Self { code, name: name.into(), order }
    }
}

impl PartialOrd for Stage {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Stage {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.order.cmp(&other.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_sort_by_order() {
        let s1 = Stage::new(StageCode::None, "none", 0);
        let s2 = Stage::new(StageCode::Silver, "silver", 1);
        let s3 = Stage::new(StageCode::Gold, "gold", 2);
        let s4 = Stage::new(StageCode::Platinum, "platinum", 3);
        let mut list = vec![s4.clone(), s2.clone(), s1.clone(), s3.clone()];
        list.sort();
        assert_eq!(list, vec![s1, s2, s3, s4]);
    }

    #[test]
    fn is_better_than_follows_rank() {
        assert!(StageCode::Silver.is_better_than(StageCode::None));
        assert!(!StageCode::Silver.is_better_than(StageCode::Gold));
        assert!(!StageCode::Gold.is_better_than(StageCode::Gold));
    }

    #[test]
    fn none_rank_up() {
        let base = StageCode::None;
        assert_eq!(base.rank_up(0), base);
        assert_eq!(base.rank_up(1), StageCode::Silver);
        assert_eq!(base.rank_up(2), StageCode::Gold);
        assert_eq!(base.rank_up(3), StageCode::Platinum);
        assert_eq!(base.rank_up(-1), base);
    }

    #[test]
    fn silver_rank_up() {
        let base = StageCode::Silver;
        assert_eq!(base.rank_up(0), base);
        assert_eq!(base.rank_up(1), StageCode::Gold);
        assert_eq!(base.rank_up(2), StageCode::Platinum);
    }

    #[test]
    fn gold_and_platinum_saturate() {
        assert_eq!(StageCode::Gold.rank_up(1), StageCode::Platinum);
        assert_eq!(StageCode::Gold.rank_up(2), StageCode::Platinum);
        assert_eq!(StageCode::Platinum.rank_up(1), StageCode::Platinum);
        assert_eq!(StageCode::Platinum.rank_up(i32::MAX), StageCode::Platinum);
    }

    #[test]
    fn serializes_upper_case() {
        let json = serde_json::to_string(&StageCode::Platinum).unwrap();
        assert_eq!(json, "\"PLATINUM\"");
        let back: StageCode = serde_json::from_str("\"SILVER\"").unwrap();
        assert_eq!(back, StageCode::Silver);
    }
}
