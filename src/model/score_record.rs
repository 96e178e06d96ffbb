use crate::model::Difficulty;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::TimestampSeconds;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::SystemTime;
use uuid::Uuid;

pub const RECENT_ROUNDS_LIMIT: usize = 20;
pub const SCORE_TABLE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub struct ScoreRecord {
    pub guesses: u32,
    pub elapsed_seconds: u64,
}

impl ScoreRecord {
    pub fn new(guesses: u32, elapsed_seconds: u64) -> Self {
        Self {
            guesses,
            elapsed_seconds,
        }
    }

    /// Fewer guesses first, then less time. `Less` means better.
    pub fn rank(&self, other: &ScoreRecord) -> Ordering {
        self.guesses
            .cmp(&other.guesses)
            .then(self.elapsed_seconds.cmp(&other.elapsed_seconds))
    }

    pub fn beats(&self, other: &ScoreRecord) -> bool {
        self.rank(other) == Ordering::Less
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct RecentRound {
    pub difficulty: Difficulty,
    pub guesses: u32,
    pub elapsed_seconds: u64,
    #[serde_as(as = "TimestampSeconds")]
    pub completed_at: SystemTime,
    pub playthrough_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ScoreTable {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub best: BTreeMap<Difficulty, ScoreRecord>,
    /// Newest first.
    #[serde(default)]
    pub recent: Vec<RecentRound>,
}

fn default_version() -> u32 {
    SCORE_TABLE_VERSION
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            version: SCORE_TABLE_VERSION,
            best: BTreeMap::new(),
            recent: Vec::new(),
        }
    }
}

impl ScoreTable {
    pub fn best(&self, difficulty: Difficulty) -> Option<ScoreRecord> {
        self.best.get(&difficulty).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty() && self.recent.is_empty()
    }

    pub fn push_recent(&mut self, round: RecentRound) {
        self.recent.insert(0, round);
        self.recent.truncate(RECENT_ROUNDS_LIMIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewer_guesses_beats_faster_time() {
        let fewer = ScoreRecord::new(4, 90);
        let faster = ScoreRecord::new(5, 10);
        assert!(fewer.beats(&faster));
        assert!(!faster.beats(&fewer));
    }

    #[test]
    fn test_tie_is_broken_by_time() {
        let slow = ScoreRecord::new(5, 30);
        let quick = ScoreRecord::new(5, 20);
        assert!(quick.beats(&slow));
        assert!(!slow.beats(&quick));
    }

    #[test]
    fn test_identical_record_does_not_beat_itself() {
        let record = ScoreRecord::new(6, 42);
        assert!(!record.beats(&record));
    }

    #[test]
    fn test_recent_is_capped_newest_first() {
        let mut table = ScoreTable::default();
        for guesses in 1..=25 {
            table.push_recent(RecentRound {
                difficulty: Difficulty::Easy,
                guesses,
                elapsed_seconds: 1,
                completed_at: SystemTime::UNIX_EPOCH,
                playthrough_id: Uuid::new_v4(),
            });
        }
        assert_eq!(table.recent.len(), RECENT_ROUNDS_LIMIT);
        assert_eq!(table.recent[0].guesses, 25);
        assert_eq!(table.recent[RECENT_ROUNDS_LIMIT - 1].guesses, 6);
    }

    #[test]
    fn test_missing_fields_default() {
        let table: ScoreTable = serde_json::from_str("{}").unwrap();
        assert_eq!(table, ScoreTable::default());
    }

    #[test]
    fn test_best_serializes_by_tier_name() {
        let mut table = ScoreTable::default();
        table.best.insert(Difficulty::Hard, ScoreRecord::new(5, 20));
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["best"]["Hard"]["guesses"], 5);
        assert_eq!(json["best"]["Hard"]["elapsed_seconds"], 20);
    }
}
