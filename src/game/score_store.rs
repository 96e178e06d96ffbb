use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::helpers::write_json_atomic;
use crate::model::{Difficulty, RecentRound, ScoreRecord, ScoreTable, StoreError};

pub const SCORES_FILE_NAME: &str = "scores.json";

/// Best scores per tier plus recent rounds, backed by one JSON document.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    table: ScoreTable,
}

impl ScoreStore {
    pub fn open(data_dir: &Path) -> Self {
        Self::open_file(data_dir.join(SCORES_FILE_NAME))
    }

    pub fn open_file(path: PathBuf) -> Self {
        let table = Self::load(&path);
        Self { path, table }
    }

    /// Missing, unreadable or malformed files all yield an empty table.
    pub fn load(path: &Path) -> ScoreTable {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!(target: "score_store", "No scores read from {:?}: {}", path, err);
                return ScoreTable::default();
            }
        };
        match serde_json::from_str::<ScoreTable>(&contents) {
            Ok(table) => table,
            Err(err) => {
                warn!(target: "score_store", "Ignoring malformed scores in {:?}: {}", path, err);
                ScoreTable::default()
            }
        }
    }

    /// Replaces the file contents via a sibling temp file and a rename.
    pub fn save(&self) -> Result<(), StoreError> {
        write_json_atomic(&self.path, &self.table)?;
        debug!(target: "score_store", "Saved scores to {:?}", self.path);
        Ok(())
    }

    pub fn is_better(&self, difficulty: Difficulty, candidate: &ScoreRecord) -> bool {
        match self.table.best(difficulty) {
            Some(best) => candidate.beats(&best),
            None => true,
        }
    }

    /// Logs a finished round and keeps it as the tier best if it improves on it.
    /// Returns whether the best changed. The in-memory table is updated even if
    /// saving fails.
    pub fn record(
        &mut self,
        difficulty: Difficulty,
        candidate: ScoreRecord,
        playthrough_id: Uuid,
    ) -> Result<bool, StoreError> {
        let improved = self.is_better(difficulty, &candidate);
        if improved {
            self.table.best.insert(difficulty, candidate);
        }
        self.table.push_recent(RecentRound {
            difficulty,
            guesses: candidate.guesses,
            elapsed_seconds: candidate.elapsed_seconds,
            completed_at: whole_seconds(SystemTime::now()),
            playthrough_id,
        });
        self.save()?;
        Ok(improved)
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<ScoreRecord> {
        self.table.best(difficulty)
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    pub fn recent(&self) -> &[RecentRound] {
        &self.table.recent
    }
}

/// The file keeps second precision, so memory does too.
fn whole_seconds(time: SystemTime) -> SystemTime {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|since| since.as_secs())
        .unwrap_or(0);
    UNIX_EPOCH + Duration::from_secs(secs)
}
