use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use tracing::{debug, info};

use crate::app::app_error::{AppError, AppErrorConversion, AppErrorType, AppResult};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub username: String,
    pub score: u32,
}

impl Record {
    pub fn new<S: ToString>(username: S, score: u32) -> Self {
        Self { username: username.to_string(), score }
    }
}

/// Scores of past games, kept sorted by ascending score and
/// written back in full after every new record
pub struct Leaderboard {
    path: PathBuf,
    records: Vec<Record>,
}

impl Leaderboard {
    /// Read the records at `path`, a missing file means no records yet
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            info!("no leaderboard at {}, starting empty", path.display());
            return Ok(Self { path, records: vec![] });
        }

        let contents = fs::read_to_string(&path)
            .map_err(AppError::from)
            .with_trace_step(format!("reading {}", path.display()))?;
        let value: Value = serde_json::from_str(&contents)
            .map_err(AppError::from)
            .with_trace_step(format!("parsing {}", path.display()))?;
        if !value.is_array() {
            return Err(AppErrorType::LeaderboardNotList { path }.into());
        }
        let records = serde_json::from_value::<Vec<Record>>(value)
            .map_err(AppError::from)
            .with_trace_step(format!("reading records from {}", path.display()))?
            .into_iter()
            .sorted_by_key(|record| record.score)
            .collect::<Vec<_>>();

        info!("loaded {} leaderboard records from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Add a record and rewrite the whole file. The record goes after
    /// every record with the same or a lower score, and is only kept
    /// once the file has been written
    pub fn save<S: ToString>(&mut self, username: S, score: u32) -> AppResult {
        let record = Record::new(username, score);
        let idx = self.records.partition_point(|other| other.score <= score);
        info!("saving {:?} at rank {} of {}", record, idx + 1, self.records.len() + 1);

        let mut records = self.records.clone();
        records.insert(idx, record);
        self.persist(&records).with_trace_step("Leaderboard::save")?;

        self.records = records;
        Ok(())
    }

    fn persist(&self, records: &[Record]) -> AppResult {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        records.serialize(&mut serializer)?;
        writer.flush()?;

        debug!("wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// The lowest record that beats `current_score`
    pub fn find_next_higher_score(&self, current_score: u32) -> Option<&Record> {
        self.records.iter().find(|record| record.score > current_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scores(leaderboard: &Leaderboard) -> Vec<u32> {
        leaderboard.records().iter().map(|record| record.score).collect()
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let leaderboard = Leaderboard::load(dir.path().join("leaderboards.json")).unwrap();
        assert!(leaderboard.records().is_empty());
        assert_eq!(leaderboard.find_next_higher_score(0), None);
    }

    #[test]
    fn saved_records_survive_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboards.json");

        let mut leaderboard = Leaderboard::load(&path).unwrap();
        leaderboard.save("a", 5).unwrap();
        leaderboard.save("b", 9).unwrap();

        let reloaded = Leaderboard::load(&path).unwrap();
        assert_eq!(reloaded.records(), &[Record::new("a", 5), Record::new("b", 9)]);
    }

    #[test]
    fn load_sorts_by_score() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboards.json");
        fs::write(
            &path,
            r#"[{"username": "c", "score": 20}, {"username": "a", "score": 5}, {"username": "b", "score": 9}]"#,
        )
        .unwrap();

        let leaderboard = Leaderboard::load(&path).unwrap();
        assert_eq!(scores(&leaderboard), vec![5, 9, 20]);
        assert_eq!(leaderboard.records()[0].username, "a");
    }

    #[test]
    fn save_keeps_order_without_reload() {
        let dir = TempDir::new().unwrap();
        let mut leaderboard = Leaderboard::load(dir.path().join("scores.json")).unwrap();
        for (name, score) in [("x", 12), ("y", 3), ("z", 7), ("w", 7)] {
            leaderboard.save(name, score).unwrap();
        }

        assert_eq!(scores(&leaderboard), vec![3, 7, 7, 12]);
        // equal scores stay in the order they were saved
        assert_eq!(leaderboard.records()[1].username, "z");
        assert_eq!(leaderboard.find_next_higher_score(3), Some(&Record::new("z", 7)));
    }

    #[test]
    fn next_higher_score() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboards.json");
        let mut leaderboard = Leaderboard::load(&path).unwrap();
        leaderboard.save("a", 5).unwrap();
        leaderboard.save("b", 9).unwrap();
        leaderboard.save("c", 20).unwrap();

        assert_eq!(leaderboard.find_next_higher_score(9), Some(&Record::new("c", 20)));
        assert_eq!(leaderboard.find_next_higher_score(0), Some(&Record::new("a", 5)));
        assert_eq!(leaderboard.find_next_higher_score(20), None);
    }

    #[test]
    fn file_is_indented_with_four_spaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("leaderboards.json");
        let mut leaderboard = Leaderboard::load(&path).unwrap();
        leaderboard.save("a", 5).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "[\n    {\n        \"username\": \"a\",\n        \"score\": 5\n    }\n]"
        );
    }

    #[test]
    fn failed_write_keeps_records_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboards.json");
        let mut leaderboard = Leaderboard::load(&path).unwrap();
        leaderboard.save("a", 5).unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        let e = leaderboard.save("b", 9).unwrap_err();

        assert!(matches!(e.typ(), AppErrorType::Io(_)), "{:?}", e);
        assert_eq!(leaderboard.records(), &[Record::new("a", 5)]);
        assert_eq!(leaderboard.find_next_higher_score(5), None);
    }

    #[test]
    fn non_list_payload_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboards.json");
        fs::write(&path, r#"{"username": "a", "score": 5}"#).unwrap();

        let e = Leaderboard::load(&path).err().unwrap();
        assert!(matches!(e.typ(), AppErrorType::LeaderboardNotList { .. }), "{:?}", e);
    }

    #[test]
    fn malformed_record_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboards.json");
        fs::write(&path, r#"[{"username": "a"}]"#).unwrap();

        let e = Leaderboard::load(&path).err().unwrap();
        assert!(matches!(e.typ(), AppErrorType::Json(_)), "{:?}", e);
    }
}
