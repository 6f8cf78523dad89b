use crate::app::{control::Control, game::Difficulty};
use std::{env, path::PathBuf};

pub struct Prefs {
    pub difficulty: Difficulty,
    pub leaderboard_path: PathBuf,
    /// Cap on graphics frames (and scene steps) per second, the snake's
    /// own pace comes from the difficulty
    pub frame_rate: u32,
    /// Overdue snake ticks a single frame may run
    pub max_catch_up: usize,
}

impl Prefs {
    pub const LEADERBOARD_FILE_NAME: &'static str = "leaderboards.json";

    pub fn default_leaderboard_path() -> PathBuf {
        env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::LEADERBOARD_FILE_NAME)
    }
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            leaderboard_path: Self::default_leaderboard_path(),
            frame_rate: 60,
            max_catch_up: Control::DEFAULT_MAX_CATCH_UP,
        }
    }
}

// builder
#[allow(dead_code)]
impl Prefs {
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn leaderboard_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.leaderboard_path = path.into();
        self
    }

    pub fn frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn max_catch_up(mut self, max_catch_up: usize) -> Self {
        self.max_catch_up = max_catch_up;
        self
    }
}

#[test]
fn test_prefs_builder() {
    let prefs = Prefs::default()
        .difficulty(Difficulty::Hard)
        .leaderboard_path("/tmp/scores.json")
        .frame_rate(30)
        .max_catch_up(3);
    assert_eq!(prefs.difficulty, Difficulty::Hard);
    assert_eq!(prefs.leaderboard_path, PathBuf::from("/tmp/scores.json"));
    assert_eq!(prefs.frame_rate, 30);
    assert_eq!(prefs.max_catch_up, 3);
    assert_eq!(Prefs::default().max_catch_up, 1);
    assert!(Prefs::default_leaderboard_path().ends_with(Prefs::LEADERBOARD_FILE_NAME));
}
