use ggez::GameError;
use std::{
    error::Error,
    fmt,
    fmt::{Debug, Display, Formatter},
    io,
    path::PathBuf,
};

#[derive(Debug)]
pub enum AppErrorType {
    GameError(GameError),
    Io(io::Error),
    Json(serde_json::Error),
    /// The leaderboard file parsed but doesn't hold a JSON array
    LeaderboardNotList { path: PathBuf },
    /// A scene with this name is already registered
    SceneAlreadyRegistered(String),
    /// No scene with this name is registered
    SceneNotFound(String),
}

/// The second member contains a trace in reverse order
#[must_use]
pub struct AppError(AppErrorType, Vec<String>);

impl From<GameError> for AppError {
    fn from(e: GameError) -> Self {
        Self(AppErrorType::GameError(e), vec![])
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        Self(AppErrorType::Io(e), vec![])
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self(AppErrorType::Json(e), vec![])
    }
}

impl From<AppErrorType> for AppError {
    fn from(typ: AppErrorType) -> Self {
        Self(typ, vec![])
    }
}

impl AppError {
    pub fn with_trace_step<S: ToString>(mut self, s: S) -> Self {
        self.1.push(s.to_string());
        self
    }

    #[cfg(test)]
    pub fn typ(&self) -> &AppErrorType {
        &self.0
    }
}

impl Debug for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error:\n{:?}\nTrace:", self.0)?;
        for t in (self.1).iter().rev() {
            writeln!(f, " in {}", t)?;
        }
        Ok(())
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl Error for AppError {}

pub type AppResult<T = ()> = Result<T, AppError>;

pub trait AppErrorConversion {
    fn with_trace_step<S: ToString>(self, s: S) -> Self;
}

impl<T> AppErrorConversion for AppResult<T> {
    fn with_trace_step<S: ToString>(self, s: S) -> Self {
        self.map_err(|e| e.with_trace_step(s.to_string()))
    }
}

#[test]
fn test_trace_is_printed_outermost_first() {
    let result: AppResult = Err(AppErrorType::SceneNotFound("menu".to_string()).into());
    let e = result
        .with_trace_step("Game::switch_scene")
        .with_trace_step("main")
        .unwrap_err();
    let text = format!("{:?}", e);
    let inner = text.find("Game::switch_scene").unwrap();
    let outer = text.find("main").unwrap();
    assert!(text.contains("SceneNotFound(\"menu\")"));
    assert!(outer < inner, "{}", text);
}
