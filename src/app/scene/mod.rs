use std::ops::{Deref, DerefMut};

use crate::app::{
    app_error::AppResult,
    drawing::{Frame, MeasureText},
    game::Game,
    input::Input,
    leaderboard::Leaderboard,
};

pub use main_scene::MainScene;
pub use save_score::SaveScoreScene;

mod main_scene;
mod save_score;

/// One screen of the game, consumes the input gathered since the last
/// step and says what to show
pub trait Step {
    fn name(&self) -> &str;

    fn step(
        &mut self,
        game: &mut Game,
        input: &Input,
        leaderboard: &mut Leaderboard,
        measure: &dyn MeasureText,
    ) -> AppResult<Frame>;
}

pub enum Scene {
    Main(MainScene),
    SaveScore(SaveScoreScene),
}

impl Deref for Scene {
    type Target = dyn Step;

    fn deref(&self) -> &Self::Target {
        use Scene::*;
        match self {
            Main(x) => x,
            SaveScore(x) => x,
        }
    }
}

impl DerefMut for Scene {
    fn deref_mut(&mut self) -> &mut Self::Target {
        use Scene::*;
        match self {
            Main(x) => x,
            SaveScore(x) => x,
        }
    }
}
