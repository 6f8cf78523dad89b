use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use rand::{rngs::ThreadRng, thread_rng};
use tracing::{debug, info};

use crate::{
    app::{
        app_error::{AppError, AppErrorConversion, AppErrorType, AppResult},
        control::Control,
        drawing::{Frame, MeasureText},
        fruit::Fruit,
        input::{HeldKeys, Input},
        leaderboard::Leaderboard,
        scene::{SaveScoreScene, Scene},
        snake::{Snake, Tick},
        BOARD_DIM,
    },
    basic::BoardDim,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Time between ticks at the start of a game
    pub fn wait_time(self) -> Duration {
        use Difficulty::*;
        Duration::from_millis(match self {
            Easy => 100,
            Medium => 70,
            Hard => 50,
        })
    }

    /// The snake never gets faster than this
    pub fn min_wait_time(self) -> Duration {
        use Difficulty::*;
        Duration::from_millis(match self {
            Easy => 50,
            Medium => 30,
            Hard => 15,
        })
    }
}

pub struct Game {
    score: u32,
    running: bool,
    difficulty: Difficulty,
    control: Control,
    /// The tick clock only starts with the first gameplay step, time
    /// spent before that (opening the window) isn't owed to the snake
    clock_started: bool,
    board_dim: BoardDim,

    pub snake: Snake,
    pub fruits: Vec<Fruit>,

    /// The active scene's slot is empty while that scene runs
    scenes: HashMap<String, Option<Scene>>,
    current_scene: String,

    rng: ThreadRng,
}

impl Game {
    pub fn new(difficulty: Difficulty, initial_scene: Scene) -> Self {
        let mut rng = thread_rng();
        let snake = Snake::new(Snake::START_POS, Snake::START_DIR);
        let fruits = vec![Fruit::new(snake.body.iter().copied(), BOARD_DIM, &mut rng)];

        let current_scene = initial_scene.name().to_string();
        let mut scenes = HashMap::new();
        scenes.insert(current_scene.clone(), Some(initial_scene));

        info!(
            "new {:?} game, {}ms between ticks (at least {}ms)",
            difficulty,
            difficulty.wait_time().as_millis(),
            difficulty.min_wait_time().as_millis(),
        );

        Self {
            score: 0,
            running: true,
            difficulty,
            control: Control::new(difficulty.wait_time(), difficulty.min_wait_time()),
            clock_started: false,
            board_dim: BOARD_DIM,
            snake,
            fruits,
            scenes,
            current_scene,
            rng,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the outer loop to end after this step
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[cfg(test)]
    pub fn wait_time(&self) -> Duration {
        self.control.wait_time()
    }

    #[cfg(test)]
    pub fn board_dim(&self) -> BoardDim {
        self.board_dim
    }

    /// How many overdue ticks a single step may catch up on
    pub fn set_max_catch_up(&mut self, max_catch_up: usize) {
        self.control.set_max_catch_up(max_catch_up);
    }

    /// Whether another tick is due, call repeatedly until it returns false
    pub fn tick_due(&mut self) -> bool {
        self.tick_due_at(Instant::now())
    }

    pub fn tick_due_at(&mut self, now: Instant) -> bool {
        if !self.clock_started {
            self.clock_started = true;
            self.control.reset_at(now);
        }
        self.control.can_update_at(now)
    }

    /// Advance the snake by one tick and apply what happened to it
    pub fn update(&mut self, held: &HeldKeys) -> AppResult<Tick> {
        let tick = self
            .snake
            .update(held, &mut self.fruits, self.board_dim, &mut self.rng);

        if tick.crashed {
            self.game_over().with_trace_step("Game::update")?;
        }

        if tick.ate {
            self.score += 1;
            self.control.speed_up();
            debug!(
                "fruit eaten, score {}, length {}, {}ms between ticks",
                self.score,
                self.snake.len(),
                self.control.wait_time().as_millis()
            );
        }

        Ok(tick)
    }

    pub fn register_scene(&mut self, scene: Scene) -> AppResult {
        let name = scene.name().to_string();
        if self.scenes.contains_key(&name) {
            return Err(AppErrorType::SceneAlreadyRegistered(name).into());
        }
        debug!("registered scene {:?}", name);
        self.scenes.insert(name, Some(scene));
        Ok(())
    }

    pub fn switch_scene(&mut self, name: &str) -> AppResult {
        if !self.scenes.contains_key(name) {
            return Err(AppErrorType::SceneNotFound(name.to_string()).into());
        }
        info!("switching scene {:?} -> {:?}", self.current_scene, name);
        self.current_scene = name.to_string();
        Ok(())
    }

    pub fn current_scene(&self) -> &str {
        &self.current_scene
    }

    pub fn game_over(&mut self) -> AppResult {
        info!("game over with score {} on {:?}", self.score, self.difficulty);
        self.switch_scene(SaveScoreScene::NAME)
    }

    /// Run the active scene for one step
    pub fn step(
        &mut self,
        input: &Input,
        leaderboard: &mut Leaderboard,
        measure: &dyn MeasureText,
    ) -> AppResult<Frame> {
        let name = self.current_scene.clone();
        let mut scene = self
            .scenes
            .get_mut(&name)
            .and_then(Option::take)
            .ok_or_else(|| AppError::from(AppErrorType::SceneNotFound(name.clone())))?;

        let frame = scene.step(self, input, leaderboard, measure);
        self.scenes.insert(name.clone(), Some(scene));
        frame.with_trace_step(format!("scene {:?}", name))
    }
}
