use ggez::{
    conf::{WindowMode, WindowSetup},
    event::{EventHandler, ErrorOrigin, MouseButton},
    input::keyboard::{KeyCode, KeyInput},
    Context,
};
use std::process;
use tracing::{error, info};

use crate::{
    app::{
        drawing::{draw_frame, Frame},
        game::Game,
        input::{HeldKeys, Input, InputEvent},
        leaderboard::Leaderboard,
        scene::{MainScene, SaveScoreScene, Scene},
    },
    basic::{BoardDim, Point},
};

pub use app_error::{AppError, AppErrorConversion, AppResult};
pub use prefs::Prefs;

mod app_error;
mod control;
mod drawing;
mod fruit;
mod game;
mod input;
mod leaderboard;
mod palette;
mod prefs;
mod scene;
mod snake;

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const CELL_SIDE: i32 = 10;

pub const BOARD_DIM: BoardDim = BoardDim {
    cols: SCREEN_WIDTH / CELL_SIDE,
    rows: SCREEN_HEIGHT / CELL_SIDE,
};

pub struct App {
    game: Game,
    leaderboard: Leaderboard,
    prefs: Prefs,

    /// Events received since the last scene step
    pending: Vec<InputEvent>,
    frame: Option<Frame>,
}

impl App {
    pub fn new(prefs: Prefs) -> AppResult<Self> {
        let leaderboard =
            Leaderboard::load(&prefs.leaderboard_path).with_trace_step("App::new")?;
        info!(
            "starting with {:?} difficulty at {} fps, leaderboard at {}",
            prefs.difficulty,
            prefs.frame_rate,
            leaderboard.path().display()
        );

        let mut game = Game::new(prefs.difficulty, Scene::Main(MainScene::new(MainScene::NAME)));
        game.set_max_catch_up(prefs.max_catch_up);
        game.register_scene(Scene::SaveScore(SaveScoreScene::new(SaveScoreScene::NAME)))
            .with_trace_step("App::new")?;

        Ok(Self {
            game,
            leaderboard,
            prefs,
            pending: vec![],
            frame: None,
        })
    }

    pub fn wm(&self) -> WindowMode {
        WindowMode::default().dimensions(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32)
    }

    pub fn ws(&self) -> WindowSetup {
        WindowSetup::default().title("Snake Game")
    }
}

impl EventHandler<AppError> for App {
    fn update(&mut self, ctx: &mut Context) -> AppResult {
        let mut due = false;
        while ctx.time.check_update_time(self.prefs.frame_rate) {
            due = true;
        }
        if !due {
            return Ok(());
        }

        let input = Input {
            held: HeldKeys::from_keyboard(&ctx.keyboard),
            events: self.pending.drain(..).collect(),
        };
        let frame = self
            .game
            .step(&input, &mut self.leaderboard, &*ctx)
            .with_trace_step("App::update")?;
        self.frame = Some(frame);

        if !self.game.is_running() {
            info!("game finished with score {}", self.game.score());
            ctx.request_quit();
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> AppResult {
        match &self.frame {
            Some(frame) => draw_frame(ctx, frame).map_err(AppError::from),
            None => Ok(()),
        }
    }

    fn mouse_button_down_event(
        &mut self,
        _ctx: &mut Context,
        _button: MouseButton,
        x: f32,
        y: f32,
    ) -> AppResult {
        self.pending.push(InputEvent::Click(Point { x, y }));
        Ok(())
    }

    fn key_down_event(&mut self, _ctx: &mut Context, input: KeyInput, _repeat: bool) -> AppResult {
        match input.keycode {
            Some(KeyCode::Return | KeyCode::NumpadEnter) => self.pending.push(InputEvent::Enter),
            Some(KeyCode::Back) => self.pending.push(InputEvent::Backspace),
            _ => (),
        }
        Ok(())
    }

    fn text_input_event(&mut self, _ctx: &mut Context, character: char) -> AppResult {
        if !character.is_control() {
            self.pending.push(InputEvent::Char(character));
        }
        Ok(())
    }

    /// The first close request goes to the active scene, the window
    /// closes once the game has stopped
    fn quit_event(&mut self, _ctx: &mut Context) -> AppResult<bool> {
        if self.game.is_running() {
            self.pending.push(InputEvent::Quit);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// The event loop never hands control back to `main`, so a failure
    /// inside it ends the process here with a failing status
    fn on_error(&mut self, _ctx: &mut Context, origin: ErrorOrigin, e: AppError) -> bool {
        error!("{:?} failed: {:?}", origin, e);
        process::exit(1)
    }
}
