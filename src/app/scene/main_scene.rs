use crate::{
    app::{
        app_error::{AppErrorConversion, AppResult},
        drawing::{Frame, MeasureText},
        game::Game,
        input::Input,
        leaderboard::Leaderboard,
        palette::Palette,
        scene::Step,
    },
    basic::Point,
};

/// Gameplay: ticks the snake as often as the game's pace allows and
/// shows the board with the current score
pub struct MainScene {
    name: String,
    palette: Palette,
}

impl MainScene {
    pub const NAME: &'static str = "main_scene";

    pub fn new<S: ToString>(name: S) -> Self {
        Self {
            name: name.to_string(),
            palette: Palette::classic(),
        }
    }

    fn frame(&self, game: &Game, leaderboard: &Leaderboard) -> Frame {
        let mut frame = Frame::new(self.palette.background_color);

        for segment in &game.snake.body {
            frame.cell(*segment, self.palette.snake_color);
        }
        for fruit in &game.fruits {
            frame.cell(fruit.pos, self.palette.fruit_color);
        }

        frame.text(
            format!("Score: {}", game.score()),
            Point { x: 10., y: 10. },
            self.palette.text_color,
        );

        let (to_beat, holder) = match leaderboard.find_next_higher_score(game.score()) {
            Some(record) => (record.score, record.username.as_str()),
            None => (game.score(), "You"),
        };
        frame.text(
            format!("Score to beat: {} ({})", to_beat, holder),
            Point { x: 10., y: 40. },
            self.palette.text_color,
        );

        frame
    }
}

impl Step for MainScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(
        &mut self,
        game: &mut Game,
        input: &Input,
        leaderboard: &mut Leaderboard,
        _measure: &dyn MeasureText,
    ) -> AppResult<Frame> {
        if input.quit_requested() {
            game.stop();
        }

        while game.tick_due() {
            game.update(&input.held).with_trace_step("MainScene::step")?;
            if game.current_scene() != self.name {
                break;
            }
        }

        Ok(self.frame(game, leaderboard))
    }
}
