use ggez::graphics::Rect;
use tracing::info;

use crate::{
    app::{
        app_error::{AppErrorConversion, AppResult},
        drawing::{Frame, MeasureText, RectMode},
        game::Game,
        input::{Input, InputEvent},
        leaderboard::Leaderboard,
        palette::Palette,
        scene::Step,
        SCREEN_WIDTH,
    },
    basic::Point,
};

/// Name entry after a game over, saving the score ends the run
pub struct SaveScoreScene {
    name: String,
    input_box: Rect,
    button: Rect,
    text: String,
    active: bool,
    saved: bool,
    palette: Palette,
}

impl SaveScoreScene {
    pub const NAME: &'static str = "save_score";

    const INPUT_BOX_MIN_WIDTH: f32 = 300.;

    pub fn new<S: ToString>(name: S) -> Self {
        Self {
            name: name.to_string(),
            input_box: Rect::new(10., 10., Self::INPUT_BOX_MIN_WIDTH, 40.),
            button: Rect::new(10., 60., 100., 40.),
            text: String::new(),
            active: false,
            saved: false,
            palette: Palette::classic(),
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn submit(&mut self, game: &mut Game, leaderboard: &mut Leaderboard) -> AppResult {
        info!("saving score {} for {:?}", game.score(), self.text);
        leaderboard
            .save(&self.text, game.score())
            .with_trace_step("SaveScoreScene::submit")?;
        self.saved = true;
        game.stop();
        Ok(())
    }

    fn handle_event(
        &mut self,
        event: &InputEvent,
        game: &mut Game,
        leaderboard: &mut Leaderboard,
    ) -> AppResult {
        match event {
            InputEvent::Quit => game.stop(),
            InputEvent::Click(point) => {
                self.active = self.input_box.contains(*point);
                if self.button.contains(*point) {
                    self.submit(game, leaderboard)?;
                }
            }
            _ if !self.active => (),
            InputEvent::Enter => self.submit(game, leaderboard)?,
            InputEvent::Backspace => {
                self.text.pop();
            }
            InputEvent::Char(c) if !c.is_control() => self.text.push(*c),
            InputEvent::Char(_) => (),
        }
        Ok(())
    }

    fn fit_input_box(&mut self, measure: &dyn MeasureText) {
        let max_width = SCREEN_WIDTH as f32 - 10.;
        self.input_box.w = (measure.text_width(&self.text) + 10.)
            .clamp(Self::INPUT_BOX_MIN_WIDTH, max_width);
    }

    fn frame(&self) -> Frame {
        let mut frame = Frame::new(self.palette.form_background_color);

        let box_color = if self.active {
            self.palette.input_active_color
        } else {
            self.palette.input_inactive_color
        };
        frame.rect(self.input_box, box_color, RectMode::Outline(2.));
        frame.text(
            &self.text,
            Point { x: self.input_box.x + 5., y: self.input_box.y + 5. },
            self.palette.form_text_color,
        );

        frame.rect(self.button, self.palette.button_color, RectMode::Fill);
        frame.text(
            "Save",
            Point { x: self.button.x + 20., y: self.button.y + 5. },
            self.palette.form_text_color,
        );

        frame
    }
}

impl Step for SaveScoreScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(
        &mut self,
        game: &mut Game,
        input: &Input,
        leaderboard: &mut Leaderboard,
        measure: &dyn MeasureText,
    ) -> AppResult<Frame> {
        for event in &input.events {
            if self.saved {
                break;
            }
            self.handle_event(event, game, leaderboard)?;
        }

        self.fit_input_box(measure);
        Ok(self.frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{
        app_error::AppErrorType,
        drawing::FixedAdvance,
        game::Difficulty,
        input::HeldKeys,
        leaderboard::Record,
        scene::{MainScene, Scene},
    };
    use std::fs;
    use tempfile::TempDir;

    const MEASURE: FixedAdvance = FixedAdvance(20.);

    fn setup() -> (TempDir, Leaderboard, Game) {
        let dir = TempDir::new().unwrap();
        let leaderboard = Leaderboard::load(dir.path().join("leaderboards.json")).unwrap();
        let game = Game::new(Difficulty::Medium, Scene::Main(MainScene::new(MainScene::NAME)));
        (dir, leaderboard, game)
    }

    fn input(events: Vec<InputEvent>) -> Input {
        Input { held: HeldKeys::default(), events }
    }

    fn type_name(name: &str) -> Vec<InputEvent> {
        name.chars().map(InputEvent::Char).collect()
    }

    #[test]
    fn typing_needs_an_active_box() {
        let (_dir, mut leaderboard, mut game) = setup();
        let mut scene = SaveScoreScene::new(SaveScoreScene::NAME);

        scene.step(&mut game, &input(type_name("bob")), &mut leaderboard, &MEASURE).unwrap();
        assert_eq!(scene.text(), "");

        let mut events = vec![InputEvent::Click(Point { x: 20., y: 20. })];
        events.extend(type_name("bobx"));
        events.push(InputEvent::Backspace);
        events.push(InputEvent::Char('\u{8}'));
        scene.step(&mut game, &input(events), &mut leaderboard, &MEASURE).unwrap();

        assert!(scene.is_active());
        assert_eq!(scene.text(), "bob");
        assert!(game.is_running());
        assert!(leaderboard.records().is_empty());
    }

    #[test]
    fn click_outside_deactivates() {
        let (_dir, mut leaderboard, mut game) = setup();
        let mut scene = SaveScoreScene::new(SaveScoreScene::NAME);

        let events = vec![
            InputEvent::Click(Point { x: 20., y: 20. }),
            InputEvent::Click(Point { x: 500., y: 400. }),
            InputEvent::Char('x'),
            InputEvent::Enter,
        ];
        scene.step(&mut game, &input(events), &mut leaderboard, &MEASURE).unwrap();

        assert!(!scene.is_active());
        assert_eq!(scene.text(), "");
        assert!(game.is_running());
    }

    #[test]
    fn enter_saves_once_and_stops() {
        let (dir, mut leaderboard, mut game) = setup();
        let mut scene = SaveScoreScene::new(SaveScoreScene::NAME);

        let mut events = vec![InputEvent::Click(Point { x: 20., y: 20. })];
        events.extend(type_name("ana"));
        events.push(InputEvent::Enter);
        events.push(InputEvent::Enter);
        scene.step(&mut game, &input(events), &mut leaderboard, &MEASURE).unwrap();

        assert!(!game.is_running());
        assert_eq!(leaderboard.records(), &[Record::new("ana", 0)]);

        let reloaded = Leaderboard::load(dir.path().join("leaderboards.json")).unwrap();
        assert_eq!(reloaded.records(), &[Record::new("ana", 0)]);
    }

    #[test]
    fn button_click_saves() {
        let (_dir, mut leaderboard, mut game) = setup();
        let mut scene = SaveScoreScene::new(SaveScoreScene::NAME);

        let events = vec![InputEvent::Click(Point { x: 50., y: 80. })];
        scene.step(&mut game, &input(events), &mut leaderboard, &MEASURE).unwrap();

        assert!(!scene.is_active());
        assert!(!game.is_running());
        assert_eq!(leaderboard.records(), &[Record::new("", 0)]);
    }

    #[test]
    fn input_box_grows_with_text() {
        let (_dir, mut leaderboard, mut game) = setup();
        let mut scene = SaveScoreScene::new(SaveScoreScene::NAME);

        scene.step(&mut game, &input(vec![]), &mut leaderboard, &MEASURE).unwrap();
        assert_eq!(scene.input_box.w, 300.);

        // 16 characters at 20px plus the margin
        let mut events = vec![InputEvent::Click(Point { x: 20., y: 20. })];
        events.extend(type_name("WWWWWWWWWWWWWWWW"));
        scene.step(&mut game, &input(events), &mut leaderboard, &MEASURE).unwrap();
        assert_eq!(scene.input_box.w, 330.);

        let mut events = vec![InputEvent::Click(Point { x: 20., y: 20. })];
        events.extend(type_name(&"w".repeat(100)));
        scene.step(&mut game, &input(events), &mut leaderboard, &MEASURE).unwrap();
        assert_eq!(scene.input_box.w, SCREEN_WIDTH as f32 - 10.);
    }

    #[test]
    fn failed_save_is_reported_and_the_game_goes_on() {
        let (dir, mut leaderboard, mut game) = setup();
        let mut scene = SaveScoreScene::new(SaveScoreScene::NAME);
        // a directory where the file should be can't be written to
        fs::create_dir(dir.path().join("leaderboards.json")).unwrap();

        let mut events = vec![InputEvent::Click(Point { x: 20., y: 20. })];
        events.extend(type_name("ana"));
        events.push(InputEvent::Enter);
        let e = scene
            .step(&mut game, &input(events), &mut leaderboard, &MEASURE)
            .err()
            .unwrap();

        assert!(matches!(e.typ(), AppErrorType::Io(_)), "{:?}", e);
        assert!(format!("{:?}", e).contains("SaveScoreScene::submit"), "{:?}", e);
        assert!(game.is_running());
        assert!(leaderboard.records().is_empty());
    }

    #[test]
    fn frame_layout() {
        let (_dir, mut leaderboard, mut game) = setup();
        let mut scene = SaveScoreScene::new(SaveScoreScene::NAME);

        let frame = scene.step(&mut game, &input(vec![]), &mut leaderboard, &MEASURE).unwrap();
        let palette = Palette::classic();

        assert_eq!(frame.background, palette.form_background_color);
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["", "Save"]);
        assert!(frame.commands.contains(&crate::app::drawing::DrawCommand::Rect {
            rect: Rect::new(10., 10., 300., 40.),
            color: palette.input_inactive_color,
            mode: RectMode::Outline(2.),
        }));
    }
}
