use crate::{
    app::CELL_SIDE,
    basic::{GridPoint, Point},
};
use ggez::{
    graphics::{Canvas, Color, DrawMode, DrawParam, Mesh, MeshBuilder, PxScale, Rect, Text},
    Context, GameResult,
};
use tracing::warn;

pub const FONT_SIZE: f32 = 36.;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RectMode {
    Fill,
    Outline(f32),
}

/// A single semantic draw request, scenes never deal with pixels
/// beyond positions
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Cell { pos: GridPoint, color: Color },
    Rect { rect: Rect, color: Color, mode: RectMode },
    Text { text: String, dest: Point, color: Color },
}

/// Everything a scene wants shown for one step
#[derive(Clone, Debug)]
pub struct Frame {
    pub background: Color,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(background: Color) -> Self {
        Self { background, commands: vec![] }
    }

    pub fn cell(&mut self, pos: GridPoint, color: Color) {
        self.commands.push(DrawCommand::Cell { pos, color });
    }

    pub fn rect(&mut self, rect: Rect, color: Color, mode: RectMode) {
        self.commands.push(DrawCommand::Rect { rect, color, mode });
    }

    pub fn text<S: ToString>(&mut self, text: S, dest: Point, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            dest,
            color,
        });
    }

    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Width of `text` once drawn at `FONT_SIZE`
pub trait MeasureText {
    fn text_width(&self, text: &str) -> f32;
}

/// Same advance for every character, a full em per character covers
/// even the widest latin glyphs of the default font
pub struct FixedAdvance(pub f32);

impl MeasureText for FixedAdvance {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.0
    }
}

impl MeasureText for Context {
    fn text_width(&self, text: &str) -> f32 {
        let mut drawn = Text::new(text);
        drawn.set_scale(PxScale::from(FONT_SIZE));
        match drawn.measure(self) {
            Ok(size) => size.x,
            Err(e) => {
                warn!("couldn't measure {:?}, estimating: {}", text, e);
                FixedAdvance(FONT_SIZE).text_width(text)
            }
        }
    }
}

/// Present a frame, shapes first and text on top
pub fn draw_frame(ctx: &mut Context, frame: &Frame) -> GameResult {
    let mut canvas = Canvas::from_frame(ctx, frame.background);

    let mut builder = MeshBuilder::new();
    let mut shapes = 0;
    for command in &frame.commands {
        match command {
            DrawCommand::Cell { pos, color } => {
                let side = CELL_SIDE as f32;
                let Point { x, y } = pos.to_point(side);
                let rect = Rect::new(x, y, side, side);
                builder.rectangle(DrawMode::fill(), rect, *color)?;
                shapes += 1;
            }
            DrawCommand::Rect { rect, color, mode } => {
                let draw_mode = match mode {
                    RectMode::Fill => DrawMode::fill(),
                    RectMode::Outline(width) => DrawMode::stroke(*width),
                };
                builder.rectangle(draw_mode, *rect, *color)?;
                shapes += 1;
            }
            DrawCommand::Text { .. } => (),
        }
    }

    // an empty mesh can't be built
    if shapes > 0 {
        let mesh = Mesh::from_data(ctx, builder.build());
        canvas.draw(&mesh, DrawParam::default());
    }

    for command in &frame.commands {
        if let DrawCommand::Text { text, dest, color } = command {
            let mut text = Text::new(text.as_str());
            text.set_scale(PxScale::from(FONT_SIZE));
            canvas.draw(&text, DrawParam::default().dest(*dest).color(*color));
        }
    }

    canvas.finish(ctx)
}

#[test]
fn test_fixed_advance_counts_chars() {
    let measure = FixedAdvance(20.);
    assert_eq!(measure.text_width(""), 0.);
    assert_eq!(measure.text_width("WWW"), 60.);
    assert_eq!(measure.text_width("żółw"), 80.);
}
