use ggez::graphics::Color;

macro_rules! gray {
    ($lightness:expr) => {
        Color {
            r: $lightness,
            g: $lightness,
            b: $lightness,
            a: 1.,
        }
    };
}

/// Colors used by the scenes, the renderer only ever sees these through
/// draw commands
pub struct Palette {
    pub background_color: Color,
    pub snake_color: Color,
    pub fruit_color: Color,
    pub text_color: Color,

    pub form_background_color: Color,
    pub form_text_color: Color,
    pub input_active_color: Color,
    pub input_inactive_color: Color,
    pub button_color: Color,
}

impl Palette {
    pub fn classic() -> Self {
        Self {
            background_color: Color::BLACK,
            snake_color: Color::WHITE,
            fruit_color: Color::RED,
            text_color: Color::WHITE,

            form_background_color: Color::WHITE,
            form_text_color: Color::BLACK,
            input_active_color: Color::BLUE,
            input_inactive_color: gray!(0.784),
            button_color: gray!(0.784),
        }
    }
}
