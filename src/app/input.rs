use crate::basic::{Dir, Point};
use ggez::input::keyboard::{KeyCode, KeyboardContext};

/// Which direction keys are held down at the moment the snapshot is taken
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct HeldKeys {
    pub u: bool,
    pub d: bool,
    pub l: bool,
    pub r: bool,
}

impl HeldKeys {
    /// WASD, with the arrow keys as aliases
    #[rustfmt::skip]
    const BINDINGS: [(Dir, [KeyCode; 2]); 4] = [
        (Dir::U, [KeyCode::W, KeyCode::Up]),
        (Dir::D, [KeyCode::S, KeyCode::Down]),
        (Dir::L, [KeyCode::A, KeyCode::Left]),
        (Dir::R, [KeyCode::D, KeyCode::Right]),
    ];

    pub fn from_keyboard(keyboard: &KeyboardContext) -> Self {
        let mut held = Self::default();
        for (dir, keys) in Self::BINDINGS {
            if keys.iter().any(|key| keyboard.is_key_pressed(*key)) {
                held.set(dir, true);
            }
        }
        held
    }

    #[cfg(test)]
    pub fn only(dir: Dir) -> Self {
        let mut held = Self::default();
        held.set(dir, true);
        held
    }

    pub fn is_held(&self, dir: Dir) -> bool {
        match dir {
            Dir::U => self.u,
            Dir::D => self.d,
            Dir::L => self.l,
            Dir::R => self.r,
        }
    }

    pub fn set(&mut self, dir: Dir, held: bool) {
        match dir {
            Dir::U => self.u = held,
            Dir::D => self.d = held,
            Dir::L => self.l = held,
            Dir::R => self.r = held,
        }
    }

    /// The first held direction (checked in the order U, D, L, R) which
    /// doesn't reverse `current`
    pub fn next_dir(&self, current: Dir) -> Option<Dir> {
        Dir::iter().find(|dir| self.is_held(*dir) && *dir != -current)
    }
}

/// Discrete events collected between two scene steps
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    Char(char),
    Backspace,
    Enter,
    Click(Point),
}

#[derive(Default, Debug)]
pub struct Input {
    pub held: HeldKeys,
    pub events: Vec<InputEvent>,
}

impl Input {
    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }
}
