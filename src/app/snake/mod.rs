use std::collections::VecDeque;

use rand::Rng;

use crate::{
    app::{fruit::Fruit, input::HeldKeys},
    basic::{BoardDim, Dir, GridPoint},
};

/// What happened to the snake during one tick
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct Tick {
    pub crashed: bool,
    pub ate: bool,
}

pub struct Snake {
    /// Head first, never empty. Right after growing the last two
    /// cells coincide until the next move
    pub body: VecDeque<GridPoint>,
    pub dir: Dir,
}

impl Snake {
    pub const START_POS: GridPoint = GridPoint::new(10, 10);
    pub const START_DIR: Dir = Dir::R;

    pub fn new(pos: GridPoint, dir: Dir) -> Self {
        Self::from_body([pos], dir)
    }

    pub fn from_body(body: impl IntoIterator<Item = GridPoint>, dir: Dir) -> Self {
        let body = body.into_iter().collect::<VecDeque<_>>();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, dir }
    }

    pub fn head(&self) -> GridPoint {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Take the direction from the held keys, a key that would
    /// reverse the current heading is ignored
    pub fn steer(&mut self, held: &HeldKeys) {
        if let Some(new_dir) = held.next_dir(self.dir) {
            self.dir = new_dir;
        }
    }

    /// Shift the body one cell in the current direction, the length
    /// stays the same and nothing is validated here
    pub fn advance(&mut self) {
        let new_head = self.head() + self.dir;
        self.body.rotate_right(1);
        self.body[0] = new_head;
    }

    /// Duplicate the tail, the copy is left behind by the next move
    pub fn grow(&mut self) {
        let tail = self.body[self.body.len() - 1];
        self.body.push_back(tail);
    }

    /// Whether the head has run into the rest of the body or off the board
    pub fn check_collision(&self, board_dim: BoardDim) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head) || !board_dim.contains(head)
    }

    /// Eat whichever fruit lies under the head: grow and send the fruit
    /// somewhere else
    pub fn check_eat_fruit(
        &mut self,
        fruits: &mut [Fruit],
        board_dim: BoardDim,
        rng: &mut impl Rng,
    ) -> bool {
        let head = self.head();
        match fruits.iter_mut().find(|fruit| fruit.pos == head) {
            Some(fruit) => {
                self.grow();
                fruit.respawn(self.body.iter().copied(), board_dim, rng);
                true
            }
            None => false,
        }
    }

    /// One tick: steer, move, check for a crash, then check for fruit
    pub fn update(
        &mut self,
        held: &HeldKeys,
        fruits: &mut [Fruit],
        board_dim: BoardDim,
        rng: &mut impl Rng,
    ) -> Tick {
        self.steer(held);
        self.advance();
        let crashed = self.check_collision(board_dim);
        let ate = self.check_eat_fruit(fruits, board_dim, rng);
        Tick { crashed, ate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const BOARD: BoardDim = BoardDim { cols: 64, rows: 48 };

    fn p(col: i32, row: i32) -> GridPoint {
        GridPoint::new(col, row)
    }

    #[test]
    fn advance_shifts_body_by_one() {
        let mut snake = Snake::from_body([p(5, 5), p(4, 5), p(4, 6), p(4, 7)], Dir::R);
        let old_body = snake.body.clone();

        snake.advance();

        assert_eq!(snake.len(), old_body.len());
        assert_eq!(snake.head(), p(6, 5));
        for i in 1..snake.len() {
            assert_eq!(snake.body[i], old_body[i - 1]);
        }
    }

    #[test]
    fn grow_keeps_geometry_until_next_move() {
        let mut snake = Snake::from_body([p(5, 5), p(4, 5), p(3, 5)], Dir::R);
        let old_body = snake.body.clone();

        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body.iter().take(3).copied().collect::<Vec<_>>(), Vec::from(old_body));
        assert_eq!(snake.body[3], p(3, 5));

        snake.advance();
        assert_eq!(
            snake.body.iter().copied().collect::<Vec<_>>(),
            vec![p(6, 5), p(5, 5), p(4, 5), p(3, 5)],
        );
    }

    #[test]
    fn looping_into_own_body_collides() {
        // heading down with the body curling round to the left
        let mut snake = Snake::from_body([p(6, 6), p(6, 5), p(5, 5), p(5, 6), p(5, 7)], Dir::D);
        assert!(!snake.check_collision(BOARD));

        snake.dir = Dir::L;
        snake.advance();
        assert_eq!(snake.head(), p(5, 6));
        assert!(snake.check_collision(BOARD));
    }

    #[test]
    fn leaving_the_board_collides() {
        for (start, dir) in [
            (p(0, 10), Dir::L),
            (p(63, 10), Dir::R),
            (p(10, 0), Dir::U),
            (p(10, 47), Dir::D),
        ] {
            let mut snake = Snake::new(start, dir);
            assert!(!snake.check_collision(BOARD));
            snake.advance();
            assert!(snake.check_collision(BOARD), "{:?} from {:?}", dir, start);
        }
    }

    #[test]
    fn single_cell_never_hits_itself() {
        let mut snake = Snake::new(p(20, 20), Dir::U);
        for dir in [Dir::U, Dir::L, Dir::D, Dir::D, Dir::R] {
            snake.dir = dir;
            snake.advance();
            assert!(!snake.check_collision(BOARD));
        }
    }

    #[test]
    fn reversal_is_ignored() {
        let mut snake = Snake::from_body([p(5, 5), p(4, 5)], Dir::R);
        let mut rng = StdRng::seed_from_u64(0);
        let mut fruits = [Fruit { pos: p(40, 40) }];

        let tick = snake.update(&HeldKeys::only(Dir::L), &mut fruits, BOARD, &mut rng);

        assert_eq!(tick, Tick::default());
        assert_eq!(snake.dir, Dir::R);
        assert_eq!(snake.head(), p(6, 5));
    }

    #[test]
    fn eating_grows_and_moves_fruit() {
        let mut snake = Snake::from_body([p(5, 5), p(4, 5)], Dir::R);
        let mut rng = StdRng::seed_from_u64(42);
        let mut fruits = [Fruit { pos: p(6, 5) }];

        let tick = snake.update(&HeldKeys::default(), &mut fruits, BOARD, &mut rng);

        assert_eq!(tick, Tick { crashed: false, ate: true });
        assert_eq!(snake.len(), 3);
        assert!(BOARD.contains(fruits[0].pos));
        assert!(!snake.body.contains(&fruits[0].pos));
    }

    #[test]
    fn crash_and_eat_are_both_reported() {
        // a fruit under the body, both checks fire on the same tick
        let mut snake = Snake::from_body([p(6, 6), p(6, 5), p(5, 5), p(5, 6), p(5, 7)], Dir::D);
        let mut rng = StdRng::seed_from_u64(5);
        let mut fruits = [Fruit { pos: p(5, 6) }];

        let tick = snake.update(&HeldKeys::only(Dir::L), &mut fruits, BOARD, &mut rng);

        assert_eq!(tick, Tick { crashed: true, ate: true });
    }
}
