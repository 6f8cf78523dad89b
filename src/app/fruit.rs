use rand::Rng;
use tracing::warn;

use crate::basic::{
    board::{random_free_spot, random_spot},
    BoardDim, GridPoint,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Fruit {
    pub pos: GridPoint,
}

impl Fruit {
    /// Place a new fruit on a free cell
    pub fn new(
        occupied: impl IntoIterator<Item = GridPoint>,
        board_dim: BoardDim,
        rng: &mut impl Rng,
    ) -> Self {
        let mut fruit = Self { pos: Self::random_position(board_dim, rng) };
        fruit.respawn(occupied, board_dim, rng);
        fruit
    }

    /// Any cell on the board, occupied or not
    pub fn random_position(board_dim: BoardDim, rng: &mut impl Rng) -> GridPoint {
        random_spot(board_dim, rng)
    }

    /// Move to a random cell that isn't in `occupied`. When there is
    /// no free cell left any cell will do
    pub fn respawn(
        &mut self,
        occupied: impl IntoIterator<Item = GridPoint>,
        board_dim: BoardDim,
        rng: &mut impl Rng,
    ) {
        self.pos = match random_free_spot(occupied, board_dim, rng) {
            Some(pos) => pos,
            None => {
                warn!("no free cell left for the fruit, placing it anywhere");
                Self::random_position(board_dim, rng)
            }
        };
    }
}
