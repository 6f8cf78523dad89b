use rand::Rng;

use crate::basic::{BoardDim, GridPoint};

/// Picks a uniformly random cell that isn't in `occupied`, cells outside
/// the board and duplicates in `occupied` are ignored
pub fn random_free_spot(
    occupied: impl IntoIterator<Item = GridPoint>,
    board_dim: BoardDim,
    rng: &mut impl Rng,
) -> Option<GridPoint> {
    let mut occupied_cells = occupied
        .into_iter()
        .filter(|point| board_dim.contains(*point))
        .map(|point| board_dim.index_of(point))
        .collect::<Vec<_>>();
    occupied_cells.sort_unstable();
    occupied_cells.dedup();

    let free_spaces = board_dim.cells() - occupied_cells.len();
    if free_spaces == 0 {
        return None;
    }

    // skip over every occupied cell at or before the chosen index
    let mut new_idx = rng.gen_range(0..free_spaces);
    for idx in occupied_cells {
        if idx <= new_idx {
            new_idx += 1;
        }
    }

    assert!(new_idx < board_dim.cells());
    Some(board_dim.point_at(new_idx))
}

pub fn random_spot(board_dim: BoardDim, rng: &mut impl Rng) -> GridPoint {
    GridPoint {
        col: rng.gen_range(0..board_dim.cols),
        row: rng.gen_range(0..board_dim.rows),
    }
}
