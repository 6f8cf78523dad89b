use super::{dir::Dir, point::Point};
use std::{
    fmt::{Debug, Error, Formatter},
    ops::Add,
};

/// A cell on the board, `col` grows to the right and `row` grows downwards
#[derive(Eq, PartialEq, Copy, Clone, Hash, Add, Sub)]
pub struct GridPoint {
    pub col: i32,
    pub row: i32,
}

impl GridPoint {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Top-left corner of the cell in pixels
    pub fn to_point(self, cell_side: f32) -> Point {
        Point {
            x: self.col as f32 * cell_side,
            y: self.row as f32 * cell_side,
        }
    }

    #[must_use]
    pub fn step(self, dir: Dir) -> Self {
        let (dc, dr) = dir.delta();
        Self { col: self.col + dc, row: self.row + dr }
    }
}

impl Add<Dir> for GridPoint {
    type Output = Self;

    fn add(self, rhs: Dir) -> Self::Output {
        self.step(rhs)
    }
}

impl Debug for GridPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<{}, {}>", self.col, self.row)
    }
}

/// Size of the board in cells
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct BoardDim {
    pub cols: i32,
    pub rows: i32,
}

impl BoardDim {
    pub fn contains(self, GridPoint { col, row }: GridPoint) -> bool {
        (0..self.cols).contains(&col) && (0..self.rows).contains(&row)
    }

    pub fn cells(self) -> usize {
        (self.cols * self.rows) as usize
    }

    /// Row-major index, only meaningful for points inside the board
    pub fn index_of(self, point: GridPoint) -> usize {
        (point.row * self.cols + point.col) as usize
    }

    pub fn point_at(self, index: usize) -> GridPoint {
        GridPoint {
            col: index as i32 % self.cols,
            row: index as i32 / self.cols,
        }
    }
}

#[test]
fn test_board_contains() {
    let board = BoardDim { cols: 4, rows: 3 };
    assert!(board.contains(GridPoint::new(0, 0)));
    assert!(board.contains(GridPoint::new(3, 2)));
    for outside in [
        GridPoint::new(-1, 0),
        GridPoint::new(0, -1),
        GridPoint::new(4, 0),
        GridPoint::new(0, 3),
    ] {
        assert!(!board.contains(outside), "{:?}", outside);
    }
}

#[test]
fn test_index_round_trip() {
    let board = BoardDim { cols: 64, rows: 48 };
    for index in [0, 1, 63, 64, 65, board.cells() - 1] {
        assert_eq!(board.index_of(board.point_at(index)), index);
    }
    assert_eq!(GridPoint::new(10, 10) + Dir::R, GridPoint::new(11, 10));
    assert_eq!(GridPoint::new(10, 10) + Dir::U, GridPoint::new(10, 9));
}
