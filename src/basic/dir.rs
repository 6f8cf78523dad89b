use std::ops::Neg;

use Dir::*;

// defined in the order keys are checked: U, D, L, R
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Dir {
    U = 0,
    D = 1,
    L = 2,
    R = 3,
}

impl Neg for Dir {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            U => D,
            D => U,
            L => R,
            R => L,
        }
    }
}

impl Dir {
    pub fn iter() -> impl Iterator<Item = Self> {
        [U, D, L, R].iter().copied()
    }

    /// Unit step in grid coordinates, rows grow downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            U => (0, -1),
            D => (0, 1),
            L => (-1, 0),
            R => (1, 0),
        }
    }
}

#[test]
fn test_dir_neg() {
    for dir in Dir::iter() {
        assert_ne!(-dir, dir);
        assert_eq!(-(-dir), dir);
        let (dx, dy) = dir.delta();
        let (ndx, ndy) = (-dir).delta();
        assert_eq!((dx + ndx, dy + ndy), (0, 0), "{:?}", dir);
    }
}
