use crate::board::{BLANK, Board};
use rustc_hash::FxHashMap;

/// Lookup from tile identifier to its target cell in the goal board. Built
/// once per solve and shared read-only by every heuristic evaluation.
/// Blanks are excluded; a blank's location carries no heuristic cost.
pub struct GoalMap {
    positions: FxHashMap<u16, (u8, u8)>,
}

impl GoalMap {
    pub fn new(goal: &Board) -> Self {
        let mut positions = FxHashMap::default();
        for row in 0..goal.rows() {
            for col in 0..goal.cols() {
                let tile = goal.tile(row, col);
                if tile != BLANK {
                    positions.insert(tile, (row as u8, col as u8));
                }
            }
        }
        GoalMap { positions }
    }

    pub fn position(&self, tile: u16) -> Option<(u8, u8)> {
        self.positions.get(&tile).copied()
    }
}

/// Trait for admissible lower bounds on the number of slides remaining to
/// reach the goal.
pub trait Heuristic {
    fn evaluate(&self, board: &Board, goal: &GoalMap) -> u32;
}

/// Sum of per-tile Manhattan distances to goal positions. Admissible and
/// consistent for single-cell slides, which licenses closing a state
/// permanently the first time it is popped. Tiles without a goal position
/// contribute zero.
pub struct Manhattan;

impl Manhattan {
    pub fn new() -> Self {
        Manhattan
    }
}

impl Heuristic for Manhattan {
    fn evaluate(&self, board: &Board, goal: &GoalMap) -> u32 {
        let mut distance = 0u32;
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let tile = board.tile(row, col);
                if tile == BLANK {
                    continue;
                }
                if let Some((goal_row, goal_col)) = goal.position(tile) {
                    distance += (row as i32 - goal_row as i32).unsigned_abs()
                        + (col as i32 - goal_col as i32).unsigned_abs();
                }
            }
        }
        distance
    }
}

/// Always estimates zero, degrading A* to uniform-cost search.
pub struct Null;

impl Null {
    pub fn new() -> Self {
        Null
    }
}

impl Heuristic for Null {
    fn evaluate(&self, _board: &Board, _goal: &GoalMap) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_map_excludes_blank() {
        let goal = Board::standard(4, 4);
        let map = GoalMap::new(&goal);
        assert_eq!(map.position(BLANK), None);
        assert_eq!(map.position(1), Some((0, 0)));
        assert_eq!(map.position(15), Some((3, 2)));
    }

    #[test]
    fn test_manhattan_at_goal() {
        let goal = Board::standard(4, 4);
        let map = GoalMap::new(&goal);
        assert_eq!(Manhattan::new().evaluate(&goal, &map), 0);
    }

    #[test]
    fn test_manhattan_one_slide() {
        let goal = Board::standard(3, 3);
        let map = GoalMap::new(&goal);
        let board = Board::from_text("1 2 3\n4 5 6\n7 . 8").unwrap();
        assert_eq!(Manhattan::new().evaluate(&board, &map), 1);
    }

    #[test]
    fn test_manhattan_corner_to_corner() {
        let goal = Board::standard(3, 3);
        let map = GoalMap::new(&goal);
        // Tile 1 belongs at (0, 0) but sits at (2, 2): distance 4.
        let board = Board::from_text(". 2 3\n4 5 6\n7 8 1").unwrap();
        assert_eq!(Manhattan::new().evaluate(&board, &map), 4);
    }

    #[test]
    fn test_manhattan_unmapped_tile_is_free() {
        let goal = Board::standard(2, 2);
        let map = GoalMap::new(&goal);
        // Tile 9 does not appear in the 2x2 goal; it contributes zero
        // rather than failing.
        let board = Board::from_text("1 2\n9 .").unwrap();
        assert_eq!(Manhattan::new().evaluate(&board, &map), 0);
    }

    #[test]
    fn test_null_heuristic() {
        let goal = Board::standard(3, 3);
        let map = GoalMap::new(&goal);
        let board = Board::from_text("8 7 6\n5 4 3\n2 1 .").unwrap();
        assert_eq!(Null::new().evaluate(&board, &map), 0);
    }
}
