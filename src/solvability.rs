//! Parity-based solvability pre-check for the classic single-blank puzzle.
//!
//! The check assumes a *standard* goal (tiles in ascending order, blank in
//! the last cell) on a square grid with exactly one blank. For generalized
//! goals or multi-blank boards it does not apply; callers there skip the
//! check and rely on search exhaustion to detect unsolvability.

use crate::board::{BLANK, Board};

/// Count pairs of tiles out of their relative goal order. O(k^2) pairwise
/// comparison over the k non-blank tiles, fine at puzzle scale.
pub fn count_inversions(tiles: &[u16]) -> usize {
    let mut count = 0;
    for i in 0..tiles.len() {
        for j in i + 1..tiles.len() {
            if tiles[i] > tiles[j] {
                count += 1;
            }
        }
    }
    count
}

/// Row of the blank counted from the bottom, 1-indexed: row 0 from the top
/// maps to N, row N-1 maps to 1.
fn blank_row_from_bottom(board: &Board) -> usize {
    let (row, _) = board.blanks()[0];
    board.rows() - row as usize
}

/// Decide, without searching, whether the standard goal is reachable.
///
/// - N odd: solvable iff the inversion count is even.
/// - N even: blank on an odd row from the bottom requires even inversions;
///   blank on an even row from the bottom requires odd inversions.
pub fn is_solvable_standard(board: &Board) -> bool {
    debug_assert_eq!(board.rows(), board.cols());
    debug_assert_eq!(board.blanks().len(), 1);

    let tiles: Vec<u16> = board
        .cells()
        .iter()
        .copied()
        .filter(|&t| t != BLANK)
        .collect();
    let inversions = count_inversions(&tiles);

    if board.rows() % 2 == 1 {
        inversions % 2 == 0
    } else if blank_row_from_bottom(board) % 2 == 1 {
        inversions % 2 == 0
    } else {
        inversions % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_inversions() {
        assert_eq!(count_inversions(&[]), 0);
        assert_eq!(count_inversions(&[1, 2, 3]), 0);
        assert_eq!(count_inversions(&[2, 1, 3]), 1);
        assert_eq!(count_inversions(&[3, 2, 1]), 3);
    }

    #[test]
    fn test_blank_row_from_bottom() {
        let top = Board::from_text(". 1 2\n3 4 5\n6 7 8").unwrap();
        assert_eq!(blank_row_from_bottom(&top), 3);
        let bottom = Board::standard(3, 3);
        assert_eq!(blank_row_from_bottom(&bottom), 1);
    }

    #[test]
    fn test_goal_is_solvable() {
        assert!(is_solvable_standard(&Board::standard(3, 3)));
        assert!(is_solvable_standard(&Board::standard(4, 4)));
    }

    #[test]
    fn test_odd_grid_single_transposition_unsolvable() {
        // One swapped pair gives one inversion; odd inversions on an odd
        // grid are unreachable.
        let board = Board::from_text("2 1 3\n4 5 6\n7 8 .").unwrap();
        assert!(!is_solvable_standard(&board));
    }

    #[test]
    fn test_even_grid_blank_even_row_odd_inversions() {
        // Blank at row 2 (2nd row from the bottom, even); tiles flatten to
        // [.., 11, 13, 14, 15, 12] which has 3 inversions (odd). Solvable.
        let board = Board::from_text("1 2 3 4\n5 6 7 8\n9 10 . 11\n13 14 15 12").unwrap();
        assert!(is_solvable_standard(&board));
    }

    #[test]
    fn test_even_grid_blank_odd_row_even_inversions() {
        // Blank on the 3rd row from the bottom (odd); 12 inversions (even).
        let board = Board::from_text("5 1 2 3\n. 6 7 4\n9 10 11 8\n13 14 15 12").unwrap();
        assert!(is_solvable_standard(&board));
    }

    #[test]
    fn test_even_grid_swapped_pair_unsolvable() {
        // Standard goal with 14 and 15 swapped: 1 inversion, blank on the
        // 1st row from the bottom (odd). Unsolvable.
        let board = Board::from_text("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 15 14 .").unwrap();
        assert!(!is_solvable_standard(&board));
    }
}
