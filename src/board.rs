use arrayvec::ArrayVec;
use std::fmt;

/// Tile identifier reserved for an empty, slidable cell.
pub const BLANK: u16 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// (row delta, column delta) of a tile sliding in this direction.
    fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// One move: `tile` slides one cell in `direction`, into a blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub tile: u16,
    pub direction: Direction,
}

/// A full grid configuration. Tiles are stored row-major; equality and
/// hashing are structural, so boards can key visited/cost tables directly.
/// Boards are never mutated after construction; every slide produces a new
/// board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u8,
    cols: u8,
    cells: Vec<u16>,
}

impl Board {
    /// Build a board from rows of tile identifiers. Requires a non-empty
    /// rectangular grid with at least one blank and no repeated non-blank
    /// tile.
    pub fn from_rows(rows: &[Vec<u16>]) -> Result<Self, String> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err("Empty board".to_string());
        }
        let cols = rows[0].len();
        if rows.len() > u8::MAX as usize || cols > u8::MAX as usize {
            return Err(format!(
                "Board dimensions {}x{} exceed maximum size {}",
                rows.len(),
                cols,
                u8::MAX
            ));
        }
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(format!(
                    "Row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    cols
                ));
            }
        }

        let cells: Vec<u16> = rows.iter().flatten().copied().collect();

        let mut tiles: Vec<u16> = cells.iter().copied().filter(|&t| t != BLANK).collect();
        if tiles.len() == cells.len() {
            return Err("Board has no blank cell".to_string());
        }
        tiles.sort_unstable();
        for pair in tiles.windows(2) {
            if pair[0] == pair[1] {
                return Err(format!("Duplicate tile {}", pair[0]));
            }
        }

        Ok(Board {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        })
    }

    /// Parse a board from text: one row per line, cells separated by
    /// whitespace, `.` or `_` for the blank.
    pub fn from_text(text: &str) -> Result<Self, String> {
        let mut rows = Vec::new();
        for line in text.lines() {
            let mut row = Vec::new();
            for token in line.split_whitespace() {
                let tile = match token {
                    "." | "_" => BLANK,
                    _ => token
                        .parse::<u16>()
                        .map_err(|_| format!("Invalid tile '{}'", token))?,
                };
                row.push(tile);
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        Self::from_rows(&rows)
    }

    /// The standard goal: tiles 1..R*C-1 in ascending order, blank last.
    pub fn standard(rows: u8, cols: u8) -> Board {
        let count = rows as usize * cols as usize;
        let mut cells: Vec<u16> = (1..count as u16).collect();
        cells.push(BLANK);
        Board { rows, cols, cells }
    }

    pub fn is_standard(&self) -> bool {
        *self == Board::standard(self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    pub fn tile(&self, row: usize, col: usize) -> u16 {
        self.cells[row * self.cols as usize + col]
    }

    /// Positions of all blank cells, in row-major order.
    pub fn blanks(&self) -> Vec<(u8, u8)> {
        let mut blanks = Vec::new();
        for (idx, &tile) in self.cells.iter().enumerate() {
            if tile == BLANK {
                let row = idx / self.cols as usize;
                let col = idx % self.cols as usize;
                blanks.push((row as u8, col as u8));
            }
        }
        blanks
    }

    /// The cell a tile would slide out of when moving in `dir` into the cell
    /// at (row, col). Returns None when that cell falls outside the grid.
    fn source_cell(&self, (row, col): (u8, u8), dir: Direction) -> Option<(u8, u8)> {
        let (dr, dc) = dir.delta();
        let src_row = row as i32 - dr as i32;
        let src_col = col as i32 - dc as i32;
        if src_row >= 0 && src_col >= 0 && src_row < self.rows as i32 && src_col < self.cols as i32
        {
            Some((src_row as u8, src_col as u8))
        } else {
            None
        }
    }

    /// All legal slides into the blank at the given position: for each of
    /// the four directions, the adjacent source cell must exist and hold a
    /// tile (a blank never slides into another blank).
    pub fn slides_at(&self, blank: (u8, u8)) -> ArrayVec<Slide, 4> {
        debug_assert_eq!(self.tile(blank.0 as usize, blank.1 as usize), BLANK);
        let mut slides = ArrayVec::new();
        for dir in ALL_DIRECTIONS {
            if let Some((src_row, src_col)) = self.source_cell(blank, dir) {
                let tile = self.tile(src_row as usize, src_col as usize);
                if tile != BLANK {
                    slides.push(Slide {
                        tile,
                        direction: dir,
                    });
                }
            }
        }
        slides
    }

    /// Apply a slide into the blank at the given position, producing the
    /// successor board. Panics if the slide is not legal for this board.
    pub fn apply(&self, blank: (u8, u8), slide: Slide) -> Board {
        let src = self
            .source_cell(blank, slide.direction)
            .unwrap_or_else(|| panic!("Slide {:?} out of bounds at {:?}", slide, blank));
        let src_idx = src.0 as usize * self.cols as usize + src.1 as usize;
        let blank_idx = blank.0 as usize * self.cols as usize + blank.1 as usize;
        assert_eq!(
            self.cells[src_idx], slide.tile,
            "Slide {:?} does not match tile at {:?}",
            slide, src
        );
        assert_eq!(self.cells[blank_idx], BLANK, "No blank at {:?}", blank);

        let mut cells = self.cells.clone();
        cells.swap(src_idx, blank_idx);
        Board {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Reject malformed initial/goal pairs before any search: both boards
    /// must share dimensions and hold exactly the same multiset of tiles
    /// (every non-blank tile once, equal blank counts).
    pub fn validate_against(&self, goal: &Board) -> Result<(), String> {
        if self.rows != goal.rows || self.cols != goal.cols {
            return Err(format!(
                "Dimension mismatch: {}x{} vs {}x{}",
                self.rows, self.cols, goal.rows, goal.cols
            ));
        }
        let mut ours: Vec<u16> = self.cells.clone();
        let mut theirs: Vec<u16> = goal.cells.clone();
        ours.sort_unstable();
        theirs.sort_unstable();
        if ours != theirs {
            return Err("Tile sets differ between initial and goal boards".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cells.iter().max().map_or(1, |t| t.to_string().len());
        for row in 0..self.rows as usize {
            for col in 0..self.cols as usize {
                if col > 0 {
                    write!(f, " ")?;
                }
                let tile = self.tile(row, col);
                if tile == BLANK {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{:>width$}", tile)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_board() {
        let board = Board::from_text("1 2 3\n4 5 6\n7 8 .").unwrap();
        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 3);
        assert_eq!(board.tile(0, 0), 1);
        assert_eq!(board.tile(2, 2), BLANK);
        assert!(board.is_standard());
    }

    #[test]
    fn test_parse_underscore_blank() {
        let board = Board::from_text("1 _\n2 3").unwrap();
        assert_eq!(board.tile(0, 1), BLANK);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Board::from_text("").is_err());
        assert!(Board::from_text("1 2\n3").is_err());
        assert!(Board::from_text("1 2\n3 4").is_err()); // no blank
        assert!(Board::from_text("1 1\n2 .").is_err()); // duplicate tile
        assert!(Board::from_text("1 x\n2 .").is_err());
    }

    #[test]
    fn test_standard_board() {
        let board = Board::standard(4, 4);
        assert_eq!(board.tile(0, 0), 1);
        assert_eq!(board.tile(3, 2), 15);
        assert_eq!(board.tile(3, 3), BLANK);
        assert!(board.is_standard());
    }

    #[test]
    fn test_blanks_row_major_order() {
        let board = Board::from_text(". 1\n2 .").unwrap();
        assert_eq!(board.blanks(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_slides_at_corner() {
        // Blank in the bottom-right corner: the tile above slides down, the
        // tile to the left slides right.
        let board = Board::standard(3, 3);
        assert_eq!(
            slides_sorted(&board, (2, 2)),
            vec![
                Slide {
                    tile: 6,
                    direction: Direction::Down
                },
                Slide {
                    tile: 8,
                    direction: Direction::Right
                },
            ]
        );
    }

    #[test]
    fn test_slides_at_center() {
        let board = Board::from_text("1 2 3\n4 . 5\n6 7 8").unwrap();
        assert_eq!(slides_sorted(&board, (1, 1)).len(), 4);
    }

    #[test]
    fn test_slides_skip_adjacent_blank() {
        let board = Board::from_text(". . 1\n2 3 4\n5 6 7").unwrap();
        // The blank at (0, 1) has another blank to its left, so only the
        // tile to its right and the tile below can slide in.
        assert_eq!(
            slides_sorted(&board, (0, 1)),
            vec![
                Slide {
                    tile: 1,
                    direction: Direction::Left
                },
                Slide {
                    tile: 3,
                    direction: Direction::Up
                },
            ]
        );
    }

    #[test]
    fn test_apply_slide() {
        let board = Board::from_text("1 2 3\n4 5 6\n7 8 .").unwrap();
        let next = board.apply(
            (2, 2),
            Slide {
                tile: 6,
                direction: Direction::Down,
            },
        );
        assert_eq!(next.tile(2, 2), 6);
        assert_eq!(next.tile(1, 2), BLANK);
        // Original board untouched
        assert_eq!(board.tile(2, 2), BLANK);
    }

    #[test]
    #[should_panic(expected = "does not match tile")]
    fn test_apply_wrong_tile() {
        let board = Board::standard(3, 3);
        board.apply(
            (2, 2),
            Slide {
                tile: 1,
                direction: Direction::Down,
            },
        );
    }

    #[test]
    fn test_validate_against() {
        let a = Board::standard(4, 4);
        let b = Board::standard(3, 3);
        assert!(a.validate_against(&b).is_err());

        let c = Board::from_text("1 2\n3 .").unwrap();
        let d = Board::from_text("1 4\n3 .").unwrap();
        assert!(c.validate_against(&d).is_err());

        let e = Board::from_text("3 1\n. 2").unwrap();
        assert!(e.validate_against(&Board::standard(2, 2)).is_ok());

        // Blank counts must match too
        let f = Board::from_text("1 2\n3 .").unwrap();
        let g = Board::from_text("1 .\n3 .").unwrap();
        assert!(f.validate_against(&g).is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::from_text("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 15 .").unwrap();
        let expected = " 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14 15  .\n";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_display_wide_nonstandard_tiles() {
        // Tile identifiers may exceed R*C-1; column width must follow the
        // widest tile actually present, not the cell count.
        let board = Board::from_text("1 12\n2 .").unwrap();
        assert_eq!(board.to_string(), " 1 12\n 2  .\n");
    }

    fn slides_sorted(board: &Board, blank: (u8, u8)) -> Vec<Slide> {
        let mut slides: Vec<Slide> = board.slides_at(blank).into_iter().collect();
        slides.sort_by_key(|s| s.tile);
        slides
    }
}
