use crate::board::Board;
use std::fmt;
use std::fs;
use std::io;

/// Error type for board file parsing operations.
#[derive(Debug)]
pub enum BoardsError {
    /// IO error when reading from file
    Io(io::Error),
    /// Invalid board content
    InvalidBoard(String),
}

impl fmt::Display for BoardsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardsError::Io(err) => write!(f, "IO error: {}", err),
            BoardsError::InvalidBoard(msg) => write!(f, "Invalid board: {}", msg),
        }
    }
}

impl From<io::Error> for BoardsError {
    fn from(err: io::Error) -> Self {
        BoardsError::Io(err)
    }
}

impl From<String> for BoardsError {
    fn from(err: String) -> Self {
        BoardsError::InvalidBoard(err)
    }
}

/// A collection of puzzle boards loaded from one file.
#[derive(Debug)]
pub struct Boards {
    boards: Vec<Board>,
}

impl Boards {
    /// Parse boards from a string.
    ///
    /// The format uses:
    /// - one row of whitespace-separated tiles per line, `.` or `_` for a
    ///   blank cell
    /// - lines starting with `;` as separators/comments
    /// - empty lines between boards (optional)
    pub fn from_text(contents: &str) -> Result<Self, BoardsError> {
        let mut boards = Vec::new();
        let mut current_board = String::new();

        for line in contents.lines() {
            // Comment lines end the current board
            if line.trim_start().starts_with(';') {
                if !current_board.is_empty() {
                    boards.push(Board::from_text(&current_board)?);
                    current_board.clear();
                }
                continue;
            }

            if line.trim().is_empty() {
                if !current_board.is_empty() {
                    boards.push(Board::from_text(&current_board)?);
                    current_board.clear();
                }
                continue;
            }

            current_board.push_str(line);
            current_board.push('\n');
        }

        // Don't forget the last board if the file doesn't end with an empty
        // line
        if !current_board.is_empty() {
            boards.push(Board::from_text(&current_board)?);
        }

        Ok(Boards { boards })
    }

    /// Parse boards from a text file.
    pub fn from_file(path: &str) -> Result<Self, BoardsError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Get the nth board (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    /// Get the number of boards.
    pub fn len(&self) -> usize {
        self.boards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_basic() {
        let contents = "; easy
1 2 3 4
5 6 7 8
9 10 11 .
13 14 15 12

; goal
1 2 3 4
5 6 7 8
9 10 11 12
13 14 15 .
";
        let boards = Boards::from_text(contents).unwrap();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards.get(0).unwrap().tile(2, 3), 0);
        assert!(boards.get(1).unwrap().is_standard());
        assert!(boards.get(2).is_none());
    }

    #[test]
    fn test_from_text_no_trailing_newline() {
        let contents = "1 2\n3 .";
        let boards = Boards::from_text(contents).unwrap();
        assert_eq!(boards.len(), 1);
    }

    #[test]
    fn test_from_text_invalid_board() {
        let contents = "; ragged rows
1 2 3
4 5
";
        let result = Boards::from_text(contents);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            BoardsError::InvalidBoard(_)
        ));
    }

    #[test]
    fn test_from_file_no_file() {
        let result = Boards::from_file("nonexistent_file.txt");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), BoardsError::Io(_)));
    }
}
