//! Board value objects
//!
//! The board is a flat array of nine cells. The client never computes a board:
//! every snapshot is taken wholesale from a server payload.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Symbol;

/// Number of cells on a board
pub const BOARD_SIZE: usize = 9;

/// Contents of a single cell
///
/// On the wire an empty cell is `""` (older servers send `null`); occupied
/// cells carry the symbol name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "String")]
pub enum Cell {
    #[default]
    Empty,
    Taken(Symbol),
}

impl Cell {
    /// Text shown for this cell
    pub fn as_str(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Taken(symbol) => symbol.as_str(),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl TryFrom<Option<String>> for Cell {
    type Error = DomainError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(Cell::Empty),
            Some(other) => other
                .parse::<Symbol>()
                .map(Cell::Taken)
                .map_err(|_| DomainError::parse(format!("Invalid cell value: {}", other))),
        }
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.as_str().to_string()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a cell on the board, `0..=8` in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CellIndex(u8);

impl CellIndex {
    pub fn new(index: u8) -> Result<Self, DomainError> {
        if usize::from(index) < BOARD_SIZE {
            Ok(Self(index))
        } else {
            Err(DomainError::validation(format!(
                "Cell index {} is outside 0..{}",
                index, BOARD_SIZE
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }

    /// All nine positions in index order
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..BOARD_SIZE as u8).map(CellIndex)
    }
}

impl TryFrom<u8> for CellIndex {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CellIndex> for u8 {
    fn from(index: CellIndex) -> Self {
        index.0
    }
}

/// Parses the string form found in a `data-index` attribute
impl std::str::FromStr for CellIndex {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u8 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::parse(format!("Invalid cell index: {:?}", s)))?;
        Self::new(raw)
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full board as last reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardSnapshot {
    cells: [Cell; BOARD_SIZE],
}

impl BoardSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cell(&self, index: CellIndex) -> Cell {
        self.cells[index.as_usize()]
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Cells paired with their positions, in index order
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Cell)> + '_ {
        CellIndex::all().zip(self.cells.iter().copied())
    }
}

impl From<[Cell; BOARD_SIZE]> for BoardSnapshot {
    fn from(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }
}

impl TryFrom<Vec<Cell>> for BoardSnapshot {
    type Error = DomainError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        let actual = cells.len();
        let cells: [Cell; BOARD_SIZE] =
            cells.try_into().map_err(|_| DomainError::BoardSize {
                expected: BOARD_SIZE,
                actual,
            })?;
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_wire_values() {
        let cells: Vec<Cell> = serde_json::from_str(r#"["", null, "x", "o"]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Empty,
                Cell::Empty,
                Cell::Taken(Symbol::X),
                Cell::Taken(Symbol::O)
            ]
        );
    }

    #[test]
    fn test_cell_rejects_unknown_value() {
        let result: Result<Cell, _> = serde_json::from_str(r#""q""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_cell_index_parses_attribute_strings() {
        assert_eq!("4".parse::<CellIndex>().unwrap().value(), 4);
        assert_eq!(" 8 ".parse::<CellIndex>().unwrap().value(), 8);
        assert!("9".parse::<CellIndex>().is_err());
        assert!("-1".parse::<CellIndex>().is_err());
        assert!("".parse::<CellIndex>().is_err());
        assert!("four".parse::<CellIndex>().is_err());
    }

    #[test]
    fn test_cell_index_all_is_ordered() {
        let all: Vec<u8> = CellIndex::all().map(CellIndex::value).collect();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_board_requires_nine_cells() {
        let err = BoardSnapshot::try_from(vec![Cell::Empty; 8]).unwrap_err();
        assert_eq!(
            err,
            DomainError::BoardSize {
                expected: 9,
                actual: 8
            }
        );
        assert!(BoardSnapshot::try_from(vec![Cell::Empty; 10]).is_err());
        assert!(BoardSnapshot::try_from(vec![Cell::Empty; 9]).is_ok());
    }

    #[test]
    fn test_board_keeps_index_order() {
        let mut cells = vec![Cell::Empty; 9];
        cells[4] = Cell::Taken(Symbol::X);
        cells[8] = Cell::Taken(Symbol::O);
        let board = BoardSnapshot::try_from(cells).unwrap();

        assert_eq!(board.cell(CellIndex::new(4).unwrap()), Cell::Taken(Symbol::X));
        assert_eq!(board.cell(CellIndex::new(8).unwrap()), Cell::Taken(Symbol::O));
        assert_eq!(board.iter().filter(|(_, c)| !c.is_empty()).count(), 2);
    }
}
