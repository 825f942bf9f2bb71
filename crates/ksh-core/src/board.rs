use crate::constants::{BOARD_COLS, BOARD_ROWS, START_POSITION};
use crate::fen::parse_fen;
use crate::types::{Piece, PieceType, Side, Square};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("square out of bounds")]
    OutOfBounds,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_COLS]; BOARD_ROWS],
}

impl Board {
    /// The standard opening layout.
    pub fn new() -> Self {
        parse_fen(START_POSITION).expect("start position must decode")
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_COLS]; BOARD_ROWS],
        }
    }

    pub fn get(&self, square: Square) -> Option<&Piece> {
        let (r, c) = square_coords(square)?;
        self.cells[r][c].as_ref()
    }

    pub fn piece_at(&self, square: Square) -> Result<Option<Piece>, BoardError> {
        let (r, c) = square_coords(square).ok_or(BoardError::OutOfBounds)?;
        Ok(self.cells[r][c])
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        square.is_valid() && self.get(square).is_none()
    }

    /// Places `piece`, returning whatever occupied the cell before.
    pub fn put(&mut self, piece: Piece, square: Square) -> Result<Option<Piece>, BoardError> {
        let (r, c) = square_coords(square).ok_or(BoardError::OutOfBounds)?;
        Ok(self.cells[r][c].replace(piece))
    }

    pub fn remove(&mut self, square: Square) -> Result<Option<Piece>, BoardError> {
        let (r, c) = square_coords(square).ok_or(BoardError::OutOfBounds)?;
        Ok(self.cells[r][c].take())
    }

    /// Moves whatever stands on `from` onto `to` and returns the displaced
    /// occupant of `to`. Moving from an empty cell clears `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Result<Option<Piece>, BoardError> {
        let (fr, fc) = square_coords(from).ok_or(BoardError::OutOfBounds)?;
        let (tr, tc) = square_coords(to).ok_or(BoardError::OutOfBounds)?;
        let moving = self.cells[fr][fc].take();
        let captured = std::mem::replace(&mut self.cells[tr][tc], moving);
        Ok(captured)
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.as_ref()
                    .map(|piece| (Square::new_unchecked(r as u8, c as u8), piece))
            })
        })
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.side == side)
    }

    pub fn find_king(&self, side: Side) -> Option<Square> {
        self.pieces_of(side)
            .find(|(_, piece)| piece.piece_type == PieceType::Su)
            .map(|(square, _)| square)
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn square_coords(square: Square) -> Option<(usize, usize)> {
    if !square.is_valid() {
        return None;
    }
    Some((usize::from(square.row), usize::from(square.col)))
}
