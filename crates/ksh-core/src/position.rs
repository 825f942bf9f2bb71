use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::fen::{encode_fen, parse_fen, FenError};
use crate::movegen::{all_legal_moves, legal_moves};
use crate::notation::{move_to_notation, NotationError};
use crate::types::{Flank, FlankGroup, Move, MoveList, Piece, PieceType, Side, Square, SquareList};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("destination holds a piece of the moving side")]
    OccupiedBySelf,
    #[error("piece does not belong to the side to move")]
    NotMoversTurn,
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("piece belongs to a deactivated flank")]
    PieceDeactivated,
    #[error("illegal move")]
    IllegalMove,
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] FenError),
    #[error("{0}")]
    Notation(#[from] NotationError),
    #[error("no move to unmake")]
    EmptyHistory,
}

/// Switched-off flanks. Center groups have no entry and are never switched
/// off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivatedGroups {
    pub cho_left: bool,
    pub cho_right: bool,
    pub han_left: bool,
    pub han_right: bool,
}

impl DeactivatedGroups {
    pub const fn get(&self, group: FlankGroup) -> bool {
        match (group.side, group.flank) {
            (Side::Cho, Flank::Left) => self.cho_left,
            (Side::Cho, Flank::Right) => self.cho_right,
            (Side::Han, Flank::Left) => self.han_left,
            (Side::Han, Flank::Right) => self.han_right,
            (_, Flank::Center) => false,
        }
    }

    pub fn set(&mut self, group: FlankGroup, value: bool) {
        let slot = match (group.side, group.flank) {
            (Side::Cho, Flank::Left) => &mut self.cho_left,
            (Side::Cho, Flank::Right) => &mut self.cho_right,
            (Side::Han, Flank::Left) => &mut self.han_left,
            (Side::Han, Flank::Right) => &mut self.han_right,
            (_, Flank::Center) => return,
        };
        *slot = value;
    }

    /// Su and Jang stay usable even when their flank is switched off.
    pub const fn is_deactivated(&self, piece: &Piece) -> bool {
        !piece.piece_type.is_royal() && self.get(piece.group())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub side: Side,
    pub piece_type: PieceType,
    pub from: Square,
    pub to: Square,
    pub notation: String,
    pub fen_before: String,
    pub fen_after: String,
    pub captured: Option<PieceType>,
    pub deactivated_after: DeactivatedGroups,
    #[serde(skip)]
    pub moved_piece: Piece,
    #[serde(skip)]
    pub captured_piece: Option<Piece>,
    #[serde(skip)]
    pub deactivated_before: DeactivatedGroups,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub turn: Side,
    pub deactivated: DeactivatedGroups,
    pub winner: Option<Side>,
    pub history: Vec<HistoryEntry>,
}

impl Position {
    pub fn new() -> Self {
        Self::from_board(Board::new(), Side::Cho)
    }

    pub fn from_board(board: Board, turn: Side) -> Self {
        Self {
            board,
            turn,
            deactivated: DeactivatedGroups::default(),
            winner: None,
            history: Vec::new(),
        }
    }

    /// The encoding carries neither the deactivation table nor back-links, so
    /// a decoded position starts with every flank active.
    pub fn from_fen(fen: &str, turn: Side) -> Result<Self, PositionError> {
        Ok(Self::from_board(parse_fen(fen)?, turn))
    }

    pub fn fen(&self) -> String {
        encode_fen(&self.board)
    }

    pub const fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub const fn is_deactivated(&self, piece: &Piece) -> bool {
        self.deactivated.is_deactivated(piece)
    }

    /// Legal destinations of the piece on `square`; empty unless it is a
    /// usable piece of the side to move in a game still in progress.
    pub fn legal_moves_from(&self, square: Square) -> SquareList {
        match self.board.get(square) {
            Some(piece)
                if !self.is_game_over()
                    && piece.side == self.turn
                    && !self.is_deactivated(piece) =>
            {
                legal_moves(&self.board, square)
            }
            _ => SquareList::new(),
        }
    }

    pub fn moves(&self) -> MoveList {
        if self.is_game_over() {
            return MoveList::new();
        }
        all_legal_moves(&self.board, self.turn, &self.deactivated)
    }

    pub fn make_move(&mut self, from: Square, to: Square) -> Result<(), PositionError> {
        if self.is_game_over() {
            return Err(PositionError::GameAlreadyOver);
        }
        let piece = self.board.piece_at(from)?;
        let target = self.board.piece_at(to)?;
        let piece = piece.ok_or(PositionError::IllegalMove)?;
        if piece.side != self.turn {
            return Err(PositionError::NotMoversTurn);
        }
        if self.is_deactivated(&piece) {
            return Err(PositionError::PieceDeactivated);
        }
        if target.is_some_and(|t| t.side == piece.side) {
            return Err(PositionError::OccupiedBySelf);
        }
        if !legal_moves(&self.board, from).contains(&to) {
            return Err(PositionError::IllegalMove);
        }
        self.apply_move(piece, from, to)
    }

    pub fn unmake_move(&mut self) -> Result<(), PositionError> {
        let entry = self.history.pop().ok_or(PositionError::EmptyHistory)?;
        self.board.put(entry.moved_piece, entry.from)?;
        match entry.captured_piece {
            Some(captured) => {
                self.board.put(captured, entry.to)?;
            }
            None => {
                self.board.remove(entry.to)?;
            }
        }
        self.deactivated = entry.deactivated_before;
        self.turn = entry.side;
        self.winner = None;
        debug!("undid {}", entry.notation);
        Ok(())
    }

    /// Capturing a center-flank Jang leaves the capturer's back-link as it
    /// was, so a group it switched off earlier can still be reactivated.
    fn apply_move(&mut self, piece: Piece, from: Square, to: Square) -> Result<(), PositionError> {
        let fen_before = self.fen();
        let deactivated_before = self.deactivated;
        let captured = self.board.piece_at(to)?;

        let mut mover = piece;
        mover.has_moved = true;

        if let Some(captured) = captured {
            match captured.piece_type {
                PieceType::Su => {
                    self.winner = Some(piece.side);
                    debug!("{:?} captured the {:?} Su", piece.side, captured.side);
                }
                PieceType::Jang if captured.flank != Flank::Center => {
                    let group = captured.group();
                    self.deactivated.set(group, true);
                    mover.captured_group = Some(group);
                    debug!("{:?} {:?} flank deactivated", group.side, group.flank);
                }
                _ => {}
            }
            if let Some(group) = captured.captured_group {
                self.deactivated.set(group, false);
                debug!("{:?} {:?} flank reactivated", group.side, group.flank);
            }
        }

        self.board.remove(from)?;
        self.board.put(mover, to)?;

        let notation = move_to_notation(&Move::new(from, to));
        debug!("{:?} {} {notation}", piece.side, piece.piece_type.korean_name());
        self.history.push(HistoryEntry {
            side: piece.side,
            piece_type: piece.piece_type,
            from,
            to,
            notation,
            fen_before,
            fen_after: self.fen(),
            captured: captured.map(|c| c.piece_type),
            deactivated_after: self.deactivated,
            moved_piece: piece,
            captured_piece: captured,
            deactivated_before,
        });

        if !self.is_game_over() {
            self.turn = self.turn.opposite();
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
