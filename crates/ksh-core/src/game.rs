use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError};
use crate::constants::START_POSITION;
use crate::fen::parse_fen;
use crate::movegen::{checked_king, in_check};
use crate::notation::parse_notation;
use crate::position::{DeactivatedGroups, HistoryEntry, Position, PositionError};
use crate::types::{Move, MoveList, Side, Square, SquareList};

impl Position {
    pub fn in_check(&self, side: Option<Side>) -> bool {
        in_check(&self.board, side.unwrap_or(self.turn))
    }

    pub fn checked_king(&self, side: Option<Side>) -> Option<Square> {
        checked_king(&self.board, side.unwrap_or(self.turn))
    }

    /// Informational only: the game ends when a Su is captured, not on mate.
    pub fn is_checkmate(&self) -> bool {
        !self.is_game_over() && self.in_check(None) && self.moves().is_empty()
    }
}

/// Setup knobs a host can load from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub start_position: String,
    pub first_to_move: Side,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_position: START_POSITION.to_string(),
            first_to_move: Side::Cho,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Selected { square: Square, moves: SquareList },
    Deselected,
    Moved(Move),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckStatus {
    pub side: Side,
    pub king: Square,
}

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    start: Board,
    first_to_move: Side,
    selected: Option<Square>,
    valid_moves: SquareList,
    check: Option<CheckStatus>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    pub fn with_config(config: GameConfig) -> Result<Self, PositionError> {
        let board = parse_fen(&config.start_position)?;
        Ok(Self::from_position(Position::from_board(
            board,
            config.first_to_move,
        )))
    }

    pub fn from_fen(fen: &str, turn: Side) -> Result<Self, PositionError> {
        Ok(Self::from_position(Position::from_fen(fen, turn)?))
    }

    fn from_position(position: Position) -> Self {
        let check = position
            .checked_king(None)
            .map(|king| CheckStatus {
                side: position.turn,
                king,
            });
        Self {
            start: position.board.clone(),
            first_to_move: position.turn,
            position,
            selected: None,
            valid_moves: SquareList::new(),
            check,
        }
    }

    /// One click: select an own usable piece, move the selected piece onto a
    /// highlighted square, or drop the selection.
    pub fn select_or_move(&mut self, square: Square) -> Result<Transition, PositionError> {
        if !square.is_valid() {
            return Err(BoardError::OutOfBounds.into());
        }
        if self.position.is_game_over() {
            return Err(PositionError::GameAlreadyOver);
        }

        if let Some(from) = self.selected {
            if self.valid_moves.contains(&square) {
                self.apply(from, square)?;
                return Ok(Transition::Moved(Move::new(from, square)));
            }
            if from == square {
                return Ok(self.deselect());
            }
        }

        let selectable = self.position.board.get(square).is_some_and(|piece| {
            piece.side == self.position.turn && !self.position.is_deactivated(piece)
        });
        if !selectable {
            return Ok(self.deselect());
        }

        let moves = self.position.legal_moves_from(square);
        trace!("selected {square} with {} moves", moves.len());
        self.selected = Some(square);
        self.valid_moves = moves.clone();
        Ok(Transition::Selected { square, moves })
    }

    pub fn make_move(&mut self, from: Square, to: Square) -> Result<(), PositionError> {
        self.apply(from, to)
    }

    pub fn make_notation_move(&mut self, notation: &str) -> Result<(), PositionError> {
        let mv = parse_notation(notation)?;
        self.apply(mv.from, mv.to)
    }

    pub fn undo(&mut self) -> Result<(), PositionError> {
        self.position.unmake_move()?;
        self.clear_selection();
        self.refresh_check();
        Ok(())
    }

    pub fn reset(&mut self) {
        debug!("reset to start position");
        self.position = Position::from_board(self.start.clone(), self.first_to_move);
        self.clear_selection();
        self.refresh_check();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn turn(&self) -> Side {
        self.position.turn
    }

    pub fn fen(&self) -> String {
        self.position.fen()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn valid_moves(&self) -> &[Square] {
        &self.valid_moves
    }

    pub fn check(&self) -> Option<CheckStatus> {
        self.check
    }

    pub fn winner(&self) -> Option<Side> {
        self.position.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn deactivated(&self) -> DeactivatedGroups {
        self.position.deactivated
    }

    pub fn moves(&self) -> MoveList {
        self.position.moves()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.position.history
    }

    fn apply(&mut self, from: Square, to: Square) -> Result<(), PositionError> {
        self.position.make_move(from, to)?;
        self.clear_selection();
        self.refresh_check();
        Ok(())
    }

    fn deselect(&mut self) -> Transition {
        self.clear_selection();
        Transition::Deselected
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    fn refresh_check(&mut self) {
        self.check = if self.position.is_game_over() {
            None
        } else {
            self.position.checked_king(None).map(|king| CheckStatus {
                side: self.position.turn,
                king,
            })
        };
        if let Some(status) = self.check {
            debug!("{:?} in check at {}", status.side, status.king);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
