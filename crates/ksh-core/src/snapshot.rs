use serde::Serialize;

use crate::game::{CheckStatus, Game};
use crate::position::DeactivatedGroups;
use crate::types::{PieceType, Side, Square};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub square: Square,
    pub notation: String,
    pub side: Side,
    pub piece: PieceType,
    pub deactivated: bool,
}

/// Everything a client needs to draw the game, without any internal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub cells: Vec<CellView>,
    pub turn: Side,
    pub game_over: bool,
    pub winner: Option<Side>,
    pub selected: Option<Square>,
    pub legal_moves: Vec<Square>,
    pub deactivated: DeactivatedGroups,
    pub check: Option<CheckStatus>,
    pub fen: String,
}

impl Game {
    pub fn snapshot(&self) -> Snapshot {
        let position = self.position();
        let cells = position
            .board
            .pieces()
            .map(|(square, piece)| CellView {
                square,
                notation: square.to_string(),
                side: piece.side,
                piece: piece.piece_type,
                deactivated: position.is_deactivated(piece),
            })
            .collect();
        Snapshot {
            cells,
            turn: position.turn,
            game_over: position.is_game_over(),
            winner: position.winner,
            selected: self.selected(),
            legal_moves: self.valid_moves().to_vec(),
            deactivated: position.deactivated,
            check: self.check(),
            fen: position.fen(),
        }
    }
}
