pub mod board;
pub mod constants;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod position;
pub mod snapshot;
pub mod types;
pub mod zone;

pub use board::{Board, BoardError};
pub use fen::{encode_fen, parse_fen, FenError};
pub use game::{CheckStatus, Game, GameConfig, Transition};
pub use movegen::MoveGenerator;
pub use position::{DeactivatedGroups, HistoryEntry, Position, PositionError};
pub use snapshot::Snapshot;
pub use types::{Flank, FlankGroup, Move, Piece, PieceType, Side, Square};
