use ksh_core::board::{Board, BoardError};
use ksh_core::fen::encode_fen;
use ksh_core::game::{CheckStatus, Game, GameConfig, Transition};
use ksh_core::position::{DeactivatedGroups, PositionError};
use ksh_core::types::{Flank, Move, Piece, PieceType, Side, Square};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).expect("valid square")
}

fn game_with(pieces: &[((u8, u8), PieceType, Side)], turn: Side) -> Game {
    let mut board = Board::empty();
    for &((row, col), piece_type, side) in pieces {
        let piece = Piece::new(piece_type, side).with_flank(Flank::for_col(col));
        board.put(piece, sq(row, col)).expect("put");
    }
    Game::from_fen(&encode_fen(&board), turn).expect("encoded board decodes")
}

#[test]
fn selecting_an_own_piece_lists_its_moves() {
    let mut game = Game::new();
    let transition = game.select_or_move(sq(8, 0)).expect("click");
    let Transition::Selected { square, moves } = transition else {
        panic!("expected selection, got {transition:?}");
    };
    assert_eq!(square, sq(8, 0));
    assert!(moves.contains(&sq(7, 1)));
    assert_eq!(game.selected(), Some(sq(8, 0)));
    assert_eq!(game.valid_moves(), moves.as_slice());
}

#[test]
fn clicking_the_selected_square_deselects() {
    let mut game = Game::new();
    game.select_or_move(sq(8, 0)).expect("select");
    assert_eq!(game.select_or_move(sq(8, 0)), Ok(Transition::Deselected));
    assert_eq!(game.selected(), None);
    assert!(game.valid_moves().is_empty());
}

#[test]
fn clicking_an_opponent_piece_without_selection_stays_idle() {
    let mut game = Game::new();
    assert_eq!(game.select_or_move(sq(5, 0)), Ok(Transition::Deselected));
    assert_eq!(game.selected(), None);
    assert_eq!(game.select_or_move(sq(7, 7)), Ok(Transition::Deselected));
}

#[test]
fn clicking_another_own_piece_switches_selection() {
    let mut game = Game::new();
    game.select_or_move(sq(8, 0)).expect("select");
    let transition = game.select_or_move(sq(8, 1)).expect("switch");
    assert!(matches!(
        transition,
        Transition::Selected { square, .. } if square == sq(8, 1)
    ));
    assert_eq!(game.selected(), Some(sq(8, 1)));
}

#[test]
fn clicking_an_unreachable_square_drops_the_selection() {
    let mut game = Game::new();
    game.select_or_move(sq(8, 0)).expect("select");
    assert_eq!(game.select_or_move(sq(6, 0)), Ok(Transition::Deselected));
    assert_eq!(game.selected(), None);
    assert_eq!(game.turn(), Side::Cho);
}

#[test]
fn clicking_a_highlighted_square_moves() {
    let mut game = Game::new();
    game.select_or_move(sq(8, 0)).expect("select");
    let transition = game.select_or_move(sq(7, 1)).expect("move");
    assert_eq!(transition, Transition::Moved(Move::new(sq(8, 0), sq(7, 1))));
    assert_eq!(game.turn(), Side::Han);
    assert_eq!(game.selected(), None);
    assert!(game.valid_moves().is_empty());
    assert_eq!(game.history().len(), 1);
    assert_eq!(
        game.board().get(sq(7, 1)).map(|p| p.piece_type),
        Some(PieceType::Gi)
    );
}

#[test]
fn off_board_clicks_are_rejected() {
    let mut game = Game::new();
    assert_eq!(
        game.select_or_move(Square::new_unchecked(14, 3)),
        Err(PositionError::Board(BoardError::OutOfBounds))
    );
}

#[test]
fn check_is_reported_for_the_side_to_move() {
    let game = game_with(
        &[
            ((2, 7), PieceType::Su, Side::Han),
            ((11, 7), PieceType::Su, Side::Cho),
            ((6, 7), PieceType::Cha, Side::Han),
        ],
        Side::Cho,
    );
    assert_eq!(
        game.check(),
        Some(CheckStatus {
            side: Side::Cho,
            king: sq(11, 7),
        })
    );
    assert!(game.position().in_check(None));
    assert!(!game.position().in_check(Some(Side::Han)));
    assert!(!game.is_checkmate());
}

#[test]
fn moving_out_of_check_clears_it() {
    let mut game = game_with(
        &[
            ((2, 7), PieceType::Su, Side::Han),
            ((11, 7), PieceType::Su, Side::Cho),
            ((6, 7), PieceType::Cha, Side::Han),
        ],
        Side::Cho,
    );
    game.make_move(sq(11, 7), sq(11, 6)).expect("step aside");
    assert_eq!(game.check(), None);
}

#[test]
fn capturing_the_su_locks_the_game() {
    let mut game = game_with(
        &[
            ((2, 7), PieceType::Su, Side::Han),
            ((11, 7), PieceType::Su, Side::Cho),
            ((6, 7), PieceType::Cha, Side::Cho),
        ],
        Side::Cho,
    );
    game.select_or_move(sq(6, 7)).expect("select");
    assert_eq!(
        game.select_or_move(sq(2, 7)),
        Ok(Transition::Moved(Move::new(sq(6, 7), sq(2, 7))))
    );
    assert!(game.is_game_over());
    assert_eq!(game.winner(), Some(Side::Cho));
    assert_eq!(game.check(), None);
    assert_eq!(
        game.select_or_move(sq(11, 7)),
        Err(PositionError::GameAlreadyOver)
    );
    assert!(game.moves().is_empty());
}

#[test]
fn notation_moves_and_undo() {
    let mut game = Game::new();
    let start = game.fen();
    game.make_notation_move("a6b7").expect("first move");
    assert_eq!(game.turn(), Side::Han);
    assert!(matches!(
        game.make_notation_move("a6"),
        Err(PositionError::Notation(_))
    ));
    assert_eq!(
        game.make_notation_move("a6a7"),
        Err(PositionError::IllegalMove)
    );

    game.select_or_move(sq(5, 0)).expect("select han bo");
    game.undo().expect("undo");
    assert_eq!(game.fen(), start);
    assert_eq!(game.turn(), Side::Cho);
    assert_eq!(game.selected(), None);
    assert_eq!(game.undo(), Err(PositionError::EmptyHistory));
}

#[test]
fn reset_returns_to_the_configured_start() {
    let config: GameConfig = serde_json::from_str(r#"{"firstToMove":"han"}"#).expect("config");
    assert_eq!(config.start_position, GameConfig::default().start_position);

    let mut game = Game::with_config(config).expect("game");
    let start = game.fen();
    assert_eq!(game.turn(), Side::Han);
    game.make_move(sq(5, 0), sq(6, 0)).expect("han bo advances");
    game.make_move(sq(8, 0), sq(7, 1)).expect("cho gi advances");

    game.reset();
    assert_eq!(game.fen(), start);
    assert_eq!(game.turn(), Side::Han);
    assert!(game.history().is_empty());
    assert_eq!(game.deactivated(), DeactivatedGroups::default());
}

#[test]
fn malformed_config_is_rejected() {
    let config = GameConfig {
        start_position: "15/15".to_string(),
        first_to_move: Side::Cho,
    };
    assert!(matches!(
        Game::with_config(config),
        Err(PositionError::MalformedEncoding(_))
    ));
}

#[test]
fn snapshot_serializes_for_clients() {
    let mut game = Game::new();
    game.select_or_move(sq(8, 0)).expect("select");
    let snapshot = game.snapshot();
    assert_eq!(snapshot.cells.len(), 86);
    assert_eq!(snapshot.selected, Some(sq(8, 0)));
    assert_eq!(snapshot.legal_moves, game.valid_moves().to_vec());
    assert_eq!(snapshot.fen, game.fen());

    let value = serde_json::to_value(&snapshot).expect("serialize");
    assert_eq!(value["turn"], "cho");
    assert_eq!(value["gameOver"], false);
    assert!(value["winner"].is_null());
    assert!(value["check"].is_null());
    assert_eq!(value["selected"]["row"], 8);
    assert_eq!(value["deactivated"]["hanLeft"], false);
    assert!(value["legalMoves"].is_array());

    let first = &value["cells"][0];
    assert_eq!(first["notation"], "d14");
    assert_eq!(first["side"], "han");
    assert_eq!(first["piece"], "Bok");
    assert_eq!(first["deactivated"], false);
}

#[test]
fn snapshot_marks_deactivated_pieces() {
    let mut game = game_with(
        &[
            ((2, 7), PieceType::Su, Side::Han),
            ((11, 7), PieceType::Su, Side::Cho),
            ((2, 1), PieceType::Jang, Side::Han),
            ((3, 0), PieceType::Ma, Side::Han),
            ((6, 1), PieceType::Cha, Side::Cho),
        ],
        Side::Cho,
    );
    game.make_move(sq(6, 1), sq(2, 1)).expect("capture jang");
    assert!(game.deactivated().han_left);

    let snapshot = game.snapshot();
    let ma = snapshot
        .cells
        .iter()
        .find(|cell| cell.square == sq(3, 0))
        .expect("ma cell");
    assert!(ma.deactivated);
    let su = snapshot
        .cells
        .iter()
        .find(|cell| cell.square == sq(2, 7))
        .expect("su cell");
    assert!(!su.deactivated);

    assert_eq!(game.select_or_move(sq(3, 0)), Ok(Transition::Deselected));
}
