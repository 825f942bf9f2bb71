use ksh_core::constants::START_POSITION;
use ksh_core::game::Game;
use ksh_core::position::Position;
use ksh_core::types::{PieceType, Side};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fixture {
    start: StartFixture,
    line: Vec<LineStep>,
    legal_move_count_after_line: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartFixture {
    fen: String,
    piece_count: usize,
    legal_move_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineStep {
    notation: String,
    fen_after: String,
    captured: Option<PieceType>,
}

fn load_fixture() -> Fixture {
    let path = format!(
        "{}/tests/fixtures/positions.json",
        env!("CARGO_MANIFEST_DIR")
    );
    let raw = std::fs::read_to_string(path).expect("read fixture");
    serde_json::from_str(&raw).expect("parse fixture")
}

#[test]
fn start_position_matches_baseline() {
    let fixture = load_fixture();
    let game = Game::new();
    assert_eq!(game.fen(), fixture.start.fen);
    assert_eq!(game.board().piece_count(), fixture.start.piece_count);
    assert_eq!(game.moves().len(), fixture.start.legal_move_count);
    assert_eq!(game.turn(), Side::Cho);
    assert_eq!(game.check(), None);
}

#[test]
fn replayed_line_matches_baseline() {
    let fixture = load_fixture();
    let mut game = Game::new();

    for step in &fixture.line {
        game.make_notation_move(&step.notation)
            .unwrap_or_else(|err| panic!("{} rejected: {err}", step.notation));
        assert_eq!(game.fen(), step.fen_after, "after {}", step.notation);

        let entry = game.history().last().expect("history entry");
        assert_eq!(entry.notation, step.notation);
        assert_eq!(entry.captured, step.captured, "capture on {}", step.notation);
        assert_eq!(entry.fen_after, step.fen_after);
    }

    assert_eq!(game.turn(), Side::Han);
    assert_eq!(game.moves().len(), fixture.legal_move_count_after_line);
}

#[test]
fn replayed_line_unwinds_to_start() {
    let fixture = load_fixture();
    let mut game = Game::new();
    for step in &fixture.line {
        game.make_notation_move(&step.notation).expect("replay");
    }

    for step in fixture.line.iter().rev() {
        assert_eq!(game.fen(), step.fen_after);
        game.undo().expect("undo");
    }
    assert_eq!(game.fen(), fixture.start.fen);
    assert_eq!(game.turn(), Side::Cho);
    assert!(game.history().is_empty());
}

#[test]
fn decoded_line_positions_continue_play() {
    let fixture = load_fixture();
    let last = fixture.line.last().expect("non-empty line");
    let position = Position::from_fen(&last.fen_after, Side::Han).expect("decode");
    assert_eq!(position.moves().len(), fixture.legal_move_count_after_line);
}

#[test]
fn history_serializes_without_undo_state() {
    let mut game = Game::new();
    game.make_notation_move("a6b7").expect("move");
    let value = serde_json::to_value(game.history()).expect("serialize");
    let entry = &value[0];
    assert_eq!(entry["notation"], "a6b7");
    assert_eq!(entry["side"], "cho");
    assert_eq!(entry["pieceType"], "Gi");
    assert_eq!(entry["fenBefore"].as_str(), Some(game.history()[0].fen_before.as_str()));
    assert!(entry["captured"].is_null());
    assert!(entry.get("movedPiece").is_none());
    assert!(entry.get("deactivatedBefore").is_none());
}

#[test]
fn every_start_move_is_playable() {
    let position = Position::from_fen(START_POSITION, Side::Cho).expect("start");
    for mv in position.moves() {
        let mut next = position.clone();
        next.make_move(mv.from, mv.to)
            .unwrap_or_else(|err| panic!("{mv} rejected: {err}"));
        assert_eq!(next.turn, Side::Han);
        next.unmake_move().expect("unmake");
        assert_eq!(next, position);
    }
}
