use log::trace;

use crate::board::Board;
use crate::constants::BOARD_COLS;
use crate::position::DeactivatedGroups;
use crate::types::{Move, MoveList, Piece, PieceType, Side, Square, SquareList};
use crate::zone::{
    diagonal_palaces, in_main_palace, in_inner_area, in_outer_outer_area, in_palace,
    is_jeon_restricted, is_legal_palace_diagonal, Palace,
};

pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A jump with the cells that must be empty on the way, all relative to the
/// origin.
type Leap = ((i8, i8), &'static [(i8, i8)]);

const HORSE_LEAPS: [Leap; 8] = [
    ((-2, -1), &[(-1, 0)]),
    ((-2, 1), &[(-1, 0)]),
    ((2, -1), &[(1, 0)]),
    ((2, 1), &[(1, 0)]),
    ((-1, -2), &[(0, -1)]),
    ((-1, 2), &[(0, 1)]),
    ((1, -2), &[(0, -1)]),
    ((1, 2), &[(0, 1)]),
];

const ELEPHANT_LEAPS: [Leap; 8] = [
    ((-3, -2), &[(-1, 0), (-2, -1)]),
    ((-3, 2), &[(-1, 0), (-2, 1)]),
    ((3, -2), &[(1, 0), (2, -1)]),
    ((3, 2), &[(1, 0), (2, 1)]),
    ((-2, -3), &[(0, -1), (-1, -2)]),
    ((-2, 3), &[(0, 1), (-1, 2)]),
    ((2, -3), &[(0, -1), (1, -2)]),
    ((2, 3), &[(0, 1), (1, 2)]),
];

const DIAGONAL_LEAPS: [Leap; 4] = [
    ((-2, -2), &[(-1, -1)]),
    ((-2, 2), &[(-1, 1)]),
    ((2, -2), &[(1, -1)]),
    ((2, 2), &[(1, 1)]),
];

pub trait MoveGenerator {
    /// Destinations allowed by the movement rules alone. Only the Su also
    /// screens out squares the opponent attacks.
    fn candidate_moves(&self, board: &Board, origin: Square) -> SquareList;

    /// Squares this piece threatens, as used for check detection.
    fn attack_squares(&self, board: &Board, origin: Square) -> SquareList {
        self.candidate_moves(board, origin)
    }
}

impl MoveGenerator for Piece {
    fn candidate_moves(&self, board: &Board, origin: Square) -> SquareList {
        let mut out = SquareList::new();
        let forward = self.side.forward();
        match self.piece_type {
            PieceType::Su => {
                palace_steps(self, board, origin, &mut out);
                let opponent = self.side.opposite();
                out.retain(|sq| !is_square_attacked(board, *sq, opponent));
            }
            PieceType::Jang | PieceType::Sa => palace_steps(self, board, origin, &mut out),
            PieceType::Cha => chariot_moves(self, board, origin, &mut out),
            PieceType::Po => cannon_moves(self, board, origin, &mut out),
            PieceType::Ma => leaps(self, board, origin, &HORSE_LEAPS, &mut out),
            PieceType::Sang => leaps(self, board, origin, &ELEPHANT_LEAPS, &mut out),
            PieceType::Yu => leaps(self, board, origin, &DIAGONAL_LEAPS, &mut out),
            PieceType::Bo => steps(
                self,
                board,
                origin,
                &[(forward, 0), (0, -1), (0, 1)],
                &mut out,
            ),
            PieceType::Gi => steps(
                self,
                board,
                origin,
                &[(forward, -1), (forward, 1), (0, -1), (0, 1)],
                &mut out,
            ),
            PieceType::Bok => {
                for target in ambush_range(board, origin) {
                    if board.get(target).is_some_and(|p| p.side != self.side) {
                        let _ = out.try_push(target);
                    }
                }
            }
            PieceType::GiL => {
                for dir in ORTHOGONAL {
                    slide(board, origin, self.side, dir, 2, |_| false, |_| true, &mut out);
                }
            }
            PieceType::Jeon => lancer_moves(self, board, origin, &mut out),
            PieceType::Hu => rear_guard_moves(self, board, origin, &mut out),
        }
        out
    }

    fn attack_squares(&self, board: &Board, origin: Square) -> SquareList {
        match self.piece_type {
            PieceType::Su | PieceType::Jang => {
                let mut out = SquareList::new();
                palace_steps(self, board, origin, &mut out);
                out
            }
            PieceType::Bok => ambush_range(board, origin),
            _ => self.candidate_moves(board, origin),
        }
    }
}

pub fn is_square_attacked(board: &Board, square: Square, by_side: Side) -> bool {
    board
        .pieces_of(by_side)
        .any(|(origin, piece)| piece.attack_squares(board, origin).contains(&square))
}

/// A side without a Su on the board is never in check.
pub fn in_check(board: &Board, side: Side) -> bool {
    checked_king(board, side).is_some()
}

pub fn checked_king(board: &Board, side: Side) -> Option<Square> {
    board
        .find_king(side)
        .filter(|&king| is_square_attacked(board, king, side.opposite()))
}

/// Candidates of the piece on `origin` that do not leave its own Su attacked.
pub fn legal_moves(board: &Board, origin: Square) -> SquareList {
    let mut legal = SquareList::new();
    let Some(piece) = board.get(origin).copied() else {
        return legal;
    };
    for to in piece.candidate_moves(board, origin) {
        let mut scratch = board.clone();
        if scratch.relocate(origin, to).is_err() {
            continue;
        }
        if in_check(&scratch, piece.side) {
            trace!("{origin}{to} rejected: leaves {:?} in check", piece.side);
            continue;
        }
        let _ = legal.try_push(to);
    }
    legal
}

/// Every legal move of `side`, skipping pieces in a deactivated group.
pub fn all_legal_moves(board: &Board, side: Side, deactivated: &DeactivatedGroups) -> MoveList {
    let mut moves = MoveList::new();
    for (origin, piece) in board.pieces_of(side) {
        if deactivated.is_deactivated(piece) {
            continue;
        }
        moves.extend(
            legal_moves(board, origin)
                .into_iter()
                .map(|to| Move::new(origin, to)),
        );
    }
    moves
}

fn is_valid_target(board: &Board, square: Square, side: Side) -> bool {
    square.is_valid() && board.get(square).is_none_or(|p| p.side != side)
}

fn palace_steps(piece: &Piece, board: &Board, origin: Square, out: &mut SquareList) {
    for (dr, dc) in STEPS {
        let Some(to) = origin.offset(dr, dc) else {
            continue;
        };
        if !in_palace(to, piece.side, None) {
            continue;
        }
        if dr != 0 && dc != 0 && !is_legal_palace_diagonal(origin, to) {
            continue;
        }
        if is_valid_target(board, to, piece.side) {
            let _ = out.try_push(to);
        }
    }
}

fn steps(piece: &Piece, board: &Board, origin: Square, deltas: &[(i8, i8)], out: &mut SquareList) {
    for &(dr, dc) in deltas {
        if let Some(to) = origin.offset(dr, dc) {
            if is_valid_target(board, to, piece.side) {
                let _ = out.try_push(to);
            }
        }
    }
}

fn leaps(piece: &Piece, board: &Board, origin: Square, table: &[Leap], out: &mut SquareList) {
    'leap: for &((dr, dc), legs) in table {
        for &(lr, lc) in legs {
            match origin.offset(lr, lc) {
                Some(leg) if board.get(leg).is_none() => {}
                _ => continue 'leap,
            }
        }
        if let Some(to) = origin.offset(dr, dc) {
            if is_valid_target(board, to, piece.side) {
                let _ = out.try_push(to);
            }
        }
    }
}

/// Walks from `origin` in `dir` for at most `max_steps` cells. Empty cells are
/// collected; the first occupied cell ends the walk and is collected when it
/// holds an enemy that `capturable` admits. A cell for which `closed` holds
/// ends the walk before it.
#[allow(clippy::too_many_arguments)]
fn slide(
    board: &Board,
    origin: Square,
    side: Side,
    (dr, dc): (i8, i8),
    max_steps: usize,
    closed: impl Fn(Square) -> bool,
    capturable: impl Fn(&Piece) -> bool,
    out: &mut SquareList,
) {
    let mut current = origin;
    for _ in 0..max_steps {
        let Some(next) = current.offset(dr, dc) else {
            break;
        };
        if closed(next) {
            break;
        }
        match board.get(next) {
            None => {
                let _ = out.try_push(next);
            }
            Some(target) => {
                if target.side != side && capturable(target) {
                    let _ = out.try_push(next);
                }
                break;
            }
        }
        current = next;
    }
}

/// Slides along the diagonals of every palace in `palaces` that contains
/// `origin`, stopping at the first occupied cell.
fn palace_diagonal_slides(
    board: &Board,
    origin: Square,
    side: Side,
    palaces: &[Palace],
    admit: impl Fn(Square, Option<&Piece>) -> bool,
    out: &mut SquareList,
) {
    for palace in palaces.iter().filter(|p| p.contains(origin)) {
        for path in palace.diagonal_paths() {
            let Some(idx) = path.iter().position(|&sq| sq == origin) else {
                continue;
            };
            let ahead: SquareList = path[idx + 1..].iter().copied().collect();
            let behind: SquareList = path[..idx].iter().rev().copied().collect();
            for walk in [ahead, behind] {
                for target in walk {
                    let occupant = board.get(target);
                    let open = occupant.is_none_or(|p| p.side != side);
                    if open && admit(target, occupant) && !out.contains(&target) {
                        let _ = out.try_push(target);
                    }
                    if occupant.is_some() {
                        break;
                    }
                }
            }
        }
    }
}

fn chariot_moves(piece: &Piece, board: &Board, origin: Square, out: &mut SquareList) {
    for dir in ORTHOGONAL {
        slide(board, origin, piece.side, dir, BOARD_COLS, |_| false, |_| true, out);
    }
    let palaces = diagonal_palaces(piece.side, piece.piece_type);
    palace_diagonal_slides(board, origin, piece.side, palaces, |_, _| true, out);
}

fn cannon_moves(piece: &Piece, board: &Board, origin: Square, out: &mut SquareList) {
    for (dr, dc) in ORTHOGONAL {
        let mut current = origin;
        let mut screened = false;
        while let Some(next) = current.offset(dr, dc) {
            current = next;
            let occupant = board.get(next);
            if !screened {
                if let Some(screen) = occupant {
                    if screen.piece_type == PieceType::Po {
                        break;
                    }
                    screened = true;
                }
                continue;
            }
            match occupant {
                None => {
                    let _ = out.try_push(next);
                }
                Some(target) => {
                    if target.piece_type != PieceType::Po && target.side != piece.side {
                        let _ = out.try_push(next);
                    }
                    break;
                }
            }
        }
    }

    for palace in diagonal_palaces(piece.side, piece.piece_type) {
        let Some(target) = palace.opposite_corner(origin) else {
            continue;
        };
        let screened = board
            .get(palace.center())
            .is_some_and(|p| p.piece_type != PieceType::Po);
        if !screened {
            continue;
        }
        let landing = board
            .get(target)
            .is_none_or(|p| p.side != piece.side && p.piece_type != PieceType::Po);
        if landing && !out.contains(&target) {
            let _ = out.try_push(target);
        }
    }
}

fn lancer_moves(piece: &Piece, board: &Board, origin: Square, out: &mut SquareList) {
    let not_jeon = |p: &Piece| p.piece_type != PieceType::Jeon;
    for dir in ORTHOGONAL {
        slide(board, origin, piece.side, dir, BOARD_COLS, is_jeon_restricted, not_jeon, out);
    }
    let palaces = diagonal_palaces(piece.side, piece.piece_type);
    palace_diagonal_slides(
        board,
        origin,
        piece.side,
        palaces,
        |target, occupant| !is_jeon_restricted(target) && occupant.is_none_or(not_jeon),
        out,
    );
}

fn rear_guard_moves(piece: &Piece, board: &Board, origin: Square, out: &mut SquareList) {
    if in_outer_outer_area(origin, piece.side) {
        return;
    }
    chariot_moves(piece, board, origin, out);
    let opponent = piece.side.opposite();
    out.retain(|sq| {
        !(in_outer_outer_area(*sq, piece.side)
            || in_main_palace(*sq, opponent)
            || in_inner_area(*sq, opponent))
    });
}

/// For each orthogonal direction with two empty cells ahead, the two cells
/// flanking the third cell.
fn ambush_range(board: &Board, origin: Square) -> SquareList {
    let mut range = SquareList::new();
    for (dr, dc) in ORTHOGONAL {
        let (Some(first), Some(second)) = (origin.offset(dr, dc), origin.offset(2 * dr, 2 * dc))
        else {
            continue;
        };
        if board.get(first).is_some() || board.get(second).is_some() {
            continue;
        }
        let targets = if dr != 0 {
            [(3 * dr, -1), (3 * dr, 1)]
        } else {
            [(-1, 3 * dc), (1, 3 * dc)]
        };
        for (tr, tc) in targets {
            if let Some(target) = origin.offset(tr, tc) {
                let _ = range.try_push(target);
            }
        }
    }
    range
}
