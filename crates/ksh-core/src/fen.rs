use crate::board::{Board, BoardError};
use crate::constants::{BOARD_COLS, BOARD_ROWS, MOVED, PLANE_SEPARATOR, ROW_SEPARATOR, UNMOVED};
use crate::types::{Flank, Piece, PieceType, Side, Square};
use thiserror::Error;

const PIECE_PLANE: usize = 1;
const MOVED_PLANE: usize = 2;
const GROUP_PLANE: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid piece '{0}'")]
    InvalidPiece(char),
    #[error("invalid flag '{0}'")]
    InvalidFlag(char),
    #[error("plane {plane} does not line up with the pieces in row {row}")]
    PlaneMismatch { plane: usize, row: usize },
    #[error(transparent)]
    Board(#[from] BoardError),
}

type Plane<T> = [[Option<T>; BOARD_COLS]; BOARD_ROWS];

pub fn validate_fen(fen: &str) -> Result<(), FenError> {
    parse_fen(fen).map(|_| ())
}

/// Decodes a position. The moved-flag and flank-group planes are optional;
/// without them pieces are unmoved and take their flank from the column.
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let planes: Vec<&str> = fen.split(PLANE_SEPARATOR).collect();
    if planes.len() > 3 {
        return Err(FenError::Validation(format!(
            "expected at most 3 planes, received {}",
            planes.len()
        )));
    }

    let pieces = parse_plane(planes[0], PIECE_PLANE, decode_piece)?;
    let moved = planes
        .get(1)
        .map(|plane| parse_plane(plane, MOVED_PLANE, decode_moved))
        .transpose()?;
    let groups = planes
        .get(2)
        .map(|plane| parse_plane(plane, GROUP_PLANE, decode_group))
        .transpose()?;

    if let Some(moved) = &moved {
        check_alignment(&pieces, moved, MOVED_PLANE)?;
    }
    if let Some(groups) = &groups {
        check_alignment(&pieces, groups, GROUP_PLANE)?;
    }

    let mut board = Board::empty();
    for (r, row) in pieces.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let Some(mut piece) = *cell else { continue };
            piece.has_moved = moved
                .as_ref()
                .and_then(|plane| plane[r][c])
                .unwrap_or(false);
            piece.flank = groups
                .as_ref()
                .and_then(|plane| plane[r][c])
                .unwrap_or_else(|| Flank::for_col(c as u8));
            board.put(piece, Square::new_unchecked(r as u8, c as u8))?;
        }
    }
    Ok(board)
}

/// Encodes all three planes. Back-links are not part of the encoding.
pub fn encode_fen(board: &Board) -> String {
    let mut out = String::new();
    encode_plane(board, &mut out, Piece::fen_char);
    out.push(PLANE_SEPARATOR);
    encode_plane(board, &mut out, |piece| {
        if piece.has_moved {
            MOVED
        } else {
            UNMOVED
        }
    });
    out.push(PLANE_SEPARATOR);
    encode_plane(board, &mut out, |piece| piece.flank.to_code());
    out
}

fn parse_plane<T: Copy>(
    plane: &str,
    plane_no: usize,
    decode: impl Fn(char) -> Result<T, FenError>,
) -> Result<Plane<T>, FenError> {
    let rows: Vec<&str> = plane.split(ROW_SEPARATOR).collect();
    if rows.len() != BOARD_ROWS {
        return Err(FenError::Validation(format!(
            "plane {plane_no} is invalid [expected {BOARD_ROWS} rows, received {}]",
            rows.len()
        )));
    }

    let mut grid = [[None; BOARD_COLS]; BOARD_ROWS];
    for (r, row) in rows.iter().enumerate() {
        let mut col = 0usize;
        let mut run: Option<usize> = None;
        for ch in row.chars() {
            if let Some(digit) = ch.to_digit(10) {
                if run.is_none() && digit == 0 {
                    return Err(FenError::Validation(format!(
                        "plane {plane_no} is invalid [empty run starts with 0] in row {}",
                        r + 1
                    )));
                }
                let next = run.unwrap_or(0) * 10 + digit as usize;
                if col + next > BOARD_COLS {
                    return Err(too_wide(plane_no, r));
                }
                run = Some(next);
                continue;
            }
            col += run.take().unwrap_or(0);
            if col >= BOARD_COLS {
                return Err(too_wide(plane_no, r));
            }
            grid[r][col] = Some(decode(ch)?);
            col += 1;
        }
        col += run.unwrap_or(0);
        if col != BOARD_COLS {
            return Err(FenError::Validation(format!(
                "plane {plane_no} is invalid [expected {BOARD_COLS} cells, received {col}] in row {}",
                r + 1
            )));
        }
    }
    Ok(grid)
}

fn too_wide(plane_no: usize, row: usize) -> FenError {
    FenError::Validation(format!(
        "plane {plane_no} is invalid [more than {BOARD_COLS} cells] in row {}",
        row + 1
    ))
}

fn check_alignment<T>(pieces: &Plane<Piece>, plane: &Plane<T>, plane_no: usize) -> Result<(), FenError> {
    for (r, (piece_row, row)) in pieces.iter().zip(plane.iter()).enumerate() {
        let aligned = piece_row
            .iter()
            .zip(row.iter())
            .all(|(piece, cell)| piece.is_some() == cell.is_some());
        if !aligned {
            return Err(FenError::PlaneMismatch {
                plane: plane_no,
                row: r + 1,
            });
        }
    }
    Ok(())
}

fn encode_plane(board: &Board, out: &mut String, symbol: impl Fn(&Piece) -> char) {
    for row in 0..BOARD_ROWS {
        if row > 0 {
            out.push(ROW_SEPARATOR);
        }
        let mut empties = 0usize;
        for col in 0..BOARD_COLS {
            match board.get(Square::new_unchecked(row as u8, col as u8)) {
                Some(piece) => {
                    if empties > 0 {
                        out.push_str(&empties.to_string());
                        empties = 0;
                    }
                    out.push(symbol(piece));
                }
                None => empties += 1,
            }
        }
        if empties > 0 {
            out.push_str(&empties.to_string());
        }
    }
}

fn decode_piece(ch: char) -> Result<Piece, FenError> {
    let side = if ch.is_ascii_uppercase() {
        Side::Han
    } else {
        Side::Cho
    };
    let piece_type =
        PieceType::from_fen_code(ch.to_ascii_lowercase()).ok_or(FenError::InvalidPiece(ch))?;
    Ok(Piece::new(piece_type, side))
}

fn decode_moved(ch: char) -> Result<bool, FenError> {
    match ch {
        MOVED => Ok(true),
        UNMOVED => Ok(false),
        _ => Err(FenError::InvalidFlag(ch)),
    }
}

fn decode_group(ch: char) -> Result<Flank, FenError> {
    Flank::from_code(ch).ok_or(FenError::InvalidFlag(ch))
}
