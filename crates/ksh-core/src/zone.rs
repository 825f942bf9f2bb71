//! Board zones: the six palaces with their diagonal lines, and the inner,
//! outer and outer-outer areas that gate Jeon and Hu.
//!
//! Everything here is a pure function of coordinates. Which palaces a piece
//! may use for diagonal movement depends on its kind, which callers pass in
//! explicitly.

use serde::{Deserialize, Serialize};

use crate::constants::{
    Bounds, CHO_INNER_AREA, CHO_LEFT_PALACE, CHO_MAIN_PALACE, CHO_OUTER_AREA, CHO_RIGHT_PALACE,
    HAN_INNER_AREA, HAN_LEFT_PALACE, HAN_MAIN_PALACE, HAN_OUTER_AREA, HAN_RIGHT_PALACE,
};
use crate::types::{PieceType, Side, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Palace {
    HanMain,
    HanLeft,
    HanRight,
    ChoMain,
    ChoLeft,
    ChoRight,
}

const HAN_PALACES: [Palace; 3] = [Palace::HanMain, Palace::HanLeft, Palace::HanRight];
const CHO_PALACES: [Palace; 3] = [Palace::ChoMain, Palace::ChoLeft, Palace::ChoRight];

impl Palace {
    pub const ALL: [Self; 6] = [
        Self::HanMain,
        Self::ChoMain,
        Self::HanLeft,
        Self::HanRight,
        Self::ChoLeft,
        Self::ChoRight,
    ];

    pub const CORNERS: [Self; 4] = [Self::HanLeft, Self::HanRight, Self::ChoLeft, Self::ChoRight];

    pub const fn of_side(side: Side) -> &'static [Self; 3] {
        match side {
            Side::Cho => &CHO_PALACES,
            Side::Han => &HAN_PALACES,
        }
    }

    pub const fn main(side: Side) -> Self {
        match side {
            Side::Cho => Self::ChoMain,
            Side::Han => Self::HanMain,
        }
    }

    pub const fn side(self) -> Side {
        match self {
            Self::HanMain | Self::HanLeft | Self::HanRight => Side::Han,
            Self::ChoMain | Self::ChoLeft | Self::ChoRight => Side::Cho,
        }
    }

    pub const fn bounds(self) -> Bounds {
        match self {
            Self::HanMain => HAN_MAIN_PALACE,
            Self::HanLeft => HAN_LEFT_PALACE,
            Self::HanRight => HAN_RIGHT_PALACE,
            Self::ChoMain => CHO_MAIN_PALACE,
            Self::ChoLeft => CHO_LEFT_PALACE,
            Self::ChoRight => CHO_RIGHT_PALACE,
        }
    }

    pub const fn contains(self, square: Square) -> bool {
        within(self.bounds(), square)
    }

    pub const fn center(self) -> Square {
        let (top, left, bottom, right) = self.bounds();
        Square::new_unchecked((top + bottom) / 2, (left + right) / 2)
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    pub const fn corners(self) -> [Square; 4] {
        let (top, left, bottom, right) = self.bounds();
        [
            Square::new_unchecked(top, left),
            Square::new_unchecked(top, right),
            Square::new_unchecked(bottom, left),
            Square::new_unchecked(bottom, right),
        ]
    }

    /// The corner diagonally across the center from `corner`, if `corner` is
    /// one of this palace's corners.
    pub fn opposite_corner(self, corner: Square) -> Option<Square> {
        let corners = self.corners();
        let idx = corners.iter().position(|&sq| sq == corner)?;
        Some(corners[3 - idx])
    }

    /// The two corner-center-corner lines.
    pub const fn diagonal_paths(self) -> [[Square; 3]; 2] {
        let [top_left, top_right, bottom_left, bottom_right] = self.corners();
        let center = self.center();
        [
            [top_left, center, bottom_right],
            [top_right, center, bottom_left],
        ]
    }

    /// Whether `(from, to)` is one step along one of this palace's diagonals.
    pub fn has_diagonal_segment(self, from: Square, to: Square) -> bool {
        self.diagonal_paths().iter().any(|path| {
            path.windows(2)
                .any(|w| (w[0], w[1]) == (from, to) || (w[1], w[0]) == (from, to))
        })
    }
}

/// With `palace` given, membership in exactly that palace; otherwise
/// membership in any of `side`'s three palaces.
pub fn in_palace(square: Square, side: Side, palace: Option<Palace>) -> bool {
    match palace {
        Some(palace) => palace.contains(square),
        None => Palace::of_side(side).iter().any(|p| p.contains(square)),
    }
}

pub fn in_main_palace(square: Square, side: Side) -> bool {
    Palace::main(side).contains(square)
}

/// Palaces whose diagonal lines a piece of `piece_type` may travel.
///
/// Cha and Hu may use every palace on the board, Jeon only the four corner
/// palaces, and everything else only its own side's three.
pub fn diagonal_palaces(side: Side, piece_type: PieceType) -> &'static [Palace] {
    match piece_type {
        PieceType::Cha | PieceType::Hu => &Palace::ALL,
        PieceType::Jeon => &Palace::CORNERS,
        _ => Palace::of_side(side),
    }
}

pub fn in_inner_area(square: Square, side: Side) -> bool {
    let bounds = match side {
        Side::Cho => CHO_INNER_AREA,
        Side::Han => HAN_INNER_AREA,
    };
    within(bounds, square)
}

pub fn in_outer_area(square: Square, side: Side) -> bool {
    let bounds = match side {
        Side::Cho => CHO_OUTER_AREA,
        Side::Han => HAN_OUTER_AREA,
    };
    square.is_valid() && within(bounds, square) && !in_inner_area(square, side)
}

pub fn in_outer_outer_area(square: Square, side: Side) -> bool {
    square.is_valid()
        && !in_inner_area(square, side)
        && !in_outer_area(square, side)
        && !in_main_palace(square, side)
}

/// A one-step diagonal is legal only along a palace diagonal, inside a
/// palace that holds both endpoints.
pub fn is_legal_palace_diagonal(from: Square, to: Square) -> bool {
    Palace::ALL
        .iter()
        .any(|p| p.contains(from) && p.contains(to) && p.has_diagonal_segment(from, to))
}

/// Either side's inner area or main palace; Jeon may not enter these.
pub fn is_jeon_restricted(square: Square) -> bool {
    Side::ALL
        .iter()
        .any(|&side| in_inner_area(square, side) || in_main_palace(square, side))
}

const fn within(bounds: Bounds, square: Square) -> bool {
    let (top, left, bottom, right) = bounds;
    square.row >= top && square.row <= bottom && square.col >= left && square.col <= right
}
