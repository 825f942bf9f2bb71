use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_COLS, BOARD_ROWS};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Cho = 0,
    Han = 1,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::Cho, Self::Han];

    pub const fn opposite(self) -> Self {
        match self {
            Self::Cho => Self::Han,
            Self::Han => Self::Cho,
        }
    }

    /// Row delta of a single forward step.
    pub const fn forward(self) -> i8 {
        match self {
            Self::Cho => -1,
            Self::Han => 1,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Su = 0,
    Jang = 1,
    Cha = 2,
    Po = 3,
    Ma = 4,
    Sang = 5,
    Sa = 6,
    Bo = 7,
    Gi = 8,
    Bok = 9,
    Yu = 10,
    GiL = 11,
    Jeon = 12,
    Hu = 13,
}

impl PieceType {
    pub const ALL: [Self; 14] = [
        Self::Su,
        Self::Jang,
        Self::Cha,
        Self::Po,
        Self::Ma,
        Self::Sang,
        Self::Sa,
        Self::Bo,
        Self::Gi,
        Self::Bok,
        Self::Yu,
        Self::GiL,
        Self::Jeon,
        Self::Hu,
    ];

    pub const fn korean_name(self) -> &'static str {
        match self {
            Self::Su => "수",
            Self::Jang => "장",
            Self::Cha => "차",
            Self::Po => "포",
            Self::Ma => "마",
            Self::Sang => "상",
            Self::Sa => "사",
            Self::Bo => "보",
            Self::Gi => "기",
            Self::Bok => "복",
            Self::Yu => "유",
            Self::GiL => "기L",
            Self::Jeon => "전",
            Self::Hu => "후",
        }
    }

    pub const fn fen_code(self) -> char {
        match self {
            Self::Su => 'k',
            Self::Jang => 'q',
            Self::Cha => 'r',
            Self::Po => 'c',
            Self::Ma => 'n',
            Self::Sang => 'e',
            Self::Sa => 'a',
            Self::Bo => 'p',
            Self::Gi => 'g',
            Self::Bok => 'm',
            Self::Yu => 'u',
            Self::GiL => 'l',
            Self::Jeon => 'f',
            Self::Hu => 'b',
        }
    }

    pub const fn from_fen_code(code: char) -> Option<Self> {
        match code {
            'k' => Some(Self::Su),
            'q' => Some(Self::Jang),
            'r' => Some(Self::Cha),
            'c' => Some(Self::Po),
            'n' => Some(Self::Ma),
            'e' => Some(Self::Sang),
            'a' => Some(Self::Sa),
            'p' => Some(Self::Bo),
            'g' => Some(Self::Gi),
            'm' => Some(Self::Bok),
            'u' => Some(Self::Yu),
            'l' => Some(Self::GiL),
            'f' => Some(Self::Jeon),
            'b' => Some(Self::Hu),
            _ => None,
        }
    }

    /// Su and Jang: the two palace-bound king-analog kinds.
    pub const fn is_royal(self) -> bool {
        matches!(self, Self::Su | Self::Jang)
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flank {
    Left = 0,
    #[default]
    Center = 1,
    Right = 2,
}

impl Flank {
    /// Flank inferred from the starting column when the encoding carries none.
    pub const fn for_col(col: u8) -> Self {
        if col < 4 {
            Self::Left
        } else if col > 10 {
            Self::Right
        } else {
            Self::Center
        }
    }

    pub const fn to_code(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Center => 'C',
            Self::Right => 'R',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'L' => Some(Self::Left),
            'C' => Some(Self::Center),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

/// A (side, flank) pair: the unit that a general capture switches off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlankGroup {
    pub side: Side,
    pub flank: Flank,
}

impl FlankGroup {
    pub const fn new(side: Side, flank: Flank) -> Self {
        Self { side, flank }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub side: Side,
    pub has_moved: bool,
    pub flank: Flank,
    /// Set on a piece that captured an opposing general; names the group it
    /// switched off.
    pub captured_group: Option<FlankGroup>,
}

impl Piece {
    pub const fn new(piece_type: PieceType, side: Side) -> Self {
        Self {
            piece_type,
            side,
            has_moved: false,
            flank: Flank::Center,
            captured_group: None,
        }
    }

    pub const fn with_flank(mut self, flank: Flank) -> Self {
        self.flank = flank;
        self
    }

    pub const fn group(&self) -> FlankGroup {
        FlankGroup::new(self.side, self.flank)
    }

    pub fn fen_char(&self) -> char {
        let code = self.piece_type.fen_code();
        match self.side {
            Side::Cho => code,
            Side::Han => code.to_ascii_uppercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_ROWS && (col as usize) < BOARD_COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub const fn is_valid(self) -> bool {
        (self.row as usize) < BOARD_ROWS && (self.col as usize) < BOARD_COLS
    }

    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = i16::from(self.row) + i16::from(d_row);
        let col = i16::from(self.col) + i16::from(d_col);
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?)
    }

    /// Parses algebraic form: file letter from `a`, rank number counted from
    /// the Cho back rank (`a1` is row 13, column 0).
    pub fn parse(input: &str) -> Option<Self> {
        let mut chars = input.chars();
        let file = chars.next()?;
        if !file.is_ascii_lowercase() {
            return None;
        }
        let rank_str = chars.as_str();
        if rank_str.is_empty()
            || rank_str.starts_with('0')
            || !rank_str.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let rank = rank_str.parse::<u8>().ok()?;
        if rank == 0 || usize::from(rank) > BOARD_ROWS {
            return None;
        }
        let col = file as u8 - b'a';
        Self::new(BOARD_ROWS as u8 - rank, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.col),
            BOARD_ROWS - usize::from(self.row)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

pub type SquareList = ArrayVec<Square, 64>;
/// Whole-side move lists are unbounded in crowded positions, so they grow.
pub type MoveList = Vec<Move>;
