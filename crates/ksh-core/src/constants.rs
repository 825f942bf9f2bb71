pub const BOARD_COLS: usize = 15;
pub const BOARD_ROWS: usize = 14;

pub const PLANE_SEPARATOR: char = '|';
pub const ROW_SEPARATOR: char = '/';
pub const MOVED: char = 'm';
pub const UNMOVED: char = '-';

/// Standard opening layout, piece plane only; moved flags default to unmoved
/// and flanks are inferred from the column.
pub const START_POSITION: &str = "3M3B3M3/RAE1REA1AER1EAR/1Q1L3K3L1Q1/N1C2NC1CN2C1N/3U3F3U3/PPP1GGG1PPP1GGG/15/15/ggg1ppp1ggg1ppp/3u3f3u3/n1c2nc1cn2c1n/1q1l3k3l1q1/rae1rea1aer1ear/3m3b3m3";

/// Inclusive `(top, left, bottom, right)` bounds.
pub type Bounds = (u8, u8, u8, u8);

pub const HAN_MAIN_PALACE: Bounds = (1, 6, 3, 8);
pub const HAN_LEFT_PALACE: Bounds = (1, 0, 3, 2);
pub const HAN_RIGHT_PALACE: Bounds = (1, 12, 3, 14);
pub const CHO_MAIN_PALACE: Bounds = (10, 6, 12, 8);
pub const CHO_LEFT_PALACE: Bounds = (10, 0, 12, 2);
pub const CHO_RIGHT_PALACE: Bounds = (10, 12, 12, 14);

pub const HAN_INNER_AREA: Bounds = (1, 4, 3, 10);
pub const CHO_INNER_AREA: Bounds = (10, 4, 12, 10);

pub const HAN_OUTER_AREA: Bounds = (0, 3, 4, 11);
pub const CHO_OUTER_AREA: Bounds = (9, 3, 13, 11);
