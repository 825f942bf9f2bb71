use thiserror::Error;

use crate::types::{Move, Square};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid move notation '{0}'")]
    Invalid(String),
}

/// Origin then destination in algebraic form, e.g. `a5a6`.
pub fn move_to_notation(mv: &Move) -> String {
    format!("{}{}", mv.from, mv.to)
}

pub fn parse_notation(text: &str) -> Result<Move, NotationError> {
    let invalid = || NotationError::Invalid(text.to_string());
    let split = text
        .char_indices()
        .skip(1)
        .find(|(_, ch)| ch.is_ascii_alphabetic())
        .map(|(idx, _)| idx)
        .ok_or_else(invalid)?;
    let from = Square::parse(&text[..split]).ok_or_else(invalid)?;
    let to = Square::parse(&text[split..]).ok_or_else(invalid)?;
    Ok(Move::new(from, to))
}
