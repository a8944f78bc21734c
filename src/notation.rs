//! Board coordinates in `c4` style: column letter from `a`, row number from 1.

use crate::error::{ReversiError, Result};
use crate::types::Position;

const FIRST_COLUMN: u8 = b'a';
const MAX_COLUMNS: usize = 26;

/// Returns `None` for columns past `z`.
pub fn to_notation(pos: Position) -> Option<String> {
    if pos.col >= MAX_COLUMNS {
        return None;
    }
    let column = char::from(FIRST_COLUMN + pos.col as u8);
    Some(format!("{column}{}", pos.row + 1))
}

/// Parses `c4` (case-insensitive, surrounding whitespace ignored) and checks
/// it against a `dim`x`dim` board.
pub fn parse_notation(text: &str, dim: usize) -> Result<Position> {
    let trimmed = text.trim();
    let invalid = || ReversiError::InvalidNotation(text.to_string());

    let mut chars = trimmed.chars();
    let column = chars
        .next()
        .filter(char::is_ascii_alphabetic)
        .ok_or_else(invalid)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let row: usize = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    let pos = Position::new(
        row - 1,
        (column.to_ascii_lowercase() as u8 - FIRST_COLUMN) as usize,
    );
    if pos.row >= dim || pos.col >= dim {
        return Err(ReversiError::OutOfBounds { position: pos, dim });
    }
    Ok(pos)
}

/// First standalone coordinate token in free text that fits the board.
pub fn extract_notation(message: &str, dim: usize) -> Option<Position> {
    let bytes = message.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        let starts_word = idx == 0 || !bytes[idx - 1].is_ascii_alphanumeric();
        if starts_word && bytes[idx].is_ascii_alphabetic() {
            let end = bytes[idx + 1..]
                .iter()
                .position(|b| !b.is_ascii_digit())
                .map_or(bytes.len(), |offset| idx + 1 + offset);
            let ends_word = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
            if end > idx + 1
                && ends_word
                && let Ok(pos) = parse_notation(&message[idx..end], dim)
            {
                return Some(pos);
            }
        }
        idx += 1;
    }
    None
}
