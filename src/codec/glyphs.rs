//! Character-grid encoding of the value and lifetime fields.
//!
//! One glyph per interior cell, rows `y = 1..=height`, each row ended by a
//! newline. The alphabet depends on the mode:
//!
//! | mode | glyphs |
//! |---|---|
//! | binary modes | `*` alive, `o` empty |
//! | Snake | `F` food, `H` head, `H + age` body, `G` empty |
//! | Predator-Prey | `J` predator, `G` prey, `F` food, `o` empty |
//! | lifetimes | `A` untimed, `B + l` lifetime `l` |

use crate::core::error::{AutomatonError, Result};
use crate::core::types::{FieldKind, Mode, Position, UNTIMED};
use crate::grid::cell::{ALIVE, EMPTY, FOOD, PREDATOR, PREY, SNAKE_HEAD};
use crate::grid::universe::Grid;

const UNTIMED_GLYPH: char = 'A';
const LIFETIME_BASE: u32 = 'B' as u32;
const SNAKE_BASE: u32 = 'H' as u32;

/// Glyph of a value in `mode`, if it has one
pub fn value_glyph(mode: Mode, value: i32) -> Option<char> {
    match mode {
        Mode::Snake => match value {
            EMPTY => Some('G'),
            FOOD => Some('F'),
            v if v >= SNAKE_HEAD => offset_glyph(SNAKE_BASE, v - SNAKE_HEAD),
            _ => None,
        },
        Mode::PredatorPrey => match value {
            EMPTY => Some('o'),
            PREDATOR => Some('J'),
            PREY => Some('G'),
            FOOD => Some('F'),
            _ => None,
        },
        _ => match value {
            EMPTY => Some('o'),
            ALIVE => Some('*'),
            _ => None,
        },
    }
}

/// Value a glyph stands for in `mode`
pub fn glyph_value(mode: Mode, glyph: char) -> Option<i32> {
    match mode {
        Mode::Snake => match glyph {
            'G' => Some(EMPTY),
            'F' => Some(FOOD),
            c => glyph_offset(SNAKE_BASE, c).map(|age| SNAKE_HEAD + age),
        },
        Mode::PredatorPrey => match glyph {
            'o' => Some(EMPTY),
            'J' => Some(PREDATOR),
            'G' => Some(PREY),
            'F' => Some(FOOD),
            _ => None,
        },
        _ => match glyph {
            'o' => Some(EMPTY),
            '*' => Some(ALIVE),
            _ => None,
        },
    }
}

pub fn lifetime_glyph(lifetime: i32) -> Option<char> {
    if lifetime == UNTIMED {
        Some(UNTIMED_GLYPH)
    } else if (0..UNTIMED).contains(&lifetime) {
        offset_glyph(LIFETIME_BASE, lifetime)
    } else {
        None
    }
}

pub fn glyph_lifetime(glyph: char) -> Option<i32> {
    if glyph == UNTIMED_GLYPH {
        return Some(UNTIMED);
    }
    glyph_offset(LIFETIME_BASE, glyph).filter(|&l| l < UNTIMED)
}

fn offset_glyph(base: u32, offset: i32) -> Option<char> {
    let offset = u32::try_from(offset).ok()?;
    char::from_u32(base.checked_add(offset)?)
}

fn glyph_offset(base: u32, glyph: char) -> Option<i32> {
    let code = u32::from(glyph).checked_sub(base)?;
    i32::try_from(code).ok()
}

/// Render the value field in `mode`'s alphabet
pub fn encode_values(grid: &Grid, mode: Mode) -> Result<String> {
    encode_with(grid, FieldKind::Value, |v| value_glyph(mode, v))
}

/// Render the lifetime field
pub fn encode_lifetimes(grid: &Grid) -> Result<String> {
    encode_with(grid, FieldKind::Lifetime, lifetime_glyph)
}

fn encode_with(
    grid: &Grid,
    kind: FieldKind,
    glyph: impl Fn(i32) -> Option<char>,
) -> Result<String> {
    let mut out = String::with_capacity(grid.area() + grid.height() as usize);
    for y in 1..=grid.height() {
        for x in 1..=grid.width() {
            let value = grid.get(kind, Position::new(x, y));
            out.push(glyph(value).ok_or(AutomatonError::UnrepresentableValue { kind, value })?);
        }
        out.push('\n');
    }
    Ok(out)
}

/// Overwrite the value field from `text`. Nothing is written unless the
/// whole grid decodes.
pub fn decode_values(grid: &mut Grid, mode: Mode, text: &str) -> Result<()> {
    decode_with(grid, FieldKind::Value, text, |c| glyph_value(mode, c))
}

/// Overwrite the lifetime field from `text`
pub fn decode_lifetimes(grid: &mut Grid, text: &str) -> Result<()> {
    decode_with(grid, FieldKind::Lifetime, text, glyph_lifetime)
}

fn decode_with(
    grid: &mut Grid,
    kind: FieldKind,
    text: &str,
    decode: impl Fn(char) -> Option<i32>,
) -> Result<()> {
    let rows = grid.height() as usize;
    let cols = grid.width() as usize;
    let shape_error = |row: usize| AutomatonError::GlyphShape {
        expected_rows: rows,
        expected_cols: cols,
        row,
    };

    let lines: Vec<&str> = text.lines().collect();
    if lines.len() != rows {
        return Err(shape_error(lines.len().min(rows) + 1));
    }

    let mut decoded = Vec::with_capacity(grid.area());
    for (row, line) in lines.iter().enumerate() {
        if line.chars().count() != cols {
            return Err(shape_error(row + 1));
        }
        let y = row as i32 + 1;
        for (col, glyph) in line.chars().enumerate() {
            let x = col as i32 + 1;
            let value = decode(glyph).ok_or(AutomatonError::InvalidGlyph { glyph, x, y })?;
            decoded.push((Position::new(x, y), value));
        }
    }

    for (pos, value) in decoded {
        grid.set(kind, pos, value);
    }
    Ok(())
}
