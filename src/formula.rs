//! Spreadsheet formula translation.
//!
//! Rewrites the relative cell references of a template formula to a new
//! position while leaving `$`-anchored parts and quoted strings untouched.
//! A pure text rewrite: formulas are never evaluated.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FormulaError {
    #[error("invalid cell reference `{0}`")]
    BadReference(String),
    #[error("translating `{0}` moved a reference off the sheet")]
    OutOfBounds(String),
}

const MAX_COLUMN: i64 = 16_384;
const MAX_ROW: i64 = 1_048_576;

/// Translates `formula` as if it were copied from cell `origin` to `target`.
///
/// `translate_formula("=A10*2", "D10", "D12")` gives `=A12*2`.
pub fn translate_formula(
    formula: &str,
    origin: &str,
    target: &str,
) -> Result<String, FormulaError> {
    let (origin_column, origin_row) = parse_cell_ref(origin)?;
    let (target_column, target_row) = parse_cell_ref(target)?;
    let column_shift = target_column as i64 - origin_column as i64;
    let row_shift = target_row as i64 - origin_row as i64;

    let chars: Vec<char> = formula.chars().collect();
    let mut out = String::with_capacity(formula.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' {
            // String literal: copy verbatim, doubled quotes included.
            out.push(c);
            i += 1;
            while i < chars.len() {
                out.push(chars[i]);
                if chars[i] == '"' {
                    i += 1;
                    break;
                }
                i += 1;
            }
            continue;
        }

        let at_reference_start =
            (c == '$' || c.is_ascii_alphabetic()) && (i == 0 || !is_ident_char(chars[i - 1]));
        if at_reference_start {
            if let Some(reference) = match_reference(&chars, i) {
                let column = if reference.column_absolute {
                    reference.column as i64
                } else {
                    reference.column as i64 + column_shift
                };
                let row = if reference.row_absolute {
                    reference.row as i64
                } else {
                    reference.row as i64 + row_shift
                };
                if column < 1 || row < 1 || column > MAX_COLUMN || row > MAX_ROW {
                    return Err(FormulaError::OutOfBounds(formula.to_string()));
                }

                if reference.column_absolute {
                    out.push('$');
                }
                out.push_str(&column_letters(column as u32));
                if reference.row_absolute {
                    out.push('$');
                }
                out.push_str(&row.to_string());

                i += reference.len;
                continue;
            }
        }

        out.push(c);
        i += 1;
    }

    Ok(out)
}

struct Reference {
    len: usize,
    column: u32,
    row: u32,
    column_absolute: bool,
    row_absolute: bool,
}

// Matches `$?[A-Z]{1,3}$?[0-9]+` at position `start`, rejecting matches that
// continue into an identifier or a function call (`LOG10(`).
fn match_reference(chars: &[char], start: usize) -> Option<Reference> {
    let mut i = start;

    let column_absolute = chars.get(i) == Some(&'$');
    if column_absolute {
        i += 1;
    }

    let letters_start = i;
    while i < chars.len() && chars[i].is_ascii_alphabetic() {
        i += 1;
    }
    let letter_count = i - letters_start;
    if letter_count == 0 || letter_count > 3 {
        return None;
    }

    let row_absolute = chars.get(i) == Some(&'$');
    if row_absolute {
        i += 1;
    }

    let digits_start = i;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }

    if let Some(&next) = chars.get(i) {
        if is_ident_char(next) || next == '(' {
            return None;
        }
    }

    let column = chars[letters_start..letters_start + letter_count]
        .iter()
        .fold(0u32, |acc, c| {
            acc * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)
        });
    let row: u32 = chars[digits_start..i].iter().collect::<String>().parse().ok()?;
    if row == 0 {
        return None;
    }

    Some(Reference {
        len: i - start,
        column,
        row,
        column_absolute,
        row_absolute,
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '$'
}

/// Parses a plain A1-style cell reference, `$` anchors allowed.
pub fn parse_cell_ref(reference: &str) -> Result<(u32, u32), FormulaError> {
    let chars: Vec<char> = reference.chars().collect();
    match match_reference(&chars, 0) {
        Some(r) if r.len == chars.len() => Ok((r.column, r.row)),
        _ => Err(FormulaError::BadReference(reference.to_string())),
    }
}

/// Column number to letters: 1 -> "A", 27 -> "AA".
pub fn column_letters(mut column: u32) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        column -= 1;
        letters.push((b'A' + (column % 26) as u8) as char);
        column /= 26;
    }
    letters.iter().rev().collect()
}

// -- Tests -------------------------------------------------------------------
