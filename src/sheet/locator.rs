use crate::common::errors::AppError;
use std::fmt;

pub const MAX_ROW: u32 = 1_048_576;
pub const MAX_COLUMN: u32 = 16_384;

const COORDS_PREFIX: &str = "coords:";
const A1_PREFIX: &str = "a1:";

/// A 1-indexed cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub row: u32,
    pub col: u32,
}

/// A resolved cell or range reference.
///
/// Ranges always hold the top-left corner in `start` and the bottom-right
/// corner in `end`, whatever order the caller wrote them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLocator {
    Cell(Coordinate),
    Range { start: Coordinate, end: Coordinate },
}

impl Coordinate {
    pub fn new(row: u32, col: u32) -> Result<Self, AppError> {
        if row == 0 || row > MAX_ROW {
            return Err(AppError::InvalidLocator(format!(
                "row {row} is outside 1..={MAX_ROW}"
            )));
        }
        if col == 0 || col > MAX_COLUMN {
            return Err(AppError::InvalidLocator(format!(
                "column {col} is outside 1..={MAX_COLUMN}"
            )));
        }
        Ok(Self { row, col })
    }

    pub fn to_a1(self) -> String {
        format!("{}{}", encode_column(self.col), self.row)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl CellLocator {
    /// Parses `input` with the single-cell grammar, or with the range grammar
    /// when `is_range` is set.
    pub fn parse(input: &str, is_range: bool) -> Result<Self, AppError> {
        if is_range {
            let (start, end) = parse_range(input)?;
            Ok(Self::range(start, end))
        } else {
            parse_cell(input).map(Self::Cell)
        }
    }

    /// Range first, single cell second, so `a1:a4` is a range and not the
    /// `a1:` prefix applied to `a4`. When neither grammar matches the
    /// single-cell error is returned since it names the offending token.
    pub fn detect(input: &str) -> Result<Self, AppError> {
        match parse_range(input) {
            Ok((start, end)) => Ok(Self::range(start, end)),
            Err(_) => parse_cell(input).map(Self::Cell),
        }
    }

    pub fn range(a: Coordinate, b: Coordinate) -> Self {
        Self::Range {
            start: Coordinate {
                row: a.row.min(b.row),
                col: a.col.min(b.col),
            },
            end: Coordinate {
                row: a.row.max(b.row),
                col: a.col.max(b.col),
            },
        }
    }

    /// Corner pair covering the locator; a single cell is a 1x1 range.
    pub fn bounds(&self) -> (Coordinate, Coordinate) {
        match *self {
            Self::Cell(c) => (c, c),
            Self::Range { start, end } => (start, end),
        }
    }
}

pub fn parse_cell(input: &str) -> Result<Coordinate, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidLocator("locator is empty".to_string()));
    }
    if let Some(rest) = trimmed.strip_prefix(COORDS_PREFIX) {
        return parse_numeric_pair(rest, input);
    }
    if let Some(rest) = trimmed.strip_prefix(A1_PREFIX) {
        return parse_a1(rest.trim(), input);
    }
    if trimmed.contains(',') {
        parse_numeric_pair(trimmed, input)
    } else {
        parse_a1(trimmed, input)
    }
}

pub fn parse_range(input: &str) -> Result<(Coordinate, Coordinate), AppError> {
    // Prefixes contain colons too, so every colon is a candidate separator.
    for (idx, _) in input.match_indices(':') {
        let (left, right) = (&input[..idx], &input[idx + 1..]);
        if let (Ok(start), Ok(end)) = (parse_cell(left), parse_cell(right)) {
            return Ok((start, end));
        }
    }
    Err(AppError::InvalidLocator(format!(
        "not a range of two cells: {}",
        input.trim()
    )))
}

// Spreadsheet notation: letter run followed by digit run, e.g. B4 or bbc23.
fn parse_a1(token: &str, original: &str) -> Result<Coordinate, AppError> {
    let split = token
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(token.len());
    let (letters, digits) = token.split_at(split);

    if letters.is_empty()
        || digits.is_empty()
        || !digits.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AppError::InvalidLocator(original.trim().to_string()));
    }

    let col = decode_column(letters)
        .ok_or_else(|| AppError::InvalidLocator(original.trim().to_string()))?;
    let row: u32 = digits
        .parse()
        .map_err(|_| AppError::InvalidLocator(original.trim().to_string()))?;

    Coordinate::new(row, col)
        .map_err(|_| AppError::InvalidLocator(original.trim().to_string()))
}

// Numeric pair: "row,col", optionally wrapped in parentheses.
fn parse_numeric_pair(token: &str, original: &str) -> Result<Coordinate, AppError> {
    let mut inner = token.trim();
    if let Some(stripped) = inner.strip_prefix('(') {
        inner = stripped
            .strip_suffix(')')
            .ok_or_else(|| AppError::InvalidLocator(original.trim().to_string()))?;
    }

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [row, col] = parts.as_slice() else {
        return Err(AppError::InvalidLocator(original.trim().to_string()));
    };

    let parse = |part: &str| {
        part.parse::<u32>()
            .map_err(|_| AppError::InvalidLocator(original.trim().to_string()))
    };
    Coordinate::new(parse(*row)?, parse(*col)?)
        .map_err(|_| AppError::InvalidLocator(original.trim().to_string()))
}

/// Decodes a column label (`A`=1, `Z`=26, `AA`=27). Returns `None` for
/// anything that is not a non-empty run of ASCII letters or that exceeds the
/// sheet's column limit.
pub fn decode_column(label: &str) -> Option<u32> {
    if label.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for ch in label.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
        if col > MAX_COLUMN {
            return None;
        }
    }
    Some(col)
}

pub fn encode_column(col: u32) -> String {
    let mut col = col;
    let mut letters = String::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    letters
}
