use crate::common::errors::AppError;
use crate::session::registry::SessionRegistry;
use crate::sheet::cell_value::CellValue;
use crate::sheet::engine::EngineWorkbook;
use crate::sheet::locator::{encode_column, CellLocator, Coordinate};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, warn};

/// Arguments of `read_sheet_data`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SheetDataOptions {
    pub range: Option<String>,
    pub column_names: Option<Vec<String>>,
    pub get_column_names_from_header_row: bool,
    pub trim: bool,
}

/// One data row: plain values, or values keyed by column name in column order.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetRow {
    Values(Vec<CellValue>),
    Named(Vec<(String, CellValue)>),
}

impl SheetRow {
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        match self {
            SheetRow::Values(_) => None,
            SheetRow::Named(pairs) => pairs.iter().find(|(n, _)| n == name).map(|(_, v)| v),
        }
    }
}

impl Serialize for SheetRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SheetRow::Values(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            SheetRow::Named(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (name, value) in pairs {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Lazily walks the rows of a range, skipping rows with no content.
pub struct SheetRows<'a> {
    workbook: &'a EngineWorkbook,
    sheet: &'a str,
    first_col: u32,
    last_col: u32,
    next_row: u32,
    last_row: u32,
    names: Option<Vec<String>>,
    trim: bool,
}

impl<'a> SheetRows<'a> {
    fn read_row(&self, row: u32) -> Result<Vec<CellValue>, AppError> {
        (self.first_col..=self.last_col)
            .map(|col| {
                let value = self.workbook.get_cell(self.sheet, Coordinate { row, col })?;
                Ok(if self.trim { value.trimmed() } else { value })
            })
            .collect()
    }
}

impl<'a> Iterator for SheetRows<'a> {
    type Item = Result<SheetRow, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_row <= self.last_row {
            let row = self.next_row;
            self.next_row += 1;

            let values = match self.read_row(row) {
                Ok(values) => values,
                Err(err) => return Some(Err(err)),
            };
            if values.iter().all(CellValue::is_empty) {
                continue;
            }

            return Some(Ok(match &self.names {
                None => SheetRow::Values(values),
                Some(names) => SheetRow::Named(name_values(names, values)),
            }));
        }
        None
    }
}

// Repeated names keep their first position and take the later value.
fn name_values(names: &[String], values: Vec<CellValue>) -> Vec<(String, CellValue)> {
    let mut pairs: Vec<(String, CellValue)> = Vec::with_capacity(values.len());
    for (name, value) in names.iter().zip(values) {
        match pairs.iter_mut().find(|(existing, _)| existing == name) {
            Some(slot) => slot.1 = value,
            None => pairs.push((name.clone(), value)),
        }
    }
    pairs
}

impl SessionRegistry {
    /// Reads one cell, or collapses a range into a single text value.
    ///
    /// For ranges, `trim_each` trims every cell before concatenation while
    /// `trim` only trims the very start and end of the combined text.
    pub fn read_from_cell(
        &self,
        locator: &str,
        trim: bool,
        trim_each: bool,
    ) -> Result<CellValue, AppError> {
        let handle = self.active()?;
        let workbook = handle.workbook();
        let sheet = handle.active_sheet.as_str();
        let resolved = CellLocator::detect(locator)?;
        debug!(locator, ?resolved, "resolved read locator");

        let (start, end) = match resolved {
            CellLocator::Cell(at) => {
                let value = workbook.get_cell(sheet, at)?;
                return Ok(if trim || trim_each { value.trimmed() } else { value });
            }
            CellLocator::Range { start, end } => (start, end),
        };

        // Cells past the populated extent are empty; skip walking them.
        let last_row = end.row.min(workbook.max_row(sheet)?);
        let last_col = end.col.min(workbook.max_column(sheet)?);

        let mut combined = String::new();
        let mut found = false;
        for row in start.row..=last_row {
            for col in start.col..=last_col {
                let value = workbook.get_cell(sheet, Coordinate { row, col })?;
                if value.is_empty() {
                    continue;
                }
                found = true;
                let text = value.to_string();
                combined.push_str(if trim_each { text.trim() } else { &text });
            }
        }

        if !found {
            return Ok(CellValue::Empty);
        }
        Ok(CellValue::String(if trim {
            combined.trim().to_string()
        } else {
            combined
        }))
    }

    pub fn read_sheet_data(&self, options: SheetDataOptions) -> Result<SheetRows<'_>, AppError> {
        let handle = self.active()?;
        let workbook = handle.workbook();
        let sheet = handle.active_sheet.as_str();
        let max_row = workbook.max_row(sheet)?;
        let max_col = workbook.max_column(sheet)?;

        let (start, end) = match options.range.as_deref() {
            Some(range) => CellLocator::parse(range, true)?.bounds(),
            None if max_row == 0 || max_col == 0 => {
                return Ok(SheetRows {
                    workbook,
                    sheet,
                    first_col: 1,
                    last_col: 0,
                    next_row: 1,
                    last_row: 0,
                    names: None,
                    trim: options.trim,
                })
            }
            None => (
                Coordinate { row: 1, col: 1 },
                Coordinate {
                    row: max_row,
                    col: max_col,
                },
            ),
        };
        let mut rows = SheetRows {
            workbook,
            sheet,
            first_col: start.col,
            last_col: end.col,
            next_row: start.row,
            last_row: end.row.min(max_row),
            names: None,
            trim: options.trim,
        };

        match options.column_names {
            Some(names) => {
                if options.get_column_names_from_header_row {
                    warn!("both column_names and get_column_names_from_header_row supplied; using column_names");
                }
                // Name N belongs to sheet column N, wherever the range starts.
                let (first, last) = ((start.col - 1) as usize, end.col as usize);
                if names.len() < last {
                    return Err(AppError::TooFewColumnNamesSupplied {
                        supplied: names.len(),
                        required: last,
                    });
                }
                rows.names = Some(names[first..last].to_vec());
            }
            None if options.get_column_names_from_header_row => {
                let header = rows.read_row(start.row)?;
                let names = header
                    .into_iter()
                    .zip(start.col..=end.col)
                    .map(|(value, col)| match value {
                        CellValue::Empty => encode_column(col),
                        other => other.to_string(),
                    })
                    .collect();
                rows.names = Some(names);
                rows.next_row = start.row + 1;
            }
            None => {}
        }

        Ok(rows)
    }
}
