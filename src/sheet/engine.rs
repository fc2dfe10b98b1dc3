use crate::common::errors::AppError;
use crate::sheet::cell_value::CellValue;
use crate::sheet::locator::Coordinate;
use std::path::Path;
use umya_spreadsheet::{Cell, Spreadsheet, Worksheet};

/// Owns one workbook held by the spreadsheet engine.
///
/// This is the whole surface the session relies on: load, create, save,
/// sheet management and cell access by 1-indexed coordinate. Parsing,
/// styles and serialisation stay inside `umya_spreadsheet`.
pub struct EngineWorkbook {
    book: Spreadsheet,
}

impl std::fmt::Debug for EngineWorkbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineWorkbook")
            .field("sheets", &self.sheet_names())
            .finish()
    }
}

impl EngineWorkbook {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let book = umya_spreadsheet::reader::xlsx::read(path)
            .map_err(|e| AppError::Engine(format!("failed to read {}: {e}", path.display())))?;
        Ok(Self { book })
    }

    /// New workbook with the engine's default single sheet.
    pub fn create() -> Self {
        Self {
            book: umya_spreadsheet::new_file(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        umya_spreadsheet::writer::xlsx::write(&self.book, path)
            .map_err(|e| AppError::Engine(format!("failed to write {}: {e}", path.display())))
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection_no_check()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect()
    }

    pub fn first_sheet_name(&self) -> Result<String, AppError> {
        self.sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Engine("workbook has no sheets".to_string()))
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.book
            .get_sheet_collection_no_check()
            .iter()
            .any(|sheet| sheet.get_name() == name)
    }

    pub fn create_sheet(&mut self, name: &str) -> Result<(), AppError> {
        if self.has_sheet(name) {
            return Err(AppError::SheetExistsAlready(name.to_string()));
        }
        self.book
            .new_sheet(name.to_string())
            .map_err(|e| AppError::Engine(format!("failed to create sheet {name}: {e}")))?;
        Ok(())
    }

    pub fn remove_sheet(&mut self, name: &str) -> Result<(), AppError> {
        if !self.has_sheet(name) {
            return Err(AppError::SheetNotFound(name.to_string()));
        }
        if self.book.get_sheet_collection_no_check().len() <= 1 {
            return Err(AppError::CannotRemoveLastSheet(name.to_string()));
        }
        self.book
            .remove_sheet_by_name(name)
            .map_err(|e| AppError::Engine(format!("failed to remove sheet {name}: {e}")))?;
        // The engine's own active tab index may now point past the end.
        self.book.set_active_sheet(0);
        Ok(())
    }

    pub fn get_cell(&self, sheet: &str, at: Coordinate) -> Result<CellValue, AppError> {
        let worksheet = self.sheet(sheet)?;
        Ok(worksheet
            .get_cell((at.col, at.row))
            .map(cell_value)
            .unwrap_or(CellValue::Empty))
    }

    /// Writes a typed value. `Empty` removes the cell so the populated
    /// bounds shrink back.
    pub fn set_cell(&mut self, sheet: &str, at: Coordinate, value: &CellValue) -> Result<(), AppError> {
        let worksheet = self.sheet_mut(sheet)?;
        let coordinate = (at.col, at.row);
        // Strings go through set_value_string: the generic setter would guess types.
        match value {
            CellValue::String(text) => {
                worksheet.get_cell_mut(coordinate).set_value_string(text.clone());
            }
            CellValue::Number(number) => {
                worksheet.get_cell_mut(coordinate).set_value_number(*number);
            }
            CellValue::Boolean(flag) => {
                worksheet.get_cell_mut(coordinate).set_value_bool(*flag);
            }
            CellValue::Empty => {
                worksheet.remove_cell(coordinate);
            }
        }
        Ok(())
    }

    pub fn set_number_format(&mut self, sheet: &str, at: Coordinate, code: &str) -> Result<(), AppError> {
        self.sheet_mut(sheet)?
            .get_style_mut((at.col, at.row))
            .get_number_format_mut()
            .set_format_code(code.to_string());
        Ok(())
    }

    pub fn max_row(&self, sheet: &str) -> Result<u32, AppError> {
        Ok(self.sheet(sheet)?.get_highest_row())
    }

    pub fn max_column(&self, sheet: &str) -> Result<u32, AppError> {
        Ok(self.sheet(sheet)?.get_highest_column())
    }

    fn sheet(&self, name: &str) -> Result<&Worksheet, AppError> {
        self.book
            .get_sheet_collection_no_check()
            .iter()
            .find(|sheet| sheet.get_name() == name)
            .ok_or_else(|| AppError::SheetNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet, AppError> {
        self.book
            .get_sheet_by_name_mut(name)
            .ok_or_else(|| AppError::SheetNotFound(name.to_string()))
    }
}

// Cells holding an empty string, e.g. from another editor, read back as Empty.
fn cell_value(cell: &Cell) -> CellValue {
    let text = cell.get_value();
    if text.is_empty() {
        return CellValue::Empty;
    }
    match cell.get_data_type() {
        "n" => cell
            .get_value_number()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::String(text.to_string())),
        "b" => CellValue::Boolean(text.eq_ignore_ascii_case("TRUE") || text == "1"),
        _ => CellValue::String(text.to_string()),
    }
}
