use crate::common::errors::AppError;
use crate::common::fs::FsUtil;
use crate::sheet::cell_value::CellValue;
use crate::sheet::engine::EngineWorkbook;
use crate::sheet::locator::{CellLocator, Coordinate};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One open workbook and the sheet it currently targets.
#[derive(Debug)]
pub struct WorkbookHandle {
    pub alias: String,
    pub file_path: PathBuf,
    pub active_sheet: String,
    workbook: EngineWorkbook,
}

impl WorkbookHandle {
    pub fn workbook(&self) -> &EngineWorkbook {
        &self.workbook
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenedWorkbook {
    pub alias: String,
    pub file_path: String,
    pub active_sheet: String,
    pub active: bool,
}

/// Open workbooks in registration order plus the index of the active one.
///
/// `active` is `Some` exactly when `workbooks` is non-empty.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    workbooks: Vec<WorkbookHandle>,
    active: Option<usize>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, path: &str, alias: Option<&str>) -> Result<&WorkbookHandle, AppError> {
        let path = FsUtil::resolve_workbook_path(path)?;
        if !path.exists() {
            return Err(AppError::FileNotFound(FsUtil::display(&path)));
        }
        let alias = self.claim(&path, alias)?;
        let workbook = EngineWorkbook::load(&path)?;
        info!(alias = %alias, path = %path.display(), "opened workbook");
        self.register(alias, path, workbook)
    }

    pub fn create(
        &mut self,
        path: &str,
        alias: Option<&str>,
        overwrite: bool,
    ) -> Result<&WorkbookHandle, AppError> {
        let path = FsUtil::resolve_workbook_path(path)?;
        if path.exists() && !overwrite {
            return Err(AppError::FileAlreadyExists(FsUtil::display(&path)));
        }
        let alias = self.claim(&path, alias)?;
        info!(alias = %alias, path = %path.display(), "created workbook");
        self.register(alias, path, EngineWorkbook::create())
    }

    /// Closes `alias`, or the active workbook when no alias is given.
    /// Unsaved changes are discarded.
    pub fn close(&mut self, alias: Option<&str>) -> Result<(), AppError> {
        let index = match alias {
            Some(alias) => self.index_of(alias)?,
            None => self.active.ok_or(AppError::NoWorkbookOpen)?,
        };
        let closed = self.workbooks.remove(index);
        info!(alias = %closed.alias, "closed workbook");

        self.active = match self.active {
            _ if self.workbooks.is_empty() => None,
            // Fall back to the entry registered just before the closed one.
            Some(active) if active == index => Some(index.saturating_sub(1)),
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        Ok(())
    }

    pub fn close_all(&mut self) {
        for handle in self.workbooks.drain(..) {
            info!(alias = %handle.alias, "closed workbook");
        }
        self.active = None;
    }

    pub fn switch_workbook(&mut self, alias: &str) -> Result<(), AppError> {
        let index = self.index_of(alias)?;
        self.active = Some(index);
        Ok(())
    }

    pub fn switch_sheet(&mut self, name: &str) -> Result<(), AppError> {
        let handle = self.active_mut()?;
        if !handle.workbook.has_sheet(name) {
            return Err(AppError::SheetNotFound(name.to_string()));
        }
        handle.active_sheet = name.to_string();
        Ok(())
    }

    /// Adds a sheet to the active workbook without switching to it.
    pub fn create_sheet(&mut self, name: &str) -> Result<(), AppError> {
        self.active_mut()?.workbook.create_sheet(name)
    }

    pub fn remove_sheet(&mut self, name: &str) -> Result<(), AppError> {
        let handle = self.active_mut()?;
        handle.workbook.remove_sheet(name)?;
        if handle.active_sheet == name {
            handle.active_sheet = handle.workbook.first_sheet_name()?;
        }
        Ok(())
    }

    /// Saves the active workbook, optionally to a new path which it then keeps.
    pub fn save(&mut self, path: Option<&str>) -> Result<PathBuf, AppError> {
        let index = self.active.ok_or(AppError::NoWorkbookOpen)?;
        let target = match path {
            Some(path) => {
                let target = FsUtil::resolve_workbook_path(path)?;
                if let Some(owner) = self
                    .workbooks
                    .iter()
                    .enumerate()
                    .find(|(i, h)| *i != index && h.file_path == target)
                {
                    return Err(AppError::FileAlreadyOpened {
                        path: FsUtil::display(&target),
                        alias: owner.1.alias.clone(),
                    });
                }
                target
            }
            None => self.workbooks[index].file_path.clone(),
        };

        let handle = &mut self.workbooks[index];
        handle.workbook.save(&target)?;
        handle.file_path = target.clone();
        info!(alias = %handle.alias, path = %target.display(), "saved workbook");
        Ok(target)
    }

    pub fn row_count(&self) -> Result<u32, AppError> {
        let handle = self.active()?;
        handle.workbook.max_row(&handle.active_sheet)
    }

    pub fn column_count(&self) -> Result<u32, AppError> {
        let handle = self.active()?;
        handle.workbook.max_column(&handle.active_sheet)
    }

    pub fn sheet_names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.active()?.workbook.sheet_names())
    }

    pub fn write_to_cell(
        &mut self,
        locator: &str,
        value: &CellValue,
        number_format: Option<&str>,
    ) -> Result<Coordinate, AppError> {
        let at = match CellLocator::detect(locator)? {
            CellLocator::Cell(at) => at,
            CellLocator::Range { .. } => {
                return Err(AppError::InvalidLocator(format!(
                    "expected a single cell, got range {}",
                    locator.trim()
                )))
            }
        };
        debug!(locator, cell = %at, "resolved write locator");

        let handle = self.active_mut()?;
        let sheet = handle.active_sheet.clone();
        if let Some(code) = number_format {
            handle.workbook.set_number_format(&sheet, at, code)?;
        }
        handle.workbook.set_cell(&sheet, at, value)?;
        Ok(at)
    }

    pub fn opened_workbooks(&self) -> Vec<OpenedWorkbook> {
        self.workbooks
            .iter()
            .enumerate()
            .map(|(index, handle)| OpenedWorkbook {
                alias: handle.alias.clone(),
                file_path: FsUtil::display(&handle.file_path),
                active_sheet: handle.active_sheet.clone(),
                active: self.active == Some(index),
            })
            .collect()
    }

    pub fn active_alias(&self) -> Option<&str> {
        self.active.map(|index| self.workbooks[index].alias.as_str())
    }

    pub fn len(&self) -> usize {
        self.workbooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workbooks.is_empty()
    }

    pub fn active(&self) -> Result<&WorkbookHandle, AppError> {
        self.active
            .map(|index| &self.workbooks[index])
            .ok_or(AppError::NoWorkbookOpen)
    }

    fn active_mut(&mut self) -> Result<&mut WorkbookHandle, AppError> {
        let index = self.active.ok_or(AppError::NoWorkbookOpen)?;
        Ok(&mut self.workbooks[index])
    }

    fn index_of(&self, alias: &str) -> Result<usize, AppError> {
        self.workbooks
            .iter()
            .position(|handle| handle.alias == alias)
            .ok_or_else(|| AppError::UnknownWorkbook(alias.to_string()))
    }

    // Validates that neither the alias nor the file is taken; returns the effective alias.
    fn claim(&self, path: &Path, alias: Option<&str>) -> Result<String, AppError> {
        let alias = match alias.map(str::trim) {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => FsUtil::display(path),
        };
        if self.workbooks.iter().any(|handle| handle.alias == alias) {
            return Err(AppError::AliasAlreadyInUse(alias));
        }
        if let Some(owner) = self.workbooks.iter().find(|handle| handle.file_path.as_path() == path) {
            return Err(AppError::FileAlreadyOpened {
                path: FsUtil::display(path),
                alias: owner.alias.clone(),
            });
        }
        Ok(alias)
    }

    fn register(
        &mut self,
        alias: String,
        file_path: PathBuf,
        workbook: EngineWorkbook,
    ) -> Result<&WorkbookHandle, AppError> {
        let active_sheet = workbook.first_sheet_name()?;
        self.workbooks.push(WorkbookHandle {
            alias,
            file_path,
            active_sheet,
            workbook,
        });
        let index = self.workbooks.len() - 1;
        self.active = Some(index);
        Ok(&self.workbooks[index])
    }
}
