use crate::common::errors::AppError;
use std::path::{Path, PathBuf};

const WORKBOOK_EXTENSIONS: [&str; 2] = ["xlsx", "xlsm"];

pub struct FsUtil;

impl FsUtil {
    /// Absolute form of a workbook path. Absolute paths double as default
    /// aliases, so relative input is anchored to the working directory.
    pub fn resolve_workbook_path(path: &str) -> Result<PathBuf, AppError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(AppError::InvalidPath("path is empty".to_string()));
        }
        let resolved = Self::absolute(Path::new(path))?;
        if !Self::is_workbook(&resolved) {
            return Err(AppError::InvalidPath(format!(
                "not an .xlsx or .xlsm workbook: {}",
                Self::display(&resolved)
            )));
        }
        Ok(resolved)
    }

    pub fn display(path: &Path) -> String {
        path.display().to_string()
    }

    fn absolute(path: &Path) -> Result<PathBuf, AppError> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(std::env::current_dir()?.join(path))
    }

    fn is_workbook(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }
}
