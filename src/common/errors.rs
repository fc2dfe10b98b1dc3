use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("file already exists: {0}")]
    FileAlreadyExists(String),
    #[error("alias already in use by another workbook: {0}")]
    AliasAlreadyInUse(String),
    #[error("workbook {path} is already opened with alias {alias}")]
    FileAlreadyOpened { path: String, alias: String },
    #[error("no opened workbook found with alias: {0}")]
    UnknownWorkbook(String),
    #[error("no workbook is open")]
    NoWorkbookOpen,
    #[error("sheet not found: {0}")]
    SheetNotFound(String),
    #[error("sheet already exists: {0}")]
    SheetExistsAlready(String),
    #[error("cannot remove the last remaining sheet: {0}")]
    CannotRemoveLastSheet(String),
    #[error("invalid cell locator: {0}")]
    InvalidLocator(String),
    #[error("too few column names supplied: got {supplied}, range reaches column {required}")]
    TooFewColumnNamesSupplied { supplied: usize, required: usize },
    #[error("spreadsheet engine error: {0}")]
    Engine(String),
    #[error("io error: {0}")]
    IoError(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn code(&self) -> i32 {
        match self {
            AppError::InvalidPath(_) => 1001,
            AppError::FileNotFound(_) => 1002,
            AppError::FileAlreadyExists(_) => 1003,
            AppError::AliasAlreadyInUse(_) => 1004,
            AppError::FileAlreadyOpened { .. } => 1005,
            AppError::UnknownWorkbook(_) => 1006,
            AppError::NoWorkbookOpen => 1007,
            AppError::SheetNotFound(_) => 1008,
            AppError::SheetExistsAlready(_) => 1009,
            AppError::CannotRemoveLastSheet(_) => 1010,
            AppError::InvalidLocator(_) => 1011,
            AppError::TooFewColumnNamesSupplied { .. } => 1012,
            AppError::Engine(_) => 1013,
            AppError::IoError(_) => 1014,
            AppError::InvalidInput(_) => 1015,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::IoError(value.to_string())
    }
}
