use crate::common::errors::AppError;
use crate::common::fs::FsUtil;
use crate::common::json::JsonUtil;
use crate::session::registry::SessionRegistry;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
struct OpenWorkbookInput {
    file_path: String,
    #[serde(default)]
    alias: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateWorkbookInput {
    file_path: String,
    #[serde(default)]
    overwrite_file_if_exists: bool,
    #[serde(default)]
    alias: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AliasInput {
    #[serde(default)]
    alias: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveInput {
    #[serde(default)]
    file_path: Option<String>,
}

#[derive(Debug, Serialize)]
struct WorkbookOutput {
    alias: String,
    file_path: String,
    active_sheet: String,
}

pub fn open_workbook(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: OpenWorkbookInput = JsonUtil::args(args)?;
    let handle = session.open(&input.file_path, input.alias.as_deref())?;
    JsonUtil::to_value(WorkbookOutput {
        alias: handle.alias.clone(),
        file_path: FsUtil::display(&handle.file_path),
        active_sheet: handle.active_sheet.clone(),
    })
}

pub fn create_workbook(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: CreateWorkbookInput = JsonUtil::args(args)?;
    let handle = session.create(
        &input.file_path,
        input.alias.as_deref(),
        input.overwrite_file_if_exists,
    )?;
    JsonUtil::to_value(WorkbookOutput {
        alias: handle.alias.clone(),
        file_path: FsUtil::display(&handle.file_path),
        active_sheet: handle.active_sheet.clone(),
    })
}

pub fn close_workbook(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: AliasInput = JsonUtil::args(args)?;
    session.close(input.alias.as_deref())?;
    Ok(json!({ "active": session.active_alias() }))
}

pub fn close_all_workbooks(session: &mut SessionRegistry, _args: Value) -> Result<Value, AppError> {
    session.close_all();
    Ok(Value::Null)
}

pub fn switch_workbook(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: AliasInput = JsonUtil::args(args)?;
    let alias = input
        .alias
        .ok_or_else(|| AppError::InvalidInput("alias is required".to_string()))?;
    session.switch_workbook(&alias)?;
    let handle = session.active()?;
    Ok(json!({ "active": handle.alias, "active_sheet": handle.active_sheet }))
}

pub fn save(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: SaveInput = JsonUtil::args(args)?;
    let path = session.save(input.file_path.as_deref())?;
    Ok(json!({ "file_path": FsUtil::display(&path) }))
}

pub fn log_opened_workbooks(session: &mut SessionRegistry, _args: Value) -> Result<Value, AppError> {
    let opened = session.opened_workbooks();
    for entry in &opened {
        info!(
            alias = %entry.alias,
            path = %entry.file_path,
            sheet = %entry.active_sheet,
            active = entry.active,
            "opened workbook"
        );
    }
    JsonUtil::to_value(opened)
}
