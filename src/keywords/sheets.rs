use crate::common::errors::AppError;
use crate::common::json::JsonUtil;
use crate::session::registry::SessionRegistry;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct SwitchSheetInput {
    sheet_name: String,
}

#[derive(Debug, Deserialize)]
struct SheetNameInput {
    name: String,
}

pub fn switch_sheet(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: SwitchSheetInput = JsonUtil::args(args)?;
    session.switch_sheet(&input.sheet_name)?;
    Ok(json!({ "active_sheet": input.sheet_name }))
}

pub fn create_sheet(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: SheetNameInput = JsonUtil::args(args)?;
    session.create_sheet(&input.name)?;
    Ok(json!({ "sheets": session.sheet_names()? }))
}

pub fn remove_sheet(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: SheetNameInput = JsonUtil::args(args)?;
    session.remove_sheet(&input.name)?;
    Ok(json!({
        "sheets": session.sheet_names()?,
        "active_sheet": session.active()?.active_sheet,
    }))
}

pub fn get_sheet_names(session: &mut SessionRegistry, _args: Value) -> Result<Value, AppError> {
    Ok(json!(session.sheet_names()?))
}

pub fn get_row_count(session: &mut SessionRegistry, _args: Value) -> Result<Value, AppError> {
    Ok(json!(session.row_count()?))
}

pub fn get_column_count(session: &mut SessionRegistry, _args: Value) -> Result<Value, AppError> {
    Ok(json!(session.column_count()?))
}
