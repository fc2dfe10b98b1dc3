use crate::common::errors::AppError;
use crate::common::json::JsonUtil;
use crate::session::registry::SessionRegistry;
use crate::session::reader::SheetDataOptions;
use crate::sheet::cell_value::CellValue;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct ReadFromCellInput {
    cell: String,
    #[serde(default)]
    trim: bool,
    #[serde(default)]
    trim_each: bool,
}

#[derive(Debug, Deserialize)]
struct WriteToCellInput {
    cell: String,
    value: CellValue,
    #[serde(default)]
    number_format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReadSheetDataInput {
    column_names: Option<Vec<String>>,
    get_column_names_from_header_row: bool,
    cell_range: Option<String>,
    trim: bool,
}

pub fn read_from_cell(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: ReadFromCellInput = JsonUtil::args(args)?;
    let value = session.read_from_cell(&input.cell, input.trim, input.trim_each)?;
    JsonUtil::to_value(value)
}

pub fn write_to_cell(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: WriteToCellInput = JsonUtil::args(args)?;
    let at = session.write_to_cell(&input.cell, &input.value, input.number_format.as_deref())?;
    Ok(json!({ "cell": at.to_a1(), "row": at.row, "col": at.col }))
}

pub fn read_sheet_data(session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
    let input: ReadSheetDataInput = JsonUtil::args(args)?;
    let rows = session
        .read_sheet_data(SheetDataOptions {
            range: input.cell_range,
            column_names: input.column_names,
            get_column_names_from_header_row: input.get_column_names_from_header_row,
            trim: input.trim,
        })?
        .collect::<Result<Vec<_>, _>>()?;
    JsonUtil::to_value(rows)
}
