pub mod cells;
pub mod sheets;
pub mod workbooks;

use crate::common::errors::AppError;
use crate::session::registry::SessionRegistry;
use serde_json::Value;

pub type KeywordHandler = fn(&mut SessionRegistry, Value) -> Result<Value, AppError>;

pub struct Keyword {
    pub name: &'static str,
    pub doc: &'static str,
    /// Argument names in positional order.
    pub args: &'static [&'static str],
    pub handler: KeywordHandler,
}

pub static KEYWORDS: &[Keyword] = &[
    Keyword {
        name: "Open Workbook",
        doc: "Opens an existing workbook and makes it active. Alias defaults to the absolute file path.",
        args: &["file_path", "alias"],
        handler: workbooks::open_workbook,
    },
    Keyword {
        name: "Create Workbook",
        doc: "Creates a new workbook and makes it active. Nothing is written until Save.",
        args: &["file_path", "overwrite_file_if_exists", "alias"],
        handler: workbooks::create_workbook,
    },
    Keyword {
        name: "Close Workbook",
        doc: "Closes the named or active workbook without saving.",
        args: &["alias"],
        handler: workbooks::close_workbook,
    },
    Keyword {
        name: "Close All Workbooks",
        doc: "Closes every open workbook without saving.",
        args: &[],
        handler: workbooks::close_all_workbooks,
    },
    Keyword {
        name: "Switch Workbook",
        doc: "Makes the workbook with the given alias active.",
        args: &["alias"],
        handler: workbooks::switch_workbook,
    },
    Keyword {
        name: "Save",
        doc: "Saves the active workbook, optionally to a new file path.",
        args: &["file_path"],
        handler: workbooks::save,
    },
    Keyword {
        name: "Log Opened Workbooks",
        doc: "Logs and returns the open workbooks in registration order.",
        args: &[],
        handler: workbooks::log_opened_workbooks,
    },
    Keyword {
        name: "Switch Sheet",
        doc: "Switches the active workbook to an existing sheet.",
        args: &["sheet_name"],
        handler: sheets::switch_sheet,
    },
    Keyword {
        name: "Create Sheet",
        doc: "Adds a sheet to the active workbook. The active sheet does not change.",
        args: &["name"],
        handler: sheets::create_sheet,
    },
    Keyword {
        name: "Remove Sheet",
        doc: "Removes a sheet from the active workbook.",
        args: &["name"],
        handler: sheets::remove_sheet,
    },
    Keyword {
        name: "Get Sheet Names",
        doc: "Returns the sheet names of the active workbook in tab order.",
        args: &[],
        handler: sheets::get_sheet_names,
    },
    Keyword {
        name: "Get Row Count",
        doc: "Returns the last populated row of the active sheet.",
        args: &[],
        handler: sheets::get_row_count,
    },
    Keyword {
        name: "Get Column Count",
        doc: "Returns the last populated column of the active sheet.",
        args: &[],
        handler: sheets::get_column_count,
    },
    Keyword {
        name: "Read From Cell",
        doc: "Reads a cell (A1, row,col, (row,col), coords:row,col) or concatenates a range such as A1:A4.",
        args: &["cell", "trim", "trim_each"],
        handler: cells::read_from_cell,
    },
    Keyword {
        name: "Write To Cell",
        doc: "Writes a string, number, boolean or null to a cell, with an optional number format.",
        args: &["cell", "value", "number_format"],
        handler: cells::write_to_cell,
    },
    Keyword {
        name: "Read Sheet Data",
        doc: "Reads the active sheet, or cell_range, as lists or as rows keyed by column name.",
        args: &[
            "column_names",
            "get_column_names_from_header_row",
            "cell_range",
            "trim",
        ],
        handler: cells::read_sheet_data,
    },
];

/// Keyword names match case-insensitively with spaces and underscores ignored.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn find(name: &str) -> Option<&'static Keyword> {
    let wanted = normalize_name(name);
    KEYWORDS.iter().find(|kw| normalize_name(kw.name) == wanted)
}

impl Keyword {
    /// Accepts named arguments as an object or positional ones as an array.
    pub fn named_args(&self, args: Value) -> Result<Value, AppError> {
        match args {
            Value::Array(values) => {
                if values.len() > self.args.len() {
                    return Err(AppError::InvalidInput(format!(
                        "{} takes at most {} arguments, got {}",
                        self.name,
                        self.args.len(),
                        values.len()
                    )));
                }
                let named = self
                    .args
                    .iter()
                    .map(|name| name.to_string())
                    .zip(values)
                    .collect::<serde_json::Map<_, _>>();
                Ok(Value::Object(named))
            }
            Value::Object(_) | Value::Null => Ok(args),
            other => Err(AppError::InvalidInput(format!(
                "{} arguments must be an object or an array, got {other}",
                self.name
            ))),
        }
    }

    pub fn run(&self, session: &mut SessionRegistry, args: Value) -> Result<Value, AppError> {
        let args = self.named_args(args)?;
        (self.handler)(session, args)
    }
}
