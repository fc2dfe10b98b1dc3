use crate::common::{create_workbook, new_xlsx_path};
use serde_json::{json, Value};
use xlsx_keywords::rpc::dispatcher::Dispatcher;

#[test]
fn initialize_reports_server_info() {
    let mut dispatcher = Dispatcher::new();
    let init = dispatcher.dispatch("initialize", Some(json!({}))).expect("initialize");
    assert_eq!(init["serverInfo"]["name"], "xlsx-keywords");
    assert_eq!(dispatcher.dispatch("initialized", None).expect("initialized"), Value::Null);
}

#[test]
fn keyword_names_and_documentation_list_the_catalog() {
    let mut dispatcher = Dispatcher::new();
    let names = dispatcher.dispatch("get_keyword_names", None).expect("names");
    let names = names.as_array().expect("array");
    assert!(names.contains(&json!("Open Workbook")));
    assert!(names.contains(&json!("Read Sheet Data")));

    let docs = dispatcher.dispatch("keywords/list", None).expect("docs");
    let write = docs["keywords"]
        .as_array()
        .expect("keywords")
        .iter()
        .find(|kw| kw["name"] == "Write To Cell")
        .expect("write to cell");
    assert_eq!(write["args"], json!(["cell", "value", "number_format"]));
    assert!(!write["doc"].as_str().expect("doc").is_empty());
}

#[test]
fn unknown_keywords_are_application_errors() {
    let mut dispatcher = Dispatcher::new();
    let err = dispatcher
        .dispatch("run_keyword", Some(json!({ "name": "Delete Everything" })))
        .expect_err("unknown keyword");
    assert!(err.to_string().contains("Delete Everything"));
    assert_eq!(err.code(), 1015);

    let err = dispatcher.dispatch("run_keyword", None).expect_err("missing params");
    assert_eq!(err.code(), 1015);
}

#[test]
fn keywords_can_be_called_directly_by_method_name() {
    let (_dir, path) = new_xlsx_path("direct.xlsx");
    let mut dispatcher = Dispatcher::new();

    let created = dispatcher
        .dispatch(
            "create_workbook",
            Some(json!({ "file_path": path.to_string_lossy(), "alias": "direct" })),
        )
        .expect("create");
    assert_eq!(created["alias"], "direct");
    assert_eq!(created["active_sheet"], "Sheet1");

    dispatcher
        .dispatch("Write To Cell", Some(json!(["B2", "hello"])))
        .expect("write");
    let value = dispatcher
        .dispatch("read_from_cell", Some(json!({ "cell": "2,2" })))
        .expect("read");
    assert_eq!(value, json!("hello"));
}

#[test]
fn positional_arguments_follow_the_declared_order() {
    let (_dir, path) = new_xlsx_path("positional.xlsx");
    let mut dispatcher = Dispatcher::new();
    create_workbook(&mut dispatcher, &path, "pos");

    let result = dispatcher
        .dispatch(
            "run_keyword",
            Some(json!({ "name": "Write To Cell", "args": ["coords:(3,2)", 12.5, "0.00"] })),
        )
        .expect("write");
    assert_eq!(result["status"], "PASS");
    assert_eq!(result["return"], json!({ "cell": "B3", "row": 3, "col": 2 }));

    let result = dispatcher
        .dispatch(
            "run_keyword",
            Some(json!({ "name": "read from cell", "args": ["B3"] })),
        )
        .expect("read");
    assert_eq!(result["return"], json!(12.5));

    let err = dispatcher
        .dispatch(
            "run_keyword",
            Some(json!({ "name": "Get Row Count", "args": ["extra"] })),
        )
        .expect_err("too many args");
    assert!(err.to_string().contains("at most 0 arguments"));
}

#[test]
fn session_state_persists_across_calls() {
    let (_dir, path) = new_xlsx_path("state.xlsx");
    let mut dispatcher = Dispatcher::new();
    create_workbook(&mut dispatcher, &path, "state");
    assert_eq!(dispatcher.session().active_alias(), Some("state"));

    dispatcher
        .dispatch("close_all_workbooks", None)
        .expect("close all");
    assert!(dispatcher.session().is_empty());
}
