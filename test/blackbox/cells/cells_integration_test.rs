use crate::common::{create_workbook, new_xlsx_path, run};
use serde_json::json;
use xlsx_keywords::rpc::dispatcher::Dispatcher;

fn people_workbook() -> (tempfile::TempDir, Dispatcher) {
    let (dir, path) = new_xlsx_path("people.xlsx");
    let mut dispatcher = Dispatcher::new();
    create_workbook(&mut dispatcher, &path, "people");
    let cells = [
        ("A1", json!(" Name ")),
        ("B1", json!("Age")),
        ("A2", json!("Ada")),
        ("B2", json!(36)),
        ("A3", json!("Grace ")),
        ("B3", json!(null)),
        ("A4", json!(" Linus")),
        ("B4", json!(21)),
    ];
    for (cell, value) in cells {
        run(&mut dispatcher, "Write To Cell", json!({ "cell": cell, "value": value }))
            .expect("write");
    }
    (dir, dispatcher)
}

#[test]
fn read_sheet_data_keys_rows_by_the_header() {
    let (_dir, mut dispatcher) = people_workbook();
    let rows = run(
        &mut dispatcher,
        "Read Sheet Data",
        json!({ "get_column_names_from_header_row": true, "trim": true }),
    )
    .expect("read");
    assert_eq!(
        rows,
        json!([
            { "Name": "Ada", "Age": 36.0 },
            { "Name": "Grace", "Age": null },
            { "Name": "Linus", "Age": 21.0 }
        ])
    );
}

#[test]
fn read_sheet_data_accepts_positional_arguments() {
    let (_dir, mut dispatcher) = people_workbook();
    let rows = run(
        &mut dispatcher,
        "Read Sheet Data",
        json!([["who", "years"], false, "A3:B4"]),
    )
    .expect("read");
    assert_eq!(
        rows,
        json!([
            { "who": "Grace ", "years": null },
            { "who": " Linus", "years": 21.0 }
        ])
    );

    let err = run(
        &mut dispatcher,
        "Read Sheet Data",
        json!({ "column_names": ["one"], "cell_range": "A1:B4" }),
    )
    .expect_err("too few names");
    assert_eq!(err.code(), 1012);
}

#[test]
fn range_reads_distinguish_whole_and_per_cell_trim() {
    let (_dir, mut dispatcher) = people_workbook();
    let read = |dispatcher: &mut Dispatcher, args| {
        run(dispatcher, "Read From Cell", args).expect("read")
    };

    assert_eq!(
        read(&mut dispatcher, json!({ "cell": "A1:A4" })),
        json!(" Name AdaGrace  Linus")
    );
    assert_eq!(
        read(&mut dispatcher, json!({ "cell": "A1:A4", "trim": true })),
        json!("Name AdaGrace  Linus")
    );
    assert_eq!(
        read(&mut dispatcher, json!({ "cell": "A1:A4", "trim_each": true })),
        json!("NameAdaGraceLinus")
    );
    assert_eq!(read(&mut dispatcher, json!(["B3"])), json!(null));
}

#[test]
fn writing_to_a_bad_locator_is_rejected() {
    let (_dir, mut dispatcher) = people_workbook();
    let err = run(
        &mut dispatcher,
        "Write To Cell",
        json!({ "cell": "00000000xkaj01xcA4", "value": "x" }),
    )
    .expect_err("bad locator");
    assert_eq!(err.code(), 1011);
    assert!(err.to_string().contains("00000000xkaj01xcA4"));

    let err = run(&mut dispatcher, "Write To Cell", json!({ "cell": "A1" }))
        .expect_err("missing value");
    assert_eq!(err.code(), 1015);
}

#[test]
fn creating_a_sheet_keeps_reading_the_current_one() {
    let (_dir, mut dispatcher) = people_workbook();
    run(&mut dispatcher, "Create Sheet", json!(["Archive"])).expect("create");
    assert_eq!(
        run(&mut dispatcher, "Read From Cell", json!(["a2"])).expect("read"),
        json!("Ada")
    );
}
