mod common;

use std::fs;

use common::{TestWorkspace, lil_lex, read_csv};
use lil_lex::dictionary::CatalogField;
use lil_lex::schema::{ColumnType, Schema};
use predicates::str::contains;

const PARCELS: &str = "\
_id,parcel_id,zip,assessed,sold_on,Owner Name,vacant,inspected_at
1,1001,15213,125000.50,2021-03-01,Ada,true,2021-03-01T09:30:00
2,1002,15217,98000.00,2021-03-02,NA,false,2021-03-02T14:05:10
3,1003,15213,,2021-03-03,Grace,true,
";

#[test]
fn infer_writes_dictionary_next_to_input() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("parcels.csv", PARCELS);

    lil_lex()
        .env_remove("RUST_LOG")
        .args(["infer", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stderr(contains("Unique columns (primary key candidates)"))
        .stderr(contains("Column 'Owner Name' contains null placeholders 'NA'"));

    let (headers, rows) = read_csv(&workspace.path().join("parcels-data-dictionary.csv"));
    assert_eq!(
        headers,
        vec!["column", "type", "label", "description", "example", "notes"]
    );
    let types = rows
        .iter()
        .map(|row| (row[0].as_str(), row[1].as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        types,
        vec![
            ("parcel_id", "text"),
            ("zip", "text"),
            ("assessed", "float"),
            ("sold_on", "date"),
            ("Owner Name", "text"),
            ("vacant", "bool"),
            ("inspected_at", "datetime"),
        ]
    );
    assert_eq!(rows[2][4], "125000.50");
    assert_eq!(rows[4][4], "Ada");
}

#[test]
fn infer_keeps_id_and_writes_schema_on_request() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("parcels.csv", PARCELS);
    let output = workspace.path().join("dictionary.csv");
    let schema_path = workspace.path().join("parcels.yml");

    lil_lex()
        .args([
            "infer",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--schema",
            schema_path.to_str().unwrap(),
            "--keep-id",
            "--table",
        ])
        .assert()
        .success()
        .stdout(contains("inspected_at"))
        .stdout(contains("datetime"));

    let (_, rows) = read_csv(&output);
    assert_eq!(rows[0][0], "_id");
    assert_eq!(rows[0][1], "text");

    let schema = Schema::load(&schema_path).expect("load schema");
    assert_eq!(schema.columns.len(), 8);
    let owner = &schema.columns[5];
    assert_eq!(owner.name, "Owner Name");
    assert_eq!(owner.output_name(), "owner_name");
    assert_eq!(owner.datatype, ColumnType::String);
    assert_eq!(owner.value_replacements.len(), 1);
    assert_eq!(owner.value_replacements[0].from, "NA");
    assert_eq!(schema.columns[3].datatype, ColumnType::Float);
}

#[test]
fn infer_samples_leading_rows() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("sample.csv", "code\n1\n2\nabc\n");
    let output = workspace.path().join("dict.csv");

    lil_lex()
        .args([
            "infer",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--sample-rows",
            "2",
        ])
        .assert()
        .success();

    let (_, rows) = read_csv(&output);
    assert_eq!(rows, vec![vec!["code", "int", "", "", "1", ""]]);
}

#[test]
fn infer_reads_tab_delimited_input() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("counts.tsv", "tract\tcount\nA\t3\nB\t4\n");
    let output = workspace.path().join("counts-dict.csv");

    lil_lex()
        .args([
            "infer",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let (_, rows) = read_csv(&output);
    assert_eq!(rows[1][0], "count");
    assert_eq!(rows[1][1], "int");
}

#[test]
fn infer_fails_without_rows() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("empty.csv", "a,b\n");

    lil_lex()
        .args(["infer", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("error:"));
    assert!(!workspace.path().join("empty-data-dictionary.csv").exists());
}

#[test]
fn names_prints_load_and_dump_forms() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("headers.csv", "Sale Date,geo.tract,ownerName\n1,2,3\n");

    lil_lex()
        .args([
            "names",
            "-i",
            input.to_str().unwrap(),
            "--name-strategy",
            "split-camel",
        ])
        .assert()
        .success()
        .stdout(contains("sale_date"))
        .stdout(contains("geo_tract"))
        .stdout(contains("owner_name"))
        .stdout(contains("camelCase"));
}

#[test]
fn names_rejects_colliding_headers() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("dupes.csv", "Owner Name,owner_name\na,b\n");

    lil_lex()
        .args(["names", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("owner_name"));

    lil_lex()
        .args(["names", "-i", input.to_str().unwrap(), "--maintain-case"])
        .assert()
        .success();
}

#[test]
fn template_writes_header_only_csv() {
    let workspace = TestWorkspace::new();
    let dictionary = workspace.write(
        "parcels-data-dictionary.csv",
        "field_name,type,label\nparcel_id,text,Parcel\nzip,text,ZIP\nsold_on,date,Sold\n",
    );

    lil_lex()
        .args(["template", "-i", dictionary.to_str().unwrap()])
        .assert()
        .success();

    let template = workspace.read("parcels-data-dictionary-headers.csv");
    let (headers, rows) = read_csv(&workspace.path().join("parcels-data-dictionary-headers.csv"));
    assert_eq!(headers, vec!["parcel_id", "zip", "sold_on"]);
    assert!(rows.is_empty());
    assert_eq!(template.lines().count(), 1);
}

#[test]
fn template_requires_name_column() {
    let workspace = TestWorkspace::new();
    let dictionary = workspace.write("bad.csv", "name,type\nparcel_id,text\n");

    lil_lex()
        .args(["template", "-i", dictionary.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("column"));
}

#[test]
fn export_then_import_fields() {
    let workspace = TestWorkspace::new();
    let dictionary = workspace.write(
        "parcels.csv",
        "column,type,label,description,type_override\n\
         parcel_id,text,Parcel ID,County parcel number,\n\
         assessed,float,Assessed value,Dollars,numeric\n",
    );

    lil_lex()
        .env_remove("RUST_LOG")
        .args(["export-fields", "-i", dictionary.to_str().unwrap()])
        .assert()
        .success()
        .stderr(contains("1 field(s) request a type override"));

    let json = workspace.read("parcels-fields.json");
    let mut fields: Vec<CatalogField> = serde_json::from_str(&json).expect("parse fields");
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].id, "parcel_id");
    assert_eq!(fields[0].info.notes, "County parcel number");
    assert_eq!(fields[1].info.type_override.as_deref(), Some("float"));

    fields[0].field_type = "text".to_string();
    fields[0].info.label = "Parcel ID\t".to_string();
    fields[1].info.notes = "Dollars\r".to_string();
    let edited = workspace.path().join("catalog.json");
    fs::write(&edited, serde_json::to_string(&fields).expect("serialize")).expect("write json");
    let output = workspace.path().join("roundtrip.csv");

    lil_lex()
        .args([
            "import-fields",
            "-i",
            edited.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let (headers, rows) = read_csv(&output);
    assert_eq!(headers, vec!["column", "type", "label", "description"]);
    assert_eq!(
        rows,
        vec![
            vec!["parcel_id", "text", "Parcel ID", "County parcel number"],
            vec!["assessed", "", "Assessed value", "Dollars"],
        ]
    );
}
