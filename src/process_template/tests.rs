use std::{fs, io, path::Path};

use super::*;

macro_rules! testlist {
    ($($name:ident,)*) => {
    $(
        #[test]
        fn $name() {
            run_test(stringify!($name))
        }
    )*
    }
}

testlist! {
    calc_chain_budget,
    division_by_zero,
    duplicate_key,
    missing_required,
    moisture_content,
    saved_values_win,
    type_errors,
    unsupported_lang,
}

fn run_test(name: &str) {
    let rootdir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let test_data_dir = rootdir.join("src/process_template/tests/testdata");

    let test_file = test_data_dir.join(format!("tests/{}.json", name));
    let test_values_file = test_data_dir.join(format!("tests/{}-values.json", name));
    let expected_file = test_data_dir.join(format!("expected/{}.txt", name));
    let actual_dir = test_data_dir.join("actual");
    let actual_file = actual_dir.join(format!("{}.txt", name));

    let test = fs::read_to_string(&test_file).unwrap();
    let test_values = fs::read_to_string(&test_values_file);
    let test_values = match test_values {
        Ok(test_values) => test_values,
        Err(err) if err.kind() == io::ErrorKind::NotFound => "".to_string(),
        _ => test_values.unwrap(),
    };

    let result = process_template_str(&test, &test_values, &EngineConfig::default())
        .and_then(|report| render_report(&report, OutputFormat::Json));
    let actual = format_result(result);

    fs::create_dir_all(actual_dir).unwrap();
    fs::write(actual_file, &actual).unwrap();

    let expected = fs::read_to_string(expected_file).unwrap();
    assert_eq!(expected, actual);
}

fn format_result(result: Result<String, Error>) -> String {
    let mut string = String::new();

    string.push_str("ERROR: ");
    let output = match result {
        Ok(output) => output,
        Err(err) => {
            string.push_str(&err.to_string());
            return string;
        }
    };

    string.push_str("<None>\n");
    string.push_str("OUTPUT:\n");
    string.push_str(&output);

    string
}

#[test]
fn blank_values_document() {
    assert!(parse_values_str("").unwrap().is_empty());
    assert!(parse_values_str("  \n").unwrap().is_empty());
    assert!(parse_values_str("[1, 2]").is_err());
}

#[test]
fn yaml_report() {
    let template = r#"{
        "schemaVersion": "1",
        "scope": "TECNICA",
        "title": "Suma",
        "nodes": [
            { "type": "input", "key": "a", "label": "A", "valueType": "number" },
            { "type": "calc", "key": "doble", "label": "Doble", "valueType": "number",
              "expr": { "lang": "expr", "value": "a * 2" } }
        ]
    }"#;
    let report = process_template_str(template, r#"{"a": 4}"#, &EngineConfig::default()).unwrap();
    let yaml = render_report(&report, OutputFormat::Yaml).unwrap();

    let value: serde_json::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["title"], "Suma");
    assert_eq!(value["derived"]["doble"], 8.0);
    assert_eq!(value["valid"], true);
}
