use std::{fs, path::Path};

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
    adjacent_operands,
    dangling_comma,
    decimals,
    empty,
    function_call,
    incomplete,
    left_assoc_div,
    left_assoc_sub,
    min_arity,
    nested_calls,
    nested_parens,
    number_only,
    parens,
    precedence,
    round_arity,
    unary_minus,
    unknown_character,
    unknown_function,
    unmatched_close,
    unmatched_paren,
    whitespace_everywhere,
}

fn run_test(name: &str) {
    let rootdir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let test_data_dir = rootdir.join("src/parser/calc_expr/parser/tests/testdata");

    let test_file = test_data_dir.join(format!("tests/{}.txt", name));
    let expected_file = test_data_dir.join(format!("expected/{}.txt", name));
    let actual_dir = test_data_dir.join("actual");
    let actual_file = actual_dir.join(format!("{}.txt", name));

    let test = fs::read_to_string(test_file).unwrap();

    let parser = ExprParser::new();
    let result = parser.parse(&test);
    let actual = format_result(result);

    fs::create_dir_all(actual_dir).unwrap();
    fs::write(actual_file, &actual).unwrap();

    let expected = fs::read_to_string(expected_file).unwrap();
    assert_eq!(expected, actual);
}

fn format_result(result: Result<Expr, ExprError>) -> String {
    let mut string = String::new();

    string.push_str("ERROR: ");

    let expr = match result {
        Ok(expr) => expr,
        // Parser messages depend on chumsky's wording, only the class matters here.
        Err(ExprError::Syntax { .. }) => {
            string.push_str("syntax error\n");
            return string;
        }
        Err(err) => {
            string.push_str(&err.to_string());
            string.push('\n');
            return string;
        }
    };

    string.push_str("<None>\n");
    string.push_str("EXPR:\n");
    string.push_str(&expr.to_string());
    string.push('\n');
    string.push_str("VARS:\n");
    string.push_str(&expr.variables().join(", "));
    string.push('\n');

    string
}

#[test]
fn extract_variables_skips_function_names() {
    let parser = ExprParser::new();
    assert_eq!(parser.extract_variables("a + b * c(d)").unwrap(), vec!["a", "b", "d"]);
}

#[test]
fn extract_variables_deduplicates() {
    let parser = ExprParser::new();
    assert_eq!(parser.extract_variables("x * x + y / x").unwrap(), vec!["x", "y"]);
}

#[test]
fn extract_variables_does_not_need_a_valid_expression() {
    let parser = ExprParser::new();
    assert_eq!(parser.extract_variables("a + + (b").unwrap(), vec!["a", "b"]);
    assert!(parser.extract_variables("a # b").is_err());
}

#[test]
fn parser_is_reusable() {
    let parser = ExprParser::new();
    assert!(parser.parse("(a").is_err());
    assert_eq!(parser.parse("a").unwrap().to_string(), "a");
}
