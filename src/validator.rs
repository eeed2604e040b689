// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use chrono::{DateTime, NaiveDate, NaiveDateTime};
use hashlink::LinkedHashMap;
use serde::Serialize;

use crate::{
    template::{input_nodes, InputNode, Template, TemplateNode, ValueType},
    values::{parse_float_prefix, TemplateValue, TemplateValues},
};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Human-readable message per input key.
    pub errors: LinkedHashMap<String, String>,
}

pub fn validate_values(template: &Template, values: &TemplateValues) -> ValidationResult {
    validate_nodes(&template.nodes, values)
}

/// Checks every input leaf of the tree for required-ness and type
/// conformance. Calc and procedure nodes are ignored.
pub fn validate_nodes(nodes: &[TemplateNode], values: &TemplateValues) -> ValidationResult {
    let mut errors = LinkedHashMap::new();
    for input in input_nodes(nodes) {
        if let Some(message) = check_input(input, values.get(&input.key)) {
            errors.insert(input.key.clone(), message);
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_input(input: &InputNode, value: Option<&TemplateValue>) -> Option<String> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ if input.required => return Some(format!("{} es obligatorio", input.label)),
        _ => return None,
    };

    if conforms(input.value_type, value) {
        None
    } else {
        Some(type_message(input))
    }
}

fn conforms(value_type: ValueType, value: &TemplateValue) -> bool {
    match (value_type, value) {
        (ValueType::Number, TemplateValue::Number(_)) => true,
        (ValueType::Number, TemplateValue::String(text)) => parse_float_prefix(text).is_some(),
        (ValueType::String, TemplateValue::String(_)) => true,
        (ValueType::Boolean, TemplateValue::Bool(_)) => true,
        (ValueType::Date, TemplateValue::String(text)) => parse_date(text).is_some(),
        _ => false,
    }
}

fn type_message(input: &InputNode) -> String {
    match input.value_type {
        ValueType::Number => format!("{} debe ser un número", input.label),
        ValueType::String => format!("{} debe ser un texto", input.label),
        ValueType::Boolean => format!("{} debe ser verdadero o falso", input.label),
        ValueType::Date => format!("{} debe ser una fecha válida", input.label),
    }
}

/// Accepts RFC 3339 timestamps, ISO dates, and ISO local date-times.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime);
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}
